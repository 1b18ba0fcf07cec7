//! Bearer token handling.
//!
//! [`BearerAuth`] copies the token from `Authorization: Bearer <token>` into
//! the request extensions and never rejects a request. Handlers that need a
//! user take a [`CurrentUser`] argument, which verifies the token and loads
//! the user, failing with `401` otherwise.

use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "bearer ";

/// Raw token taken from the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// Extract a bearer token. The scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<BearerToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let prefix = value.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = value.get(BEARER_PREFIX.len()..)?.trim();
    (!token.is_empty()).then(|| BearerToken(token.to_owned()))
}

/// Middleware storing the request's [`BearerToken`], if any.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bloglist::inbound::http::auth::BearerAuth;
///
/// let app = App::new().service(web::scope("/api").wrap(BearerAuth));
/// ```
#[derive(Clone, Copy, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware { service }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = bearer_token(req.headers()) {
            req.extensions_mut().insert(token);
        }
        self.service.call(req)
    }
}

/// The authenticated user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    #[must_use]
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.extensions().get::<BearerToken>().cloned();
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let Some(token) = token else {
                return Err(Error::unauthorized("token missing or invalid").into());
            };
            let Some(state) = state else {
                return Err(Error::internal("HTTP state is not configured").into());
            };
            let user = state.authenticator.authenticate(token.as_str()).await?;
            Ok(Self(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{StateBuilder, user_named};
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("valid header"),
        );
        headers
    }

    #[rstest]
    #[case("Bearer abc.def", Some("abc.def"))]
    #[case("bearer abc.def", Some("abc.def"))]
    #[case("BEARER   abc.def  ", Some("abc.def"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("Bearer ", None)]
    #[case("Bearer", None)]
    #[case("abc.def", None)]
    #[case("Bëarer abc.def", None)]
    fn extracts_bearer_tokens(#[case] header: &str, #[case] expected: Option<&str>) {
        let token = bearer_token(&headers_with(header));
        assert_eq!(token.as_ref().map(BearerToken::as_str), expected);
    }

    #[rstest]
    fn missing_header_has_no_token() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    async fn whoami(user: CurrentUser) -> HttpResponse {
        HttpResponse::Ok().body(user.into_inner().username().to_string())
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer wrong"), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer good"), StatusCode::OK)]
    #[actix_web::test]
    async fn current_user_requires_a_valid_token(
        #[case] header: Option<&'static str>,
        #[case] expected: StatusCode,
    ) {
        let user = user_named("root");
        let state = StateBuilder::default()
            .authenticator(move |token| match token {
                "good" => Ok(user.clone()),
                _ => Err(Error::unauthorized("token missing or invalid")),
            })
            .build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(BearerAuth)
                .route("/", web::get().to(whoami)),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri("/");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), expected);
        if expected == StatusCode::UNAUTHORIZED {
            let body: Error = actix_test::read_body_json(response).await;
            assert_eq!(body.code(), ErrorCode::Unauthorized);
        }
    }

    #[actix_web::test]
    async fn routes_without_current_user_ignore_bad_tokens() {
        let app = actix_test::init_service(
            App::new()
                .wrap(BearerAuth)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, "Bearer garbage"))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    fn debug_output_hides_token() {
        let token = BearerToken("secret".to_owned());
        assert_eq!(format!("{token:?}"), "BearerToken(..)");
    }
}
