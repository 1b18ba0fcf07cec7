//! Shared helpers for the HTTP integration tests.
//!
//! Each test builds the full routing table over an [`InMemoryStore`], so
//! requests pass through the real services, the JWT adapter and bcrypt.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use bloglist::Trace;
use bloglist::inbound::http::configure;
use bloglist::test_support::{InMemoryStore, http_state};
use serde_json::{Value, json};

/// Application over `store`, wired the way the server wires it.
pub fn app(
    store: &Arc<InMemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let state = http_state(store).expect("test HTTP state");
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}

/// Register `username` with `password` and return the created user JSON.
pub async fn register<S>(app: &S, username: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": username, "name": "Superuser", "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 201, "registration should succeed");
    actix_test::read_body_json(response).await
}

/// Log in and return the bearer token.
pub async fn login<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 200, "login should succeed");
    let body: Value = actix_test::read_body_json(response).await;
    body["token"].as_str().expect("token string").to_owned()
}
