//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{AppSettings, SettingsError};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bloglist::Trace;
#[cfg(debug_assertions)]
use bloglist::doc::ApiDoc;
use bloglist::inbound::http::configure;
use bloglist::inbound::http::health::{HealthState, live, ready};
use bloglist::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.configure(configure)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the token service rejects its secret,
/// or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use bloglist::domain::TRACE_ID_HEADER;
    use bloglist::test_support::{InMemoryStore, http_state};
    use rstest::rstest;

    fn app_data() -> (web::Data<HealthState>, web::Data<HttpState>) {
        let store = Arc::new(InMemoryStore::default());
        let state = http_state(&store).expect("test state");
        (web::Data::new(HealthState::new()), web::Data::new(state))
    }

    #[rstest]
    #[case("/api/nope")]
    #[case("/definitely/not/here")]
    #[actix_web::test]
    async fn unknown_paths_return_404_with_trace_id(#[case] path: &str) {
        let (health, state) = app_data();
        let app = actix_test::init_service(build_app(health, state)).await;

        let request = actix_test::TestRequest::get().uri(path).to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], "unknown endpoint");
    }

    #[actix_web::test]
    async fn health_probes_are_served_outside_the_api_scope() {
        let (health, state) = app_data();
        health.mark_ready();
        let app = actix_test::init_service(build_app(health, state)).await;

        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn blogs_list_is_empty_for_a_fresh_store() {
        let (health, state) = app_data();
        let app = actix_test::init_service(build_app(health, state)).await;

        let request = actix_test::TestRequest::get().uri("/api/blogs").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body, serde_json::json!([]));
    }
}
