//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every blog, user and health endpoint, the error
//! schema wrappers from the inbound layer, and the bearer token security
//! scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::blogs::{
    AuthorBlogsBody, AuthorLikesBody, BlogRequest, BlogResponse, BlogStatsResponse,
    FavoriteBlogBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /api/login."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog list API",
        description = "Blog bookmarks with likes, user accounts and bearer token login.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::blogs::blog_stats,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BlogRequest,
        BlogResponse,
        BlogStatsResponse,
        FavoriteBlogBody,
        AuthorBlogsBody,
        AuthorLikesBody,
        CreateUserRequest,
        UserResponse,
        LoginRequest,
        LoginResponse,
    )),
    tags(
        (name = "blogs", description = "Blog entries and aggregations"),
        (name = "users", description = "Accounts and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
