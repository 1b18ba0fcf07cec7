//! HTTP inbound adapter exposing the REST API.

pub mod auth;
pub mod blogs;
pub mod error;
pub mod fallback;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use self::auth::BearerAuth;

/// Register the `/api` routes, JSON error handling and the unknown endpoint
/// fallback.
///
/// The caller supplies `web::Data<HttpState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bloglist::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(
            web::scope("/api")
                .wrap(BearerAuth)
                .service(blogs::list_blogs)
                .service(blogs::blog_stats)
                .service(blogs::create_blog)
                .service(blogs::update_blog)
                .service(blogs::delete_blog)
                .service(users::create_user)
                .service(users::list_users)
                .service(users::login),
        )
        .default_service(web::to(fallback::unknown_endpoint));
}
