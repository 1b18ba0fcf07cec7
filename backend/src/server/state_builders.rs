//! Builders wiring Diesel repositories and security adapters into
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;

use bloglist::domain::{AuthService, BlogService, UserService};
use bloglist::inbound::http::state::HttpState;
use bloglist::outbound::persistence::{DieselBlogRepository, DieselUserRepository};
use bloglist::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Build the shared HTTP state from the server configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the token service rejects the configured
/// secret.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let tokens = JwtTokenService::new(&config.token_secret, config.token_ttl)
        .map_err(|err| std::io::Error::other(format!("token service setup failed: {err}")))?;
    let tokens = Arc::new(tokens);
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let blog_repo = Arc::new(DieselBlogRepository::new(config.db_pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(config.db_pool.clone()));

    let blogs = Arc::new(BlogService::new(blog_repo));
    let users = Arc::new(UserService::new(Arc::clone(&user_repo), Arc::clone(&hasher)));
    let auth = Arc::new(AuthService::new(user_repo, hasher, tokens));

    Ok(web::Data::new(HttpState {
        blogs: blogs.clone(),
        blogs_query: blogs,
        registration: users.clone(),
        users,
        login: auth.clone(),
        authenticator: auth,
    }))
}
