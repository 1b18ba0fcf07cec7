//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see domain ports,
//! so tests can swap any of them for a double.

use std::sync::Arc;

use crate::domain::ports::{
    BlogsCommand, BlogsQuery, LoginService, TokenAuthenticator, UserRegistration, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub blogs: Arc<dyn BlogsCommand>,
    pub blogs_query: Arc<dyn BlogsQuery>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub login: Arc<dyn LoginService>,
    /// Resolves bearer tokens for the `CurrentUser` extractor.
    pub authenticator: Arc<dyn TokenAuthenticator>,
}
