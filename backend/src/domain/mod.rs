//! Domain primitives, services and ports.
//!
//! Purpose: Define the blog list's strongly typed entities and use-cases,
//! independent of HTTP and storage. Inbound adapters call the driving ports
//! in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Blog, BlogDraft, BlogChanges: blog entries and validated inputs.
//! - User, Username: accounts and their owned blog ids.
//! - blog_stats: `total_likes`, `favorite_blog`, `most_blogs`, `most_likes`.
//! - BlogService, UserService, AuthService: driving port implementations.

pub mod auth;
mod auth_service;
pub mod blog;
mod blog_service;
pub mod blog_stats;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::auth::{
    AuthToken, LoginCredentials, LoginSuccess, LoginValidationError, NAME_MAX, PASSWORD_MIN,
    PasswordHash, Registration, RegistrationValidationError, StoredCredentials, TokenClaims,
};
pub use self::auth_service::AuthService;
pub use self::blog::{Blog, BlogChanges, BlogDraft, BlogId, BlogValidationError};
pub use self::blog_service::BlogService;
pub use self::blog_stats::{
    AuthorBlogCount, AuthorLikes, BlogStats, FavoriteBlog, favorite_blog, most_blogs, most_likes,
    total_likes,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("token missing or invalid"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
