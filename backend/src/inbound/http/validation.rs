//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes `400 invalid_request` with
//! `details: {"field": ..., "code": ...}` so clients can point at the input.

use serde_json::json;

use crate::domain::{
    BlogId, BlogValidationError, Error, LoginValidationError, RegistrationValidationError,
    UserValidationError,
};

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Parse a blog id from a path segment.
///
/// # Examples
/// ```
/// use bloglist::inbound::http::validation::parse_blog_id;
///
/// assert!(parse_blog_id("5a3d5da59070081a82a3445").is_err());
/// ```
pub fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "value": raw, "code": "malformatted_id" }))
    })
}

pub(crate) fn blog_validation_error(err: BlogValidationError) -> Error {
    let code = match err {
        BlogValidationError::InvalidId => "malformatted_id",
        BlogValidationError::MissingTitle | BlogValidationError::MissingUrl => "missing_field",
        BlogValidationError::NegativeLikes { .. } => "negative_likes",
    };
    field_error(err.to_string(), err.field(), code)
}

pub(crate) fn registration_validation_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::Username(UserValidationError::EmptyUsername)
        | RegistrationValidationError::MissingPassword => "missing_field",
        RegistrationValidationError::Username(UserValidationError::UsernameTooShort { .. })
        | RegistrationValidationError::PasswordTooShort { .. } => "too_short",
        RegistrationValidationError::Username(UserValidationError::UsernameTooLong { .. })
        | RegistrationValidationError::NameTooLong { .. } => "too_long",
        RegistrationValidationError::Username(UserValidationError::InvalidId) => "invalid",
    };
    field_error(err.to_string(), err.field(), code)
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(err.to_string(), field, "missing_field")
}
