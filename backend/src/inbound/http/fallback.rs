//! Catch-all handler for unmatched routes.

use actix_web::HttpResponse;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Respond `404 {"error": "unknown endpoint", ...}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bloglist::inbound::http::fallback::unknown_endpoint;
///
/// let app = App::new().default_service(web::to(unknown_endpoint));
/// ```
pub async fn unknown_endpoint() -> ApiResult<HttpResponse> {
    Err(Error::not_found("unknown endpoint"))
}
