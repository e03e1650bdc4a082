use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::services::ServiceError;

pub mod bills;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod settings;
pub mod stores;

/// Page size applied when a list endpoint is called without one.
pub const DEFAULT_PER_PAGE: usize = 25;

/// Envelope for paginated list responses.
#[derive(Serialize)]
pub struct Paged<T: Serialize> {
    pub total: usize,
    pub items: Vec<T>,
}

/// Maps a service error to its HTTP status. Internal failures are logged
/// with the given context and answered with an opaque 500.
pub(crate) fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({"error": "not found"})),
        ServiceError::CrossTenant => {
            HttpResponse::Forbidden().json(json!({"error": "resource belongs to another store"}))
        }
        ServiceError::Conflict => {
            HttpResponse::Conflict().json(json!({"error": "conflicting resource state"}))
        }
        ServiceError::NoValidItems => {
            HttpResponse::BadRequest().json(json!({"error": "no valid bill items"}))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({"error": message})),
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
