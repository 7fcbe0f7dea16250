use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use tracing::error;

/// JSON error response: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let msg = Some(e.to_string());
        match e {
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", msg),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", msg),
            ServiceError::ConstraintViolation(_) => Self::new(StatusCode::CONFLICT, "Constraint Violation", msg),
            ServiceError::StoreUnavailable(_) => Self::new(StatusCode::SERVICE_UNAVAILABLE, "Store Unavailable", msg),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.title, message = ?self.message, "request failed");
        }
        let body = ErrorBody { error: self.title.to_string(), message: self.message };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::ConstraintViolation("x".into()), StatusCode::CONFLICT),
            (ServiceError::StoreUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }
}
