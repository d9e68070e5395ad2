use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use mb_core::errors::{DomainError, ValidationError};
use mb_core::services::verification::VerifyOutcome;
use mb_shared::ApiResponse;

use crate::dto::{ErrorResponse, MessageResponse};

/// Convert a failed issuance into an HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_client_error() {
        tracing::debug!(error = %error, "Rejected OTP request");
    } else {
        tracing::error!(error = %error, "OTP issuance failed");
    }

    match error {
        DomainError::ValidationErr(ValidationError::RequiredField { .. }) => {
            ErrorResponse::new("missing_fields", "Phone number is required")
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::ValidationErr(ValidationError::InvalidFormat { .. }) => {
            ErrorResponse::new("invalid_phone_format", "Invalid phone number format")
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Delivery { .. } => {
            ErrorResponse::new("delivery_failed", "Failed to deliver OTP")
                .to_response(StatusCode::BAD_GATEWAY)
        }
        DomainError::Internal { .. } => {
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Convert a verification outcome into an HTTP response
pub fn outcome_response(outcome: VerifyOutcome) -> HttpResponse {
    if outcome.is_success() {
        return HttpResponse::Ok().json(ApiResponse::success(MessageResponse {
            message: outcome.message(),
        }));
    }

    let mut body = ErrorResponse::new(outcome.code(), outcome.message());
    if let Some(remaining) = outcome.remaining_attempts() {
        body = body.with_remaining_attempts(remaining);
    }
    body.to_response(StatusCode::BAD_REQUEST)
}

/// Malformed or non-JSON request bodies
pub fn handle_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");
    let response = ErrorResponse::new("invalid_request", "Request body must be valid JSON")
        .to_response(StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}

pub async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
