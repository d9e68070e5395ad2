use actix_web::{web, HttpResponse};

use mb_core::services::verification::{OtpSender, OtpStore};
use mb_shared::phone::mask_phone_number;
use mb_shared::ApiResponse;

use super::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+15551234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "message": "OTP sent successfully", "expiresIn": 300 },
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 when the phone number is missing or not E.164
/// - 502 when the delivery channel rejects the message
pub async fn send_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + ?Sized + 'static,
    M: OtpSender + ?Sized + 'static,
{
    let request = request.into_inner();

    match state
        .verification_service
        .send_code(&request.phone_number)
        .await
    {
        Ok(result) => {
            tracing::info!(
                phone = %mask_phone_number(&result.phone),
                message_id = %result.message_id,
                "OTP sent"
            );
            HttpResponse::Ok().json(ApiResponse::success(SendOtpResponse {
                message: "OTP sent successfully".to_string(),
                expires_in: result.expires_in_seconds,
            }))
        }
        Err(error) => handle_domain_error(error),
    }
}
