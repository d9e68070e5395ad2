use actix_web::{web, HttpResponse};

use mb_core::services::verification::{OtpSender, OtpStore};

use super::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::outcome_response;

/// Handler for POST /api/v1/otp/verify
///
/// Every outcome other than success is a 400 carrying the outcome code;
/// `invalid_otp` also carries `remainingAttempts`.
pub async fn verify_otp<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + ?Sized + 'static,
    M: OtpSender + ?Sized + 'static,
{
    let outcome = state
        .verification_service
        .verify_code(&request.phone_number, &request.otp);

    outcome_response(outcome)
}
