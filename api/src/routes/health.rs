use actix_web::{web, HttpResponse};
use chrono::Utc;

use mb_core::services::verification::{OtpSender, OtpStore};
use mb_shared::HealthResponse;

use super::otp::AppState;

/// Health check endpoint handler
pub async fn health_check<S, M>(state: web::Data<AppState<S, M>>) -> HttpResponse
where
    S: OtpStore + ?Sized + 'static,
    M: OtpSender + ?Sized + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "msgbridge-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pending_challenges: state.verification_service.store().len(),
        timestamp: Utc::now(),
    })
}
