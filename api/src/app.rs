//! Application factory
//!
//! Builds the Actix-web application around an already wired
//! [`AppState`]; `main` and the integration tests share it.

use actix_web::{middleware::Logger, web, App};

use mb_core::services::verification::{OtpSender, OtpStore};

use crate::handlers::{handle_json_error, not_found};
use crate::routes::health::health_check;
use crate::routes::otp::{send_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, M>(
    app_state: web::Data<AppState<S, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + ?Sized + 'static,
    M: OtpSender + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(handle_json_error))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<S, M>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/otp")
                    .route("/send", web::post().to(send_otp::<S, M>))
                    .route("/verify", web::post().to(verify_otp::<S, M>)),
            ),
        )
        .default_service(web::route().to(not_found))
}
