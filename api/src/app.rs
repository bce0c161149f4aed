//! Application state and factory
//!
//! This module wires the concrete collaborators into the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpResponse};

use sb_core::repositories::UserRepository;
use sb_core::services::auth::{AadhaarHasher, PasswordHasher, PhoneAuthService};
use sb_core::services::otp::{OtpService, OtpSessionStore, OtpStoreConfig, SmsServiceTrait};
use sb_core::services::token::{TokenService, TokenServiceConfig};
use sb_infra::repositories::InMemoryUserRepository;
use sb_infra::sms::{create_sms_service, SmsServiceAdapter};
use sb_shared::config::AppConfig;
use sb_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::routes::auth::{
    dev_peek::dev_peek, login::login, password_login::password_login,
    set_password::set_password, signup::signup, verify::verify, AppState,
};
use crate::routes::health::health_check;

/// Application state backed by the in-memory repository and the configured SMS provider
pub type ServerState = AppState<InMemoryUserRepository, SmsServiceAdapter>;

/// Build the production object graph from configuration
pub fn build_state(config: &AppConfig) -> ServerState {
    let store = Arc::new(OtpSessionStore::new(OtpStoreConfig::from(&config.otp)));
    let sms_service = Arc::new(
        SmsServiceAdapter::new(create_sms_service(&config.sms))
            .with_code_ttl_minutes(config.otp.code_ttl_minutes()),
    );
    let otp_service = Arc::new(OtpService::new(store, sms_service));
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));

    let auth_service = PhoneAuthService::new(
        user_repository,
        otp_service,
        AadhaarHasher::from(&config.identity),
        token_service,
    )
    .with_password_hasher(PasswordHasher::from(&config.password));

    AppState {
        auth_service: Arc::new(auth_service),
    }
}

/// Create and configure the application with all dependencies
///
/// The OTP peek route is mounted only when the environment allows
/// diagnostics.
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);
    let query_config = web::QueryConfig::default().error_handler(query_error_handler);

    let mut auth_scope = web::scope("/api/auth")
        .route("/signup", web::post().to(signup::<U, S>))
        .route("/login", web::post().to(login::<U, S>))
        .route("/verify", web::post().to(verify::<U, S>))
        .route("/password-login", web::post().to(password_login::<U, S>))
        .route("/set-password", web::post().to(set_password::<U, S>));

    if config.environment.allows_diagnostics() {
        auth_scope = auth_scope.route("/dev/peek-otp", web::get().to(dev_peek::<U, S>));
    }

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<U, S>))
        .service(auth_scope)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
