use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::phone::mask_phone_number;

use super::client_ip::extract_client_ip;
use super::AppState;
use crate::dto::auth::{LoginRequest, OtpSentResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/auth/login
///
/// Sends a one-time code to a verified account identified by phone and
/// Aadhaar.
///
/// ## Errors
/// - 400: Invalid phone or Aadhaar format
/// - 403: Account exists but was never verified
/// - 404: No account for this phone and Aadhaar pair
/// - 429: Issuance quota exhausted for this phone or IP
pub async fn login<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    let client_ip = extract_client_ip(&req);
    log::info!(
        "Processing login request for phone: {}, ip: {}",
        mask_phone_number(&request.phone),
        client_ip
    );

    match state
        .auth_service
        .start_login(request.into_inner().into(), &client_ip)
        .await
    {
        Ok(tx_id) => HttpResponse::Ok().json(OtpSentResponse::new(tx_id)),
        Err(error) => handle_domain_error(&error),
    }
}
