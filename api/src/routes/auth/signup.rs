use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::phone::mask_phone_number;

use super::client_ip::extract_client_ip;
use super::AppState;
use crate::dto::auth::{OtpSentResponse, SignupRequest};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/auth/signup
///
/// Sends a one-time code to the submitted phone. The account is created
/// only when that code is verified.
///
/// # Request Body
///
/// ```json
/// {
///     "fullName": "Asha Rao",
///     "role": "coach",
///     "phone": "+919876543210",
///     "aadhaar": "123456789012",
///     "email": "asha@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "OTP_SENT", "txId": "9b2c6f0e-..." }
/// ```
///
/// ## Errors
/// - 400: Invalid phone or Aadhaar format
/// - 409: Phone or Aadhaar already bound to another identity
/// - 429: Issuance quota exhausted for this phone or IP
pub async fn signup<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<SignupRequest>,
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
        "Processing signup request for phone: {}, ip: {}",
        mask_phone_number(&request.phone),
        client_ip
    );

    match state
        .auth_service
        .start_signup(request.into_inner().into(), &client_ip)
        .await
    {
        Ok(tx_id) => HttpResponse::Ok().json(OtpSentResponse::new(tx_id)),
        Err(error) => handle_domain_error(&error),
    }
}
