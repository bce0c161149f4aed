use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::phone::mask_phone_number;

use super::AppState;
use crate::dto::auth::{VerifiedResponse, VerifyRequest};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/auth/verify
///
/// Consumes the pending code for `phone`, completes the signup or login it
/// was issued for and returns a session token. The code may be sent as
/// `code` or `otp`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "VERIFIED",
///     "flow": "signup",
///     "token": "eyJhbGciOiJIUzI1NiJ9...",
///     "user": { "id": "...", "fullName": "Asha Rao", "role": "COACH", ... }
/// }
/// ```
///
/// ## Errors
/// - 400: Wrong code
/// - 404: No pending code for this phone
/// - 409: Identity claimed by another account while the code was pending
/// - 410: Code expired
pub async fn verify<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    log::info!(
        "Processing verify request for phone: {}",
        mask_phone_number(&request.phone)
    );

    match state.auth_service.verify(&request.phone, &request.code).await {
        Ok(outcome) => {
            log::info!(
                "Phone {} verified ({}), user: {}",
                mask_phone_number(&request.phone),
                outcome.flow,
                outcome.user.id
            );
            HttpResponse::Ok().json(VerifiedResponse::new(
                outcome.flow,
                &outcome.user,
                outcome.token,
            ))
        }
        Err(error) => handle_domain_error(&error),
    }
}
