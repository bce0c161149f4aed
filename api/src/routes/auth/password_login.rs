use actix_web::{web, HttpResponse};
use validator::Validate;

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::phone::mask_phone_number;

use super::AppState;
use crate::dto::auth::{PasswordLoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/auth/password-login
///
/// Signs in a verified account that has set a password. A 10-digit phone
/// also matches its `+91` form and the reverse.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// ## Errors
/// - 400: Missing phone or password, or invalid phone format
/// - 401: No password set, or wrong password
/// - 403: Account not verified
/// - 404: No account for this phone
pub async fn password_login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<PasswordLoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    log::info!(
        "Processing password login for phone: {}",
        mask_phone_number(&request.phone)
    );

    match state
        .auth_service
        .password_login(&request.phone, &request.password)
        .await
    {
        Ok(session) => {
            log::info!("Password login succeeded, user: {}", session.user.id);
            HttpResponse::Ok().json(TokenResponse {
                token: session.token,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
