use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use sb_core::errors::AuthError;
use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;

use super::bearer::extract_bearer_token;
use super::AppState;
use crate::dto::auth::{PasswordSetResponse, SetPasswordRequest};
use crate::handlers::error::{handle_domain_error, validation_error};

/// Handler for POST /api/auth/set-password
///
/// Requires `Authorization: Bearer <token>` from verify or password login.
///
/// ## Errors
/// - 400: Password shorter than the minimum length
/// - 401: Missing, invalid or expired token
pub async fn set_password<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<SetPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    let token = match extract_bearer_token(&req) {
        Some(token) => token,
        None => return handle_domain_error(&AuthError::Unauthorized.into()),
    };

    let user = match state.auth_service.authenticate(&token).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(&error),
    };

    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state.auth_service.set_password(user, &request.password).await {
        Ok(user) => {
            log::info!("Password set for user: {}", user.id);
            HttpResponse::Ok().json(PasswordSetResponse::default())
        }
        Err(error) => handle_domain_error(&error),
    }
}
