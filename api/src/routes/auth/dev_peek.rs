use actix_web::{web, HttpResponse};

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::phone::mask_phone_number;

use super::AppState;
use crate::dto::auth::{PeekQuery, PeekResponse};

/// Handler for GET /api/auth/dev/peek-otp?phone=...
///
/// Returns the pending code for a phone, or `null`. Only mounted outside
/// production.
pub async fn dev_peek<U, S>(
    state: web::Data<AppState<U, S>>,
    query: web::Query<PeekQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    log::warn!(
        "Diagnostic OTP peek for phone: {}",
        mask_phone_number(&query.phone)
    );

    let otp = state.auth_service.otp_service().peek(&query.phone);
    HttpResponse::Ok().json(PeekResponse { otp })
}
