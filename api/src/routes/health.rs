use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use sb_core::repositories::UserRepository;
use sb_core::services::otp::SmsServiceTrait;
use sb_shared::types::{HealthResponse, ServiceHealth};

use crate::routes::auth::AppState;

/// Handler for GET /health
///
/// Reports the number of pending challenges held by the session store.
pub async fn health_check<U, S>(state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    let pending = state.auth_service.otp_service().store().pending_count();

    let mut services = HashMap::new();
    services.insert(
        "otp_store".to_string(),
        ServiceHealth::healthy(format!("{} pending challenges", pending)),
    );

    HttpResponse::Ok().json(HealthResponse::from_services(env!("CARGO_PKG_VERSION"), services))
}
