//! Authentication route handlers
//!
//! - Signup and login both issue a one-time code by SMS
//! - Verify completes whichever flow the code was issued for and returns a
//!   session token
//! - Set-password and password-login offer a code-free sign-in
//! - Peek exposes pending codes outside production

pub mod bearer;
pub mod client_ip;
pub mod dev_peek;
pub mod login;
pub mod password_login;
pub mod set_password;
pub mod signup;
pub mod verify;

use std::sync::Arc;

use sb_core::repositories::UserRepository;
use sb_core::services::auth::PhoneAuthService;
use sb_core::services::otp::SmsServiceTrait;

/// Application state that holds shared services
pub struct AppState<U, S>
where
    U: UserRepository,
    S: SmsServiceTrait,
{
    pub auth_service: Arc<PhoneAuthService<U, S>>,
}
