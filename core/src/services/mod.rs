//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use auth::{
    AadhaarHasher, AuthenticatedSession, LoginRequest, PasswordHasher, PhoneAuthService,
    SignupRequest, VerificationFlow, VerificationOutcome,
};
pub use otp::{
    ChallengeSweeper, Clock, CodeGenerator, IssuedChallenge, OtpService, OtpSessionStore,
    OtpStoreConfig, SmsServiceTrait, SweeperConfig,
};
pub use token::{TokenService, TokenServiceConfig};
