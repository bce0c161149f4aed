//! Request and response bodies for the HTTP API

pub mod auth;

pub use auth::{
    LoginRequest, OtpSentResponse, PeekQuery, PeekResponse, SignupRequest, UserResponse,
    VerifiedResponse, VerifyRequest,
};
