//! Maps domain and request errors onto HTTP responses
//!
//! Every error body is an [`ErrorResponse`] with a stable `error` code.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use sb_core::errors::{AuthError, DomainError, OtpError, TokenError};
use sb_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, response) = match error {
        DomainError::Otp(otp_error) => map_otp_error(otp_error),
        DomainError::Auth(auth_error) => map_auth_error(auth_error),
        DomainError::Token(token_error) => map_token_error(token_error),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Conflict { message } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::IDENTITY_CONFLICT, message.clone()),
        ),
        DomainError::Internal { .. } => internal_error(),
    };

    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::info!("Request rejected ({}): {}", status.as_u16(), error);
    }

    HttpResponse::build(status).json(response)
}

fn map_otp_error(error: &OtpError) -> (StatusCode, ErrorResponse) {
    match error {
        OtpError::RateLimited { scope } => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorResponse::new(error_codes::RATE_LIMITED, error.to_string())
                .add_detail("scope", scope.as_str()),
        ),
        OtpError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::OTP_NOT_FOUND, error.to_string()),
        ),
        OtpError::Expired => (
            StatusCode::GONE,
            ErrorResponse::new(error_codes::OTP_EXPIRED, error.to_string()),
        ),
        OtpError::Invalid => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::OTP_INVALID, error.to_string()),
        ),
    }
}

fn map_auth_error(error: &AuthError) -> (StatusCode, ErrorResponse) {
    let (status, code) = match error {
        AuthError::InvalidPhoneFormat => (StatusCode::BAD_REQUEST, error_codes::PHONE_INVALID),
        AuthError::InvalidAadhaarFormat => (StatusCode::BAD_REQUEST, error_codes::AADHAAR_INVALID),
        AuthError::AadhaarRegisteredToOtherPhone | AuthError::PhoneRegisteredToOtherAadhaar => {
            (StatusCode::CONFLICT, error_codes::IDENTITY_CONFLICT)
        }
        AuthError::AccountNotFound => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND),
        AuthError::AccountNotVerified => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_NOT_VERIFIED),
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
        AuthError::MalformedPayload { .. } => return internal_error(),
        AuthError::MissingCredentials | AuthError::PasswordTooShort { .. } => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS),
        AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
    };
    (status, ErrorResponse::new(code, error.to_string()))
}

fn map_token_error(error: &TokenError) -> (StatusCode, ErrorResponse) {
    match error {
        TokenError::TokenGenerationFailed => internal_error(),
        TokenError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::TOKEN_EXPIRED, error.to_string()),
        ),
        TokenError::InvalidTokenFormat | TokenError::InvalidClaims => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, "Unauthorized"),
        ),
    }
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
    )
}

/// 400 response listing the fields that failed validation
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    log::warn!("Validation failed: {:?}", response.details);
    HttpResponse::BadRequest().json(response)
}

/// Malformed or oversized JSON bodies become a 400 with the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body: {}", err);
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Missing or malformed query strings become a 400 with the standard error body
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query string: {}", err);
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string()));
    InternalError::from_response(err, response).into()
}
