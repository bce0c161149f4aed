//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::TokenError;
use crate::services::otp::{Clock, SystemClock};

use super::config::TokenServiceConfig;

/// Issues and validates HS256 session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Token service stamping `iat` and `exp` from the given clock
    ///
    /// Validation always checks expiry against the wall clock.
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Signs a session token for `user`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue_token(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims::new(
            user,
            &self.config.issuer,
            self.clock.now(),
            self.config.access_token_expiry,
        );
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenExpired)` - Past its `exp`
    /// * `Err(TokenError::InvalidTokenFormat)` - Malformed, wrongly signed or foreign issuer
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidTokenFormat,
            })
    }
}
