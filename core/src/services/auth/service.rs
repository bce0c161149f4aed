//! Main phone authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use sb_shared::phone::{is_valid_phone, mask_phone_number};
use sb_shared::validation::is_valid_aadhaar;

use crate::domain::entities::challenge::OtpPayload;
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::otp::{OtpService, SmsServiceTrait};
use crate::services::token::TokenService;

use super::identity::AadhaarHasher;
use super::password::PasswordHasher;
use super::types::{
    AuthenticatedSession, LoginRequest, SignupRequest, VerificationFlow, VerificationOutcome,
};

const KEY_TYPE: &str = "type";
const KEY_FULL_NAME: &str = "fullName";
const KEY_ROLE: &str = "role";
const KEY_PHONE: &str = "phone";
const KEY_AADHAAR: &str = "aadhaar";
const KEY_EMAIL: &str = "email";
const KEY_USER_ID: &str = "userId";

const INDIA_PREFIX: &str = "+91";

/// Signup, login and verification over one-time codes
pub struct PhoneAuthService<U: UserRepository, S: SmsServiceTrait> {
    /// User repository for persistence
    user_repository: Arc<U>,
    /// One-time code issuance and verification
    otp_service: Arc<OtpService<S>>,
    /// Aadhaar hashing with the configured pepper
    hasher: AadhaarHasher,
    /// Session token signing
    token_service: Arc<TokenService>,
    passwords: PasswordHasher,
}

impl<U: UserRepository, S: SmsServiceTrait + 'static> PhoneAuthService<U, S> {
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<S>>,
        hasher: AadhaarHasher,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            hasher,
            token_service,
            passwords: PasswordHasher::default(),
        }
    }

    pub fn with_password_hasher(mut self, passwords: PasswordHasher) -> Self {
        self.passwords = passwords;
        self
    }

    pub fn otp_service(&self) -> &Arc<OtpService<S>> {
        &self.otp_service
    }

    /// Start a signup by sending a code to the submitted phone
    ///
    /// The signup fields travel in the challenge payload; nothing is
    /// persisted until the code is verified.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Transaction id of the issued code
    /// * `Err(DomainError)` - Invalid format, identity conflict or rate limit
    pub async fn start_signup(&self, request: SignupRequest, client_ip: &str) -> DomainResult<String> {
        validate_identity(&request.phone, &request.aadhaar)?;

        let aadhaar_hash = self.hasher.hash(&request.aadhaar);
        self.check_identity_conflicts(&request.phone, &aadhaar_hash).await?;

        let role = UserRole::parse_or_default(request.role.as_deref());
        let mut payload = OtpPayload::new();
        payload.insert(KEY_TYPE.to_string(), VerificationFlow::Signup.as_str().to_string());
        payload.insert(KEY_FULL_NAME.to_string(), request.full_name.unwrap_or_default());
        payload.insert(KEY_ROLE.to_string(), role.as_str().to_string());
        payload.insert(KEY_PHONE.to_string(), request.phone.clone());
        payload.insert(KEY_AADHAAR.to_string(), request.aadhaar);
        if let Some(email) = non_blank(request.email) {
            payload.insert(KEY_EMAIL.to_string(), email);
        }

        let transaction_id = self.otp_service.issue(&request.phone, client_ip, payload).await?;

        tracing::info!(
            phone = %mask_phone_number(&request.phone),
            role = %role,
            transaction_id = %transaction_id,
            event = "signup_started",
            "Signup code issued"
        );
        Ok(transaction_id)
    }

    /// Start a login for an existing, verified account
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Transaction id of the issued code
    /// * `Err(AuthError::AccountNotFound)` - No account for this phone and Aadhaar pair
    /// * `Err(AuthError::AccountNotVerified)` - Signup was never completed
    pub async fn start_login(&self, request: LoginRequest, client_ip: &str) -> DomainResult<String> {
        validate_identity(&request.phone, &request.aadhaar)?;

        let aadhaar_hash = self.hasher.hash(&request.aadhaar);
        let user = self
            .user_repository
            .find_by_phone(&request.phone)
            .await?
            .filter(|user| user.aadhaar_hash == aadhaar_hash)
            .ok_or(AuthError::AccountNotFound)?;

        if !user.verified {
            tracing::info!(
                phone = %mask_phone_number(&request.phone),
                user_id = %user.id,
                event = "login_rejected_unverified",
                "Login attempted on an unverified account"
            );
            return Err(AuthError::AccountNotVerified.into());
        }

        let mut payload = OtpPayload::new();
        payload.insert(KEY_TYPE.to_string(), VerificationFlow::Login.as_str().to_string());
        payload.insert(KEY_USER_ID.to_string(), user.id.to_string());

        let transaction_id = self.otp_service.issue(&request.phone, client_ip, payload).await?;

        tracing::info!(
            phone = %mask_phone_number(&request.phone),
            user_id = %user.id,
            transaction_id = %transaction_id,
            event = "login_started",
            "Login code issued"
        );
        Ok(transaction_id)
    }

    /// Verify a code, complete the flow it was issued for and sign a session token
    ///
    /// A payload without a `type` entry is treated as a signup.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerificationOutcome> {
        let payload = self.otp_service.verify(phone, code)?;

        let flow = match payload.get(KEY_TYPE).map(String::as_str) {
            Some("login") => VerificationFlow::Login,
            _ => VerificationFlow::Signup,
        };

        let user = match flow {
            VerificationFlow::Login => self.complete_login(&payload).await?,
            VerificationFlow::Signup => self.complete_signup(phone, payload).await?,
        };

        let token = self.token_service.issue_token(&user)?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            user_id = %user.id,
            flow = %flow,
            event = "phone_verified",
            "Phone verification completed"
        );
        Ok(VerificationOutcome { flow, user, token })
    }

    /// Sign in with phone and password
    ///
    /// A bare 10-digit phone also matches the account stored under `+91`, and
    /// a `+91` number also matches the account stored under its bare 10 digits.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedSession)` - The user and a fresh session token
    /// * `Err(AuthError::MissingCredentials)` - Blank phone or password
    /// * `Err(AuthError::AccountNotFound)` - No account under any candidate phone
    /// * `Err(AuthError::AccountNotVerified)` - Signup was never completed
    /// * `Err(AuthError::InvalidCredentials)` - No password set, or it does not match
    pub async fn password_login(&self, phone: &str, password: &str) -> DomainResult<AuthenticatedSession> {
        let phone = phone.trim();
        if phone.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }
        if !is_valid_phone(phone) {
            return Err(AuthError::InvalidPhoneFormat.into());
        }

        let mut found = None;
        for candidate in phone_lookup_candidates(phone) {
            found = self.user_repository.find_by_phone(&candidate).await?;
            if found.is_some() {
                break;
            }
        }
        let user = found.ok_or(AuthError::AccountNotFound)?;

        if !user.verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        let matches = user
            .password_hash
            .as_deref()
            .map(|hash| self.passwords.verify(password, hash))
            .unwrap_or(false);
        if !matches {
            tracing::info!(
                phone = %mask_phone_number(phone),
                user_id = %user.id,
                has_password = user.has_password(),
                event = "password_login_rejected",
                "Password login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue_token(&user)?;
        tracing::info!(
            phone = %mask_phone_number(phone),
            user_id = %user.id,
            event = "password_login_succeeded",
            "Password login succeeded"
        );
        Ok(AuthenticatedSession { user, token })
    }

    /// Resolve the user a session token was issued to
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Token)` - Token invalid or expired
    /// * `Err(AuthError::Unauthorized)` - The user no longer exists
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = self.token_service.validate_token(token)?;
        let user_id = claims.user_id().map_err(|_| AuthError::Unauthorized)?;

        Ok(self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?)
    }

    /// Set or replace the password of `user`
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::PasswordTooShort)` - Below the configured minimum length
    pub async fn set_password(&self, mut user: User, password: &str) -> DomainResult<User> {
        let hash = self.passwords.hash(password)?;
        user.set_password_hash(hash);
        let user = self.user_repository.save(user).await?;

        tracing::info!(
            phone = %mask_phone_number(&user.phone),
            user_id = %user.id,
            event = "password_set",
            "Password set"
        );
        Ok(user)
    }

    async fn complete_login(&self, payload: &OtpPayload) -> DomainResult<User> {
        let user_id = payload
            .get(KEY_USER_ID)
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| AuthError::MalformedPayload {
                field: KEY_USER_ID.to_string(),
            })?;

        Ok(self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?)
    }

    async fn complete_signup(&self, phone: &str, mut payload: OtpPayload) -> DomainResult<User> {
        let aadhaar = payload
            .remove(KEY_AADHAAR)
            .ok_or_else(|| AuthError::MalformedPayload {
                field: KEY_AADHAAR.to_string(),
            })?;
        let phone = payload.remove(KEY_PHONE).unwrap_or_else(|| phone.to_string());
        let full_name = payload.remove(KEY_FULL_NAME).unwrap_or_default();
        let role = UserRole::parse_or_default(payload.get(KEY_ROLE).map(String::as_str));
        let email = non_blank(payload.remove(KEY_EMAIL));

        let aadhaar_hash = self.hasher.hash(&aadhaar);

        // Another signup may have completed while this code was pending
        self.check_identity_conflicts(&phone, &aadhaar_hash).await?;

        let user = match self.user_repository.find_by_phone(&phone).await? {
            Some(mut existing) => {
                existing.apply_signup(&full_name, role, email, aadhaar_hash);
                existing
            }
            None => {
                let mut user = User::new(full_name, role, phone, aadhaar_hash, email);
                user.verify();
                user
            }
        };

        self.user_repository.save(user).await
    }

    async fn check_identity_conflicts(&self, phone: &str, aadhaar_hash: &str) -> DomainResult<()> {
        if let Some(holder) = self.user_repository.find_by_aadhaar_hash(aadhaar_hash).await? {
            if holder.phone != phone {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    event = "identity_conflict",
                    "Aadhaar already registered with a different phone"
                );
                return Err(AuthError::AadhaarRegisteredToOtherPhone.into());
            }
        }

        if let Some(holder) = self.user_repository.find_by_phone(phone).await? {
            if holder.aadhaar_hash != aadhaar_hash {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    event = "identity_conflict",
                    "Phone already registered with a different Aadhaar"
                );
                return Err(AuthError::PhoneRegisteredToOtherAadhaar.into());
            }
        }

        Ok(())
    }
}

fn validate_identity(phone: &str, aadhaar: &str) -> Result<(), AuthError> {
    if !is_valid_aadhaar(aadhaar) {
        return Err(AuthError::InvalidAadhaarFormat);
    }
    if !is_valid_phone(phone) {
        return Err(AuthError::InvalidPhoneFormat);
    }
    Ok(())
}

fn phone_lookup_candidates(phone: &str) -> Vec<String> {
    let is_local = |digits: &str| digits.len() == 10 && digits.bytes().all(|b| b.is_ascii_digit());

    let mut candidates = vec![phone.to_string()];
    if is_local(phone) {
        candidates.push(format!("{}{}", INDIA_PREFIX, phone));
    } else if let Some(local) = phone.strip_prefix(INDIA_PREFIX).filter(|d| is_local(*d)) {
        candidates.push(local.to_string());
    }
    candidates
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
