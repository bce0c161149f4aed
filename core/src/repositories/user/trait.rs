//! User repository trait defining the interface for user data persistence.
//!
//! The phone auth flow only needs lookups by id, phone and Aadhaar hash plus
//! an upsert; uniqueness of phone and Aadhaar hash is the implementation's job.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by phone number, compared exactly as submitted
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by the hex hash of their peppered Aadhaar number
    async fn find_by_aadhaar_hash(&self, aadhaar_hash: &str) -> Result<Option<User>, DomainError>;

    /// Insert the user, or replace the stored user with the same id
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Conflict)` - Another user already holds the phone
    ///   or Aadhaar hash
    async fn save(&self, user: User) -> Result<User, DomainError>;
}
