//! In-memory implementation of the user repository
//!
//! Users live for the lifetime of the process. Phone numbers and Aadhaar
//! hashes are unique across users.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use sb_core::domain::entities::user::User;
use sb_core::errors::DomainError;
use sb_core::repositories::UserRepository;

/// User repository backed by a `HashMap` behind an async lock
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_aadhaar_hash(&self, aadhaar_hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.aadhaar_hash == aadhaar_hash).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        for other in users.values().filter(|u| u.id != user.id) {
            if other.phone == user.phone {
                return Err(DomainError::Conflict {
                    message: "Phone number already registered".to_string(),
                });
            }
            if other.aadhaar_hash == user.aadhaar_hash {
                return Err(DomainError::Conflict {
                    message: "Aadhaar already registered".to_string(),
                });
            }
        }

        let created = !users.contains_key(&user.id);
        users.insert(user.id, user.clone());

        tracing::debug!(
            user_id = %user.id,
            created = created,
            event = "user_saved",
            "Stored user"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::domain::entities::user::UserRole;

    fn user(phone: &str, aadhaar_hash: &str) -> User {
        User::new("Test User", UserRole::Athlete, phone, aadhaar_hash, None)
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("+919876543210", "hash-a")).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_by_phone("+919876543210").await.unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_by_aadhaar_hash("hash-a").await.unwrap(), Some(saved));

        assert_eq!(repo.find_by_phone("+910000000000").await.unwrap(), None);
        assert_eq!(repo.find_by_aadhaar_hash("hash-b").await.unwrap(), None);
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_same_id() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(user("+919876543210", "hash-a")).await.unwrap();

        saved.verify();
        saved.full_name = "Renamed".to_string();
        repo.save(saved.clone()).await.unwrap();

        assert_eq!(repo.count().await, 1);
        let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert!(stored.verified);
        assert_eq!(stored.full_name, "Renamed");
    }

    #[tokio::test]
    async fn test_duplicate_phone_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("+919876543210", "hash-a")).await.unwrap();

        let err = repo.save(user("+919876543210", "hash-b")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_aadhaar_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("+919876543210", "hash-a")).await.unwrap();

        let err = repo.save(user("+919999999999", "hash-a")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }
}
