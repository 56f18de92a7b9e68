use async_trait::async_trait;

use super::domain::{AuthUser, UserRecord};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError>;
    /// Newest accounts first.
    async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError>;
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError>;
    /// `password_hash` of `None` keeps the current password.
    async fn update_user(&self, id: i32, username: &str, password_hash: Option<&str>) -> Result<Option<AuthUser>, AuthError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, AuthError>;
    async fn delete_user(&self, id: i32) -> Result<bool, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<BTreeMap<i32, UserRecord>>, // key: user id
    }

    impl MockAuthRepository {
        fn users(&self) -> Result<MutexGuard<'_, BTreeMap<i32, UserRecord>>, AuthError> {
            self.users.lock().map_err(|_| AuthError::Repository("mock store poisoned".into()))
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.users()?.values().find(|u| u.username == username).cloned())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.users()?.get(&id).cloned())
        }

        async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> {
            Ok(self.users()?.values().rev().map(UserRecord::identity).collect())
        }

        async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users()?;
            if users.values().any(|u| u.username == username) {
                return Err(AuthError::Conflict("Username already exists".into()));
            }
            let id = users.keys().next_back().copied().unwrap_or(0) + 1;
            let user = UserRecord { id, username: username.to_string(), password_hash: password_hash.to_string() };
            users.insert(id, user.clone());
            Ok(user.identity())
        }

        async fn update_user(&self, id: i32, username: &str, password_hash: Option<&str>) -> Result<Option<AuthUser>, AuthError> {
            let mut users = self.users()?;
            if users.values().any(|u| u.username == username && u.id != id) {
                return Err(AuthError::Conflict("Username already exists".into()));
            }
            Ok(users.get_mut(&id).map(|u| {
                u.username = username.to_string();
                if let Some(hash) = password_hash {
                    u.password_hash = hash.to_string();
                }
                u.identity()
            }))
        }

        async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, AuthError> {
            let mut users = self.users()?;
            Ok(users.get_mut(&id).map(|u| u.password_hash = password_hash.to_string()).is_some())
        }

        async fn delete_user(&self, id: i32) -> Result<bool, AuthError> {
            Ok(self.users()?.remove(&id).is_some())
        }
    }
}
