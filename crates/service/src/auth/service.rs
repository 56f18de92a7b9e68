use std::sync::Arc;

use models::validation::required_fields;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthUser, ChangePasswordInput, CreateUserInput, LoginInput, RegisterInput, UpdateUserInput};
use super::errors::AuthError;
use super::password::{burn_verification, hash_password, verify_password};
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub min_username_len: usize,
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { min_username_len: 3, min_password_len: 6 }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Verify credentials. Unknown users and wrong passwords both yield `None`.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthUser>, AuthError> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            burn_verification(password);
            return Ok(None);
        };
        if verify_password(password, &user.password_hash) {
            Ok(Some(user.identity()))
        } else {
            Ok(None)
        }
    }

    /// Authenticate a login form.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default());
    /// let reg = RegisterInput { username: Some("alice".into()), password: Some("Passw0rd".into()), confirm_password: Some("Passw0rd".into()) };
    /// tokio_test::block_on(svc.register(reg)).unwrap();
    /// let user = tokio_test::block_on(svc.login(LoginInput { username: Some("alice".into()), password: Some("Passw0rd".into()) })).unwrap();
    /// assert_eq!(user.username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthUser, AuthError> {
        required_fields(&[("username", input.username.as_deref()), ("password", input.password.as_deref())])?;
        let (username, password) = (input.username.unwrap_or_default(), input.password.unwrap_or_default());

        match self.authenticate(&username, &password).await? {
            Some(user) => {
                info!(user_id = user.id, username = %user.username, "user_logged_in");
                Ok(user)
            }
            None => {
                warn!(%username, "login_failed");
                Err(AuthError::Unauthorized("Invalid username or password".into()))
            }
        }
    }

    /// Register a new user with a hashed password.
    ///
    /// The caller establishes the session for the returned identity.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default());
    /// let input = RegisterInput { username: Some("alice".into()), password: Some("Passw0rd".into()), confirm_password: Some("Passw0rd".into()) };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        required_fields(&[
            ("username", input.username.as_deref()),
            ("password", input.password.as_deref()),
            ("confirmPassword", input.confirm_password.as_deref()),
        ])?;
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();
        self.check_username(&username)?;
        self.check_password(&password)?;
        if input.confirm_password.as_deref() != Some(password.as_str()) {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }

        let user = self.insert_user(&username, &password).await?;
        info!(user_id = user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Re-authenticate with the current password before storing a new one.
    #[instrument(skip(self, input), fields(user_id = actor.id))]
    pub async fn change_password(&self, actor: &AuthUser, input: ChangePasswordInput) -> Result<(), AuthError> {
        required_fields(&[
            ("currentPassword", input.current_password.as_deref()),
            ("newPassword", input.new_password.as_deref()),
        ])?;
        let new_password = input.new_password.unwrap_or_default();
        self.check_password(&new_password)?;

        let user = self.repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| AuthError::NotFound("User not found".into()))?;
        if !verify_password(input.current_password.as_deref().unwrap_or_default(), &user.password_hash) {
            return Err(AuthError::Unauthorized("Current password is incorrect".into()));
        }

        let hash = hash_password(&new_password)?;
        if !self.repo.update_password(user.id, &hash).await? {
            return Err(AuthError::NotFound("User not found".into()));
        }
        info!(user_id = user.id, "password_changed");
        Ok(())
    }

    /// Fresh view of the session's user; fails if the account was deleted meanwhile.
    pub async fn current_user(&self, actor: &AuthUser) -> Result<AuthUser, AuthError> {
        self.get_user(actor.id).await
    }

    pub async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> {
        let users = self.repo.list_users().await?;
        debug!(count = users.len(), "list users");
        Ok(users)
    }

    pub async fn get_user(&self, id: i32) -> Result<AuthUser, AuthError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(|u| u.identity())
            .ok_or_else(|| AuthError::NotFound("User not found".into()))
    }

    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn create_user(&self, input: CreateUserInput) -> Result<AuthUser, AuthError> {
        required_fields(&[("username", input.username.as_deref()), ("password", input.password.as_deref())])?;
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();
        self.check_username(&username)?;
        self.check_password(&password)?;

        let user = self.insert_user(&username, &password).await?;
        info!(user_id = user.id, username = %user.username, "user_created");
        Ok(user)
    }

    #[instrument(skip(self, input), fields(user_id = id))]
    pub async fn update_user(&self, id: i32, input: UpdateUserInput) -> Result<AuthUser, AuthError> {
        required_fields(&[("username", input.username.as_deref())])?;
        let username = input.username.unwrap_or_default();
        self.check_username(&username)?;
        let password = input.password.filter(|p| !p.is_empty());
        if let Some(p) = &password {
            self.check_password(p)?;
        }

        if self.repo.find_by_id(id).await?.is_none() {
            return Err(AuthError::NotFound("User not found".into()));
        }
        if let Some(other) = self.repo.find_by_username(&username).await? {
            if other.id != id {
                return Err(AuthError::Conflict("Username already exists".into()));
            }
        }

        let hash = password.as_deref().map(hash_password).transpose()?;
        let user = self.repo
            .update_user(id, &username, hash.as_deref())
            .await?
            .ok_or_else(|| AuthError::NotFound("User not found".into()))?;
        info!(user_id = user.id, username = %user.username, password_reset = hash.is_some(), "user_updated");
        Ok(user)
    }

    /// Operators may delete any account except the one they are signed in with.
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn delete_user(&self, actor: &AuthUser, id: i32) -> Result<(), AuthError> {
        if actor.id == id {
            return Err(AuthError::Validation("Cannot delete your own account".into()));
        }
        if !self.repo.delete_user(id).await? {
            return Err(AuthError::NotFound("User not found".into()));
        }
        info!(user_id = id, "user_deleted");
        Ok(())
    }

    /// Create the bootstrap account if no user has that name. Returns whether it was created.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.repo.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        let user = self.insert_user(username, password).await?;
        info!(user_id = user.id, username = %user.username, "default_user_seeded");
        Ok(true)
    }

    async fn insert_user(&self, username: &str, password: &str) -> Result<AuthUser, AuthError> {
        if let Some(existing) = self.repo.find_by_username(username).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict("Username already exists".into()));
        }
        let hash = hash_password(password)?;
        self.repo.create_user(username, &hash).await
    }

    fn check_username(&self, username: &str) -> Result<(), AuthError> {
        if username.chars().count() < self.cfg.min_username_len {
            return Err(AuthError::Validation(format!(
                "Username must be at least {} characters long",
                self.cfg.min_username_len
            )));
        }
        Ok(())
    }

    fn check_password(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.cfg.min_password_len {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters long",
                self.cfg.min_password_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default())
    }

    fn register_input(username: &str, password: &str, confirm: &str) -> RegisterInput {
        RegisterInput {
            username: Some(username.into()),
            password: Some(password.into()),
            confirm_password: Some(confirm.into()),
        }
    }

    fn validation_message(err: AuthError) -> String {
        match err {
            AuthError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let svc = svc();
        let user = svc.register(register_input("alice", "Passw0rd", "Passw0rd")).await.unwrap();
        assert_eq!(user.username, "alice");

        let ok = svc.authenticate("alice", "Passw0rd").await.unwrap();
        assert_eq!(ok, Some(user));
        assert_eq!(svc.authenticate("alice", "wrong").await.unwrap(), None);
        assert_eq!(svc.authenticate("nobody", "Passw0rd").await.unwrap(), None);
    }

    #[tokio::test]
    async fn register_rules_in_order() {
        let svc = svc();
        let err = svc.register(RegisterInput { username: Some("alice".into()), ..Default::default() }).await.unwrap_err();
        assert_eq!(validation_message(err), "Missing required fields: password, confirmPassword");

        let err = svc.register(register_input("al", "Passw0rd", "Passw0rd")).await.unwrap_err();
        assert_eq!(validation_message(err), "Username must be at least 3 characters long");

        let err = svc.register(register_input("alice", "12345", "12345")).await.unwrap_err();
        assert_eq!(validation_message(err), "Password must be at least 6 characters long");

        let err = svc.register(register_input("alice", "Passw0rd", "Passw0rd!")).await.unwrap_err();
        assert_eq!(validation_message(err), "Passwords do not match");

        svc.register(register_input("alice", "Passw0rd", "Passw0rd")).await.unwrap();
        let err = svc.register(register_input("alice", "Other123", "Other123")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict(m) if m == "Username already exists"));
    }

    #[tokio::test]
    async fn login_failures_are_unauthorized() {
        let svc = svc();
        svc.register(register_input("alice", "Passw0rd", "Passw0rd")).await.unwrap();

        let err = svc
            .login(LoginInput { username: Some("alice".into()), password: Some("nope".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(m) if m == "Invalid username or password"));

        let err = svc.login(LoginInput::default()).await.unwrap_err();
        assert_eq!(validation_message(err), "Missing required fields: username, password");
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = svc();
        let user = svc.register(register_input("alice", "Passw0rd", "Passw0rd")).await.unwrap();

        let wrong = ChangePasswordInput { current_password: Some("bad".into()), new_password: Some("NewPass1".into()) };
        let err = svc.change_password(&user, wrong).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(m) if m == "Current password is incorrect"));

        let ok = ChangePasswordInput { current_password: Some("Passw0rd".into()), new_password: Some("NewPass1".into()) };
        svc.change_password(&user, ok).await.unwrap();
        assert!(svc.authenticate("alice", "NewPass1").await.unwrap().is_some());
        assert!(svc.authenticate("alice", "Passw0rd").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn admin_user_management() {
        let svc = svc();
        let admin = svc.register(register_input("admin", "admin123", "admin123")).await.unwrap();
        let bob = svc
            .create_user(CreateUserInput { username: Some("bob".into()), password: Some("secret1".into()) })
            .await
            .unwrap();

        let listed = svc.list_users().await.unwrap();
        assert_eq!(listed, vec![bob.clone(), admin.clone()]);

        let err = svc
            .update_user(bob.id, UpdateUserInput { username: Some("admin".into()), password: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));

        let renamed = svc
            .update_user(bob.id, UpdateUserInput { username: Some("robert".into()), password: Some("secret2".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.username, "robert");
        assert!(svc.authenticate("robert", "secret2").await.unwrap().is_some());

        let err = svc.delete_user(&admin, admin.id).await.unwrap_err();
        assert_eq!(validation_message(err), "Cannot delete your own account");

        svc.delete_user(&admin, bob.id).await.unwrap();
        assert!(matches!(svc.get_user(bob.id).await, Err(AuthError::NotFound(_))));
        assert!(matches!(svc.delete_user(&admin, bob.id).await, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let svc = svc();
        assert!(svc.ensure_user("admin", "admin123").await.unwrap());
        assert!(!svc.ensure_user("admin", "admin123").await.unwrap());
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }
}
