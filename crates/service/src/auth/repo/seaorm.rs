use std::time::Duration;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use crate::auth::domain::{AuthUser, UserRecord};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::store::{self, DEFAULT_QUERY_TIMEOUT};
use models::user;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, timeout: DEFAULT_QUERY_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn record(u: user::Model) -> UserRecord {
    UserRecord { id: u.id, username: u.username, password_hash: u.password_hash }
}

fn identity(u: user::Model) -> AuthUser {
    AuthUser { id: u.id, username: u.username }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = store::run(self.timeout, async {
            user::find_by_username(&self.db, username).await.map_err(model_db_err)
        })
        .await?;
        Ok(res.map(record))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
        let res = store::run(self.timeout, user::Entity::find_by_id(id).one(&self.db)).await?;
        Ok(res.map(record))
    }

    async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> {
        let res = store::run(self.timeout, async { user::list(&self.db).await.map_err(model_db_err) }).await?;
        Ok(res.into_iter().map(identity).collect())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
        let created = store::run(self.timeout, async {
            user::create(&self.db, username, password_hash).await.map_err(model_db_err)
        })
        .await?;
        Ok(identity(created))
    }

    async fn update_user(&self, id: i32, username: &str, password_hash: Option<&str>) -> Result<Option<AuthUser>, AuthError> {
        let updated = store::run(self.timeout, async {
            let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
                return Ok(None);
            };
            let mut am = found.into_active_model();
            am.username = Set(username.to_string());
            if let Some(hash) = password_hash {
                am.password_hash = Set(hash.to_string());
            }
            am.update(&self.db).await.map(Some)
        })
        .await?;
        Ok(updated.map(identity))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, AuthError> {
        let res = store::run(self.timeout, async {
            let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
                return Ok(false);
            };
            let mut am = found.into_active_model();
            am.password_hash = Set(password_hash.to_string());
            am.update(&self.db).await.map(|_| true)
        })
        .await?;
        Ok(res)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, AuthError> {
        let res = store::run(self.timeout, user::Entity::delete_by_id(id).exec(&self.db)).await?;
        Ok(res.rows_affected > 0)
    }
}

/// Usernames are validated before reaching the store, so only `Db` is expected here.
fn model_db_err(e: models::errors::ModelError) -> sea_orm::DbErr {
    match e {
        models::errors::ModelError::Db(db) => db,
        models::errors::ModelError::Validation(m) => sea_orm::DbErr::Custom(m),
    }
}
