use serde::{Deserialize, Serialize};

use crate::input::loose;

/// Registration input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[serde(default, deserialize_with = "loose")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub confirm_password: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[serde(default, deserialize_with = "loose")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    #[serde(default, deserialize_with = "loose")]
    pub current_password: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub new_password: Option<String>,
}

/// Admin-side account creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[serde(default, deserialize_with = "loose")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub password: Option<String>,
}

/// Rename, and optionally reset the password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(default, deserialize_with = "loose")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose")]
    pub password: Option<String>,
}

/// Authenticated identity; never carries password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

/// Stored account including the PHC hash string.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

impl UserRecord {
    pub fn identity(&self) -> AuthUser {
        AuthUser { id: self.id, username: self.username.clone() }
    }
}
