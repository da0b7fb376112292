//! Raw form input as the user typed it, and its conversion into request
//! bodies.

use shared::{
    domain::UserId,
    protocol::{RegisterRequest, UserPatch},
};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    Update,
    Delete,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateForm {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl UpdateForm {
    pub fn user_id(&self) -> Result<UserId, ClientError> {
        parse_user_id(&self.user_id)
    }

    /// Only non-empty fields make it into the patch.
    pub fn to_patch(&self) -> UserPatch {
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        UserPatch {
            username: non_empty(&self.username),
            email: non_empty(&self.email),
            full_name: non_empty(&self.full_name),
            password: non_empty(&self.password),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteForm {
    pub user_id: String,
}

impl DeleteForm {
    pub fn user_id(&self) -> Result<UserId, ClientError> {
        parse_user_id(&self.user_id)
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ClientError> {
    raw.parse::<UserId>()
        .map_err(|_| ClientError::InvalidInput(format!("Invalid user ID: '{}'", raw.trim())))
}
