//! Rendering seam. The controller describes *what* to show through these
//! models; an [`AccountView`] decides how.

use std::fmt;

use async_trait::async_trait;
use shared::domain::{UserId, UserRecord};
use uuid::Uuid;

use crate::{forms::FormKind, notify::Notification, tabs::TabState};

pub const NO_USERS_PLACEHOLDER: &str = "No users found";
pub const USERS_ERROR_PLACEHOLDER: &str = "Error loading users";
pub const LOGIN_PROMPT_PLACEHOLDER: &str = "Please login to view your details";
pub const PROFILE_ERROR_PLACEHOLDER: &str = "Error loading user data";
pub const FULL_NAME_PLACEHOLDER: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLine {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&UserRecord> for UserLine {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl fmt::Display for UserLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {}) {}", self.username, self.id, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListView {
    /// Never empty; an empty collection renders as [`UserListView::Empty`].
    Users(Vec<UserLine>),
    Empty,
    Error,
}

impl UserListView {
    pub fn from_users(users: &[UserRecord]) -> Self {
        if users.is_empty() {
            Self::Empty
        } else {
            Self::Users(users.iter().map(UserLine::from).collect())
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Users(_) => None,
            Self::Empty => Some(NO_USERS_PLACEHOLDER),
            Self::Error => Some(USERS_ERROR_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    LoginPrompt,
    Profile(UserRecord),
    Error,
}

impl ProfileView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::LoginPrompt => Some(LOGIN_PROMPT_PLACEHOLDER),
            Self::Profile(_) => None,
            Self::Error => Some(PROFILE_ERROR_PLACEHOLDER),
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let Self::Profile(user) = self else {
            return Vec::new();
        };
        vec![
            ("Username", user.username.clone()),
            ("Email", user.email.clone()),
            (
                "Full Name",
                user.display_full_name()
                    .unwrap_or(FULL_NAME_PLACEHOLDER)
                    .to_string(),
            ),
            ("User ID", user.id.to_string()),
        ]
    }
}

pub trait AccountView: Send + Sync {
    fn set_auth_status(&self, authenticated: bool);
    fn render_user_list(&self, view: &UserListView);
    fn render_profile(&self, view: &ProfileView);
    fn show_notification(&self, notification: &Notification);
    /// Starts the notification's exit; it stays in the tree until removed.
    fn hide_notification(&self, id: Uuid);
    fn remove_notification(&self, id: Uuid);
    fn reset_form(&self, form: FormKind);
    fn show_tab(&self, tabs: &TabState);
}

#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way.
pub struct FixedConfirmer(pub bool);

#[async_trait]
impl Confirmer for FixedConfirmer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
