//! Client-side orchestration for the user-account API: authentication,
//! user management requests, session persistence and view updates.

pub mod api;
pub mod controller;
pub mod error;
pub mod forms;
pub mod notify;
pub mod session;
pub mod tabs;
pub mod view;

pub use api::{AccountApi, HttpAccountApi, DEFAULT_API_BASE_URL};
pub use controller::{AccountController, DeleteOutcome};
pub use error::ClientError;
pub use forms::{DeleteForm, FormKind, LoginForm, RegisterForm, UpdateForm};
pub use notify::{Notification, Notifier, NOTIFICATION_DISPLAY, NOTIFICATION_FADE};
pub use session::{Session, TOKEN_STORAGE_KEY};
pub use tabs::{Tab, TabState};
pub use view::{AccountView, Confirmer, FixedConfirmer, ProfileView, UserLine, UserListView};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
