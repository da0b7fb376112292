//! Request/response orchestration for the account forms.
//!
//! Every operation handles its own failure before returning: the view is
//! updated (placeholder or notification) and the error is logged, so the
//! returned `Err` is informational only.

use std::sync::Arc;

use shared::domain::UserRecord;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    api::AccountApi,
    error::ClientError,
    forms::{DeleteForm, FormKind, LoginForm, RegisterForm, UpdateForm},
    notify::Notifier,
    session::Session,
    tabs::{Tab, TabState},
    view::{AccountView, Confirmer, ProfileView, UserListView},
};

struct OperationMessages {
    name: &'static str,
    success: &'static str,
    rejected: &'static str,
    network: &'static str,
}

const LOGIN: OperationMessages = OperationMessages {
    name: "login",
    success: "Login successful!",
    rejected: "Login failed",
    network: "Network error during login",
};

const CREATE: OperationMessages = OperationMessages {
    name: "create user",
    success: "User created successfully!",
    rejected: "Error creating user",
    network: "Network error during user creation",
};

const UPDATE: OperationMessages = OperationMessages {
    name: "update user",
    success: "User updated successfully!",
    rejected: "Error updating user",
    network: "Network error during user update",
};

const DELETE: OperationMessages = OperationMessages {
    name: "delete user",
    success: "User deleted successfully!",
    rejected: "Error deleting user",
    network: "Network error during user deletion",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct AccountController {
    api: Arc<dyn AccountApi>,
    session: Mutex<Session>,
    view: Arc<dyn AccountView>,
    confirmer: Arc<dyn Confirmer>,
    notifier: Notifier,
    tabs: Mutex<TabState>,
}

impl AccountController {
    pub fn new(
        api: Arc<dyn AccountApi>,
        session: Session,
        view: Arc<dyn AccountView>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Arc<Self> {
        let notifier = Notifier::new(Arc::clone(&view));
        Self::new_with_notifier(api, session, view, confirmer, notifier)
    }

    pub fn new_with_notifier(
        api: Arc<dyn AccountApi>,
        session: Session,
        view: Arc<dyn AccountView>,
        confirmer: Arc<dyn Confirmer>,
        notifier: Notifier,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            session: Mutex::new(session),
            view,
            confirmer,
            notifier,
            tabs: Mutex::new(TabState::default()),
        })
    }

    /// Snapshot of the held token. The session lock is released before any
    /// request goes out.
    async fn token(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_string)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    fn report_failure(&self, messages: &OperationMessages, err: &ClientError) {
        let message = match err {
            ClientError::Transport(_) | ClientError::Decode(_) => {
                error!(operation = messages.name, error = %err, "request did not complete");
                messages.network.to_string()
            }
            ClientError::Storage(_) => {
                error!(operation = messages.name, error = %err, "local storage failure");
                messages.rejected.to_string()
            }
            _ => {
                warn!(operation = messages.name, error = %err, "request rejected");
                err.user_message(messages.rejected)
            }
        };
        self.notifier.error(message);
    }

    /// Page-load entry point: reflect the restored session and render both
    /// data panels.
    pub async fn initialize(&self) -> Result<(), ClientError> {
        let authenticated = self.is_authenticated().await;
        self.view.set_auth_status(authenticated);
        self.view.show_tab(&*self.tabs.lock().await);

        let (users, profile) = futures::join!(self.list_users(), self.fetch_current_user());
        users.and(profile).map(|_| ())
    }

    pub async fn authenticate(&self, form: &LoginForm) -> Result<(), ClientError> {
        let issued = self
            .api
            .issue_token(&form.username, &form.password)
            .await;
        let stored = match issued {
            Ok(token) => self.session.lock().await.login(token.access_token).await,
            Err(err) => Err(err),
        };

        if let Err(err) = stored {
            self.view.set_auth_status(false);
            self.report_failure(&LOGIN, &err);
            return Err(err);
        }

        info!(username = %form.username, "login succeeded");
        self.view.set_auth_status(true);
        self.notifier.success(LOGIN.success);
        self.refresh_all().await;
        Ok(())
    }

    /// Ends the session locally. The server keeps no session state to tear
    /// down.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Err(err) = self.session.lock().await.logout().await {
            error!(error = %err, "failed to clear session token");
            return Err(err);
        }
        self.view.set_auth_status(false);
        self.view.render_profile(&ProfileView::LoginPrompt);
        Ok(())
    }

    async fn refresh_all(&self) {
        // Both refreshes render their own failure placeholder.
        let _ = futures::join!(self.list_users(), self.fetch_current_user());
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let token = self.token().await;
        match self.api.list_users(token.as_deref()).await {
            Ok(users) => {
                self.view
                    .render_user_list(&UserListView::from_users(&users));
                Ok(users)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch users");
                self.view.render_user_list(&UserListView::Error);
                Err(err)
            }
        }
    }

    /// Returns `Ok(None)` without touching the network when logged out.
    pub async fn fetch_current_user(&self) -> Result<Option<UserRecord>, ClientError> {
        let Some(token) = self.token().await else {
            self.view.render_profile(&ProfileView::LoginPrompt);
            return Ok(None);
        };

        match self.api.current_user(Some(&token)).await {
            Ok(user) => {
                self.view.render_profile(&ProfileView::Profile(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch current user");
                self.view.render_profile(&ProfileView::Error);
                Err(err)
            }
        }
    }

    /// The created record is `None` when the server did not echo one.
    pub async fn create_user(
        &self,
        form: &RegisterForm,
    ) -> Result<Option<UserRecord>, ClientError> {
        match self.api.register(&form.to_request()).await {
            Ok(user) => {
                info!(username = %form.username, "user created");
                self.notifier.success(CREATE.success);
                self.view.reset_form(FormKind::Register);
                let _ = self.list_users().await;
                Ok(user)
            }
            Err(err) => {
                self.report_failure(&CREATE, &err);
                Err(err)
            }
        }
    }

    pub async fn update_user(
        &self,
        form: &UpdateForm,
    ) -> Result<Option<UserRecord>, ClientError> {
        let user_id = match form.user_id() {
            Ok(user_id) => user_id,
            Err(err) => {
                self.report_failure(&UPDATE, &err);
                return Err(err);
            }
        };

        let patch = form.to_patch();
        if patch.is_empty() {
            debug!(%user_id, "sending update with no fields set");
        }
        let token = self.token().await;
        match self
            .api
            .update_user(token.as_deref(), user_id, &patch)
            .await
        {
            Ok(user) => {
                info!(%user_id, "user updated");
                self.notifier.success(UPDATE.success);
                self.view.reset_form(FormKind::Update);
                self.refresh_all().await;
                Ok(user)
            }
            Err(err) => {
                self.report_failure(&UPDATE, &err);
                Err(err)
            }
        }
    }

    pub async fn delete_user(&self, form: &DeleteForm) -> Result<DeleteOutcome, ClientError> {
        let user_id = match form.user_id() {
            Ok(user_id) => user_id,
            Err(err) => {
                self.report_failure(&DELETE, &err);
                return Err(err);
            }
        };

        let prompt = format!("Are you sure you want to delete user with ID {user_id}?");
        if !self.confirmer.confirm(&prompt).await {
            info!(%user_id, "user deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let token = self.token().await;
        match self.api.delete_user(token.as_deref(), user_id).await {
            Ok(()) => {
                info!(%user_id, "user deleted");
                self.notifier.success(DELETE.success);
                self.view.reset_form(FormKind::Delete);
                let _ = self.list_users().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                self.report_failure(&DELETE, &err);
                Err(err)
            }
        }
    }

    pub async fn select_tab(&self, tab: Tab) -> TabState {
        let mut tabs = self.tabs.lock().await;
        tabs.select(tab);
        self.view.show_tab(&tabs);
        *tabs
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
