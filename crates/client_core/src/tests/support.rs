//! Recording doubles for the view and network seams.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{NotificationKind, UserId, UserRecord},
    protocol::{RegisterRequest, TokenResponse, UserPatch},
};
use storage::MemoryStore;
use uuid::Uuid;

use crate::{
    api::AccountApi,
    view::Confirmer,
    error::ClientError,
    forms::FormKind,
    notify::Notification,
    session::{Session, TOKEN_STORAGE_KEY},
    tabs::{Tab, TabState},
    view::{AccountView, ProfileView, UserListView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    AuthStatus(bool),
    UserList(UserListView),
    Profile(ProfileView),
    NotificationShown {
        id: Uuid,
        kind: NotificationKind,
        message: String,
    },
    NotificationHidden(Uuid),
    NotificationRemoved(Uuid),
    FormReset(FormKind),
    TabShown(Tab),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn push(&self, event: ViewEvent) {
        self.events.lock().expect("view lock").push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("view lock").clone()
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::NotificationShown { kind, message, .. } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn user_lists(&self) -> Vec<UserListView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::UserList(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn profiles(&self) -> Vec<ProfileView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Profile(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn last_auth_status(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::AuthStatus(status) => Some(status),
            _ => None,
        })
    }
}

impl AccountView for RecordingView {
    fn set_auth_status(&self, authenticated: bool) {
        self.push(ViewEvent::AuthStatus(authenticated));
    }

    fn render_user_list(&self, view: &UserListView) {
        self.push(ViewEvent::UserList(view.clone()));
    }

    fn render_profile(&self, view: &ProfileView) {
        self.push(ViewEvent::Profile(view.clone()));
    }

    fn show_notification(&self, notification: &Notification) {
        self.push(ViewEvent::NotificationShown {
            id: notification.id,
            kind: notification.kind,
            message: notification.message.clone(),
        });
    }

    fn hide_notification(&self, id: Uuid) {
        self.push(ViewEvent::NotificationHidden(id));
    }

    fn remove_notification(&self, id: Uuid) {
        self.push(ViewEvent::NotificationRemoved(id));
    }

    fn reset_form(&self, form: FormKind) {
        self.push(ViewEvent::FormReset(form));
    }

    fn show_tab(&self, tabs: &TabState) {
        self.push(ViewEvent::TabShown(tabs.active()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    IssueToken {
        username: String,
        password: String,
    },
    ListUsers {
        token: Option<String>,
    },
    CurrentUser {
        token: Option<String>,
    },
    Register(RegisterRequest),
    UpdateUser {
        token: Option<String>,
        user_id: UserId,
        patch: UserPatch,
    },
    DeleteUser {
        token: Option<String>,
        user_id: UserId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    IssueToken,
    ListUsers,
    CurrentUser,
    Register,
    UpdateUser,
    DeleteUser,
}

#[derive(Debug, Clone)]
pub enum Failure {
    Http(u16, Option<&'static str>),
    Transport,
}

impl Failure {
    fn to_error(&self) -> ClientError {
        match self {
            Failure::Http(status, detail) => {
                ClientError::http(*status, detail.map(str::to_string))
            }
            Failure::Transport => ClientError::Transport("connection refused".to_string()),
        }
    }
}

pub fn alice() -> UserRecord {
    UserRecord {
        id: UserId(1),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        full_name: Some("Alice Liddell".to_string()),
    }
}

pub fn bob() -> UserRecord {
    UserRecord {
        id: UserId(2),
        username: "bob".to_string(),
        email: "bob@example.com".to_string(),
        full_name: None,
    }
}

pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<Op, Failure>>,
    users: Vec<UserRecord>,
    issued_token: String,
    echo_records: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            users: vec![alice(), bob()],
            issued_token: "fresh-token".to_string(),
            echo_records: true,
        }
    }

    /// Accept mutations without echoing the affected record back.
    pub fn without_echo(mut self) -> Self {
        self.echo_records = false;
        self
    }

    pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
        self.users = users;
        self
    }

    pub fn failing(self, op: Op, failure: Failure) -> Self {
        self.failures.lock().expect("failures lock").insert(op, failure);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                let call_op = match call {
                    ApiCall::IssueToken { .. } => Op::IssueToken,
                    ApiCall::ListUsers { .. } => Op::ListUsers,
                    ApiCall::CurrentUser { .. } => Op::CurrentUser,
                    ApiCall::Register(_) => Op::Register,
                    ApiCall::UpdateUser { .. } => Op::UpdateUser,
                    ApiCall::DeleteUser { .. } => Op::DeleteUser,
                };
                call_op == op
            })
            .count()
    }

    fn record(&self, op: Op, call: ApiCall) -> Result<(), ClientError> {
        self.calls.lock().expect("calls lock").push(call);
        match self.failures.lock().expect("failures lock").get(&op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountApi for FakeApi {
    async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        self.record(
            Op::IssueToken,
            ApiCall::IssueToken {
                username: username.to_string(),
                password: password.to_string(),
            },
        )?;
        Ok(TokenResponse {
            access_token: self.issued_token.clone(),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>, ClientError> {
        self.record(
            Op::ListUsers,
            ApiCall::ListUsers {
                token: token.map(str::to_string),
            },
        )?;
        Ok(self.users.clone())
    }

    async fn current_user(&self, token: Option<&str>) -> Result<UserRecord, ClientError> {
        self.record(
            Op::CurrentUser,
            ApiCall::CurrentUser {
                token: token.map(str::to_string),
            },
        )?;
        Ok(alice())
    }

    async fn register(&self, body: &RegisterRequest) -> Result<Option<UserRecord>, ClientError> {
        self.record(Op::Register, ApiCall::Register(body.clone()))?;
        if !self.echo_records {
            return Ok(None);
        }
        Ok(Some(UserRecord {
            id: UserId(3),
            username: body.username.clone(),
            email: body.email.clone(),
            full_name: Some(body.full_name.clone()),
        }))
    }

    async fn update_user(
        &self,
        token: Option<&str>,
        user_id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, ClientError> {
        self.record(
            Op::UpdateUser,
            ApiCall::UpdateUser {
                token: token.map(str::to_string),
                user_id,
                patch: patch.clone(),
            },
        )?;
        if !self.echo_records {
            return Ok(None);
        }
        let mut user = alice();
        user.id = user_id;
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        Ok(Some(user))
    }

    async fn delete_user(&self, token: Option<&str>, user_id: UserId) -> Result<(), ClientError> {
        self.record(
            Op::DeleteUser,
            ApiCall::DeleteUser {
                token: token.map(str::to_string),
                user_id,
            },
        )
    }
}

/// Answers every prompt the same way and remembers what it was asked.
pub struct RecordingConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.answer
    }
}

pub async fn logged_out_session() -> (Session, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = Session::restore(store.clone()).await.expect("restore");
    (session, store)
}

pub async fn logged_in_session(token: &str) -> (Session, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_item(TOKEN_STORAGE_KEY, token));
    let session = Session::restore(store.clone()).await.expect("restore");
    (session, store)
}
