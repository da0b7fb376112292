//! Terminal rendering of the account view.

use std::{
    io::{self, BufRead, Write},
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use client_core::{
    AccountView, Confirmer, FormKind, Notification, ProfileView, TabState, UserListView,
};
use shared::domain::NotificationKind;
use tracing::debug;
use uuid::Uuid;

pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> AccountView for TerminalView<W> {
    fn set_auth_status(&self, authenticated: bool) {
        let status = if authenticated {
            "Authenticated"
        } else {
            "Not authenticated"
        };
        self.write_lines(&[format!("Status: {status}")]);
    }

    fn render_user_list(&self, view: &UserListView) {
        let mut lines = vec!["Users:".to_string()];
        match view {
            UserListView::Users(users) => {
                lines.extend(users.iter().map(|user| format!("  - {user}")));
            }
            other => lines.extend(other.placeholder().map(|text| format!("  {text}"))),
        }
        self.write_lines(&lines);
    }

    fn render_profile(&self, view: &ProfileView) {
        let mut lines = vec!["My details:".to_string()];
        match view.placeholder() {
            Some(text) => lines.push(format!("  {text}")),
            None => lines.extend(
                view.rows()
                    .into_iter()
                    .map(|(label, value)| format!("  {label}: {value}")),
            ),
        }
        self.write_lines(&lines);
    }

    fn show_notification(&self, notification: &Notification) {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        self.write_lines(&[format!("[{tag}] {}", notification.message)]);
    }

    fn hide_notification(&self, id: Uuid) {
        debug!(%id, "notification hidden");
    }

    fn remove_notification(&self, id: Uuid) {
        debug!(%id, "notification removed");
    }

    fn reset_form(&self, form: FormKind) {
        debug!(?form, "form reset");
    }

    fn show_tab(&self, tabs: &TabState) {
        let labels: Vec<String> = tabs
            .panels()
            .map(|(tab, visible)| {
                if visible {
                    format!("[{}]", tab.title())
                } else {
                    tab.title().to_string()
                }
            })
            .collect();
        self.write_lines(&[format!("Tabs: {}", labels.join(" | "))]);
    }
}

/// Asks on stdout and reads a `y`/`yes` answer from stdin.
pub struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt} [y/N] ")?;
            stdout.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            _ => false,
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
