use std::{fmt, str::FromStr};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Login,
    Register,
    Update,
    Delete,
    Users,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Login,
        Tab::Register,
        Tab::Update,
        Tab::Delete,
        Tab::Users,
        Tab::Profile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tab::Login => "login",
            Tab::Register => "register",
            Tab::Update => "update",
            Tab::Delete => "delete",
            Tab::Users => "users",
            Tab::Profile => "profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Login => "Authenticate",
            Tab::Register => "Create User",
            Tab::Update => "Update User",
            Tab::Delete => "Delete User",
            Tab::Users => "All Users",
            Tab::Profile => "My Details",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == wanted)
            .ok_or_else(|| ClientError::InvalidInput(format!("unknown tab '{s}'")))
    }
}

/// Which panel is showing. Exactly one tab is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    active: Tab,
}

impl Default for TabState {
    fn default() -> Self {
        Self::new(Tab::Login)
    }
}

impl TabState {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_visible(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Returns whether the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        changed
    }

    pub fn panels(&self) -> impl Iterator<Item = (Tab, bool)> + '_ {
        Tab::ALL.into_iter().map(|tab| (tab, self.is_visible(tab)))
    }
}
