use client_core::{Tab, UserLine};
use shared::domain::{UserId, UserRecord};

use super::*;

fn rendered(render: impl FnOnce(&TerminalView<Vec<u8>>)) -> String {
    let view = TerminalView::new(Vec::new());
    render(&view);
    String::from_utf8(view.into_inner()).expect("utf8")
}

#[test]
fn user_list_renders_one_line_per_user() {
    let output = rendered(|view| {
        view.render_user_list(&UserListView::Users(vec![UserLine {
            id: UserId(1),
            username: "alice".into(),
            email: "alice@example.com".into(),
        }]))
    });
    assert_eq!(output, "Users:\n  - alice (ID: 1) alice@example.com\n");
}

#[test]
fn empty_user_list_renders_placeholder() {
    let output = rendered(|view| view.render_user_list(&UserListView::Empty));
    assert_eq!(output, "Users:\n  No users found\n");
}

#[test]
fn profile_renders_rows_and_missing_full_name() {
    let output = rendered(|view| {
        view.render_profile(&ProfileView::Profile(UserRecord {
            id: UserId(4),
            username: "dora".into(),
            email: "dora@example.com".into(),
            full_name: None,
        }))
    });
    assert!(output.contains("  Full Name: Not specified\n"));
    assert!(output.contains("  User ID: 4\n"));
}

#[test]
fn login_prompt_and_tabs_render() {
    let output = rendered(|view| {
        view.render_profile(&ProfileView::LoginPrompt);
        view.show_tab(&TabState::new(Tab::Delete));
    });
    assert!(output.contains("Please login to view your details"));
    assert!(output.contains("[Delete User]"));
    assert!(!output.contains("[Authenticate]"));
}

#[test]
fn notifications_are_tagged_by_kind() {
    let output = rendered(|view| {
        view.show_notification(&Notification::new(NotificationKind::Error, "Login failed"));
    });
    assert_eq!(output, "[error] Login failed\n");
}

#[test]
fn only_yes_answers_confirm() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative("\n"));
    assert!(!is_affirmative("nope"));
}
