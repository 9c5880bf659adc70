use super::*;
use crate::net::types::User;

fn user() -> User {
    serde_json::from_value(serde_json::json!({ "id": "u1", "email": "a@b.com", "username": "a" })).unwrap()
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { user: Some(user()), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn initial_state_does_not_redirect() {
    assert!(!should_redirect_unauth(&AuthState::default()));
}
