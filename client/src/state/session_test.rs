use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::net::types::TokenResponse;
use crate::state::auth::AuthState;
use crate::state::toast::ToastKind;

// =============================================================
// Fakes
// =============================================================

#[derive(Clone, Debug, Default)]
struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        store
    }

    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone().filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// In-memory backend: accounts keyed by email, sessions keyed by token.
#[derive(Default)]
struct FakeApi {
    accounts: RefCell<HashMap<String, (String, User)>>,
    sessions: RefCell<HashMap<String, String>>,
    google_credentials: HashMap<String, String>,
    offline: bool,
    profile_down: bool,
    registered: RefCell<Vec<RegisterRequest>>,
    /// Runs once inside the next `current_user` call, before it answers.
    during_profile: RefCell<Option<Box<dyn FnOnce()>>>,
}

fn make_user(email: &str, username: &str) -> User {
    User {
        id: format!("id-{username}"),
        email: email.to_owned(),
        username: username.to_owned(),
        full_name: None,
        avatar_url: None,
        is_active: true,
        is_verified: false,
        is_google_user: false,
        created_at: Some("2024-01-01T00:00:00Z".to_owned()),
        role: None,
    }
}

impl FakeApi {
    fn with_account(email: &str, password: &str) -> Self {
        let api = Self::default();
        let username = username_from_email(email).to_owned();
        api.accounts
            .borrow_mut()
            .insert(email.to_owned(), (password.to_owned(), make_user(email, &username)));
        api
    }

    fn with_session(self, token: &str, email: &str) -> Self {
        self.sessions.borrow_mut().insert(token.to_owned(), email.to_owned());
        self
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline {
            return Err(ApiError::Transport("Failed to fetch".to_owned()));
        }
        Ok(())
    }

    fn open_session(&self, email: &str) -> TokenResponse {
        let token = format!("token-for-{email}");
        self.sessions.borrow_mut().insert(token.clone(), email.to_owned());
        TokenResponse { access_token: token, token_type: Some("bearer".to_owned()) }
    }
}

#[async_trait(?Send)]
impl ShopApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.check_online()?;
        let matches = self
            .accounts
            .borrow()
            .get(email)
            .is_some_and(|(stored, _)| stored == password);
        if !matches {
            return Err(ApiError::rejected(401, r#"{"detail":"Incorrect email or password"}"#));
        }
        Ok(self.open_session(email))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.check_online()?;
        self.registered.borrow_mut().push(request.clone());
        if self.accounts.borrow().contains_key(&request.email) {
            return Err(ApiError::rejected(400, r#"{"detail":"Email already registered"}"#));
        }
        let user = make_user(&request.email, &request.username);
        self.accounts
            .borrow_mut()
            .insert(request.email.clone(), (request.password.clone(), user.clone()));
        Ok(user)
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        if let Some(hook) = self.during_profile.borrow_mut().take() {
            hook();
        }
        self.check_online()?;
        if self.profile_down {
            return Err(ApiError::rejected(503, ""));
        }
        let sessions = self.sessions.borrow();
        let email = sessions
            .get(token)
            .ok_or_else(|| ApiError::rejected(401, r#"{"detail":"Could not validate credentials"}"#))?;
        let mut user = self.accounts.borrow()[email].1.clone();
        user.full_name = Some("From Profile".to_owned());
        Ok(user)
    }

    async fn exchange_google_credential(&self, credential: &str) -> Result<TokenResponse, ApiError> {
        self.check_online()?;
        let email = self
            .google_credentials
            .get(credential)
            .ok_or_else(|| ApiError::rejected(400, r#"{"detail":"Invalid Google token"}"#))?;
        Ok(self.open_session(email))
    }

    async fn get_json(&self, _path: &str) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn post_json(&self, _path: &str, _body: &serde_json::Value) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn put_json(&self, _path: &str, _body: &serde_json::Value) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn delete(&self, _path: &str) -> Result<(), ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }
}

fn error_message(step: &AuthStep) -> Option<&str> {
    step.notice
        .as_ref()
        .filter(|n| n.kind == ToastKind::Error)
        .map(|n| n.message.as_str())
}

// =============================================================
// username_from_email
// =============================================================

#[test]
fn username_is_local_part_of_email() {
    assert_eq!(username_from_email("new@x.com"), "new");
    assert_eq!(username_from_email("first.last@shop.example"), "first.last");
}

#[test]
fn username_without_at_sign_is_whole_input() {
    assert_eq!(username_from_email("nobody"), "nobody");
    assert_eq!(username_from_email("@x.com"), "");
}

// =============================================================
// restore
// =============================================================

#[tokio::test]
async fn restore_with_valid_token_populates_user() {
    let api = FakeApi::with_account("a@b.com", "pw").with_session("good", "a@b.com");
    let store = MemoryTokenStore::with_token("good");
    let flow = AuthFlow::new(api, store.clone());

    let mut state = AuthState::default();
    state.apply(flow.restore().await.user);

    assert!(!state.loading);
    assert_eq!(state.user.map(|u| u.email), Some("a@b.com".to_owned()));
    assert_eq!(store.get().as_deref(), Some("good"));
}

#[tokio::test]
async fn restore_with_expired_token_clears_storage() {
    let api = FakeApi::with_account("a@b.com", "pw");
    let store = MemoryTokenStore::with_token("expired");
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.restore().await;
    assert_eq!(step.notice, None);
    let mut state = AuthState::default();
    state.apply(step.user);

    assert!(!state.loading);
    assert!(state.user.is_none());
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn restore_when_offline_clears_storage() {
    let api = FakeApi { offline: true, ..FakeApi::default() };
    let store = MemoryTokenStore::with_token("whatever");
    let flow = AuthFlow::new(api, store.clone());

    let mut state = AuthState::default();
    state.apply(flow.restore().await.user);

    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn restore_success_after_newer_sign_in_keeps_newer_session() {
    let api = FakeApi::with_account("a@b.com", "pw").with_session("good", "a@b.com");
    let store = MemoryTokenStore::with_token("good");
    let swap = store.clone();
    *api.during_profile.borrow_mut() = Some(Box::new(move || swap.save("newer")));
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.restore().await;

    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(store.get().as_deref(), Some("newer"));
}

#[tokio::test]
async fn restore_failure_after_newer_sign_in_keeps_newer_token() {
    let api = FakeApi::with_account("a@b.com", "pw");
    let store = MemoryTokenStore::with_token("expired");
    let swap = store.clone();
    *api.during_profile.borrow_mut() = Some(Box::new(move || swap.save("newer")));
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.restore().await;

    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(store.get().as_deref(), Some("newer"));
}

#[tokio::test]
async fn restore_without_token_only_stops_loading() {
    let flow = AuthFlow::new(FakeApi::default(), MemoryTokenStore::default());
    let step = flow.restore().await;
    assert_eq!(step, AuthStep { user: UserChange::Keep, notice: None, redirect: None });
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_stores_token_and_sets_user() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::with_account("a@b.com", "pw"), store.clone());

    let step = flow.login("a@b.com", "pw").await;

    assert_eq!(store.get().as_deref(), Some("token-for-a@b.com"));
    assert_eq!(step.redirect, Some(HOME_ROUTE));
    assert_eq!(step.notice, Some(Notice::success("Welcome back!")));
    let UserChange::Replace(user) = step.user else {
        panic!("expected user replacement");
    };
    assert_eq!(user.email, "a@b.com");
}

#[tokio::test]
async fn login_rejection_reports_server_detail_without_mutation() {
    let store = MemoryTokenStore::with_token("previous");
    let flow = AuthFlow::new(FakeApi::with_account("a@b.com", "pw"), store.clone());

    let step = flow.login("a@b.com", "wrong").await;

    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(step.redirect, None);
    assert_eq!(error_message(&step), Some("Incorrect email or password"));
    assert_eq!(store.get().as_deref(), Some("previous"));
}

#[tokio::test]
async fn login_offline_reports_network_error() {
    let api = FakeApi { offline: true, ..FakeApi::default() };
    let flow = AuthFlow::new(api, MemoryTokenStore::default());

    let step = flow.login("a@b.com", "pw").await;

    assert_eq!(error_message(&step), Some(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn login_with_failing_profile_fetch_drops_new_token() {
    let mut api = FakeApi::with_account("a@b.com", "pw");
    api.profile_down = true;
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.login("a@b.com", "pw").await;

    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(error_message(&step), Some("Login failed"));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn login_with_failing_profile_fetch_restores_prior_token() {
    let mut api = FakeApi::with_account("a@b.com", "pw");
    api.profile_down = true;
    let store = MemoryTokenStore::with_token("prior-session");
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.login("a@b.com", "pw").await;

    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(error_message(&step), Some("Login failed"));
    assert_eq!(store.get().as_deref(), Some("prior-session"));
}

// =============================================================
// register
// =============================================================

#[tokio::test]
async fn register_derives_username_and_signs_in() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::default(), store.clone());

    let step = flow.register("Name", "new@x.com", "pw").await;

    let sent = flow.api.registered.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].username, "new");
    assert_eq!(sent[0].full_name, "Name");
    assert_eq!(store.get().as_deref(), Some("token-for-new@x.com"));
    assert_eq!(step.notice, Some(Notice::success("Account created successfully!")));
    assert_eq!(step.redirect, Some(HOME_ROUTE));
}

#[tokio::test]
async fn register_takes_user_from_profile_endpoint() {
    let flow = AuthFlow::new(FakeApi::default(), MemoryTokenStore::default());

    let step = flow.register("Name", "new@x.com", "pw").await;

    let UserChange::Replace(user) = step.user else {
        panic!("expected user replacement");
    };
    assert_eq!(user.full_name.as_deref(), Some("From Profile"));
}

#[tokio::test]
async fn register_rejection_reports_detail() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::with_account("taken@x.com", "pw"), store.clone());

    let step = flow.register("Name", "taken@x.com", "other").await;

    assert_eq!(error_message(&step), Some("Email already registered"));
    assert_eq!(step.user, UserChange::Keep);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn register_then_failed_profile_reports_partial_success() {
    let api = FakeApi { profile_down: true, ..FakeApi::default() };
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.register("Name", "new@x.com", "pw").await;

    assert_eq!(error_message(&step), Some("Registration successful but login failed"));
    assert_eq!(store.get(), None);
}

// =============================================================
// Google
// =============================================================

#[tokio::test]
async fn google_credential_exchange_signs_in() {
    let mut api = FakeApi::with_account("g@x.com", "unused");
    api.google_credentials.insert("cred-1".to_owned(), "g@x.com".to_owned());
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(api, store.clone());

    let step = flow.login_with_google_credential("cred-1").await;

    assert!(matches!(step.user, UserChange::Replace(ref u) if u.email == "g@x.com"));
    assert_eq!(step.redirect, Some(HOME_ROUTE));
    assert_eq!(store.get().as_deref(), Some("token-for-g@x.com"));
}

#[tokio::test]
async fn google_credential_rejection_reports_detail() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::default(), store.clone());

    let step = flow.login_with_google_credential("forged").await;

    assert_eq!(error_message(&step), Some("Invalid Google token"));
    assert_eq!(store.get(), None);
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_token_and_user() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::with_account("a@b.com", "pw"), store.clone());
    let mut state = AuthState::default();
    state.apply(flow.login("a@b.com", "pw").await.user);
    assert!(state.user.is_some());

    let step = flow.logout();
    assert_eq!(step.redirect, Some(LOGIN_ROUTE));
    state.apply(step.user);

    assert!(state.user.is_none());
    assert_eq!(store.get(), None);
}

#[test]
fn logout_without_session_still_clears() {
    let store = MemoryTokenStore::default();
    let flow = AuthFlow::new(FakeApi::default(), store.clone());
    let mut state = AuthState::default();

    let step = flow.logout();
    assert_eq!(step.notice, Some(Notice::success("Logged out successfully")));
    state.apply(step.user);

    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(store.get(), None);
}
