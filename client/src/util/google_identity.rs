//! Google Identity Services sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Google issues an identity credential in the browser; the backend trades it
//! for a session token at `POST /auth/google`. This module only obtains the
//! credential: it loads the GSI script once, initializes it once with the
//! client id and a callback, and shows the One Tap prompt on every request.

#[cfg(test)]
#[path = "google_identity_test.rs"]
mod google_identity_test;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;

use crate::state::session::GOOGLE_FAILED;

pub const GSI_SCRIPT_SRC: &str = "https://accounts.google.com/gsi/client";

pub const GOOGLE_NOT_CONFIGURED: &str = "Google OAuth not configured";
pub const GOOGLE_SCRIPT_FAILED: &str = "Could not load Google sign-in";

#[cfg(feature = "hydrate")]
const SCRIPT_POLL_INTERVAL_MS: u32 = 100;
#[cfg(feature = "hydrate")]
const SCRIPT_POLL_ATTEMPTS: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GoogleSignInError {
    #[error("google client id is not configured")]
    NotConfigured,
    #[error("google identity script unavailable: {0}")]
    ScriptLoad(String),
    #[error("google prompt not shown: {0}")]
    PromptUnavailable(String),
}

impl GoogleSignInError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => GOOGLE_NOT_CONFIGURED,
            Self::ScriptLoad(_) => GOOGLE_SCRIPT_FAILED,
            Self::PromptUnavailable(_) => GOOGLE_FAILED,
        }
    }
}

/// Reject a blank client id before touching the page.
///
/// # Errors
///
/// Returns [`GoogleSignInError::NotConfigured`] for an empty id.
pub fn validate_client_id(client_id: &str) -> Result<&str, GoogleSignInError> {
    let client_id = client_id.trim();
    if client_id.is_empty() {
        return Err(GoogleSignInError::NotConfigured);
    }
    Ok(client_id)
}

/// What the One Tap prompt reported about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptMoment {
    Displayed,
    NotDisplayed(String),
    Skipped(String),
    Dismissed(String),
}

/// A prompt that never reached the user, or that the user closed, is a
/// failed sign-in. A dismissal follows a returned credential and is not.
#[must_use]
pub fn moment_failure(moment: PromptMoment) -> Option<GoogleSignInError> {
    match moment {
        PromptMoment::NotDisplayed(reason) | PromptMoment::Skipped(reason) => {
            Some(GoogleSignInError::PromptUnavailable(reason))
        }
        PromptMoment::Displayed | PromptMoment::Dismissed(_) => None,
    }
}

#[cfg(feature = "hydrate")]
type CredentialHandler = Box<dyn Fn(String)>;
#[cfg(feature = "hydrate")]
type FailureHandler = Box<dyn Fn(GoogleSignInError)>;

/// JS callbacks handed to GSI. Created once per page and kept alive here.
#[cfg(feature = "hydrate")]
struct GsiCallbacks {
    _credential: wasm_bindgen::prelude::Closure<dyn Fn(wasm_bindgen::JsValue)>,
    moment: wasm_bindgen::prelude::Closure<dyn Fn(wasm_bindgen::JsValue)>,
}

#[cfg(feature = "hydrate")]
thread_local! {
    static ON_CREDENTIAL: RefCell<Option<CredentialHandler>> = const { RefCell::new(None) };
    static ON_FAILURE: RefCell<Option<FailureHandler>> = const { RefCell::new(None) };
    static CALLBACKS: RefCell<Option<GsiCallbacks>> = const { RefCell::new(None) };
}

/// Load GSI if needed, initialize it once and show the prompt.
///
/// `on_credential` runs with the credential once the user picks an account;
/// `on_failure` runs if the prompt is suppressed or closed. Each call
/// replaces the handlers of the previous one.
///
/// # Errors
///
/// Fails when the client id is blank or the script cannot be loaded or driven.
#[cfg(feature = "hydrate")]
pub async fn request_credential<F, G>(
    client_id: &str,
    on_credential: F,
    on_failure: G,
) -> Result<(), GoogleSignInError>
where
    F: Fn(String) + 'static,
    G: Fn(GoogleSignInError) + 'static,
{
    let client_id = validate_client_id(client_id)?;
    load_script().await?;
    ON_CREDENTIAL.with(|slot| *slot.borrow_mut() = Some(Box::new(on_credential)));
    ON_FAILURE.with(|slot| *slot.borrow_mut() = Some(Box::new(on_failure)));
    initialize_once(client_id)?;
    prompt()
}

#[cfg(feature = "hydrate")]
fn script_error(e: impl std::fmt::Debug) -> GoogleSignInError {
    GoogleSignInError::ScriptLoad(format!("{e:?}"))
}

/// `window.google.accounts.id`, once the script has run.
#[cfg(feature = "hydrate")]
fn gsi_namespace() -> Option<wasm_bindgen::JsValue> {
    use js_sys::Reflect;

    let window = web_sys::window()?;
    let google = Reflect::get(&window, &"google".into()).ok().filter(|v| v.is_object())?;
    let accounts = Reflect::get(&google, &"accounts".into()).ok().filter(|v| v.is_object())?;
    Reflect::get(&accounts, &"id".into()).ok().filter(|v| v.is_object())
}

/// Insert the GSI script unless it is already present, then wait for it to
/// define its namespace.
#[cfg(feature = "hydrate")]
async fn load_script() -> Result<(), GoogleSignInError> {
    use wasm_bindgen::JsCast;

    if gsi_namespace().is_some() {
        return Ok(());
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GoogleSignInError::ScriptLoad("no document".to_owned()))?;
    let selector = format!("script[src=\"{GSI_SCRIPT_SRC}\"]");
    if document.query_selector(&selector).map_err(script_error)?.is_none() {
        let script = document
            .create_element("script")
            .map_err(script_error)?
            .dyn_into::<web_sys::HtmlScriptElement>()
            .map_err(script_error)?;
        script.set_src(GSI_SCRIPT_SRC);
        script.set_async(true);
        let head = document
            .head()
            .ok_or_else(|| GoogleSignInError::ScriptLoad("no <head>".to_owned()))?;
        head.append_child(&script).map_err(script_error)?;
    }

    for _ in 0..SCRIPT_POLL_ATTEMPTS {
        if gsi_namespace().is_some() {
            return Ok(());
        }
        gloo_timers::future::TimeoutFuture::new(SCRIPT_POLL_INTERVAL_MS).await;
    }
    Err(GoogleSignInError::ScriptLoad("timed out waiting for google.accounts.id".to_owned()))
}

#[cfg(feature = "hydrate")]
fn namespace() -> Result<wasm_bindgen::JsValue, GoogleSignInError> {
    gsi_namespace().ok_or_else(|| GoogleSignInError::ScriptLoad("namespace missing".to_owned()))
}

#[cfg(feature = "hydrate")]
fn gsi_method(id: &wasm_bindgen::JsValue, name: &str) -> Result<js_sys::Function, GoogleSignInError> {
    use wasm_bindgen::JsCast;

    js_sys::Reflect::get(id, &name.into())
        .map_err(script_error)?
        .dyn_into()
        .map_err(script_error)
}

/// Call `google.accounts.id.initialize` the first time only.
#[cfg(feature = "hydrate")]
fn initialize_once(client_id: &str) -> Result<(), GoogleSignInError> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::Closure;

    if CALLBACKS.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }
    let id = namespace()?;

    let credential = Closure::<dyn Fn(JsValue)>::new(|response: JsValue| {
        let Some(credential) = Reflect::get(&response, &"credential".into()).ok().and_then(|v| v.as_string())
        else {
            leptos::logging::warn!("google callback without credential");
            return;
        };
        ON_CREDENTIAL.with(|slot| {
            if let Some(handler) = slot.borrow().as_ref() {
                handler(credential);
            }
        });
    });
    let moment = Closure::<dyn Fn(JsValue)>::new(|notification: JsValue| {
        if let Some(error) = moment_failure(read_moment(&notification)) {
            leptos::logging::warn!("google prompt: {error}");
            ON_FAILURE.with(|slot| {
                if let Some(handler) = slot.borrow().as_ref() {
                    handler(error);
                }
            });
        }
    });

    let options = Object::new();
    Reflect::set(&options, &"client_id".into(), &client_id.into()).map_err(script_error)?;
    Reflect::set(&options, &"callback".into(), credential.as_ref()).map_err(script_error)?;
    gsi_method(&id, "initialize")?.call1(&id, &options).map_err(script_error)?;

    CALLBACKS.with(|slot| *slot.borrow_mut() = Some(GsiCallbacks { _credential: credential, moment }));
    Ok(())
}

#[cfg(feature = "hydrate")]
fn prompt() -> Result<(), GoogleSignInError> {
    let id = namespace()?;
    let show = gsi_method(&id, "prompt")?;
    CALLBACKS.with(|slot| match slot.borrow().as_ref() {
        Some(callbacks) => show.call1(&id, callbacks.moment.as_ref()).map(drop).map_err(script_error),
        None => Err(GoogleSignInError::ScriptLoad("not initialized".to_owned())),
    })
}

/// Decode a GSI `PromptMomentNotification`.
#[cfg(feature = "hydrate")]
fn read_moment(notification: &wasm_bindgen::JsValue) -> PromptMoment {
    use wasm_bindgen::JsCast;

    let call = |name: &str| {
        js_sys::Reflect::get(notification, &name.into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .and_then(|f| f.call0(notification).ok())
    };
    let flag = |name: &str| call(name).and_then(|v| v.as_bool()).unwrap_or(false);
    let reason = |name: &str| call(name).and_then(|v| v.as_string()).unwrap_or_default();

    if flag("isNotDisplayed") {
        PromptMoment::NotDisplayed(reason("getNotDisplayedReason"))
    } else if flag("isSkippedMoment") {
        PromptMoment::Skipped(reason("getSkippedReason"))
    } else if flag("isDismissedMoment") {
        PromptMoment::Dismissed(reason("getDismissedReason"))
    } else {
        PromptMoment::Displayed
    }
}
