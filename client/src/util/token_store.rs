//! Durable storage for the session bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only client-persisted state. It lives in `localStorage`
//! under a fixed key so a reload can silently restore the session.

/// `localStorage` key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Where the session token is kept between page loads.
pub trait TokenStore {
    /// Return the stored token, treating an empty value as absent.
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` token store. Reads nothing and writes nothing
/// outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
            if raw.trim().is_empty() { None } else { Some(raw) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                    leptos::logging::warn!("could not persist session token");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_STORAGE_KEY);
            }
        }
    }
}
