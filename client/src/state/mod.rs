//! Client-side state containers.
//!
//! ARCHITECTURE
//! ============
//! Each module holds plain data that `app.rs` wraps in an `RwSignal` and
//! provides as context. `session` is the only writer of `auth`.

pub mod auth;
pub mod records;
pub mod session;
pub mod toast;
pub mod ui;
