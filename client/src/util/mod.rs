//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod auth;
pub mod category_form;
pub mod form_validation;
pub mod google_identity;
pub mod mutation;
pub mod product_form;
pub mod token_store;
pub mod upload;
