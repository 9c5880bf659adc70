//! Networking modules for the storefront REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls, `error` classifies failures, `records` layers
//! the admin CRUD workflow on top, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod records;
pub mod types;
