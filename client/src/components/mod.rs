//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the admin lists, entity forms and notifications while
//! reading/writing shared state from Leptos context providers.

pub mod category_form;
pub mod category_grid;
pub mod form_fields;
pub mod product_form;
pub mod product_table;
pub mod toast_stack;
