//! Glue between record mutations and the shared admin contexts.

#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

use leptos::prelude::*;

use crate::components::toast_stack::notify;
use crate::net::records::MutationOutcome;
use crate::state::records::{CollectionKey, RecordCache};
use crate::state::toast::ToastState;

/// The generation of one collection. Readers are notified only when that
/// collection is invalidated, not when any other one is.
pub fn generation_memo(cache: RwSignal<RecordCache>, key: CollectionKey) -> Memo<u64> {
    Memo::new(move |_| cache.with(|c| c.generation(key)))
}

/// Invalidate the collection named by `outcome` and show its toast.
///
/// The cache signal only notifies its readers when a collection was
/// actually invalidated.
pub fn apply_mutation(outcome: MutationOutcome, cache: RwSignal<RecordCache>, toasts: RwSignal<ToastState>) {
    let invalidates = outcome.invalidate.is_some();
    let mut notice = None;
    cache.maybe_update(|c| {
        notice = outcome.apply(c);
        invalidates
    });
    if let Some(notice) = notice {
        notify(toasts, notice);
    }
}

/// Blocking browser confirmation. Always declines outside the browser.
#[must_use]
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}
