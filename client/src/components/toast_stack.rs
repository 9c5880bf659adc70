//! Toast notifications overlay.

use leptos::prelude::*;

use crate::state::toast::{Notice, Toast, ToastKind, ToastState};
#[cfg(feature = "hydrate")]
use crate::state::toast::TOAST_TIMEOUT_MS;

/// Queue a notice and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, notice: Notice) {
    let mut id = 0;
    toasts.update(|t| id = t.push(notice));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
        toasts.update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

/// Fixed-position stack of the queued toasts; click one to dismiss it early.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let is_error = toast.kind == ToastKind::Error;
                    let is_success = toast.kind == ToastKind::Success;
                    view! {
                        <div
                            class="toast"
                            class:toast--success=is_success
                            class:toast--error=is_error
                            role="status"
                            on:click=move |_| toasts.update(|t| t.dismiss(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
