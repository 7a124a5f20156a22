//! Transient notifications with timer-based auto-dismiss.

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use std::time::Duration;

const TOAST_DISMISS_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Returns the toast signal plus a `show` function. Showing a new toast
/// clears the previous dismiss timer so the fresh message gets the full
/// interval; the pending timer is also cleared on component teardown.
pub fn use_toast() -> (
    RwSignal<Option<Toast>>,
    impl Fn(&str, ToastKind) + Copy + 'static,
) {
    let toast = create_rw_signal(None::<Toast>);
    let timer = store_value(None::<TimeoutHandle>);

    on_cleanup(move || {
        if let Some(handle) = timer.try_update_value(|t| t.take()).flatten() {
            handle.clear();
        }
    });

    let show = move |message: &str, kind: ToastKind| {
        if let Some(handle) = timer.try_update_value(|t| t.take()).flatten() {
            handle.clear();
        }
        toast.set(Some(Toast {
            message: message.to_string(),
            kind,
        }));
        let handle = set_timeout_with_handle(
            move || toast.set(None),
            Duration::from_millis(TOAST_DISMISS_MS),
        )
        .ok();
        timer.set_value(handle);
    };

    (toast, show)
}

#[component]
pub fn ToastView(toast: RwSignal<Option<Toast>>) -> impl IntoView {
    move || {
        toast.get().map(|t| {
            view! {
              <div class=format!("toast toast-{}", t.kind.class())>{t.message}</div>
            }
        })
    }
}
