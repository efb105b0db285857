//! Transient notifications shown in the corner of the page.
//!
//! A platform root calls [`use_toast_provider`] once and renders [`ToastHost`];
//! any component below can then grab a [`Toaster`] via [`use_toaster`].

use dioxus::prelude::*;
use uuid::Uuid;

use crate::core::config::ClientConfig;
use crate::core::{platform, timing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Unrecognised names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub fading: bool,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            fading: false,
        }
    }
}

fn mark_fading(toasts: &mut [Toast], id: Uuid) {
    if let Some(toast) = toasts.iter_mut().find(|toast| toast.id == id) {
        toast.fading = true;
    }
}

fn dismiss(toasts: &mut Vec<Toast>, id: Uuid) {
    toasts.retain(|toast| toast.id != id);
}

/// Handle for queueing toasts. Cheap to copy into event handlers.
#[derive(Clone, Copy)]
pub struct Toaster {
    entries: Signal<Vec<Toast>>,
    visible_ms: u64,
    fade_ms: u64,
}

impl Toaster {
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast::new(message, kind);
        let id = toast.id;
        let mut entries = self.entries;
        entries.write().push(toast);

        let visible_ms = self.visible_ms;
        let fade_ms = self.fade_ms;
        platform::spawn_future(async move {
            timing::sleep_ms(visible_ms).await;
            if let Ok(mut list) = entries.try_write() {
                mark_fading(&mut *list, id);
            }
            timing::sleep_ms(fade_ms).await;
            if let Ok(mut list) = entries.try_write() {
                dismiss(&mut *list, id);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Warning);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Info);
    }

    pub fn entries(&self) -> Vec<Toast> {
        (self.entries)()
    }
}

/// Install the toast queue for the subtree. Call once, near the root.
pub fn use_toast_provider(config: &ClientConfig) -> Toaster {
    let entries = use_signal(Vec::<Toast>::new);
    let visible_ms = config.toast_visible_ms;
    let fade_ms = config.toast_fade_ms;
    use_context_provider(move || Toaster {
        entries,
        visible_ms,
        fade_ms,
    })
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_toaster();
    let toasts = toaster.entries();

    if toasts.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "toast-container",
            for toast in toasts.into_iter() {
                div {
                    key: "{toast.id}",
                    class: "toast {toast.kind.css_class()}",
                    style: if toast.fading { "opacity: 0" } else { "" },
                    i { class: "fas {toast.kind.icon()}" }
                    span { "{toast.message}" }
                }
            }
        }
    }
}
