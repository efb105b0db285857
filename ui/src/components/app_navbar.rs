//! Localized application header.
//!
//! `ui` does not know the launcher's `Route` enum, so the launcher registers a
//! [`NavBuilder`] whose closures return ready-made `Link`s. Each closure gets
//! the localized label to place inside its link. Without a registered builder
//! the `children` passed to [`AppNavbar`] are shown instead.

use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::i18n;
use crate::t;

pub struct NavBuilder {
    pub upload: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[cfg(debug_assertions)]
fn log_navbar_render(lang: &str) {
    dioxus::logger::tracing::trace!("AppNavbar render lang={lang}");
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| i18n::FALLBACK_LANGUAGE.to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    // Subscribing to the launcher's language signal re-renders the labels on switch.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    #[cfg(debug_assertions)]
    log_navbar_render(&lang_marker);

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => dioxus::logger::tracing::warn!("cannot switch to {val}: {err}"),
        }
    };

    let registered_nav = NAV_BUILDER.get().map(|b| (b.upload)(&t!("nav-upload")));
    let tagline = t!("tagline");

    rsx! {
        header { id: "navbar", class: "navbar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        i { class: "fas fa-chart-pie navbar__brand-icon", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "ModelYourData" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links",
                    if let Some(link) = registered_nav {
                        {link}
                    } else {
                        {children}
                    }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
