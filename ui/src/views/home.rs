use dioxus::prelude::*;

use crate::t;
use crate::upload::UploadView;

/// Landing page: the CSV upload card.
#[component]
pub fn Home() -> Element {
    // Re-render on language switch.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    rsx! {
        section { class: "page page-home",
            header { class: "page__header",
                h1 { {t!("home-title")} }
                p { class: "page__lead", {t!("home-subtitle")} }
            }
            UploadView {}
        }
    }
}
