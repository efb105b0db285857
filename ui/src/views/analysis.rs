use dioxus::prelude::*;

use crate::analysis::AnalysisView;
use crate::t;

#[component]
pub fn Analysis(file_id: String) -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    rsx! {
        section { class: "page page-analysis",
            header { class: "page__header",
                h1 { {t!("analysis-title")} }
                p { class: "page__lead", {t!("analysis-file", id = file_id.clone())} }
            }
            // Keyed so a different dataset starts a fresh session.
            AnalysisView { key: "{file_id}", file_id: file_id.clone() }
        }
    }
}
