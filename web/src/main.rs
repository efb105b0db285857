use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use ui::components::{register_nav, use_toast_provider, AppNavbar, NavBuilder, ToastHost};
use ui::core::config::ClientConfig;
use ui::views::{Analysis, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebLayout)]
    #[route("/")]
    Home {},
    #[route("/analysis/:file_id")]
    Analysis { file_id: String },
}

const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

fn nav_upload(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder { upload: nav_upload });

    let config = use_hook(|| {
        let config = ClientConfig::load();
        info!(api_root = %config.api_root, upload_url = %config.upload_url, "client config loaded");
        config
    });
    use_context_provider(|| config.clone());
    use_context_provider(|| Signal::new(ui::i18n::FALLBACK_LANGUAGE.to_string()));
    use_toast_provider(&config);

    rsx! {
        document::Link { rel: "stylesheet", href: FONT_AWESOME }
        document::Style { "{ui::THEME_CSS}" }

        Router::<Route> {}
        ToastHost {}
    }
}

#[component]
fn WebLayout() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
