//! Thin wrappers over the browser environment with inert native fallbacks.

use std::future::Future;

/// Run a future on the UI executor, detached from any component scope.
///
/// Components use Dioxus's `spawn` instead so their work stops on unmount.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = dioxus::prelude::spawn(future);
    }
}

/// Text content of the element with `id`, if the page has one.
pub fn element_text(id: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let document = web_sys::window()?.document()?;
        document.get_element_by_id(id)?.text_content()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        None
    }
}

/// Value of an `<input>` with `id`, if present.
pub fn input_value(id: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let input = document
            .get_element_by_id(id)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;
        Some(input.value())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        None
    }
}

/// The raw `document.cookie` string.
pub fn document_cookies() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        html.cookie().ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Full page navigation (the server owns the routes it redirects to).
pub fn navigate_to(url: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or("window unavailable")?;
        window
            .location()
            .set_href(url)
            .map_err(|_| format!("Unable to navigate to {url}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        dioxus::logger::tracing::info!("navigation requested to {url}");
        Ok(())
    }
}

/// Today's date in UTC.
pub fn today_utc() -> time::Date {
    time::OffsetDateTime::now_utc().date()
}

/// Window-level `keydown` subscription for the Escape key. Unsubscribes on drop.
pub struct EscapeListener {
    #[cfg(target_arch = "wasm32")]
    closure: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

pub fn listen_for_escape<F>(callback: F) -> EscapeListener
where
    F: FnMut() + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let mut callback = callback;
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Escape" {
                callback();
            }
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
        }

        EscapeListener { closure }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = callback;
        EscapeListener {}
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for EscapeListener {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;

        if let Some(window) = web_sys::window() {
            window
                .remove_event_listener_with_callback(
                    "keydown",
                    self.closure.as_ref().unchecked_ref(),
                )
                .ok();
        }
    }
}
