//! Multipart upload over `XMLHttpRequest`, which (unlike `fetch`) reports
//! upload progress.

use futures_channel::mpsc::UnboundedSender;

use super::{SelectedFile, UploadFailure};

/// XHR events that end a request without a response.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const FAILURE_EVENTS: [&str; 3] = ["error", "abort", "timeout"];

/// POST `file` to `url` as `multipart/form-data`.
///
/// Progress percentages are pushed into `progress` as the browser reports them.
/// Resolves to the server's redirect target.
pub async fn send_upload(
    url: &str,
    file: &SelectedFile,
    progress: UnboundedSender<u8>,
) -> Result<String, UploadFailure> {
    #[cfg(target_arch = "wasm32")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use dioxus::logger::tracing::warn;
        use futures_channel::oneshot;
        use wasm_bindgen::{closure::Closure, JsCast};
        use web_sys::{Blob, BlobPropertyBag, Event, FormData, ProgressEvent, XmlHttpRequest};

        use super::{progress_percent, FILE_FIELD};
        use crate::core::csrf::{csrf_token, CSRF_HEADER};

        let network = |what: &str| {
            warn!("upload setup failed: {what}");
            UploadFailure::Network
        };

        let array = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());
        let opts = BlobPropertyBag::new();
        opts.set_type("text/csv");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| network("blob"))?;

        let form = FormData::new().map_err(|_| network("form data"))?;
        form.append_with_blob_and_filename(FILE_FIELD, &blob, &file.name)
            .map_err(|_| network("form field"))?;

        let xhr = XmlHttpRequest::new().map_err(|_| network("xhr"))?;

        let (done_tx, done_rx) = oneshot::channel::<Option<(u16, String)>>();
        let done_slot = Rc::new(RefCell::new(Some(done_tx)));

        let on_progress = Closure::wrap(Box::new(move |evt: ProgressEvent| {
            if let Some(percent) =
                progress_percent(evt.loaded(), evt.total(), evt.length_computable())
            {
                let _ = progress.unbounded_send(percent);
            }
        }) as Box<dyn FnMut(ProgressEvent)>);

        let on_load = {
            let xhr = xhr.clone();
            let slot = done_slot.clone();
            Closure::wrap(Box::new(move |_: Event| {
                let status = xhr.status().unwrap_or(0);
                let body = xhr.response_text().ok().flatten().unwrap_or_default();
                if let Some(tx) = slot.borrow_mut().take() {
                    let _ = tx.send(Some((status, body)));
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let on_error = {
            let slot = done_slot.clone();
            Closure::wrap(Box::new(move |_: Event| {
                if let Some(tx) = slot.borrow_mut().take() {
                    let _ = tx.send(None);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let upload_target = xhr.upload().map_err(|_| network("upload target"))?;
        upload_target.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        let handlers = Handlers {
            xhr: xhr.clone(),
            upload_target,
            _on_progress: on_progress,
            _on_load: on_load,
            on_error,
        };
        let on_failure = handlers.on_error.as_ref().unchecked_ref();
        for event in FAILURE_EVENTS {
            xhr.add_event_listener_with_callback(event, on_failure)
                .map_err(|_| network(event))?;
        }

        xhr.open_with_async("POST", url, true)
            .map_err(|_| network("open"))?;
        if let Some(token) = csrf_token() {
            xhr.set_request_header(CSRF_HEADER, &token).ok();
        }
        xhr.send_with_opt_form_data(Some(&form))
            .map_err(|_| network("send"))?;

        let reply = done_rx.await.ok().flatten();
        drop(handlers);
        settle_reply(reply)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = progress;
        dioxus::logger::tracing::warn!(
            "cannot upload {} to {url}: multipart upload needs the browser build",
            file.name
        );
        Err(UploadFailure::Network)
    }
}

/// Keeps the XHR callbacks alive for the request and unhooks them when the
/// request settles or its task is cancelled.
#[cfg(target_arch = "wasm32")]
struct Handlers {
    xhr: web_sys::XmlHttpRequest,
    upload_target: web_sys::XmlHttpRequestUpload,
    _on_progress: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::ProgressEvent)>,
    _on_load: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
    on_error: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for Handlers {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;

        self.upload_target.set_onprogress(None);
        self.xhr.set_onload(None);
        let on_failure = self.on_error.as_ref().unchecked_ref();
        for event in FAILURE_EVENTS {
            let _ = self.xhr.remove_event_listener_with_callback(event, on_failure);
        }
    }
}

/// `None` means the request ended without a response.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn settle_reply(reply: Option<(u16, String)>) -> Result<String, UploadFailure> {
    match reply {
        Some((status, body)) => super::interpret_upload_reply(status, &body),
        None => Err(UploadFailure::Network),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_and_timed_out_requests_fail_the_upload() {
        assert!(FAILURE_EVENTS.contains(&"abort"));
        assert!(FAILURE_EVENTS.contains(&"timeout"));
        assert!(FAILURE_EVENTS.contains(&"error"));

        let failure = settle_reply(None).unwrap_err();
        assert_eq!(failure, UploadFailure::Network);
        assert_eq!(failure.to_string(), "Network error. Please try again.");
    }

    #[test]
    fn replies_go_through_the_upload_interpreter() {
        let body = r#"{"success": true, "redirect_url": "/analysis/3/"}"#;
        assert_eq!(settle_reply(Some((200, body.into()))), Ok("/analysis/3/".into()));
    }
}
