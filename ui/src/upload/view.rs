use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::core::config::ClientConfig;
use crate::core::{platform, timing};
use crate::t;

use super::{send_upload, SelectedFile, UploadState};

const PICKER_ID: &str = "csv-file-input";

enum UploadEvent {
    Files(Arc<dyn FileEngine>),
    Remove,
    Submit,
}

#[component]
pub fn UploadView() -> Element {
    let config = use_context::<ClientConfig>();
    let state = use_signal(|| UploadState::new(config.max_upload_bytes));
    let mut dragging = use_signal(|| false);

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<UploadEvent>| {
        let config = config.clone();
        let mut state = state;
        async move {
            while let Some(event) = rx.next().await {
                match event {
                    UploadEvent::Files(engine) => take_first_file(engine, state).await,
                    UploadEvent::Remove => state.with_mut(|upload| upload.remove()),
                    UploadEvent::Submit => {
                        if let Some(file) = state.with_mut(|upload| upload.begin_upload()) {
                            spawn(run_upload(config.clone(), file, state));
                        }
                    }
                }
            }
        }
    });

    let snapshot = state();
    let show_dropzone = snapshot.shows_dropzone();
    let selected = snapshot.selected().cloned();
    let progress = snapshot.progress();
    let busy = snapshot.is_busy();
    let error = snapshot.error.clone();
    let picker_epoch = snapshot.picker_epoch;

    let dropzone_class = if dragging() {
        "dropzone dragover"
    } else {
        "dropzone"
    };

    rsx! {
        div { class: "upload-card",
            if show_dropzone {
                label {
                    r#for: PICKER_ID,
                    id: "dropzone",
                    class: dropzone_class,
                    ondragenter: move |evt| {
                        evt.prevent_default();
                        dragging.set(true);
                    },
                    ondragover: move |evt| {
                        evt.prevent_default();
                        dragging.set(true);
                    },
                    ondragleave: move |evt| {
                        evt.prevent_default();
                        dragging.set(false);
                    },
                    ondrop: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(false);
                        if let Some(engine) = evt.files() {
                            coroutine.send(UploadEvent::Files(engine));
                        }
                    },
                    i { class: "fas fa-cloud-upload-alt dropzone__icon" }
                    p { class: "dropzone__title", {t!("upload-drop-hint")} }
                    p { class: "dropzone__or", {t!("upload-drop-or")} }
                    span { class: "button button--primary", {t!("upload-browse")} }
                    p { class: "dropzone__limit", {t!("upload-limit-hint")} }
                }
            }

            // Remounted (and therefore cleared) whenever the epoch moves.
            for epoch in std::iter::once(picker_epoch) {
                input {
                    key: "{epoch}",
                    id: PICKER_ID,
                    class: "file-input",
                    r#type: "file",
                    accept: ".csv",
                    onchange: move |evt: FormEvent| {
                        if let Some(engine) = evt.files() {
                            coroutine.send(UploadEvent::Files(engine));
                        }
                    },
                }
            }

            if let Some(file) = selected {
                div { id: "file-preview", class: "file-preview",
                    div { class: "file-preview__info",
                        i { class: "fas fa-file-csv file-preview__icon" }
                        div {
                            p { id: "file-name", class: "file-preview__name", "{file.name}" }
                            p { id: "file-size", class: "file-preview__size", "{file.size_label()}" }
                        }
                        button {
                            r#type: "button",
                            id: "remove-file",
                            class: "button button--ghost",
                            aria_label: t!("upload-remove"),
                            onclick: move |_| coroutine.send(UploadEvent::Remove),
                            i { class: "fas fa-times" }
                        }
                    }
                    button {
                        r#type: "button",
                        id: "upload-btn",
                        class: "button button--primary upload-card__submit",
                        disabled: busy,
                        onclick: move |_| coroutine.send(UploadEvent::Submit),
                        i { class: "fas fa-upload" }
                        " "
                        {t!("upload-submit")}
                    }
                }
            }

            if let Some((percent, status)) = progress {
                div { id: "progress-container", class: "progress-container",
                    div { class: "progress-bar",
                        div { id: "progress-fill", class: "progress-fill", style: "width: {percent}%" }
                    }
                    p { id: "progress-text", class: "progress-text", "{status}" }
                }
            }

            if let Some(message) = error {
                div { id: "error-message", class: "error-message",
                    i { class: "fas fa-exclamation-circle" }
                    span { id: "error-text", "{message}" }
                }
            }
        }
    }
}

async fn take_first_file(engine: Arc<dyn FileEngine>, state: Signal<UploadState>) {
    let Some(name) = engine.files().into_iter().next() else {
        return;
    };

    let size = match engine.file_size(&name).await {
        Some(size) => size,
        None => engine
            .read_file(&name)
            .await
            .map(|bytes| bytes.len() as u64)
            .unwrap_or(0),
    };

    if update(state, |upload| upload.check_candidate(&name, size)) != Some(true) {
        return;
    }

    match engine.read_file(&name).await {
        Some(bytes) => {
            update(state, |upload| upload.accept(SelectedFile::new(name, bytes)));
        }
        None => {
            warn!("could not read {name} after validation");
            update(state, |upload| upload.reject_unreadable());
        }
    }
}

/// Apply `change` unless the upload card has been unmounted.
fn update<R>(
    mut state: Signal<UploadState>,
    change: impl FnOnce(&mut UploadState) -> R,
) -> Option<R> {
    let mut current = state.try_write().ok()?;
    Some(change(&mut *current))
}

async fn run_upload(config: ClientConfig, file: SelectedFile, state: Signal<UploadState>) {
    let (progress_tx, mut progress_rx) = futures_channel::mpsc::unbounded::<u8>();

    spawn(async move {
        while let Some(percent) = progress_rx.next().await {
            if update(state, |upload| upload.report_progress(percent)).is_none() {
                break;
            }
        }
    });

    let outcome = send_upload(&config.upload_url, &file, progress_tx).await;
    match outcome {
        Ok(url) => {
            info!("uploaded {} ({} bytes); redirecting to {url}", file.name, file.size);
            if update(state, |upload| upload.finish(Ok(url.clone()))).is_none() {
                return;
            }
            timing::sleep_ms(config.redirect_delay_ms).await;
            if let Err(err) = platform::navigate_to(&url) {
                warn!("{err}");
            }
        }
        Err(failure) => {
            warn!("upload of {} failed: {failure}", file.name);
            update(state, |upload| upload.finish(Err(failure)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dioxus::dioxus_core::VirtualDom;

    use super::*;

    thread_local! {
        static MOUNTED: Cell<Option<Signal<UploadState>>> = const { Cell::new(None) };
    }

    #[allow(non_snake_case)]
    fn UploadCard() -> Element {
        let state = use_signal(|| UploadState::new(1024));
        MOUNTED.with(|slot| slot.set(Some(state)));
        rsx! { div {} }
    }

    #[test]
    fn progress_after_unmount_is_ignored() {
        let mut dom = VirtualDom::new(UploadCard);
        dom.rebuild_in_place();
        let state = MOUNTED
            .with(|slot| slot.take())
            .expect("upload card stored its state");

        let accepted =
            dom.in_runtime(|| update(state, |upload| upload.check_candidate("a.csv", 10)));
        assert_eq!(accepted, Some(true));

        drop(dom);
        assert_eq!(update(state, |upload| upload.report_progress(40)), None);
    }
}
