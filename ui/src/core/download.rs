//! Saving base64 chart payloads as PNG files.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use time::{macros::format_description, Date};

pub const DEFAULT_IMAGE_NAME: &str = "visualization.png";

/// `<operation>_<YYYY-MM-DD>.png`
pub fn export_filename(operation: &str, date: Date) -> String {
    let stamp = date
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string());
    format!("{operation}_{stamp}.png")
}

/// Decode a base64 PNG, tolerating a leading `data:` URL prefix.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, String> {
    let raw = match payload.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    STANDARD
        .decode(raw.trim())
        .map_err(|err| format!("Image payload is not valid base64: {err}"))
}

/// Trigger a download of `payload` under `filename` (or [`DEFAULT_IMAGE_NAME`]
/// when blank).
///
/// Returns the saved path on native builds; browsers report `None` once the download starts.
pub fn download_image(payload: &str, filename: &str) -> Result<Option<String>, String> {
    let bytes = decode_image(payload)?;
    let filename = match filename.trim() {
        "" => DEFAULT_IMAGE_NAME,
        name => name,
    };
    download_bytes(filename, "image/png", bytes)
}

fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = native_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn native_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "ModelYourData", "ModelYourData")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn export_names_use_operation_and_iso_date() {
        assert_eq!(
            export_filename("histogram", date!(2024 - 03 - 07)),
            "histogram_2024-03-07.png"
        );
    }

    #[test]
    fn plain_and_data_url_payloads_decode() {
        let plain = decode_image("iVBORw0KGgo=").unwrap();
        let prefixed = decode_image("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(&plain[1..4], b"PNG");
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(decode_image("not base64 at all!").is_err());
    }
}
