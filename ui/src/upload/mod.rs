//! CSV upload: selection, client-side validation, transmission, redirect.
//!
//! [`UploadState`] is the whole lifecycle as a plain value so the view only
//! forwards events into it and renders what it says:
//!
//! ```text
//! Empty ──select(valid)──▶ Selected ──submit──▶ Uploading ──2xx+success──▶ Redirecting
//!   ▲                         │                     │
//!   └────────remove───────────┘                     └──failure──▶ Empty (+ error)
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::format::format_file_size;

mod transport;
mod view;

pub use transport::send_upload;
pub use view::UploadView;

/// Multipart field the server reads the file from.
pub const FILE_FIELD: &str = "csv_file";

pub const STATUS_PREPARING: &str = "Preparing upload...";
pub const STATUS_COMPLETE: &str = "Upload complete! Redirecting...";
pub const FALLBACK_FAILURE: &str = "Upload failed";
pub const NETWORK_FAILURE: &str = "Network error. Please try again.";
pub const UNREADABLE_FILE: &str = "Unable to read the selected file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    NotCsv,
    TooLarge { max_bytes: u64 },
    Empty,
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::NotCsv => f.write_str("Only CSV files are allowed."),
            UploadRejection::TooLarge { max_bytes } => {
                write!(f, "File size must be under {}MB.", max_bytes / (1024 * 1024))
            }
            UploadRejection::Empty => f.write_str("The uploaded file is empty."),
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Extension, then size ceiling, then emptiness; first failure wins.
pub fn validate_file(name: &str, size: u64, max_bytes: u64) -> Result<(), UploadRejection> {
    if !name.to_lowercase().ends_with(".csv") {
        return Err(UploadRejection::NotCsv);
    }
    if size > max_bytes {
        return Err(UploadRejection::TooLarge { max_bytes });
    }
    if size == 0 {
        return Err(UploadRejection::Empty);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// No response reached us.
    Network,
    /// The server answered but refused the file.
    Rejected(String),
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFailure::Network => f.write_str(NETWORK_FAILURE),
            UploadFailure::Rejected(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for UploadFailure {}

/// Map the upload endpoint's reply to a redirect target or a user-facing error.
pub fn interpret_upload_reply(status: u16, body: &str) -> Result<String, UploadFailure> {
    let rejected = |reply: Option<&Value>| {
        let message = reply
            .and_then(|reply| reply.pointer("/errors/csv_file/0"))
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_FAILURE);
        UploadFailure::Rejected(message.to_string())
    };

    let Ok(reply) = serde_json::from_str::<Value>(body) else {
        return Err(rejected(None));
    };

    let succeeded = reply.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !(200..300).contains(&status) || !succeeded {
        return Err(rejected(Some(&reply)));
    }

    reply
        .get("redirect_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| rejected(Some(&reply)))
}

/// `round(loaded / total * 100)`, or `None` when the length is unknown.
pub fn progress_percent(loaded: f64, total: f64, length_computable: bool) -> Option<u8> {
    if !length_computable || total <= 0.0 {
        return None;
    }
    let percent = (loaded / total * 100.0).round().clamp(0.0, 100.0);
    Some(percent as u8)
}

#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Arc<Vec<u8>>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes: Arc::new(bytes),
        }
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Empty,
    Selected(SelectedFile),
    Uploading { percent: u8, status: String },
    Redirecting { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadState {
    pub phase: UploadPhase,
    pub error: Option<String>,
    /// Bumped whenever the file picker must be cleared (it is remounted).
    pub picker_epoch: u32,
    max_bytes: u64,
}

impl UploadState {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            phase: UploadPhase::Empty,
            error: None,
            picker_epoch: 0,
            max_bytes,
        }
    }

    /// Validate a candidate before its bytes are read. A rejection keeps any
    /// previously selected file.
    pub fn check_candidate(&mut self, name: &str, size: u64) -> bool {
        self.error = None;
        match validate_file(name, size, self.max_bytes) {
            Ok(()) => true,
            Err(rejection) => {
                self.error = Some(rejection.to_string());
                false
            }
        }
    }

    pub fn accept(&mut self, file: SelectedFile) {
        self.phase = UploadPhase::Selected(file);
    }

    pub fn reject_unreadable(&mut self) {
        self.error = Some(UNREADABLE_FILE.to_string());
    }

    pub fn remove(&mut self) {
        self.phase = UploadPhase::Empty;
        self.error = None;
        self.picker_epoch = self.picker_epoch.wrapping_add(1);
    }

    /// Move to `Uploading` and hand back the file to send. No-op unless a file is selected.
    pub fn begin_upload(&mut self) -> Option<SelectedFile> {
        let UploadPhase::Selected(file) = &self.phase else {
            return None;
        };
        let file = file.clone();
        self.error = None;
        self.phase = UploadPhase::Uploading {
            percent: 0,
            status: STATUS_PREPARING.to_string(),
        };
        Some(file)
    }

    pub fn report_progress(&mut self, value: u8) {
        if let UploadPhase::Uploading { percent, status } = &mut self.phase {
            *percent = value.min(100);
            *status = format!("Uploading... {}%", *percent);
        }
    }

    pub fn finish(&mut self, outcome: Result<String, UploadFailure>) {
        match outcome {
            Ok(url) => self.phase = UploadPhase::Redirecting { url },
            Err(failure) => {
                self.phase = UploadPhase::Empty;
                self.picker_epoch = self.picker_epoch.wrapping_add(1);
                self.error = Some(failure.to_string());
            }
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        match &self.phase {
            UploadPhase::Selected(file) => Some(file),
            _ => None,
        }
    }

    /// Bar width and caption while a transfer is running or finishing.
    pub fn progress(&self) -> Option<(u8, String)> {
        match &self.phase {
            UploadPhase::Uploading { percent, status } => Some((*percent, status.clone())),
            UploadPhase::Redirecting { .. } => Some((100, STATUS_COMPLETE.to_string())),
            _ => None,
        }
    }

    pub fn shows_dropzone(&self) -> bool {
        matches!(self.phase, UploadPhase::Empty)
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            UploadPhase::Uploading { .. } | UploadPhase::Redirecting { .. }
        )
    }
}
