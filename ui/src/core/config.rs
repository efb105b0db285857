//! Client configuration.
//!
//! Defaults match the stock server deployment. A host page may override any
//! field by embedding a JSON object:
//!
//! ```html
//! <script id="client-config" type="application/json">
//!   { "api_root": "/data/api", "max_upload_bytes": 5242880 }
//! </script>
//! ```
//!
//! Missing fields keep their defaults; an unreadable block is ignored with a warning.

use dioxus::logger::tracing::warn;
use serde::Deserialize;

/// DOM id of the optional configuration block.
pub const CONFIG_ELEMENT_ID: &str = "client-config";

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for analysis endpoints, without a trailing slash.
    pub api_root: String,
    pub upload_url: String,
    pub max_upload_bytes: u64,
    pub redirect_delay_ms: u64,
    pub toast_visible_ms: u64,
    pub toast_fade_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: "/api".to_string(),
            upload_url: "/upload/".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            redirect_delay_ms: 500,
            toast_visible_ms: 5_000,
            toast_fade_ms: 300,
        }
    }
}

impl ClientConfig {
    /// Parse an override document. Trailing slashes on `api_root` are dropped.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: ClientConfig = serde_json::from_str(raw)?;
        while config.api_root.ends_with('/') {
            config.api_root.pop();
        }
        Ok(config)
    }

    /// Resolve the configuration for the running page.
    pub fn load() -> Self {
        match super::platform::element_text(CONFIG_ELEMENT_ID) {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|err| {
                warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            ClientConfig::from_json(r#"{ "api_root": "/data/api/", "toast_visible_ms": 2000 }"#)
                .unwrap();
        assert_eq!(config.api_root, "/data/api");
        assert_eq!(config.toast_visible_ms, 2000);
        assert_eq!(config.upload_url, "/upload/");
        assert_eq!(config.redirect_delay_ms, 500);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(ClientConfig::from_json("{ api_root: ").is_err());
    }
}
