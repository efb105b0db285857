//! JSON fetch wrapper used for every analysis API call.
//!
//! Each request carries the CSRF header and a JSON content type. Callers may
//! override either, or add their own headers. Bodies are parsed as JSON before
//! the status is checked, so a failed response can still hand back the
//! server's `error` message.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::csrf::{self, CSRF_HEADER};

/// Message used when a failed response carries no `error` text.
pub const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Caller overrides layered on top of the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json_body<T: Serialize>(mut self, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(String),
    /// Non-2xx status; `message` comes from the body's `error` field.
    Http { status: u16, message: String },
    /// The body was not the JSON we expected.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(message) => f.write_str(message),
            ApiError::Http { message, .. } => f.write_str(message),
            ApiError::Decode(message) => write!(f, "Unexpected response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn default_headers(token: Option<String>) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(2);
    if let Some(token) = token {
        headers.push((CSRF_HEADER.to_string(), token));
    }
    headers.push(("Content-Type".to_string(), "application/json".to_string()));
    headers
}

/// Overrides replace a default with the same name; new names are appended.
pub fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = defaults;
    for (name, value) in overrides {
        match merged.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}

/// The body's `error` text, or the generic fallback.
pub fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(GENERIC_ERROR)
        .to_string()
}

/// Parse a raw response the way `fetch_json` does.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, ApiError> {
    let data: Value =
        serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: error_message(&data),
        });
    }
    Ok(data)
}

pub async fn fetch_json(url: &str, options: RequestOptions) -> Result<Value, ApiError> {
    let headers = merge_headers(default_headers(csrf::csrf_token()), &options.headers);

    #[cfg(target_arch = "wasm32")]
    {
        use gloo_net::http::{Method, RequestBuilder};

        let method = match options.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = RequestBuilder::new(url).method(method);
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        let response = match options.body {
            Some(body) => {
                let request = builder
                    .body(body)
                    .map_err(|err| ApiError::Transport(err.to_string()))?;
                request.send().await
            }
            None => builder.send().await,
        }
        .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        interpret_response(status, &text)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (headers, options);
        Err(ApiError::Transport(format!(
            "{url}: HTTP requests are only available in the browser build"
        )))
    }
}
