//! HTTP calls behind the dashboard.

use serde_json::Value;

use crate::core::http::{fetch_json, RequestOptions, GENERIC_ERROR};

use super::data::{AnalysisData, ColumnCatalog};
use super::LoadTicket;

/// Unwrap `{success, data}` / `{success: false, error}`.
pub fn open_envelope(body: Value) -> Result<Value, String> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if success {
        return Ok(body.get("data").cloned().unwrap_or(Value::Null));
    }
    Err(body
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(GENERIC_ERROR)
        .to_string())
}

pub fn decode_result(ticket: &LoadTicket, body: Value) -> Result<AnalysisData, String> {
    let data = open_envelope(body)?;
    AnalysisData::decode(ticket.operation, data)
        .map_err(|err| format!("Unexpected {} response: {err}", ticket.operation))
}

pub async fn fetch_operation(ticket: &LoadTicket) -> Result<AnalysisData, String> {
    let body = fetch_json(&ticket.url, RequestOptions::default())
        .await
        .map_err(|err| err.to_string())?;
    decode_result(ticket, body)
}

pub fn columns_url(api_root: &str, file_id: &str) -> String {
    format!("{api_root}/columns/{file_id}/")
}

pub async fn fetch_columns(api_root: &str, file_id: &str) -> Result<ColumnCatalog, String> {
    let body = fetch_json(&columns_url(api_root, file_id), RequestOptions::default())
        .await
        .map_err(|err| err.to_string())?;
    let data = open_envelope(body)?;
    serde_json::from_value(data).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Operation;
    use serde_json::json;

    fn ticket(operation: Operation) -> LoadTicket {
        LoadTicket {
            generation: 1,
            operation,
            url: String::new(),
        }
    }

    #[test]
    fn failure_without_message_is_generic() {
        assert_eq!(open_envelope(json!({"success": false})), Err(GENERIC_ERROR.into()));
        assert_eq!(
            open_envelope(json!({"success": false, "error": "Column not found"})),
            Err("Column not found".into())
        );
    }

    #[test]
    fn success_decodes_for_the_ticket_operation() {
        let body = json!({
            "success": true,
            "data": {"image": "b", "columns": ["a", "b"]}
        });
        let data = decode_result(&ticket(Operation::Boxplot), body).unwrap();
        assert_eq!(data.operation(), Operation::Boxplot);
    }

    #[test]
    fn mismatched_payload_names_the_operation() {
        let body = json!({"success": true, "data": {"nope": 1}});
        let err = decode_result(&ticket(Operation::Correlation), body).unwrap_err();
        assert!(err.starts_with("Unexpected correlation response"), "{err}");
    }

    #[test]
    fn columns_route() {
        assert_eq!(columns_url("/api", "12"), "/api/columns/12/");
    }
}
