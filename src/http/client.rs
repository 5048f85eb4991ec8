use log::debug;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::errors::ApiError;

/// Thin wrapper over `reqwest` that applies the backend's error conventions.
///
/// Every call is a single attempt: no retries, no backoff and no timeout
/// beyond the transport default.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ApiError> {
        let client = Self::build_client(user_agent)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one request and return the parsed JSON body, if any.
    ///
    /// A body that is not JSON is tolerated and yields `None`. A non-success
    /// status fails with the body's `detail`/`error` field, falling back to
    /// `"<status> <reason>"`.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.build_url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let data = parse_body(&bytes);

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: error_message(status, data.as_ref()),
            });
        }

        Ok(data)
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.fetch(Method::GET, path, &[], None).await
    }

    fn build_client(user_agent: &str) -> Result<Client, ApiError> {
        Ok(Client::builder().user_agent(user_agent).build()?)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Ignoring non-JSON response body: {e}");
            None
        }
    }
}

/// Pick the message shown to the operator for a failed call.
pub fn error_message(status: StatusCode, body: Option<&Value>) -> String {
    body.and_then(|data| field_message(data, "detail").or_else(|| field_message(data, "error")))
        .unwrap_or_else(|| status_line(status))
}

fn field_message(data: &Value, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_wins_over_error() {
        let body = json!({"detail": "Round not found.", "error": "other"});
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, Some(&body)),
            "Round not found."
        );
    }

    #[test]
    fn test_error_field_used_without_detail() {
        let body = json!({"error": "boom"});
        assert_eq!(error_message(StatusCode::BAD_REQUEST, Some(&body)), "boom");
    }

    #[test]
    fn test_empty_detail_falls_through() {
        let body = json!({"detail": "", "error": "second choice"});
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, Some(&body)),
            "second choice"
        );
    }

    #[test]
    fn test_structured_detail_rendered_as_json() {
        let body = json!({"detail": [{"loc": ["query", "points"], "msg": "field required"}]});
        let message = error_message(StatusCode::UNPROCESSABLE_ENTITY, Some(&body));
        assert!(message.starts_with('['));
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_status_line_without_body() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, None),
            "500 Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, Some(&json!([1, 2]))), "404 Not Found");
    }

    #[test]
    fn test_non_json_body_is_ignored() {
        assert_eq!(parse_body(b"<html>oops</html>"), None);
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b"{\"ok\": true}"), Some(json!({"ok": true})));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", "test").unwrap();
        assert_eq!(client.build_url("/api/teams"), "http://localhost:8000/api/teams");
    }
}
