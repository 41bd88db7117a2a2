use crate::errors::RouterError;
use crate::event::{malformed, EventAdapter, EventParts};
use crate::request::{parse_query_string, Request};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionUrlEvent {
    request_context: RequestContext,
    #[serde(default)]
    raw_query_string: Option<String>,
    #[serde(default)]
    query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    headers: Option<HashMap<String, String>>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    is_base64_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct RequestContext {
    http: HttpDescription,
    #[serde(default)]
    authorizer: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct HttpDescription {
    path: String,
    method: String,
}

/// Lambda function URL payload (format 2.0): method and path live under
/// `requestContext.http`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionUrlAdapter;

impl EventAdapter for FunctionUrlAdapter {
    fn normalize(&self, event: &Value) -> Result<Request, RouterError> {
        let event = FunctionUrlEvent::deserialize(event).map_err(malformed)?;

        let query_params = match (event.query_string_parameters, event.raw_query_string) {
            (Some(params), _) => params,
            (None, Some(raw)) => parse_query_string(&raw),
            (None, None) => HashMap::new(),
        };

        EventParts {
            method: event.request_context.http.method,
            path: event.request_context.http.path,
            query_params,
            headers: event.headers.unwrap_or_default(),
            body: event.body,
            is_base64_encoded: event.is_base64_encoded,
            identity: event.request_context.authorizer,
        }
        .into_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::codes;
    use crate::request::RequestBody;
    use crate::routing::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_normalize_full_event() {
        let event = json!({
            "requestContext": {
                "http": {"path": "/users/5", "method": "post"},
                "authorizer": {"iam": {"userId": "AIDA123"}}
            },
            "queryStringParameters": {"x": "1"},
            "headers": {"content-type": "application/json"},
            "body": "{\"y\": \"2\"}",
            "isBase64Encoded": false
        });

        let request = FunctionUrlAdapter.normalize(&event).unwrap();
        assert_eq!(request.http_method(), Some(HttpMethod::POST));
        assert_eq!(request.path, "/users/5");
        assert_eq!(request.param_str("x"), Some("1"));
        assert_eq!(request.param_str("y"), Some("2"));
        assert_eq!(request.raw_body.as_deref(), Some("{\"y\": \"2\"}"));
        assert_eq!(request.identity, Some(json!({"iam": {"userId": "AIDA123"}})));
    }

    #[test]
    fn test_raw_query_string_fallback() {
        let event = json!({
            "requestContext": {"http": {"path": "/search", "method": "GET"}},
            "rawQueryString": "q=rust+lambda&page=2"
        });

        let request = FunctionUrlAdapter.normalize(&event).unwrap();
        assert_eq!(request.query_params.get("q"), Some(&"rust lambda".to_string()));
        assert_eq!(request.param_str("page"), Some("2"));
    }

    #[test]
    fn test_minimal_event_has_empty_parts() {
        let event = json!({"requestContext": {"http": {"path": "/", "method": "GET"}}});

        let request = FunctionUrlAdapter.normalize(&event).unwrap();
        assert!(request.params.is_empty());
        assert!(request.headers.is_empty());
        assert_eq!(request.body, RequestBody::Empty);
        assert!(request.identity.is_none());
    }

    #[test]
    fn test_base64_body_decoded() {
        let event = json!({
            "requestContext": {"http": {"path": "/upload", "method": "PUT"}},
            "body": "AAEC",
            "isBase64Encoded": true
        });

        let request = FunctionUrlAdapter.normalize(&event).unwrap();
        assert_eq!(request.body, RequestBody::Binary(vec![0, 1, 2]));
        assert!(request.is_base64_encoded);
    }

    #[test]
    fn test_missing_context_is_event_error() {
        let err = FunctionUrlAdapter
            .normalize(&json!({"path": "/x", "httpMethod": "GET"}))
            .unwrap_err();
        assert!(err.to_string().contains(codes::MISSING_FIELD));
        assert_eq!(err.status_code(), 500);
    }
}
