//! Event adapters: turn a platform invocation payload into a [`Request`].

pub mod api_gateway;
pub mod function_url;

pub use api_gateway::ApiGatewayProxyAdapter;
pub use function_url::FunctionUrlAdapter;

use crate::errors::{codes, RouterError};
use crate::request::{decode_body, parse_json_body, Request, RequestBody};
use crate::response::Envelope;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub trait EventAdapter: Send + Sync {
    fn normalize(&self, event: &Value) -> Result<Request, RouterError>;
}

/// Invocation source an `App` is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    FunctionUrl,
    ApiGatewayProxy,
}

impl EventSource {
    pub const ALLOWED: [&'static str; 2] = ["function_url", "api_gateway_proxy"];

    pub fn identifier(&self) -> &'static str {
        match self {
            EventSource::FunctionUrl => "function_url",
            EventSource::ApiGatewayProxy => "api_gateway_proxy",
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            EventSource::FunctionUrl => Envelope::FunctionUrl,
            EventSource::ApiGatewayProxy => Envelope::ApiGatewayProxy,
        }
    }

    pub fn adapter(&self) -> &'static dyn EventAdapter {
        match self {
            EventSource::FunctionUrl => &FunctionUrlAdapter,
            EventSource::ApiGatewayProxy => &ApiGatewayProxyAdapter,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for EventSource {
    type Err = RouterError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source {
            "function_url" => Ok(EventSource::FunctionUrl),
            "api_gateway_proxy" => Ok(EventSource::ApiGatewayProxy),
            other => Err(RouterError::AdapterConfiguration {
                code: codes::UNKNOWN_EVENT_SOURCE.to_string(),
                message: format!(
                    "Source '{}' not allowed, expected one of {:?}",
                    other,
                    EventSource::ALLOWED
                ),
            }),
        }
    }
}

/// Fields both envelope shapes carry once their layout differences are
/// resolved.
pub(crate) struct EventParts {
    pub method: String,
    pub path: String,
    pub query_params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub is_base64_encoded: bool,
    pub identity: Option<Value>,
}

impl EventParts {
    pub(crate) fn into_request(self) -> Result<Request, RouterError> {

        let content_type = self
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str());

        let (body, raw_body) = match self.body {
            None | Some(Value::Null) => (RequestBody::Empty, None),
            Some(Value::String(raw)) => (
                decode_body(Some(&raw), self.is_base64_encoded, content_type)?,
                Some(raw),
            ),
            // Direct invocations sometimes pass the body already decoded.
            Some(structured) => (RequestBody::Json(structured), None),
        };

        let mut request = Request::new(self.method, self.path)
            .with_headers(self.headers)
            .with_query_params(self.query_params)
            .with_body(body);
        request.raw_body = raw_body;
        request.is_base64_encoded = self.is_base64_encoded;
        request.identity = self.identity.filter(|identity| !identity.is_null());
        Ok(request)
    }
}

/// Map a serde failure on the event payload to an event error.
pub(crate) fn malformed(err: serde_json::Error) -> RouterError {
    let text = err.to_string();
    let code = if text.starts_with("missing field") {
        codes::MISSING_FIELD
    } else {
        codes::MALFORMED_EVENT
    };
    RouterError::invalid_event(code, format!("Malformed event: {}", text))
}

/// Parse an event from raw bytes, e.g. a payload read from disk.
pub fn parse_event(data: &[u8]) -> Result<Value, RouterError> {
    parse_json_body(data)
}
