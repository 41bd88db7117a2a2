use crate::errors::RouterError;
use crate::event::{malformed, EventAdapter, EventParts};
use crate::request::Request;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGatewayProxyEvent {
    path: String,
    http_method: String,
    #[serde(default)]
    query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    headers: Option<HashMap<String, String>>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    is_base64_encoded: bool,
    #[serde(default)]
    request_context: Option<RequestContext>,
}

#[derive(Debug, Deserialize)]
struct RequestContext {
    #[serde(default)]
    identity: Option<Value>,
}

/// API Gateway REST proxy integration payload (format 1.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiGatewayProxyAdapter;

impl EventAdapter for ApiGatewayProxyAdapter {
    fn normalize(&self, event: &Value) -> Result<Request, RouterError> {
        let event = ApiGatewayProxyEvent::deserialize(event).map_err(malformed)?;

        EventParts {
            method: event.http_method,
            path: event.path,
            query_params: event.query_string_parameters.unwrap_or_default(),
            headers: event.headers.unwrap_or_default(),
            body: event.body,
            is_base64_encoded: event.is_base64_encoded,
            identity: event.request_context.and_then(|context| context.identity),
        }
        .into_request()
    }
}
