use crate::errors::RouterError;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: ResponseBody,
    /// Body must be base64-encoded on the wire. Implied for binary bodies.
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
    Binary(Vec<u8>),
}

impl Response {
    pub fn new(status_code: u16, body: ResponseBody) -> Self {
        let is_base64_encoded = matches!(body, ResponseBody::Binary(_));
        Self {
            status_code,
            headers: HashMap::new(),
            body,
            is_base64_encoded,
        }
    }

    pub fn json(status_code: u16, value: Value) -> Self {
        Self::new(status_code, ResponseBody::Json(value))
    }

    pub fn text(status_code: u16, text: impl Into<String>) -> Self {
        Self::new(status_code, ResponseBody::Text(text.into()))
    }

    pub fn empty(status_code: u16) -> Self {
        Self::new(status_code, ResponseBody::Empty)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn not_found() -> Self {
        Self::text(404, "Route Not Found")
    }

    pub fn method_not_allowed() -> Self {
        Self::text(405, "Method Not Allowed")
    }

    /// Turn a dispatch failure into the response returned to the platform.
    pub fn from_error(err: &RouterError) -> Self {
        match err {
            RouterError::RouteNotFound { .. } => Self::not_found(),
            RouterError::MethodNotAllowed { .. } => Self::method_not_allowed(),
            other => Self::json(other.status_code(), json!({ "error": other.to_string() })),
        }
    }
}
