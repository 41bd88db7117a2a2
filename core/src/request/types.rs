use crate::request::parser::merge_params;
use crate::routing::HttpMethod;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Merged parameter mapping handed to handlers.
pub type Params = Map<String, Value>;

/// Normalized request, independent of the event source it came from.
#[derive(Debug, Clone)]
pub struct Request {
    /// Upper-cased method as received. Methods outside [`HttpMethod`] are kept
    /// so routing can answer them with 405.
    pub method: String,
    pub path: String,
    /// Path, query and body parameters merged with path > query > body precedence.
    pub params: Params,
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
    pub raw_body: Option<String>,
    pub is_base64_encoded: bool,
    /// Caller identity supplied by the invoking platform, if any.
    pub identity: Option<Value>,
    /// Scratch space for middleware (decoded tokens, user attributes).
    pub attributes: Params,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(HashMap<String, String>),
    Text(String),
    Binary(Vec<u8>),
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            path: path.into(),
            params: Params::new(),
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            headers: HashMap::new(),
            body: RequestBody::Empty,
            raw_body: None,
            is_base64_encoded: false,
            identity: None,
            attributes: Params::new(),
        }
    }

    pub fn with_query_params(mut self, query_params: HashMap<String, String>) -> Self {
        self.query_params = query_params;
        self.remerge();
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self.remerge();
        self
    }

    pub fn with_identity(mut self, identity: Value) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Attach the placeholder bindings produced by route matching.
    pub fn with_path_params(mut self, path_params: HashMap<String, String>) -> Self {
        self.path_params = path_params;
        self.remerge();
        self
    }

    /// The method as a routable [`HttpMethod`], if it is one.
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.method.parse().ok()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// String view of a merged parameter; non-string JSON values are not coerced.
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    fn remerge(&mut self) {
        self.params = merge_params(&self.path_params, &self.query_params, &self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = Request::new(HttpMethod::GET, "/").with_header("Content-Type", "text/plain");
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(request.header("accept"), None);
    }

    #[test]
    fn test_builders_keep_params_merged() {
        let request = Request::new(HttpMethod::POST, "/users/5")
            .with_body(RequestBody::Json(json!({"y": "2", "id": "body"})))
            .with_query_params(HashMap::from([("id".to_string(), "9".to_string())]))
            .with_path_params(HashMap::from([("id".to_string(), "5".to_string())]));

        assert_eq!(request.param_str("id"), Some("5"));
        assert_eq!(request.param_str("y"), Some("2"));
    }

    #[test]
    fn test_attributes_round_trip() {
        let mut request = Request::new(HttpMethod::GET, "/");
        request.set_attribute("token", json!("abc"));
        assert_eq!(request.attribute("token"), Some(&json!("abc")));
    }
}
