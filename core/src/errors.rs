use thiserror::Error;

/// Stable error codes carried by [`RouterError`] variants.
pub mod codes {
    pub const UNKNOWN_EVENT_SOURCE: &str = "LAMBDAPI_ADAPTER_UNKNOWN_SOURCE";
    pub const MISSING_FIELD: &str = "LAMBDAPI_EVENT_MISSING_FIELD";
    pub const MALFORMED_EVENT: &str = "LAMBDAPI_EVENT_MALFORMED";
    pub const INVALID_JSON: &str = "LAMBDAPI_EVENT_INVALID_JSON";
    pub const INVALID_BASE64: &str = "LAMBDAPI_EVENT_INVALID_BASE64";
    pub const INVALID_HTTP_METHOD: &str = "LAMBDAPI_EVENT_INVALID_HTTP_METHOD";
    pub const EMPTY_PLACEHOLDER: &str = "LAMBDAPI_ROUTE_EMPTY_PLACEHOLDER";
    pub const DUPLICATE_PLACEHOLDER: &str = "LAMBDAPI_ROUTE_DUPLICATE_PLACEHOLDER";
    pub const STRAY_BRACE: &str = "LAMBDAPI_ROUTE_STRAY_BRACE";
    pub const INVALID_REGEX: &str = "LAMBDAPI_ROUTE_INVALID_REGEX";
    pub const HANDLER_FAILED: &str = "LAMBDAPI_HANDLER_FAILED";
    pub const HANDLER_PANICKED: &str = "LAMBDAPI_HANDLER_PANICKED";
    pub const CONFIG_IO: &str = "LAMBDAPI_CONFIG_IO";
    pub const CONFIG_PARSE: &str = "LAMBDAPI_CONFIG_PARSE";
}

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("ROUTE NOT FOUND: {path}")]
    RouteNotFound { path: String },

    #[error("METHOD NOT ALLOWED: {method} {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("UNAUTHORIZED: {message}")]
    Unauthorized { message: String },

    #[error("ADAPTER CONFIGURATION ERROR: {code} - {message}")]
    AdapterConfiguration { code: String, message: String },

    #[error("ROUTE PATTERN ERROR: {code} - {message}")]
    InvalidRoutePattern { code: String, message: String },

    #[error("EVENT ERROR: {code} - {message}")]
    InvalidEvent { code: String, message: String },

    #[error("HANDLER ERROR: {code} - {message}")]
    Handler { code: String, message: String },

    #[error("CONFIG ERROR: {code} - {message}")]
    Config { code: String, message: String },
}

impl RouterError {
    /// Shorthand for a failure raised by user handler code.
    pub fn handler(message: impl Into<String>) -> Self {
        RouterError::Handler {
            code: codes::HANDLER_FAILED.to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        RouterError::Unauthorized {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_event(code: &str, message: impl Into<String>) -> Self {
        RouterError::InvalidEvent {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_pattern(code: &str, message: impl Into<String>) -> Self {
        RouterError::InvalidRoutePattern {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status this error turns into when it reaches the dispatch boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            RouterError::RouteNotFound { .. } => 404,
            RouterError::MethodNotAllowed { .. } => 405,
            RouterError::Unauthorized { .. } => 401,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::handler(err.to_string())
    }
}

impl From<String> for RouterError {
    fn from(message: String) -> Self {
        RouterError::handler(message)
    }
}

impl From<&str> for RouterError {
    fn from(message: &str) -> Self {
        RouterError::handler(message)
    }
}
