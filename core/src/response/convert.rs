use crate::errors::RouterError;
use crate::response::types::{Response, ResponseBody};
use serde_json::Value;
use std::collections::HashMap;

/// Status used when handler output omits `statusCode`.
pub const DEFAULT_STATUS: u16 = 500;

/// Conversion from handler output into a [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Result<Response, RouterError>;
}

impl IntoResponse for Response {
    fn into_response(self) -> Result<Response, RouterError> {
        Ok(self)
    }
}

/// Loose handler output shaped like a platform response:
/// `{"statusCode": 200, "body": ..., "headers": {...}, "isBase64Encoded": false}`.
///
/// A missing `statusCode` yields 500 and a missing `body` yields an empty body.
impl IntoResponse for Value {
    fn into_response(self) -> Result<Response, RouterError> {
        let mut fields = match self {
            Value::Object(fields) => fields,
            other => {
                return Err(RouterError::handler(format!(
                    "handler returned a non-object value: {}",
                    other
                )))
            }
        };

        let status_code = match fields.remove("statusCode") {
            None | Some(Value::Null) => DEFAULT_STATUS,
            Some(value) => value
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .ok_or_else(|| RouterError::handler(format!("invalid statusCode: {}", value)))?,
        };

        let body = match fields.remove("body") {
            None | Some(Value::Null) => ResponseBody::Empty,
            Some(Value::String(text)) => ResponseBody::Text(text),
            Some(value) => ResponseBody::Json(value),
        };

        let mut headers = HashMap::new();
        if let Some(Value::Object(raw)) = fields.remove("headers") {
            for (name, value) in raw {
                let value = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                headers.insert(name, value);
            }
        }

        let is_base64_encoded = fields
            .remove("isBase64Encoded")
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);

        Ok(Response {
            status_code,
            headers,
            body,
            is_base64_encoded,
        })
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<RouterError>,
{
    fn into_response(self) -> Result<Response, RouterError> {
        match self {
            Ok(output) => output.into_response(),
            Err(err) => Err(err.into()),
        }
    }
}
