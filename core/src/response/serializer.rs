use crate::response::types::{Response, ResponseBody};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;

/// Wire shape of the serialized response, fixed per invocation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Body is always a string; structured bodies are JSON-encoded.
    ApiGatewayProxy,
    /// Structured bodies are passed through as JSON values.
    FunctionUrl,
}

/// Writes `": "` and `", "` separators, matching the encoding API Gateway
/// integrations conventionally produce.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn serialize_json_response(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => out,
        Err(_) => serde_json::to_vec(value).unwrap_or_default(),
    }
}

/// JSON-encode a value as a string using the spaced separators.
pub fn json_body_string(value: &Value) -> String {
    String::from_utf8(serialize_json_response(value)).unwrap_or_else(|_| value.to_string())
}

/// Serialize a response into the envelope the invoking platform expects.
///
/// `headers` is emitted only when non-empty and `isBase64Encoded` only when
/// set, so a plain response serializes to exactly `statusCode` and `body`.
pub fn serialize_envelope(response: &Response, envelope: Envelope) -> Value {
    let body = match (&response.body, envelope) {
        (ResponseBody::Empty, _) => Value::String(String::new()),
        (ResponseBody::Text(text), _) => Value::String(text.clone()),
        (ResponseBody::Binary(data), _) => Value::String(BASE64.encode(data)),
        (ResponseBody::Json(Value::String(text)), Envelope::ApiGatewayProxy) => {
            Value::String(text.clone())
        }
        (ResponseBody::Json(value), Envelope::ApiGatewayProxy) => {
            Value::String(json_body_string(value))
        }
        (ResponseBody::Json(value), Envelope::FunctionUrl) => value.clone(),
    };

    let mut out = Map::new();
    out.insert("statusCode".to_string(), Value::from(response.status_code));
    out.insert("body".to_string(), body);

    if !response.headers.is_empty() {
        let sorted: BTreeMap<&String, &String> = response.headers.iter().collect();
        let headers: Map<String, Value> = sorted
            .into_iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        out.insert("headers".to_string(), Value::Object(headers));
    }

    if response.is_base64_encoded || matches!(response.body, ResponseBody::Binary(_)) {
        out.insert("isBase64Encoded".to_string(), Value::Bool(true));
    }

    Value::Object(out)
}
