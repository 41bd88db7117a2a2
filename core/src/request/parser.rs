use crate::errors::{codes, RouterError};
use crate::request::types::{Params, RequestBody};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use std::collections::HashMap;

pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if !key.is_empty() => Some((
                    decode_component(key)?,
                    decode_component(value)?,
                )),
                _ => None,
            }
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

pub fn parse_json_body(data: &[u8]) -> Result<Value, RouterError> {
    serde_json::from_slice(data).map_err(|e| {
        RouterError::invalid_event(codes::INVALID_JSON, format!("Invalid JSON: {}", e))
    })
}

pub fn parse_form_body(data: &[u8]) -> Result<HashMap<String, String>, RouterError> {
    let body_str = std::str::from_utf8(data).map_err(|e| {
        RouterError::invalid_event(
            codes::MALFORMED_EVENT,
            format!("Invalid UTF-8 in form body: {}", e),
        )
    })?;

    Ok(parse_query_string(body_str))
}

/// Decode the raw event body.
///
/// Base64 bodies stay binary. Form bodies are recognised by content type,
/// `text/*` bodies that are not JSON are kept as text, and everything else
/// must be valid JSON.
pub fn decode_body(
    raw: Option<&str>,
    is_base64_encoded: bool,
    content_type: Option<&str>,
) -> Result<RequestBody, RouterError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(RequestBody::Empty),
    };

    if is_base64_encoded {
        let bytes = BASE64.decode(raw).map_err(|e| {
            RouterError::invalid_event(codes::INVALID_BASE64, format!("Invalid base64 body: {}", e))
        })?;
        return Ok(RequestBody::Binary(bytes));
    }

    let media_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match media_type.as_deref() {
        Some("application/x-www-form-urlencoded") => {
            Ok(RequestBody::Form(parse_form_body(raw.as_bytes())?))
        }
        Some(text) if text.starts_with("text/") => match serde_json::from_str(raw) {
            Ok(value) => Ok(RequestBody::Json(value)),
            Err(_) => Ok(RequestBody::Text(raw.to_string())),
        },
        _ => parse_json_body(raw.as_bytes()).map(RequestBody::Json),
    }
}

/// Merge parameters with path > query > body precedence.
///
/// Only JSON object and form bodies contribute entries.
pub fn merge_params(
    path_params: &HashMap<String, String>,
    query_params: &HashMap<String, String>,
    body: &RequestBody,
) -> Params {
    let mut params = Params::new();

    match body {
        RequestBody::Json(Value::Object(fields)) => {
            for (key, value) in fields {
                params.insert(key.clone(), value.clone());
            }
        }
        RequestBody::Form(fields) => {
            for (key, value) in fields {
                params.insert(key.clone(), Value::String(value.clone()));
            }
        }
        _ => {}
    }

    for (key, value) in query_params.iter().chain(path_params.iter()) {
        params.insert(key.clone(), Value::String(value.clone()));
    }

    params
}
