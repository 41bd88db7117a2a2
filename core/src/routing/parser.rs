use crate::errors::{codes, RouterError};
use crate::routing::types::RouteTemplate;
use regex::Regex;

/// Compile a route template into an anchored regex.
///
/// Every `/`-separated segment, empty ones included, becomes one regex
/// segment, so a compiled template only accepts paths with the same segment
/// count. Placeholders compile to `([^/]+)`.
pub fn parse_route_pattern(pattern: &str) -> Result<RouteTemplate, RouterError> {
    let mut regex_pattern = String::from("^");
    let mut param_names: Vec<String> = Vec::new();

    for (i, part) in pattern.split('/').enumerate() {
        if i > 0 {
            regex_pattern.push('/');
        }

        if let Some(name) = placeholder_name(part) {
            if name.is_empty() {
                return Err(RouterError::invalid_pattern(
                    codes::EMPTY_PLACEHOLDER,
                    format!("Empty placeholder in route pattern: {}", pattern),
                ));
            }
            if name.contains(['{', '}']) {
                return Err(RouterError::invalid_pattern(
                    codes::STRAY_BRACE,
                    format!("Nested braces in route pattern: {}", pattern),
                ));
            }
            if param_names.iter().any(|existing| existing == name) {
                return Err(RouterError::invalid_pattern(
                    codes::DUPLICATE_PLACEHOLDER,
                    format!("Placeholder '{}' repeated in route pattern: {}", name, pattern),
                ));
            }
            param_names.push(name.to_string());
            regex_pattern.push_str(r"([^/]+)");
        } else if part.contains(['{', '}']) {
            return Err(RouterError::invalid_pattern(
                codes::STRAY_BRACE,
                format!("Placeholders must span a whole segment: {}", pattern),
            ));
        } else {
            regex_pattern.push_str(&regex::escape(part));
        }
    }
    regex_pattern.push('$');

    let path_regex = Regex::new(&regex_pattern).map_err(|e| {
        RouterError::invalid_pattern(codes::INVALID_REGEX, format!("Invalid route pattern: {}", e))
    })?;

    Ok(RouteTemplate {
        path: pattern.to_string(),
        path_regex,
        param_names,
    })
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
