use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Body,
    #[serde(rename = "formData")]
    FormData,
}

/// One documented operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub required: bool,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl ParameterSchema {
    pub fn new(name: impl Into<String>, location: ParamLocation, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            required: true,
            description: String::new(),
            param_type: param_type.into(),
        }
    }

    pub fn query(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Query, param_type)
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Path, "string")
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Header, "string")
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Flatten a `{name: type}` description into required query parameters.
    /// Nested objects are flattened in place; non-string leaves are skipped.
    pub fn flatten(spec: &Value) -> Vec<ParameterSchema> {
        let mut out = Vec::new();
        if let Value::Object(fields) = spec {
            for (name, param_type) in fields {
                match param_type {
                    Value::Object(_) => out.extend(Self::flatten(param_type)),
                    Value::String(param_type) => out.push(Self::query(name.clone(), param_type.clone())),
                    _ => {}
                }
            }
        }
        out
    }
}

/// Documentation attached to a method handler at registration time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationSchema {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterSchema>,
    pub response_description: Option<String>,
    /// Name of an entry in the document's `definitions`.
    pub response_ref: Option<String>,
}

impl OperationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameter(mut self, parameter: ParameterSchema) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameters_from(mut self, spec: &Value) -> Self {
        self.parameters.extend(ParameterSchema::flatten(spec));
        self
    }

    pub fn responds_with(mut self, description: impl Into<String>) -> Self {
        self.response_description = Some(description.into());
        self
    }

    pub fn returns(mut self, definition: impl Into<String>) -> Self {
        self.response_ref = Some(definition.into());
        self
    }
}
