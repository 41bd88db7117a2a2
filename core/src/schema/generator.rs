use crate::errors::RouterError;
use crate::routing::{Route, RouteMatcher};
use crate::schema::types::{ParamLocation, ParameterSchema};
use serde::Serialize;
use serde_json::{Map, Value};

const DEFAULT_RESPONSE_DESCRIPTION: &str = "Successful Operation";

#[derive(Debug, Serialize)]
struct Info<'a> {
    title: &'a str,
    version: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct SwaggerDocument<'a> {
    swagger: &'static str,
    info: Info<'a>,
    schemes: [&'static str; 1],
    paths: Map<String, Value>,
    definitions: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct Operation<'a> {
    tags: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    consumes: [&'static str; 1],
    produces: [&'static str; 1],
    parameters: Vec<ParameterSchema>,
    responses: Map<String, Value>,
}

/// Builds a Swagger 2.0 document from a route table. Read-only: the route
/// table is only borrowed.
#[derive(Debug, Clone)]
pub struct SwaggerGenerator {
    title: String,
    version: String,
    description: String,
    definitions: Map<String, Value>,
}

impl SwaggerGenerator {
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: description.into(),
            definitions: Map::new(),
        }
    }

    /// Register a named JSON schema under `definitions`.
    pub fn definition(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }

    pub fn generate(&self, routes: &RouteMatcher) -> Result<Value, RouterError> {
        let mut paths = Map::new();
        for route in routes.routes() {
            // First registration of a template wins, same as dispatch.
            if !paths.contains_key(route.path()) {
                paths.insert(route.path().to_string(), Value::Object(path_item(route)?));
            }
        }

        let document = SwaggerDocument {
            swagger: "2.0",
            info: Info {
                title: &self.title,
                version: &self.version,
                description: &self.description,
            },
            schemes: ["https"],
            paths,
            definitions: &self.definitions,
        };
        Ok(serde_json::to_value(document)?)
    }
}

fn path_item(route: &Route) -> Result<Map<String, Value>, RouterError> {
    let mut item = Map::new();
    for (method, handler) in route.methods() {
        let schema = handler.schema();

        let mut parameters: Vec<ParameterSchema> = route
            .param_names()
            .iter()
            .map(|name| {
                schema
                    .and_then(|s| {
                        s.parameters
                            .iter()
                            .find(|p| p.location == ParamLocation::Path && &p.name == name)
                    })
                    .cloned()
                    .unwrap_or_else(|| ParameterSchema::path(name.clone()))
            })
            .collect();
        if let Some(schema) = schema {
            parameters.extend(
                schema
                    .parameters
                    .iter()
                    .filter(|p| p.location != ParamLocation::Path)
                    .cloned(),
            );
        }

        let mut ok = Map::new();
        ok.insert(
            "description".to_string(),
            Value::String(
                schema
                    .and_then(|s| s.response_description.clone())
                    .unwrap_or_else(|| DEFAULT_RESPONSE_DESCRIPTION.to_string()),
            ),
        );
        if let Some(reference) = schema.and_then(|s| s.response_ref.as_deref()) {
            let mut target = Map::new();
            target.insert(
                "$ref".to_string(),
                Value::String(format!("#/definitions/{}", reference)),
            );
            ok.insert("schema".to_string(), Value::Object(target));
        }
        let mut responses = Map::new();
        responses.insert("200".to_string(), Value::Object(ok));

        let operation = Operation {
            tags: [route.path()],
            summary: schema.and_then(|s| s.summary.as_deref()),
            description: schema.and_then(|s| s.description.as_deref()),
            consumes: ["application/json"],
            produces: ["application/json"],
            parameters,
            responses,
        };

        item.insert(method.as_str().to_lowercase(), serde_json::to_value(operation)?);
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;
    use crate::routing::{HttpMethod, MethodHandler};
    use crate::schema::OperationSchema;
    use serde_json::json;

    fn table() -> RouteMatcher {
        let mut routes = RouteMatcher::new();
        let users = routes.get_or_insert("/users/{id}").unwrap();
        users.register_handler(
            HttpMethod::GET,
            MethodHandler::new(|_req: Request| Response::empty(200)).with_schema(
                OperationSchema::new()
                    .summary("Fetch a user")
                    .parameter(ParameterSchema::query("fields", "string").optional())
                    .returns("User"),
            ),
        );
        users.register(HttpMethod::DELETE, |_req: Request| Response::empty(204));
        routes
            .get_or_insert("/health")
            .unwrap()
            .register(HttpMethod::GET, |_req: Request| Response::empty(200));
        routes
    }

    #[test]
    fn test_document_skeleton() {
        let doc = SwaggerGenerator::new("Users", "1.0.0", "User service")
            .generate(&table())
            .unwrap();

        assert_eq!(doc["swagger"], "2.0");
        assert_eq!(doc["info"], json!({"title": "Users", "version": "1.0.0", "description": "User service"}));
        assert_eq!(doc["schemes"], json!(["https"]));
        assert_eq!(doc["definitions"], json!({}));
        let paths: Vec<&String> = doc["paths"].as_object().unwrap().keys().collect();
        assert_eq!(paths, vec!["/users/{id}", "/health"]);
    }

    #[test]
    fn test_operation_details() {
        let doc = SwaggerGenerator::new("Users", "1.0.0", "")
            .definition("User", json!({"type": "object"}))
            .generate(&table())
            .unwrap();

        let get = &doc["paths"]["/users/{id}"]["get"];
        assert_eq!(get["tags"], json!(["/users/{id}"]));
        assert_eq!(get["summary"], "Fetch a user");
        assert_eq!(get["consumes"], json!(["application/json"]));
        assert_eq!(get["parameters"][0]["name"], "id");
        assert_eq!(get["parameters"][0]["in"], "path");
        assert_eq!(get["parameters"][1]["name"], "fields");
        assert_eq!(get["parameters"][1]["required"], false);
        assert_eq!(
            get["responses"]["200"],
            json!({"description": "Successful Operation", "schema": {"$ref": "#/definitions/User"}})
        );
        assert_eq!(doc["definitions"]["User"], json!({"type": "object"}));
    }

    #[test]
    fn test_undocumented_handler_gets_defaults() {
        let doc = SwaggerGenerator::new("Users", "1.0.0", "").generate(&table()).unwrap();

        let delete = &doc["paths"]["/users/{id}"]["delete"];
        assert!(delete.get("summary").is_none());
        assert_eq!(delete["parameters"].as_array().unwrap().len(), 1);
        assert_eq!(delete["responses"]["200"], json!({"description": "Successful Operation"}));
    }
}
