//! The application router.
//!
//! ```text
//! raw event
//!     → event adapter (normalize into Request)
//!     → RouteMatcher (first registered template wins)
//!     → Route (405 if the method has no handler)
//!     → MethodHandler (middleware pipeline, then handler)
//!     → Response → envelope for the bound event source
//! ```
//!
//! Registration needs `&mut App` and dispatch only `&App`, so the route table
//! cannot change once the app is being served.

use crate::config::{AppConfig, SwaggerConfig};
use crate::errors::{codes, RouterError};
use crate::event::EventSource;
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::{serialize_envelope, Envelope, IntoResponse, Response, ResponseBody};
use crate::routing::{HttpMethod, Route, RouteMatcher};
use crate::schema::SwaggerGenerator;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub struct App {
    source: EventSource,
    routes: RouteMatcher,
    enable_request_logging: bool,
    enable_response_logging: bool,
    swagger: SwaggerConfig,
}

impl App {
    /// Create an app bound to an event source identifier. Unknown
    /// identifiers fail here, not per request.
    pub fn new(source: &str) -> Result<Self, RouterError> {
        Self::from_config(&AppConfig::for_source(source))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, RouterError> {
        let source = config.event_source()?;
        log::debug!("router bound to {} events", source);
        Ok(Self {
            source,
            routes: RouteMatcher::new(),
            enable_request_logging: config.enable_request_logging,
            enable_response_logging: config.enable_response_logging,
            swagger: config.swagger.clone(),
        })
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn envelope(&self) -> Envelope {
        self.source.envelope()
    }

    /// Add or retrieve the route for `path`.
    pub fn route(&mut self, path: &str) -> Result<&mut Route, RouterError> {
        self.routes.get_or_insert(path)
    }

    /// Register one handler for several methods of `path` and attach the
    /// same middleware chain to each of them.
    pub fn route_with<F, R>(
        &mut self,
        path: &str,
        methods: &[HttpMethod],
        handler: F,
        middleware: Vec<Arc<dyn Middleware>>,
    ) -> Result<&mut Route, RouterError>
    where
        F: Fn(Request) -> R + Send + Sync + 'static,
        R: IntoResponse + 'static,
    {
        let route = self.routes.get_or_insert(path)?;
        let handler = Arc::new(handler);
        for &method in methods {
            let handler = Arc::clone(&handler);
            let registered = route.register(method, move |request: Request| handler(request));
            for unit in &middleware {
                registered.use_middleware(Arc::clone(unit));
            }
        }
        Ok(route)
    }

    pub fn routes(&self) -> &RouteMatcher {
        &self.routes
    }

    /// Normalize `event`, route it and return the response model. Never
    /// fails: errors and panics become error responses.
    pub fn dispatch(&self, event: &Value) -> Response {
        self.guarded(|| {
            let request = self.source.adapter().normalize(event)?;
            self.route_request(request)
        })
    }

    /// Dispatch a request that is already normalized.
    pub fn dispatch_request(&self, request: Request) -> Response {
        self.guarded(move || self.route_request(request))
    }

    /// Full invocation: dispatch and serialize into the source's envelope.
    pub fn process_request(&self, event: &Value) -> Value {
        serialize_envelope(&self.dispatch(event), self.envelope())
    }

    pub fn swagger(&self) -> Result<Value, RouterError> {
        self.swagger_generator().generate(&self.routes)
    }

    pub fn swagger_generator(&self) -> SwaggerGenerator {
        SwaggerGenerator::new(
            &self.swagger.title,
            &self.swagger.version,
            &self.swagger.description,
        )
    }

    fn route_request(&self, request: Request) -> Result<Response, RouterError> {
        let found = match self.routes.match_route(&request.path) {
            Some(found) => found,
            None => {
                self.log_request(&request);
                return Ok(Response::not_found());
            }
        };

        let route = self
            .routes
            .get(found.route_index)
            .ok_or_else(|| RouterError::RouteNotFound {
                path: request.path.clone(),
            })?;

        let request = request.with_path_params(found.path_params);
        self.log_request(&request);
        route.dispatch(request)
    }

    fn guarded<F>(&self, dispatch: F) -> Response
    where
        F: FnOnce() -> Result<Response, RouterError>,
    {
        let response = match panic::catch_unwind(AssertUnwindSafe(dispatch)) {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                if err.status_code() >= 500 {
                    log::error!("request failed: {}", err);
                } else {
                    log::info!("request rejected: {}", err);
                }
                Response::from_error(&err)
            }
            Err(payload) => {
                let err = RouterError::Handler {
                    code: codes::HANDLER_PANICKED.to_string(),
                    message: panic_message(payload.as_ref()),
                };
                log::error!("request panicked: {}", err);
                Response::json(500, json!({ "error": err.to_string() }))
            }
        };

        self.log_response(&response);
        response
    }

    fn log_request(&self, request: &Request) {
        if self.enable_request_logging && log::log_enabled!(log::Level::Info) {
            log::info!(
                "Request - Method: {}, Path: {}, Params: {}",
                request.method,
                request.path,
                Value::Object(request.params.clone())
            );
        }
    }

    fn log_response(&self, response: &Response) {
        if self.enable_response_logging && log::log_enabled!(log::Level::Info) {
            let body = match &response.body {
                ResponseBody::Empty => String::new(),
                ResponseBody::Json(value) => value.to_string(),
                ResponseBody::Text(text) => text.clone(),
                ResponseBody::Binary(data) => format!("<{} bytes>", data.len()),
            };
            log::info!(
                "Response - Status Code: {}, Body: {}",
                response.status_code,
                body
            );
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("source", &self.source)
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
