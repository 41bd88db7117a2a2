use crate::errors::RouterError;
use crate::middleware::{Middleware, MiddlewareOutcome, Pipeline};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::routing::types::{HttpMethod, RouteTemplate};
use crate::schema::OperationSchema;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Type-erased user handler.
pub type HandlerFn = dyn Fn(Request) -> Result<Response, RouterError> + Send + Sync;

/// One user handler plus the middleware chain guarding it.
pub struct MethodHandler {
    func: Arc<HandlerFn>,
    pipeline: Pipeline,
    schema: Option<OperationSchema>,
}

impl MethodHandler {
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn(Request) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        Self {
            func: Arc::new(move |request: Request| func(request).into_response()),
            pipeline: Pipeline::new(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: OperationSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn use_middleware(&mut self, unit: Arc<dyn Middleware>) {
        self.pipeline.push(unit);
    }

    pub fn schema(&self) -> Option<&OperationSchema> {
        self.schema.as_ref()
    }

    pub fn set_schema(&mut self, schema: OperationSchema) {
        self.schema = Some(schema);
    }

    pub fn middleware_count(&self) -> usize {
        self.pipeline.len()
    }

    /// Run the middleware chain, then the handler unless a unit answered.
    pub fn execute(&self, request: Request) -> Result<Response, RouterError> {
        match self.pipeline.run_request(request)? {
            MiddlewareOutcome::Respond(response) => Ok(response),
            MiddlewareOutcome::Continue(request) => {
                let response = (self.func)(request)?;
                self.pipeline.run_response(response)
            }
        }
    }
}

impl std::fmt::Debug for MethodHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodHandler")
            .field("middleware", &self.pipeline)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// A path template and the handlers registered for it, keyed by method.
#[derive(Debug)]
pub struct Route {
    template: RouteTemplate,
    methods: BTreeMap<HttpMethod, MethodHandler>,
}

impl Route {
    pub fn new(template: RouteTemplate) -> Self {
        Self {
            template,
            methods: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.template.path
    }

    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    pub fn param_names(&self) -> &[String] {
        &self.template.param_names
    }

    /// Register `func` for `method`. A second registration for the same
    /// method replaces the first, middleware chain included.
    pub fn register<F, R>(&mut self, method: HttpMethod, func: F) -> &mut MethodHandler
    where
        F: Fn(Request) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        self.register_handler(method, MethodHandler::new(func))
    }

    pub fn register_handler(&mut self, method: HttpMethod, handler: MethodHandler) -> &mut MethodHandler {
        match self.methods.entry(method) {
            Entry::Occupied(mut slot) => {
                log::warn!(
                    "replacing existing {} handler on {}",
                    method,
                    self.template.path
                );
                slot.insert(handler);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(handler),
        }
    }

    pub fn use_middleware<M>(&mut self, method: HttpMethod, unit: M) -> Result<(), RouterError>
    where
        M: Middleware + 'static,
    {
        self.use_shared_middleware(method, Arc::new(unit))
    }

    pub fn use_shared_middleware(
        &mut self,
        method: HttpMethod,
        unit: Arc<dyn Middleware>,
    ) -> Result<(), RouterError> {
        let path = self.template.path.clone();
        let handler = self
            .methods
            .get_mut(&method)
            .ok_or_else(|| RouterError::MethodNotAllowed {
                method: method.to_string(),
                path,
            })?;
        handler.use_middleware(unit);
        Ok(())
    }

    pub fn handler(&self, method: HttpMethod) -> Option<&MethodHandler> {
        self.methods.get(&method)
    }

    pub fn handler_mut(&mut self, method: HttpMethod) -> Option<&mut MethodHandler> {
        self.methods.get_mut(&method)
    }

    pub fn methods(&self) -> impl Iterator<Item = (HttpMethod, &MethodHandler)> {
        self.methods.iter().map(|(method, handler)| (*method, handler))
    }

    pub fn allowed_methods(&self) -> Vec<HttpMethod> {
        self.methods.keys().copied().collect()
    }

    /// Dispatch to the handler for the request's method. An unregistered or
    /// unknown method yields a 405 response without touching any middleware.
    pub fn dispatch(&self, request: Request) -> Result<Response, RouterError> {
        match request.http_method().and_then(|method| self.methods.get(&method)) {
            Some(handler) => handler.execute(request),
            None => Ok(Response::method_not_allowed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::FnMiddleware;
    use crate::routing::parse_route_pattern;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn route(pattern: &str) -> Route {
        Route::new(parse_route_pattern(pattern).unwrap())
    }

    #[test]
    fn test_dispatch_to_registered_method() {
        let mut users = route("/users/{id}");
        users.register(HttpMethod::GET, |req: Request| {
            Response::json(200, json!({"id": req.param("id")}))
        });

        let request = Request::new(HttpMethod::GET, "/users/3")
            .with_path_params([("id".to_string(), "3".to_string())].into());
        let response = users.dispatch(request).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_unregistered_method_skips_middleware() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();

        let mut users = route("/users");
        users.register(HttpMethod::GET, |_req: Request| Response::empty(200));
        users
            .use_middleware(
                HttpMethod::GET,
                FnMiddleware::new(move |req: Request| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    Ok(MiddlewareOutcome::Continue(req))
                }),
            )
            .unwrap();

        let response = users
            .dispatch(Request::new(HttpMethod::POST, "/users"))
            .unwrap();
        assert_eq!(response.status_code, 405);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_method_is_405() {
        let mut users = route("/users");
        users.register(HttpMethod::GET, |_req: Request| Response::empty(200));

        let response = users.dispatch(Request::new("connect", "/users")).unwrap();
        assert_eq!(response, Response::method_not_allowed());
    }

    struct Stamp;

    impl Middleware for Stamp {
        fn process_request(&self, request: Request) -> Result<MiddlewareOutcome, RouterError> {
            Ok(MiddlewareOutcome::Continue(request))
        }

        fn process_response(&self, response: Response) -> Result<Response, RouterError> {
            Ok(response.with_header("x-stamped", "yes"))
        }
    }

    #[test]
    fn test_response_hooks_run_after_handler() {
        let mut handler = MethodHandler::new(|_req: Request| Response::empty(204));
        handler.use_middleware(Arc::new(Stamp));

        let response = handler.execute(Request::new(HttpMethod::GET, "/")).unwrap();
        assert_eq!(response.headers.get("x-stamped").map(String::as_str), Some("yes"));
    }

    #[test]
    fn test_short_circuit_skips_response_hooks() {
        let handled = Arc::new(AtomicUsize::new(0));
        let counted = handled.clone();
        let mut handler = MethodHandler::new(move |_req: Request| {
            counted.fetch_add(1, Ordering::SeqCst);
            Response::empty(200)
        });
        handler.use_middleware(Arc::new(Stamp));
        handler.use_middleware(Arc::new(FnMiddleware::new(|_req: Request| {
            Ok(MiddlewareOutcome::Respond(Response::text(403, "blocked")))
        })));

        let response = handler.execute(Request::new(HttpMethod::GET, "/")).unwrap();
        assert_eq!(response, Response::text(403, "blocked"));
        assert!(response.headers.is_empty());
        assert_eq!(handled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut users = route("/users");
        users.register(HttpMethod::GET, |_req: Request| Response::text(200, "first"));
        users
            .use_middleware(HttpMethod::GET, crate::middleware::PassThrough)
            .unwrap();
        users.register(HttpMethod::GET, |_req: Request| Response::text(200, "second"));

        assert_eq!(users.allowed_methods(), vec![HttpMethod::GET]);
        assert_eq!(users.handler(HttpMethod::GET).unwrap().middleware_count(), 0);

        let response = users
            .dispatch(Request::new(HttpMethod::GET, "/users"))
            .unwrap();
        assert_eq!(response, Response::text(200, "second"));
    }

    #[test]
    fn test_middleware_requires_registered_method() {
        let mut users = route("/users");
        let err = users
            .use_middleware(HttpMethod::PUT, crate::middleware::PassThrough)
            .unwrap_err();
        assert_eq!(err.status_code(), 405);
    }

    #[test]
    fn test_loose_output_defaults() {
        let mut users = route("/users");
        users.register(HttpMethod::GET, |_req: Request| json!({"body": "partial"}));

        let response = users
            .dispatch(Request::new(HttpMethod::GET, "/users"))
            .unwrap();
        assert_eq!(response.status_code, 500);
    }

    #[test]
    fn test_handler_error_is_returned() {
        let mut users = route("/users");
        users.register(HttpMethod::GET, |_req: Request| -> Result<Response, RouterError> {
            Err(RouterError::handler("lookup failed"))
        });

        let err = users
            .dispatch(Request::new(HttpMethod::GET, "/users"))
            .unwrap_err();
        assert!(err.to_string().contains("lookup failed"));
    }
}
