pub use crate::app::App;
pub use crate::config::{AppConfig, SwaggerConfig};
pub use crate::errors::{codes, RouterError};
pub use crate::event::{parse_event, EventAdapter, EventSource};
pub use crate::middleware::{
    AuthCheck, BearerTokenDecoder, FnMiddleware, Middleware, MiddlewareOutcome, PassThrough,
    Pipeline,
};
pub use crate::request::{Params, Request, RequestBody};
pub use crate::response::{serialize_envelope, Envelope, IntoResponse, Response, ResponseBody};
pub use crate::routing::{parse_route_pattern, HttpMethod, MethodHandler, Route, RouteMatch, RouteMatcher};
pub use crate::schema::{OperationSchema, ParamLocation, ParameterSchema, SwaggerGenerator};
