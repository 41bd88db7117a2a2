pub mod matcher;
pub mod parser;
pub mod route;
pub mod types;

pub use matcher::RouteMatcher;
pub use parser::parse_route_pattern;
pub use route::{HandlerFn, MethodHandler, Route};
pub use types::{HttpMethod, RouteMatch, RouteTemplate};
