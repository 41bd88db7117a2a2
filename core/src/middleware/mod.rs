//! Request/response middleware.
//!
//! A unit either hands the (possibly rewritten) request to the next stage or
//! answers the request itself, which stops the chain before the handler.

pub mod builtin;
pub mod pipeline;

pub use builtin::{AuthCheck, BearerTokenDecoder, FnMiddleware, PassThrough};
pub use pipeline::Pipeline;

use crate::errors::RouterError;
use crate::request::Request;
use crate::response::Response;

/// What a unit decided to do with the request.
#[derive(Debug)]
pub enum MiddlewareOutcome {
    Continue(Request),
    Respond(Response),
}

pub trait Middleware: Send + Sync {
    fn process_request(&self, request: Request) -> Result<MiddlewareOutcome, RouterError>;

    /// Runs on the handler's response. Not called for short-circuit responses.
    fn process_response(&self, response: Response) -> Result<Response, RouterError> {
        Ok(response)
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
