use crate::errors::RouterError;
use crate::middleware::{Middleware, MiddlewareOutcome};
use crate::request::Request;
use crate::response::Response;
use std::sync::Arc;

/// Ordered middleware chain; execution order is registration order.
#[derive(Clone, Default)]
pub struct Pipeline {
    units: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    pub fn push(&mut self, unit: Arc<dyn Middleware>) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Feed the request through every unit. Stops at the first unit that
    /// responds; later units never see the request.
    pub fn run_request(&self, mut request: Request) -> Result<MiddlewareOutcome, RouterError> {
        for unit in &self.units {
            match unit.process_request(request)? {
                MiddlewareOutcome::Continue(next) => request = next,
                MiddlewareOutcome::Respond(response) => {
                    log::debug!(
                        "middleware {} short-circuited with status {}",
                        unit.name(),
                        response.status_code
                    );
                    return Ok(MiddlewareOutcome::Respond(response));
                }
            }
        }
        Ok(MiddlewareOutcome::Continue(request))
    }

    /// Response hooks run in reverse registration order.
    pub fn run_response(&self, mut response: Response) -> Result<Response, RouterError> {
        for unit in self.units.iter().rev() {
            response = unit.process_response(response)?;
        }
        Ok(response)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.units.iter().map(|unit| unit.name()))
            .finish()
    }
}
