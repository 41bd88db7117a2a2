use crate::errors::RouterError;
use crate::middleware::{Middleware, MiddlewareOutcome};
use crate::request::Request;
use serde_json::Value;

/// Forwards the request untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Middleware for PassThrough {
    fn process_request(&self, request: Request) -> Result<MiddlewareOutcome, RouterError> {
        Ok(MiddlewareOutcome::Continue(request))
    }
}

/// Adapts a closure into a middleware unit.
pub struct FnMiddleware<F> {
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(Request) -> Result<MiddlewareOutcome, RouterError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(Request) -> Result<MiddlewareOutcome, RouterError> + Send + Sync,
{
    fn process_request(&self, request: Request) -> Result<MiddlewareOutcome, RouterError> {
        (self.func)(request)
    }
}

/// Copies the token of an `Authorization: Bearer <token>` header into a
/// request attribute. Requests without the header pass unchanged.
#[derive(Debug, Clone)]
pub struct BearerTokenDecoder {
    header: String,
    attribute: String,
}

impl BearerTokenDecoder {
    pub fn new() -> Self {
        Self {
            header: "Authorization".to_string(),
            attribute: "token".to_string(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }
}

impl Default for BearerTokenDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for BearerTokenDecoder {
    fn process_request(&self, mut request: Request) -> Result<MiddlewareOutcome, RouterError> {
        let token = request.header(&self.header).and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then(|| token.trim().to_string())
                .filter(|token| !token.is_empty())
        });

        if let Some(token) = token {
            request.set_attribute(self.attribute.clone(), Value::String(token));
        }
        Ok(MiddlewareOutcome::Continue(request))
    }
}

/// Delegates the authorization decision to a user callback; a denial is
/// raised as [`RouterError::Unauthorized`].
pub struct AuthCheck<F> {
    check: F,
}

impl<F> AuthCheck<F>
where
    F: Fn(&Request) -> bool + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> Middleware for AuthCheck<F>
where
    F: Fn(&Request) -> bool + Send + Sync,
{
    fn process_request(&self, request: Request) -> Result<MiddlewareOutcome, RouterError> {
        if (self.check)(&request) {
            Ok(MiddlewareOutcome::Continue(request))
        } else {
            log::warn!("authorization denied for {} {}", request.method, request.path);
            Err(RouterError::unauthorized(format!(
                "access denied for {} {}",
                request.method, request.path
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HttpMethod;
    use serde_json::json;

    fn continued(outcome: MiddlewareOutcome) -> Request {
        match outcome {
            MiddlewareOutcome::Continue(request) => request,
            MiddlewareOutcome::Respond(_) => panic!("Expected continue"),
        }
    }

    #[test]
    fn test_bearer_token_decoded() {
        let request = Request::new(HttpMethod::GET, "/").with_header("authorization", "Bearer Token");
        let request = continued(BearerTokenDecoder::new().process_request(request).unwrap());
        assert_eq!(request.attribute("token"), Some(&json!("Token")));
    }

    #[test]
    fn test_other_schemes_ignored() {
        let request = Request::new(HttpMethod::GET, "/").with_header("Authorization", "Basic abc");
        let request = continued(BearerTokenDecoder::new().process_request(request).unwrap());
        assert!(request.attribute("token").is_none());
    }

    #[test]
    fn test_custom_header_and_attribute() {
        let decoder = BearerTokenDecoder::new()
            .with_header("X-Api-Key")
            .with_attribute("api_key");
        let request = Request::new(HttpMethod::GET, "/").with_header("x-api-key", "bearer k1");
        let request = continued(decoder.process_request(request).unwrap());
        assert_eq!(request.attribute("api_key"), Some(&json!("k1")));
    }

    #[test]
    fn test_auth_check_allows() {
        let check = AuthCheck::new(|req: &Request| req.attribute("token").is_some());
        let mut request = Request::new(HttpMethod::GET, "/");
        request.set_attribute("token", json!("t"));
        assert!(matches!(
            check.process_request(request).unwrap(),
            MiddlewareOutcome::Continue(_)
        ));
    }

    #[test]
    fn test_auth_check_denies_with_unauthorized() {
        let check = AuthCheck::new(|_req: &Request| false);
        let err = check
            .process_request(Request::new(HttpMethod::DELETE, "/users/1"))
            .unwrap_err();
        assert!(matches!(err, RouterError::Unauthorized { .. }));
        assert!(err.to_string().contains("/users/1"));
    }
}
