use crate::errors::RouterError;
use crate::routing::parser::parse_route_pattern;
use crate::routing::route::Route;
use crate::routing::types::{RouteMatch, RouteTemplate};
use std::collections::HashMap;

impl RouteTemplate {
    /// Match a concrete request path against this template.
    ///
    /// Returns the placeholder bindings on success. `None` means the path
    /// does not have this template's shape; it is not an error.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let captures = self.path_regex.captures(path)?;

        let mut path_params = HashMap::with_capacity(self.param_names.len());
        for (i, param_name) in self.param_names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                path_params.insert(param_name.clone(), value.as_str().to_string());
            }
        }
        Some(path_params)
    }
}

/// Ordered route table. Lookup scans in registration order and the first
/// matching template wins.
pub struct RouteMatcher {
    routes: Vec<Route>,
}

impl RouteMatcher {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Return the route registered under `pattern`, creating it if needed.
    pub fn get_or_insert(&mut self, pattern: &str) -> Result<&mut Route, RouterError> {
        let index = match self.position(pattern) {
            Some(index) => index,
            None => {
                let template = parse_route_pattern(pattern)?;
                self.routes.push(Route::new(template));
                self.routes.len() - 1
            }
        };
        Ok(&mut self.routes[index])
    }

    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .enumerate()
            .find_map(|(route_index, route)| {
                route.template().match_path(path).map(|path_params| RouteMatch {
                    route_index,
                    path_params,
                })
            })
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn find(&self, pattern: &str) -> Option<&Route> {
        self.position(pattern).map(|index| &self.routes[index])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn position(&self, pattern: &str) -> Option<usize> {
        self.routes.iter().position(|route| route.path() == pattern)
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(pattern: &str) -> RouteTemplate {
        parse_route_pattern(pattern).unwrap()
    }

    #[test]
    fn test_match_binds_placeholders() {
        let params = template("/users/{id}/posts/{post}")
            .match_path("/users/42/posts/hello")
            .unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
        assert_eq!(params.get("post"), Some(&"hello".to_string()));
    }

    #[test]
    fn test_segment_count_must_match() {
        let t = template("/users/{id}");
        assert!(t.match_path("/users").is_none());
        assert!(t.match_path("/users/1/extra").is_none());
        assert!(t.match_path("/users/").is_none());
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        let t = template("/Users/{id}");
        assert!(t.match_path("/Users/1").is_some());
        assert!(t.match_path("/users/1").is_none());
    }

    #[test]
    fn test_placeholder_rejects_empty_segment() {
        assert!(template("/a/{x}/b").match_path("/a//b").is_none());
    }

    #[test]
    fn test_first_registered_wins() {
        let mut matcher = RouteMatcher::new();
        matcher.get_or_insert("/users/{id}").unwrap();
        matcher.get_or_insert("/users/active").unwrap();

        let found = matcher.match_route("/users/active").unwrap();
        assert_eq!(found.route_index, 0);
        assert_eq!(found.path_params.get("id"), Some(&"active".to_string()));
    }

    #[test]
    fn test_scan_continues_past_mismatched_shapes() {
        let mut matcher = RouteMatcher::new();
        matcher.get_or_insert("/health").unwrap();
        matcher.get_or_insert("/users/{id}").unwrap();

        let found = matcher.match_route("/users/7").unwrap();
        assert_eq!(found.route_index, 1);
    }

    #[test]
    fn test_no_match_is_none() {
        let mut matcher = RouteMatcher::new();
        matcher.get_or_insert("/users/{id}").unwrap();
        assert!(matcher.match_route("/orders/1").is_none());
    }

    #[test]
    fn test_get_or_insert_reuses_existing_route() {
        let mut matcher = RouteMatcher::new();
        matcher.get_or_insert("/users").unwrap();
        matcher.get_or_insert("/users").unwrap();
        assert_eq!(matcher.len(), 1);
    }
}
