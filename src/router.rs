//! Path-pattern routing.
//!
//! Patterns are slash-delimited templates. A segment starting with `:` binds
//! whatever single path segment sits at that position; every other segment
//! must match byte for byte.
//!
//! ```
//! # use outpost::router::Router;
//! let router = Router::new()
//!     .route("/", "index")
//!     .route("/files/:filename", "files");
//!
//! let (handler, params) = router.find("/files/notes.txt").unwrap();
//! assert_eq!(*handler, "files");
//! assert_eq!(params["filename"], "notes.txt");
//! assert!(router.find("/files").is_none());
//! ```

use std::collections::HashMap;

/// Parameters bound by one successful match, keyed by name without the `:`.
pub type Params = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled pattern and the handler it selects.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: String,
    segments: Vec<Segment>,
    handler: H,
}

impl<H> Route<H> {
    pub fn new(pattern: &str, handler: H) -> Self {
        let segments = pattern
            .split('/')
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
            handler,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches `path` against this route, returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
            }
        }

        Some(params)
    }
}

/// Ordered route table. Routes are tried in registration order and the first
/// match wins, so overlapping patterns resolve the same way on every run.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers `pattern` after every route already present.
    pub fn route(mut self, pattern: &str, handler: H) -> Self {
        self.routes.push(Route::new(pattern, handler));
        self
    }

    /// Finds the first route matching `path`. `None` means no route exists
    /// for it, which callers answer with 404.
    pub fn find(&self, path: &str) -> Option<(&H, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.matches(path).map(|params| (&route.handler, params)))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
