//! Request matching logic.
//!
//! # Responsibilities
//! - Match the Host header against a compiled domain pattern
//! - Match the request path against a compiled path pattern
//! - Match the request method
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec) and ignores the port
//! - Path matching is case-sensitive
//! - A missing Host header never matches a domain-bound route

use axum::body::Body;
use axum::http::{Method, Request};
use regex::Regex;

use crate::routing::compiler::strip_port;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Host of a request: the Host header, falling back to the URI authority.
pub fn request_host(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("host")
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().host())
}

/// Matches the Host header against a compiled domain pattern.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    pattern: Regex,
}

impl HostMatcher {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        request_host(req)
            .map(|h| self.pattern.is_match(strip_port(h)))
            .unwrap_or(false)
    }
}

/// Matches the request path against a compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: Regex,
}

impl PathMatcher {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.pattern.is_match(req.uri().path())
    }
}

/// Matches one of a set of methods.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    methods: Vec<Method>,
}

impl MethodMatcher {
    pub fn new(methods: Vec<Method>) -> Self {
        Self { methods }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.methods.contains(req.method())
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
