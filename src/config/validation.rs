//! Route file validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject unknown HTTP methods and blank filter names
//! - Reject routes without a URI
//! - Reject empty alternative lists for requirements
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: RouteFileConfig → Result<(), Vec<ValidationError>>
//! - Locations are reported as paths, e.g. `groups[0].routes[2]`
//! - Pattern syntax is left to the compiler

use axum::http::Method;
use indexmap::IndexMap;
use thiserror::Error;

use crate::config::schema::{GroupConfig, RouteConfig, RouteFileConfig};
use crate::routing::Requirement;

/// A single semantic problem in a route file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{location}: unknown HTTP method `{method}`")]
    UnknownMethod { location: String, method: String },

    #[error("{location}: route has an empty uri")]
    EmptyUri { location: String },

    #[error("{location}: route declares no methods")]
    NoMethods { location: String },

    #[error("{location}: filter names must not be blank")]
    BlankFilter { location: String },

    #[error("{location}: requirement `{name}` has no alternatives")]
    EmptyAlternatives { location: String, name: String },
}

/// Validate a parsed route file.
pub fn validate_config(config: &RouteFileConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_routes(&config.routes, "", &mut errors);
    validate_groups(&config.groups, "", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a configured method name (case-insensitive).
pub fn parse_method(method: &str) -> Option<Method> {
    let upper = method.trim().to_ascii_uppercase();
    match upper.as_str() {
        "GET" => Some(Method::GET),
        "HEAD" => Some(Method::HEAD),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        "OPTIONS" => Some(Method::OPTIONS),
        _ => None,
    }
}

fn validate_groups(groups: &[GroupConfig], parent: &str, errors: &mut Vec<ValidationError>) {
    for (index, group) in groups.iter().enumerate() {
        let location = format!("{}groups[{}]", parent, index);
        check_filters(&group.before, &location, errors);
        check_filters(&group.after, &location, errors);
        check_requirements(&group.requirements, &location, errors);
        check_requirements(&group.require, &location, errors);

        let nested = format!("{}.", location);
        validate_routes(&group.routes, &nested, errors);
        validate_groups(&group.groups, &nested, errors);
    }
}

fn validate_routes(routes: &[RouteConfig], parent: &str, errors: &mut Vec<ValidationError>) {
    for (index, route) in routes.iter().enumerate() {
        let location = format!("{}routes[{}]", parent, index);

        if route.uri.trim().is_empty() {
            errors.push(ValidationError::EmptyUri {
                location: location.clone(),
            });
        }
        if route.methods.is_empty() {
            errors.push(ValidationError::NoMethods {
                location: location.clone(),
            });
        }
        for method in &route.methods {
            if parse_method(method).is_none() {
                errors.push(ValidationError::UnknownMethod {
                    location: location.clone(),
                    method: method.clone(),
                });
            }
        }
        check_filters(&route.before, &location, errors);
        check_filters(&route.after, &location, errors);
        check_requirements(&route.requirements, &location, errors);
    }
}

fn check_filters(filters: &[String], location: &str, errors: &mut Vec<ValidationError>) {
    if filters.iter().any(|f| f.trim().is_empty()) {
        errors.push(ValidationError::BlankFilter {
            location: location.to_string(),
        });
    }
}

fn check_requirements(
    requirements: &IndexMap<String, Requirement>,
    location: &str,
    errors: &mut Vec<ValidationError>,
) {
    for (name, requirement) in requirements {
        if matches!(requirement, Requirement::Alternatives(alternatives) if alternatives.is_empty()) {
            errors.push(ValidationError::EmptyAlternatives {
                location: location.to_string(),
                name: name.clone(),
            });
        }
    }
}
