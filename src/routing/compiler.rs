//! Route pattern compilation.
//!
//! # Responsibilities
//! - Turn `{name}` placeholders in paths and domains into named captures
//! - Substitute per-parameter requirements (defaults otherwise)
//! - Report malformed patterns at compile time
//!
//! # Design Decisions
//! - Static text is regex-escaped; requirements are embedded verbatim
//! - Path variables default to `[^/]+`, domain variables to `[^.]+`
//! - Only the last path segment may be optional (`{name?}`)
//! - Domain matching is case-insensitive, path matching is not

use axum::http::Method;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::routing::matcher::{AndMatcher, HostMatcher, Matcher, MethodMatcher, PathMatcher};
use crate::routing::route::Route;

const DEFAULT_PATH_REQUIREMENT: &str = "[^/]+";
const DEFAULT_HOST_REQUIREMENT: &str = "[^.]+";
const MAX_VARIABLE_NAME_LENGTH: usize = 32;

/// Errors reported while compiling a route pattern.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Unterminated placeholder in `{pattern}`")]
    UnterminatedVariable { pattern: String },

    #[error("Invalid placeholder name `{name}` in `{pattern}`")]
    InvalidVariableName { pattern: String, name: String },

    #[error("Placeholder `{name}` is used more than once in `{pattern}`")]
    DuplicateVariable { pattern: String, name: String },

    #[error("Optional placeholder `{name}` must be the last segment of `{pattern}`")]
    OptionalNotTrailing { pattern: String, name: String },

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A route compiled into anchored regular expressions.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    methods: Vec<Method>,
    path: Regex,
    host: Option<Regex>,
    path_variables: Vec<String>,
    host_variables: Vec<String>,
}

impl CompiledRoute {
    pub fn compile(route: &Route) -> Result<Self, CompileError> {
        let mut seen = Vec::new();

        let (host, host_variables) = match route.domain() {
            Some(domain) => {
                let (source, variables) = build_regex(
                    domain,
                    route.requirements(),
                    DEFAULT_HOST_REQUIREMENT,
                    &mut seen,
                )?;
                (Some(build(&source, true)?), variables)
            }
            None => (None, Vec::new()),
        };

        let (source, path_variables) = build_regex(
            route.path(),
            route.requirements(),
            DEFAULT_PATH_REQUIREMENT,
            &mut seen,
        )?;

        Ok(Self {
            methods: route.methods().to_vec(),
            path: build(&source, false)?,
            host,
            path_variables,
            host_variables,
        })
    }

    /// Source of the path regex, e.g. `^/(?P<foo>bar)/qux$`.
    pub fn path_regex(&self) -> &str {
        self.path.as_str()
    }

    pub fn host_regex(&self) -> Option<&str> {
        self.host.as_ref().map(Regex::as_str)
    }

    pub fn path_variables(&self) -> &[String] {
        &self.path_variables
    }

    pub fn host_variables(&self) -> &[String] {
        &self.host_variables
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Captured parameters (domain first, then path) if both host and path match.
    ///
    /// Optional parameters that did not participate are left out.
    pub fn captures(&self, host: Option<&str>, path: &str) -> Option<IndexMap<String, String>> {
        let mut parameters = IndexMap::new();

        if let Some(regex) = &self.host {
            let host = strip_port(host?);
            let captures = regex.captures(host)?;
            collect(&captures, &self.host_variables, &mut parameters);
        }

        let captures = self.path.captures(path)?;
        collect(&captures, &self.path_variables, &mut parameters);
        Some(parameters)
    }

    /// A request matcher equivalent to this route.
    pub fn matcher(&self) -> AndMatcher {
        let mut matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(MethodMatcher::new(self.methods.clone())),
            Box::new(PathMatcher::new(self.path.clone())),
        ];
        if let Some(host) = &self.host {
            matchers.push(Box::new(HostMatcher::new(host.clone())));
        }
        AndMatcher::new(matchers)
    }
}

/// Remove a `:port` suffix from a Host header value.
pub fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

fn collect(captures: &regex::Captures<'_>, names: &[String], into: &mut IndexMap<String, String>) {
    for name in names {
        if let Some(value) = captures.name(name) {
            into.insert(name.clone(), value.as_str().to_string());
        }
    }
}

fn build(source: &str, case_insensitive: bool) -> Result<Regex, CompileError> {
    RegexBuilder::new(source)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source_error| CompileError::InvalidPattern {
            pattern: source.to_string(),
            source: source_error,
        })
}

enum Token<'a> {
    Text(&'a str),
    Variable { name: &'a str, optional: bool },
}

fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let mut tokens = Vec::new();
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| CompileError::UnterminatedVariable {
                pattern: pattern.to_string(),
            })?;
        let raw = &after[..end];
        let (name, optional) = match raw.strip_suffix('?') {
            Some(name) => (name, true),
            None => (raw, false),
        };
        if !is_valid_name(name) {
            return Err(CompileError::InvalidVariableName {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }
        tokens.push(Token::Variable { name, optional });
        rest = &after[end + 1..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    Ok(tokens)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= MAX_VARIABLE_NAME_LENGTH && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn build_regex(
    pattern: &str,
    requirements: &IndexMap<String, String>,
    default_requirement: &str,
    seen: &mut Vec<String>,
) -> Result<(String, Vec<String>), CompileError> {
    let tokens = tokenize(pattern)?;
    let mut source = String::from("^");
    let mut variables = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Text(text) => source.push_str(&regex::escape(text)),
            Token::Variable { name, optional } => {
                if seen.iter().any(|s| s == name) {
                    return Err(CompileError::DuplicateVariable {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                seen.push(name.to_string());
                variables.push(name.to_string());

                let requirement = requirements
                    .get(*name)
                    .map(|r| r.trim_start_matches('^').trim_end_matches('$'))
                    .unwrap_or(default_requirement);

                if !optional {
                    source.push_str(&format!("(?P<{}>{})", name, requirement));
                } else if index + 1 != tokens.len() {
                    return Err(CompileError::OptionalNotTrailing {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                } else if source.ends_with('/') {
                    source.pop();
                    source.push_str(&format!("(?:/(?P<{}>{}))?", name, requirement));
                } else {
                    source.push_str(&format!("(?P<{}>{})?", name, requirement));
                }
            }
        }
    }

    source.push('$');
    Ok((source, variables))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, requirements: &[(&str, &str)]) -> Route {
        let mut route = Route::new([Method::GET], path);
        for (name, pattern) in requirements {
            route.set_requirement(*name, *pattern);
        }
        route
    }

    #[test]
    fn test_requirement_is_substituted() {
        let compiled = CompiledRoute::compile(&route("/{foo}/qux", &[("foo", "bar")])).unwrap();
        assert_eq!(compiled.path_regex(), "^/(?P<foo>bar)/qux$");
        assert_eq!(compiled.path_variables(), ["foo"]);
    }

    #[test]
    fn test_defaults_and_escaping() {
        let mut r = route("/files/{name}.json", &[]);
        r.set_domain("{host}.example.com");
        let compiled = CompiledRoute::compile(&r).unwrap();

        assert_eq!(compiled.path_regex(), r"^/files/(?P<name>[^/]+)\.json$");
        assert_eq!(compiled.host_regex(), Some(r"^(?P<host>[^.]+)\.example\.com$"));

        let params = compiled
            .captures(Some("API.example.com:8080"), "/files/report.json")
            .unwrap();
        assert_eq!(params["host"], "API");
        assert_eq!(params["name"], "report");
        assert!(compiled.captures(None, "/files/report.json").is_none());
    }

    #[test]
    fn test_optional_trailing_variable() {
        let compiled = CompiledRoute::compile(&route("/users/{id?}", &[("id", "^[0-9]+$")])).unwrap();
        assert_eq!(compiled.path_regex(), "^/users(?:/(?P<id>[0-9]+))?$");

        assert!(compiled.captures(None, "/users").unwrap().is_empty());
        assert_eq!(compiled.captures(None, "/users/42").unwrap()["id"], "42");
        assert!(compiled.captures(None, "/users/abc").is_none());
    }

    #[test]
    fn test_malformed_patterns() {
        let err = CompiledRoute::compile(&route("/{foo", &[])).unwrap_err();
        assert!(matches!(err, CompileError::UnterminatedVariable { .. }));

        let err = CompiledRoute::compile(&route("/{1st}", &[])).unwrap_err();
        assert!(matches!(err, CompileError::InvalidVariableName { .. }));

        let err = CompiledRoute::compile(&route("/{a}/{a}", &[])).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateVariable { .. }));

        let err = CompiledRoute::compile(&route("/{a?}/b", &[])).unwrap_err();
        assert!(matches!(err, CompileError::OptionalNotTrailing { .. }));

        let err = CompiledRoute::compile(&route("/{a}", &[("a", "(unclosed")])).unwrap_err();
        assert!(matches!(err, CompileError::InvalidPattern { .. }));
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:443"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
    }
}
