//! Route file schema definitions.
//!
//! This module defines the structure of a route declaration file.
//! All types derive Serde traits for deserialization from TOML.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::routing::Requirement;

/// Root of a route declaration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteFileConfig {
    /// Logging settings for the CLI.
    pub logging: LoggingConfig,

    /// Routes declared outside any group.
    pub routes: Vec<RouteConfig>,

    /// Top-level groups.
    pub groups: Vec<GroupConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A single route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    /// HTTP methods (default: `["GET"]`, which also answers `HEAD`).
    pub methods: Vec<String>,

    /// Path, relative to the enclosing group prefixes.
    pub uri: String,

    /// Handler identifier, qualified by the enclosing namespaces.
    pub action: Option<String>,

    /// Route-level before filters (kept ahead of inherited ones).
    pub before: Vec<String>,

    /// Route-level after filters (kept ahead of inherited ones).
    pub after: Vec<String>,

    /// Parameter requirements for this route only.
    #[serde(rename = "where")]
    pub requirements: IndexMap<String, Requirement>,

    /// Pass-through options.
    pub options: IndexMap<String, serde_json::Value>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            methods: vec!["GET".to_string()],
            uri: String::new(),
            action: None,
            before: Vec::new(),
            after: Vec::new(),
            requirements: IndexMap::new(),
            options: IndexMap::new(),
        }
    }
}

/// A (possibly nested) group declaration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GroupConfig {
    /// Path prefix shared by every route in the group.
    pub prefix: Option<String>,

    /// Domain pattern, e.g. `{account}.example.com`.
    pub domain: Option<String>,

    /// Namespace prepended to route actions.
    pub namespace: Option<String>,

    /// Requirements inherited by every route in the group and its sub-groups.
    #[serde(rename = "where")]
    pub requirements: IndexMap<String, Requirement>,

    /// Requirements applied after the group closes, to its own routes only.
    pub require: IndexMap<String, Requirement>,

    /// Before filters of this group.
    pub before: Vec<String>,

    /// After filters of this group.
    pub after: Vec<String>,

    /// Pass-through options.
    pub options: IndexMap<String, serde_json::Value>,

    pub routes: Vec<RouteConfig>,

    pub groups: Vec<GroupConfig>,
}
