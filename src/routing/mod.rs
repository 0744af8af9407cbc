//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (bootstrap):
//!     router.rs (get/post/... and group/bunch)
//!     → attributes.rs (apply prefix, domain, namespace, where, options)
//!     → collection.rs (master RouteCollection)
//!     → extractor.rs (isolate each group's direct routes)
//!     → registry.rs (completed Groups, with parent pointers)
//!
//! Finalize (first read access):
//!     registry.rs
//!     → resolver.rs (outer-to-inner filter inheritance)
//!     → assembler.rs (merge groups back into the master collection)
//!     → RouteCollection (merged, filters resolved)
//!
//! Lookup (optional):
//!     RouteCollection
//!     → compiler.rs (path/domain patterns + requirements → regex)
//!     → table.rs + matcher.rs (first match wins)
//! ```
//!
//! # Design Decisions
//! - Groups are recorded at registration and resolved lazily, once
//! - Ancestry is an explicit parent pointer, never a positional slice
//! - Filter lists are ordered sets: outer groups first, no duplicates
//! - Deterministic: same registration order always yields the same table

pub mod assembler;
pub mod attributes;
pub mod collection;
pub mod compiler;
pub mod error;
pub mod extractor;
pub mod filters;
pub mod group;
pub mod matcher;
pub mod registry;
pub mod requirement;
pub mod resolver;
pub mod route;
pub mod router;
pub mod table;

pub use attributes::GroupAttributes;
pub use collection::RouteCollection;
pub use compiler::{CompileError, CompiledRoute};
pub use error::{RouteError, RouteResult};
pub use filters::FilterSet;
pub use group::{Group, GroupHandle, GroupId};
pub use requirement::Requirement;
pub use route::Route;
pub use router::{RouteHandle, Router};
pub use table::{RouteMatch, RouteTable};
