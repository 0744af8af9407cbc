//! Filter inheritance.
//!
//! # Responsibilities
//! - Walk each group's parent chain
//! - Concatenate the filters of every group on that chain, outermost first
//! - Write the result onto every route of the group
//!
//! # Design Decisions
//! - A route's own filters stay in front; inherited ones are appended
//! - Both before and after filters resolve outer-first
//! - Duplicates are dropped, keeping the first occurrence
//! - Re-running on already resolved routes changes nothing
//!
//! ```text
//! outer.before(foo) ─┐
//!   middle.before(bar) ─┐
//!     inner.before(baz) ─┴─→ route in inner: [foo, bar, baz]
//! ```

use crate::routing::filters::FilterSet;
use crate::routing::group::GroupId;
use crate::routing::registry::GroupRegistry;

/// Inherited filters for the routes of one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    pub before: FilterSet,
    pub after: FilterSet,
}

/// Filters inherited by routes declared directly in group `id`.
pub fn filter_chain(registry: &GroupRegistry, id: GroupId) -> FilterChain {
    let mut chain = FilterChain::default();
    for group in registry.lineage(id) {
        chain.before.merge(group.before_filters());
        chain.after.merge(group.after_filters());
    }
    chain
}

/// Resolve the filter lists of every route in every recorded group.
///
/// Returns the number of routes touched.
pub fn resolve(registry: &mut GroupRegistry) -> usize {
    let chains: Vec<(GroupId, FilterChain)> = {
        let registry: &GroupRegistry = registry;
        registry
            .iter()
            .map(|group| (group.id(), filter_chain(registry, group.id())))
            .collect()
    };

    let mut resolved = 0;
    for (id, chain) in chains {
        let Some(group) = registry.get_mut(id) else {
            continue;
        };
        for route in group.routes_mut().routes_mut() {
            route.before_mut().merge(&chain.before);
            route.after_mut().merge(&chain.after);
            resolved += 1;
        }
        tracing::trace!(
            group = %id,
            before = %chain.before,
            after = %chain.after,
            "Resolved inherited filters"
        );
    }
    resolved
}
