//! Group registry.
//!
//! # Responsibilities
//! - Allocate group ids and track the stack of open scopes
//! - Record completed groups in completion order
//! - Answer ancestry queries through parent pointers
//!
//! # Design Decisions
//! - Completion order is post-order: inner groups land before the group
//!   that contains them
//! - Parent = the scope on top of the open stack when a scope opens;
//!   ancestry never depends on registry layout
//! - Ids keep increasing across finalize cycles

use indexmap::IndexMap;

use crate::routing::collection::RouteCollection;
use crate::routing::group::{Group, GroupId};

/// A scope that has opened but whose callback has not returned yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenScope {
    pub id: GroupId,
    pub parent: Option<GroupId>,
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: IndexMap<GroupId, Group>,
    open: Vec<GroupId>,
    next_id: usize,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new scope nested in the current one.
    pub fn open(&mut self) -> OpenScope {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        let parent = self.open.last().copied();
        self.open.push(id);
        OpenScope {
            id,
            parent,
            depth: self.open.len(),
        }
    }

    /// Close `scope` and record its group.
    ///
    /// Scopes close in LIFO order; the callback structure guarantees it.
    pub fn close(&mut self, scope: OpenScope, routes: RouteCollection) -> &mut Group {
        debug_assert_eq!(self.open.last(), Some(&scope.id));
        self.open.pop();
        self.groups
            .entry(scope.id)
            .or_insert(Group::new(scope.id, scope.parent, scope.depth, routes))
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    /// `id` and its recorded ancestors, outermost first.
    pub fn lineage(&self, id: GroupId) -> Vec<&Group> {
        let mut chain = Vec::new();
        let mut cursor = self.groups.get(&id);
        while let Some(group) = cursor {
            chain.push(group);
            cursor = group.parent().and_then(|parent| self.groups.get(&parent));
        }
        chain.reverse();
        chain
    }

    /// Groups in completion order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.values_mut()
    }

    /// Number of scopes currently open.
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Take every recorded group, in completion order, leaving the registry empty.
    pub fn drain(&mut self) -> Vec<Group> {
        self.groups.drain(..).map(|(_, group)| group).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_follow_the_open_stack() {
        let mut registry = GroupRegistry::new();

        let outer = registry.open();
        let first = registry.open();
        registry.close(first, RouteCollection::new());
        let second = registry.open();
        let inner = registry.open();
        registry.close(inner, RouteCollection::new());
        registry.close(second, RouteCollection::new());
        registry.close(outer, RouteCollection::new());

        assert_eq!(outer.parent, None);
        assert_eq!(first.parent, Some(outer.id));
        assert_eq!(second.parent, Some(outer.id));
        assert_eq!(inner.parent, Some(second.id));
        assert_eq!((outer.depth, first.depth, second.depth, inner.depth), (1, 2, 2, 3));

        let completion: Vec<GroupId> = registry.iter().map(Group::id).collect();
        assert_eq!(completion, [first.id, inner.id, second.id, outer.id]);
        assert_eq!(registry.open_depth(), 0);
    }

    #[test]
    fn test_lineage_is_outermost_first() {
        let mut registry = GroupRegistry::new();
        let outer = registry.open();
        let sibling = registry.open();
        registry.close(sibling, RouteCollection::new());
        let middle = registry.open();
        let inner = registry.open();
        registry.close(inner, RouteCollection::new());
        registry.close(middle, RouteCollection::new());
        registry.close(outer, RouteCollection::new());

        let lineage: Vec<GroupId> = registry.lineage(inner.id).iter().map(|g| g.id()).collect();
        assert_eq!(lineage, [outer.id, middle.id, inner.id]);
    }

    #[test]
    fn test_drain_empties_and_ids_keep_increasing() {
        let mut registry = GroupRegistry::new();
        let first = registry.open();
        registry.close(first, RouteCollection::new());

        assert_eq!(registry.drain().len(), 1);
        assert!(registry.is_empty());

        let next = registry.open();
        assert!(next.id > first.id);
    }
}
