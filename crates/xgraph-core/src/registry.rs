//! # Node Registry
//!
//! Maps caller-supplied identity keys to internal node handles.
//!
//! The registry is the single source of `NodeId`s: every kind-graph refers to
//! nodes by the id allocated here. The mapping only grows. A key can be
//! re-registered only by the very same allocation (`Arc::ptr_eq`); any other
//! object reporting an existing key is rejected.

use crate::types::{GraphError, Node, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A registered node: the caller's object plus its internal id.
#[derive(Debug)]
pub struct NodeHandle<N> {
    id: NodeId,
    node: Arc<N>,
}

impl<N> NodeHandle<N> {
    /// The internal id shared across every kind-graph.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The caller's node.
    #[must_use]
    pub fn node(&self) -> &Arc<N> {
        &self.node
    }
}

impl<N> Clone for NodeHandle<N> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            node: Arc::clone(&self.node),
        }
    }
}

/// Key → handle index.
#[derive(Debug)]
pub struct NodeRegistry<N: Node> {
    /// Identity key -> registered handle
    by_key: HashMap<N::Key, NodeHandle<N>>,

    /// Next available NodeId
    next_node_id: u64,
}

impl<N: Node> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
            next_node_id: 0,
        }
    }
}

impl<N: Node> NodeRegistry<N> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register nodes in order.
    ///
    /// Stops at the first conflicting node; nodes registered before it stay
    /// registered. Returns how many nodes were newly registered.
    pub fn add<I>(&mut self, nodes: I) -> Result<usize, GraphError<N>>
    where
        I: IntoIterator<Item = Arc<N>>,
    {
        self.add_keyed(nodes.into_iter().map(|node| (node.node_key(), node)))
    }

    /// Register nodes whose keys were computed by the caller.
    ///
    /// Same semantics as [`add`](Self::add); `Node::node_key` is not called.
    pub fn add_keyed<I>(&mut self, nodes: I) -> Result<usize, GraphError<N>>
    where
        I: IntoIterator<Item = (N::Key, Arc<N>)>,
    {
        let mut added = 0usize;
        for (key, node) in nodes {
            match self.by_key.get(&key) {
                None => {
                    let id = NodeId(self.next_node_id);
                    self.next_node_id = self.next_node_id.saturating_add(1);
                    tracing::debug!(?key, %id, "registered node");
                    self.by_key.insert(key, NodeHandle { id, node });
                    added = added.saturating_add(1);
                }
                Some(found) if Arc::ptr_eq(&found.node, &node) => {}
                Some(found) => {
                    tracing::warn!(?key, id = %found.id, "rejected node with duplicate key");
                    return Err(GraphError::DuplicateKey(node));
                }
            }
        }
        Ok(added)
    }

    /// Resolve a key to its handle.
    #[must_use]
    pub fn lookup(&self, key: &N::Key) -> Option<&NodeHandle<N>> {
        self.by_key.get(key)
    }

    /// Check whether the node's key is registered.
    #[must_use]
    pub fn has(&self, node: &N) -> bool {
        self.contains_key(&node.node_key())
    }

    /// Check whether `key` is registered.
    #[must_use]
    pub fn contains_key(&self, key: &N::Key) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no node has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// All registered handles, in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = &NodeHandle<N>> {
        self.by_key.values()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Person {
        name: String,
    }

    impl Person {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
            })
        }
    }

    impl Node for Person {
        type Key = String;

        fn node_key(&self) -> Self::Key {
            self.name.clone()
        }
    }

    #[test]
    fn add_allocates_sequential_ids() {
        let mut registry = NodeRegistry::new();
        let added = registry
            .add([Person::new("a"), Person::new("b"), Person::new("c")])
            .expect("add");

        assert_eq!(added, 3);
        assert_eq!(registry.len(), 3);
        let ids: Vec<u64> = ["a", "b", "c"]
            .iter()
            .map(|k| registry.lookup(&(*k).to_string()).expect("lookup").id().value())
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn same_allocation_is_idempotent() {
        let mut registry = NodeRegistry::new();
        let a = Person::new("a");

        registry.add([Arc::clone(&a)]).expect("first");
        let added = registry.add([Arc::clone(&a)]).expect("second");

        assert_eq!(added, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_allocation_with_same_key_conflicts() {
        let mut registry = NodeRegistry::new();
        let first = Person::new("a");
        registry.add([Arc::clone(&first)]).expect("first");

        let result = registry.add([Person::new("a")]);
        assert!(matches!(result, Err(GraphError::DuplicateKey(_))));

        let kept = registry.lookup(&"a".to_string()).expect("lookup");
        assert!(Arc::ptr_eq(kept.node(), &first));
    }

    #[test]
    fn conflict_keeps_earlier_nodes() {
        let mut registry = NodeRegistry::new();
        registry.add([Person::new("a")]).expect("seed");

        let result = registry.add([Person::new("b"), Person::new("a"), Person::new("c")]);
        assert!(result.is_err());

        assert!(registry.lookup(&"b".to_string()).is_some());
        assert!(registry.lookup(&"c".to_string()).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn add_keyed_uses_given_keys() {
        let mut registry = NodeRegistry::new();
        let a = Person::new("a");

        let added = registry
            .add_keyed([("alias".to_string(), Arc::clone(&a))])
            .expect("add");
        assert_eq!(added, 1);
        assert!(registry.lookup(&"alias".to_string()).is_some());
        assert!(registry.lookup(&"a".to_string()).is_none());

        let result = registry.add_keyed([("alias".to_string(), Person::new("b"))]);
        assert!(matches!(result, Err(GraphError::DuplicateKey(_))));
    }

    #[test]
    fn has_is_key_based() {
        let mut registry = NodeRegistry::new();
        registry.add([Person::new("a")]).expect("add");

        assert!(registry.has(&Person::new("a")));
        assert!(!registry.has(&Person::new("z")));
        assert!(registry.contains_key(&"a".to_string()));
        assert!(!registry.is_empty());
        assert_eq!(registry.handles().count(), 1);
    }
}
