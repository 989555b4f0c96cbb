//! Ready-made stop predicates for `Resolver`.
//!
//! A stop predicate is called with the node about to be visited and the path
//! of its ancestors. Returning true keeps the whole subtree as one instance.

use crate::scene::{NodeKind, NodeRef, SceneNode};

/// Never stops, resolving every subtree down to its leaves.
pub fn never() -> impl Fn(&SceneNode, &[NodeRef]) -> bool {
    |_, _| false
}

/// Stops at nodes whose label is one of `labels`.
pub fn labels<T: AsRef<str>>(labels: &[T]) -> impl Fn(&SceneNode, &[NodeRef]) -> bool {
    let labels: Vec<String> = labels.iter().map(|v| v.as_ref().to_owned()).collect();
    move |node, _| labels.iter().any(|v| v == node.label())
}

/// Stops at nodes whose label starts with one of `prefixes`.
pub fn label_prefixes<T: AsRef<str>>(prefixes: &[T]) -> impl Fn(&SceneNode, &[NodeRef]) -> bool {
    let prefixes: Vec<String> = prefixes.iter().map(|v| v.as_ref().to_owned()).collect();
    move |node, _| prefixes.iter().any(|v| node.label().starts_with(v.as_str()))
}

/// Stops at every node of the given kinds.
pub fn kinds(kinds: &[NodeKind]) -> impl Fn(&SceneNode, &[NodeRef]) -> bool {
    let kinds = kinds.to_vec();
    move |node, _| kinds.contains(&node.kind())
}
