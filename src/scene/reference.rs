use smallvec::SmallVec;

use crate::utils::FastHashMap;

use super::node::{NodeData, NodeRef};
use super::registry::DocumentSet;

type Referrers = SmallVec<[NodeRef; 2]>;

/// The reverse view of ownership and link edges, built once after the scene
/// is materialized.
///
/// A node is referenced by the container that owns it and by every link
/// targeting it. Array and mirror sources are not part of this view: an
/// array renders its source elsewhere, it does not place it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    referrers: FastHashMap<NodeRef, Referrers>,
}

impl ReferenceIndex {
    /// Collects back-pointers in document registration order, then node
    /// creation order.
    pub fn build(scene: &DocumentSet) -> Self {
        let mut referrers = FastHashMap::<NodeRef, Referrers>::default();

        for document in scene.documents() {
            for node in document.nodes() {
                match node.data {
                    NodeData::Container { ref children } => {
                        for &child in children {
                            referrers.entry(child).or_default().push(node.id());
                        }
                    }
                    NodeData::Link { target, .. } => {
                        referrers.entry(target).or_default().push(node.id());
                    }
                    NodeData::ArrayOrMirror { .. } | NodeData::Leaf { .. } => {}
                }
            }
        }

        ReferenceIndex { referrers }
    }

    /// Returns the containers and links referencing `node`.
    #[inline]
    pub fn referenced_by(&self, node: NodeRef) -> &[NodeRef] {
        self.referrers
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if nothing references `node`.
    #[inline]
    pub fn is_root(&self, node: NodeRef) -> bool {
        self.referenced_by(node).is_empty()
    }
}
