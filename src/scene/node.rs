use std::fmt;

use inlinable_string::InlinableString;
use serde::{Deserialize, Serialize};

use crate::math::Transform;

impl_handle!(DocumentId);
impl_handle!(NodeIndex);

/// A weak, cross-document reference to a scene node.
///
/// The referenced node is owned by the arena of its document. Holding a
/// `NodeRef` never keeps anything alive, and a `NodeRef` never forms an
/// ownership edge between documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub document: DocumentId,
    pub node: NodeIndex,
}

impl NodeRef {
    #[inline]
    pub fn new(document: DocumentId, node: NodeIndex) -> Self {
        NodeRef { document, node }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node ({}:{})", self.document.index(), self.node.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Container,
    Link,
    ArrayOrMirror,
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayMode {
    Linear,
    Polar,
    Mirror,
}

/// One rendered occurrence of an array or mirror node. The placement is
/// relative to the array node itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayElement {
    pub index: u32,
    pub placement: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Owns an ordered sequence of children of the same document.
    Container { children: Vec<NodeRef> },
    /// Refers to exactly one target, possibly in another document.
    Link {
        target: NodeRef,
        applies_target_placement: bool,
    },
    /// Instances or reflects a single source.
    ArrayOrMirror {
        source: NodeRef,
        mode: ArrayMode,
        elements: Vec<ArrayElement>,
    },
    /// Terminal geometry, tagged with the kind of shape it is.
    Leaf { type_tag: InlinableString },
}

/// `SceneNode` is one element of a materialized assembly tree.
///
/// Nodes are created through `Document` and are read-only for the whole
/// duration of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub(crate) id: NodeRef,
    pub(crate) owner: Option<NodeIndex>,

    pub label: InlinableString,
    pub local_placement: Transform,
    pub visible: bool,
    pub flat_exportable: bool,
    pub data: NodeData,
}

impl SceneNode {
    pub(crate) fn new(id: NodeRef, label: InlinableString, placement: Transform, data: NodeData) -> Self {
        SceneNode {
            id,
            owner: None,
            label,
            local_placement: placement,
            visible: true,
            flat_exportable: false,
            data,
        }
    }

    /// The handle of this node.
    #[inline]
    pub fn id(&self) -> NodeRef {
        self.id
    }

    /// The container owning this node, if any.
    #[inline]
    pub fn owner(&self) -> Option<NodeRef> {
        self.owner.map(|v| NodeRef::new(self.id.document, v))
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Container { .. } => NodeKind::Container,
            NodeData::Link { .. } => NodeKind::Link,
            NodeData::ArrayOrMirror { .. } => NodeKind::ArrayOrMirror,
            NodeData::Leaf { .. } => NodeKind::Leaf,
        }
    }

    /// The shape kind of a leaf.
    #[inline]
    pub fn type_tag(&self) -> Option<&str> {
        match self.data {
            NodeData::Leaf { ref type_tag } => Some(&**type_tag),
            _ => None,
        }
    }

    /// The nodes this node points at, in order: children of a container, or
    /// the single target/source of a link or array.
    pub fn references(&self) -> &[NodeRef] {
        match self.data {
            NodeData::Container { ref children } => children,
            NodeData::Link { ref target, .. } => ::std::slice::from_ref(target),
            NodeData::ArrayOrMirror { ref source, .. } => ::std::slice::from_ref(source),
            NodeData::Leaf { .. } => &[],
        }
    }
}
