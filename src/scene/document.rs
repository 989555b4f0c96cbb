use inlinable_string::InlinableString;

use crate::errors::*;
use crate::math::Transform;

use super::node::{ArrayElement, ArrayMode, DocumentId, NodeData, NodeIndex, NodeRef, SceneNode};

/// A named collection of scene nodes.
///
/// Nodes live in an append-only arena. A node stays a root of the document
/// until some container of the same document takes ownership of it.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    name: InlinableString,
    nodes: Vec<SceneNode>,
}

impl Document {
    pub(crate) fn new(id: DocumentId, name: InlinableString) -> Self {
        Document {
            id,
            name,
            nodes: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the nodes of this document in creation order.
    #[inline]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Gets the node if it belongs to this document.
    #[inline]
    pub fn get(&self, node: NodeRef) -> Option<&SceneNode> {
        if node.document != self.id {
            return None;
        }

        self.nodes.get(node.node.offset())
    }

    /// Returns the nodes that are not owned by any container, in creation order.
    pub fn roots(&self) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .filter(|v| v.owner.is_none())
            .map(|v| v.id)
            .collect()
    }

    fn push<T: Into<InlinableString>>(&mut self, label: T, placement: Transform, data: NodeData) -> NodeRef {
        let id = NodeRef::new(self.id, NodeIndex::new(self.nodes.len() as u32));
        self.nodes.push(SceneNode::new(id, label.into(), placement, data));
        id
    }

    /// Adds an empty assembly container.
    pub fn add_container<T>(&mut self, label: T, placement: Transform) -> NodeRef
    where
        T: Into<InlinableString>,
    {
        self.push(label, placement, NodeData::Container { children: Vec::new() })
    }

    /// Adds a terminal shape.
    pub fn add_leaf<T1, T2>(&mut self, label: T1, type_tag: T2, placement: Transform) -> NodeRef
    where
        T1: Into<InlinableString>,
        T2: Into<InlinableString>,
    {
        let data = NodeData::Leaf {
            type_tag: type_tag.into(),
        };

        self.push(label, placement, data)
    }

    /// Adds a link to `target`, which may live in any document.
    pub fn add_link<T>(
        &mut self,
        label: T,
        target: NodeRef,
        placement: Transform,
        applies_target_placement: bool,
    ) -> NodeRef
    where
        T: Into<InlinableString>,
    {
        let data = NodeData::Link {
            target,
            applies_target_placement,
        };

        self.push(label, placement, data)
    }

    /// Adds an array or mirror of `source`.
    pub fn add_array<T>(
        &mut self,
        label: T,
        source: NodeRef,
        mode: ArrayMode,
        placement: Transform,
        elements: Vec<ArrayElement>,
    ) -> NodeRef
    where
        T: Into<InlinableString>,
    {
        let data = NodeData::ArrayOrMirror {
            source,
            mode,
            elements,
        };

        self.push(label, placement, data)
    }

    /// Appends `child` to the children of `container`.
    ///
    /// Ownership is exclusive and never crosses documents; referencing a node
    /// of another document is what links are for.
    pub fn add_child(&mut self, container: NodeRef, child: NodeRef) -> Result<()> {
        if container == child {
            return Err(Error::CanNotOwnSelf(child));
        }

        if container.document != self.id || child.document != self.id {
            return Err(Error::ForeignChild { container, child });
        }

        let child_index = child.node.offset();
        let owner = self
            .nodes
            .get(child_index)
            .ok_or(Error::DanglingReference(child))?
            .owner;

        if let Some(owner) = owner {
            return Err(Error::AlreadyOwned {
                child,
                owner: NodeRef::new(self.id, owner),
            });
        }

        match self.nodes.get_mut(container.node.offset()) {
            Some(SceneNode {
                data: NodeData::Container { children },
                ..
            }) => children.push(child),
            Some(_) => return Err(Error::NotAContainer(container)),
            None => return Err(Error::DanglingReference(container)),
        }

        self.nodes[child_index].owner = Some(container.node);
        Ok(())
    }

    fn node_mut(&mut self, node: NodeRef) -> Result<&mut SceneNode> {
        if node.document != self.id {
            return Err(Error::DanglingReference(node));
        }

        self.nodes
            .get_mut(node.node.offset())
            .ok_or(Error::DanglingReference(node))
    }

    /// Sets the visibility marker of a node.
    pub fn set_visible(&mut self, node: NodeRef, visible: bool) -> Result<()> {
        self.node_mut(node)?.visible = visible;
        Ok(())
    }

    /// Sets the flat-pattern exportable marker of a node.
    pub fn set_flat_exportable(&mut self, node: NodeRef, exportable: bool) -> Result<()> {
        self.node_mut(node)?.flat_exportable = exportable;
        Ok(())
    }

    /// Finds the first node with `label`.
    ///
    /// Fails loudly if no node carries the label. When several do, the first
    /// one in creation order wins.
    pub fn find_by_label(&self, label: &str) -> Result<NodeRef> {
        self.nodes
            .iter()
            .find(|v| v.label() == label)
            .map(|v| v.id)
            .ok_or_else(|| Error::MissingIdentity {
                label: label.to_owned(),
                document: self.name.to_string(),
            })
    }

    /// Finds every node with `label`, in creation order.
    pub fn find_all_by_label(&self, label: &str) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .filter(|v| v.label() == label)
            .map(|v| v.id)
            .collect()
    }
}
