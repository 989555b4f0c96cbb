//! The node model: documents of scene nodes and the handles between them.

pub mod description;
pub mod document;
pub mod node;
pub mod reference;
pub mod registry;

pub use self::description::SceneDescription;
pub use self::document::Document;
pub use self::node::{
    ArrayElement, ArrayMode, DocumentId, NodeData, NodeIndex, NodeKind, NodeRef, SceneNode,
};
pub use self::reference::ReferenceIndex;
pub use self::registry::DocumentSet;

pub mod prelude {
    pub use super::{
        ArrayElement, ArrayMode, Document, DocumentId, DocumentSet, NodeData, NodeIndex, NodeKind,
        NodeRef, ReferenceIndex, SceneDescription, SceneNode,
    };
}
