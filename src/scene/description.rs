//! The serialized form of a materialized scene.
//!
//! Upstream document construction hands the engine its trees as JSON. Nodes
//! refer to each other by position inside their document, optionally
//! qualified with the name of another document for links and arrays.

use cgmath::Deg;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::math::Transform;

use super::node::{ArrayElement, ArrayMode, DocumentId, NodeIndex, NodeRef};
use super::registry::DocumentSet;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SceneDescription {
    pub documents: Vec<DocumentDescription>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentDescription {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeDescription {
    pub label: String,
    #[serde(default)]
    pub placement: PlacementDescription,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub flat_exportable: bool,
    #[serde(flatten)]
    pub data: NodeDataDescription,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum NodeDataDescription {
    Container {
        #[serde(default)]
        children: Vec<u32>,
    },
    Link {
        target: NodeAddress,
        #[serde(default = "default_applies_target_placement")]
        applies_target_placement: bool,
    },
    ArrayOrMirror {
        source: NodeAddress,
        mode: ArrayMode,
        #[serde(default)]
        elements: Vec<PlacementDescription>,
    },
    Leaf {
        type_tag: String,
    },
}

/// Position of a node inside a document. A missing document means the
/// document of the referencing node.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeAddress {
    #[serde(default)]
    pub document: Option<String>,
    pub index: u32,
}

/// A placement written the way CAD tools display it: a base point and a
/// rotation of `angle` degrees about `axis`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlacementDescription {
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],
    #[serde(default)]
    pub angle: f64,
}

impl Default for PlacementDescription {
    fn default() -> Self {
        PlacementDescription {
            position: [0.0; 3],
            axis: default_axis(),
            angle: 0.0,
        }
    }
}

impl From<PlacementDescription> for Transform {
    fn from(v: PlacementDescription) -> Self {
        Transform::from_axis_angle(v.position, v.axis, Deg(v.angle))
    }
}

fn default_visible() -> bool {
    true
}

fn default_applies_target_placement() -> bool {
    true
}

fn default_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

impl SceneDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl DocumentSet {
    /// Materializes a scene from its description.
    ///
    /// Every address is checked before any node is dereferenced, so a
    /// description that points outside of its documents fails with
    /// `InvalidDescription` instead of producing dangling handles.
    pub fn from_description(description: &SceneDescription) -> Result<Self> {
        let mut scene = DocumentSet::new();
        for v in &description.documents {
            scene.add_document(v.name.as_str())?;
        }

        let resolve = |from: usize, address: &NodeAddress| -> Result<NodeRef> {
            let document = match address.document {
                Some(ref name) => description
                    .documents
                    .iter()
                    .position(|v| &v.name == name)
                    .ok_or_else(|| Error::UnknownDocument(name.clone()))?,
                None => from,
            };

            if address.index as usize >= description.documents[document].nodes.len() {
                return Err(Error::InvalidDescription(format!(
                    "document '{}' has no node #{}",
                    description.documents[document].name, address.index
                )));
            }

            Ok(NodeRef::new(
                DocumentId::new(document as u32),
                NodeIndex::new(address.index),
            ))
        };

        for (i, desc) in description.documents.iter().enumerate() {
            let document = scene
                .document_mut(DocumentId::new(i as u32))
                .ok_or_else(|| Error::UnknownDocument(desc.name.clone()))?;

            let mut handles = Vec::with_capacity(desc.nodes.len());
            for node in &desc.nodes {
                let placement = Transform::from(node.placement);
                let label = node.label.as_str();

                let handle = match node.data {
                    NodeDataDescription::Container { .. } => document.add_container(label, placement),
                    NodeDataDescription::Leaf { ref type_tag } => {
                        document.add_leaf(label, type_tag.as_str(), placement)
                    }
                    NodeDataDescription::Link {
                        ref target,
                        applies_target_placement,
                    } => {
                        let target = resolve(i, target)?;
                        document.add_link(label, target, placement, applies_target_placement)
                    }
                    NodeDataDescription::ArrayOrMirror {
                        ref source,
                        mode,
                        ref elements,
                    } => {
                        let source = resolve(i, source)?;
                        let elements = elements
                            .iter()
                            .enumerate()
                            .map(|(index, &v)| ArrayElement {
                                index: index as u32,
                                placement: v.into(),
                            })
                            .collect();

                        document.add_array(label, source, mode, placement, elements)
                    }
                };

                document.set_visible(handle, node.visible)?;
                document.set_flat_exportable(handle, node.flat_exportable)?;
                handles.push(handle);
            }

            // Children attach once every node of the document exists.
            for (node, &container) in desc.nodes.iter().zip(handles.iter()) {
                if let NodeDataDescription::Container { ref children } = node.data {
                    for &index in children {
                        let child = resolve(i, &NodeAddress { document: None, index })?;
                        document.add_child(container, child)?;
                    }
                }
            }
        }

        debug!("materialized {} document(s) from description.", scene.len());

        Ok(scene)
    }

    /// Parses and materializes a scene description.
    pub fn from_json(json: &str) -> Result<Self> {
        DocumentSet::from_description(&SceneDescription::from_json(json)?)
    }
}
