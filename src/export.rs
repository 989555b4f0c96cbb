//! Selecting and naming what exporters write out.

use crate::errors::*;
use crate::resolve::ResolvedInstance;
use crate::scene::{DocumentSet, NodeData, NodeRef};
use crate::settings::ExportSettings;
use crate::utils::FastHashSet;

/// Collects the visible leaves marked as flat-pattern exportable.
///
/// Visibility is inherited: a hidden container or link hides its whole
/// subtree, whatever the markers below it say. Arrays are not descended
/// into. Each leaf appears once, in the order it is first reached.
pub fn collect_exportable(scene: &DocumentSet, roots: &[NodeRef]) -> Result<Vec<NodeRef>> {
    let mut builder = ExportSetBuilder {
        scene,
        path: Vec::new(),
        seen: FastHashSet::default(),
        leaves: Vec::new(),
    };

    for &v in roots {
        builder.visit(v)?;
    }

    debug!("collected {} flat-pattern exportable part(s).", builder.leaves.len());
    Ok(builder.leaves)
}

struct ExportSetBuilder<'a> {
    scene: &'a DocumentSet,
    path: Vec<NodeRef>,
    seen: FastHashSet<NodeRef>,
    leaves: Vec<NodeRef>,
}

impl<'a> ExportSetBuilder<'a> {
    fn visit(&mut self, v: NodeRef) -> Result<()> {
        if self.path.contains(&v) {
            return Err(Error::CyclicReference(v));
        }

        let scene = self.scene;
        let node = scene.node(v)?;
        if !node.visible {
            return Ok(());
        }

        match node.data {
            NodeData::Container { ref children } => {
                self.path.push(v);
                for &child in children {
                    self.visit(child)?;
                }
                self.path.pop();
            }
            NodeData::Link { target, .. } => {
                self.path.push(v);
                self.visit(target)?;
                self.path.pop();
            }
            NodeData::Leaf { .. } => {
                if node.flat_exportable && self.seen.insert(v) {
                    self.leaves.push(v);
                }
            }
            NodeData::ArrayOrMirror { .. } => {}
        }

        Ok(())
    }
}

/// Builds file and object names for resolved instances.
#[derive(Debug, Clone)]
pub struct InstanceNamer {
    side_markers: Vec<String>,
}

impl InstanceNamer {
    pub fn new(settings: &ExportSettings) -> Self {
        InstanceNamer {
            side_markers: settings.side_markers.clone(),
        }
    }

    /// Returns the side marker of the nearest ancestor whose label ends with
    /// one.
    pub fn side(&self, scene: &DocumentSet, instance: &ResolvedInstance) -> Result<Option<&str>> {
        for &v in instance.ancestor_path.iter().rev() {
            let label = scene.node(v)?.label();
            if let Some(marker) = self.side_markers.iter().find(|m| label.ends_with(m.as_str())) {
                return Ok(Some(marker.as_str()));
            }
        }

        Ok(None)
    }

    /// The label of the instance, followed by its side marker if it has one.
    pub fn name(&self, scene: &DocumentSet, instance: &ResolvedInstance) -> Result<String> {
        let label = scene.node(instance.node)?.label();
        Ok(match self.side(scene, instance)? {
            Some(side) => format!("{}_{}", label, side),
            None => label.to_owned(),
        })
    }

    /// The name of one element of an array instance.
    #[inline]
    pub fn element_name(base: &str, index: u32) -> String {
        format!("{}_{:03}", base, index)
    }
}
