use smallvec::SmallVec;

use crate::errors::*;
use crate::math::Transform;
use crate::scene::{DocumentSet, NodeData, NodeRef, SceneNode};

/// The ancestors of a node from the outermost call down to its direct parent.
pub type AncestorPath = SmallVec<[NodeRef; 8]>;

/// A terminal (or intentionally stopped) node with its placement in world
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstance {
    pub node: NodeRef,
    pub world_placement: Transform,
    pub ancestor_path: AncestorPath,
}

/// One rendered element of a resolved array or mirror instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInstance {
    pub index: u32,
    pub world_placement: Transform,
}

/// Resolves subtrees into flat lists of placed instances.
///
/// The walk is depth first and pre-order. Containers and links are descended
/// into unless the stop predicate says otherwise; leaves, arrays and stopped
/// nodes are emitted as they are. No geometry is ever evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    scene: &'a DocumentSet,
}

impl<'a> Resolver<'a> {
    pub fn new(scene: &'a DocumentSet) -> Self {
        Resolver { scene }
    }

    /// Resolves `nodes` as roots.
    #[inline]
    pub fn resolve<F>(&self, nodes: &[NodeRef], stop: F) -> Result<Vec<ResolvedInstance>>
    where
        F: Fn(&SceneNode, &[NodeRef]) -> bool,
    {
        self.resolve_from(nodes, stop, None, true)
    }

    /// Resolves `nodes` as if they were reached from a parent placed at
    /// `parent_placement`.
    ///
    /// Without a parent placement each node starts at its own local
    /// placement. With one, `chain` decides whether the local placement is
    /// composed onto it or discarded.
    pub fn resolve_from<F>(
        &self,
        nodes: &[NodeRef],
        stop: F,
        parent_placement: Option<Transform>,
        chain: bool,
    ) -> Result<Vec<ResolvedInstance>>
    where
        F: Fn(&SceneNode, &[NodeRef]) -> bool,
    {
        let mut instances = Vec::new();
        let mut path = AncestorPath::new();
        self.visit(nodes, &stop, parent_placement, chain, &mut path, &mut instances)?;

        debug!(
            "resolved {} instance(s) from {} node(s).",
            instances.len(),
            nodes.len()
        );

        Ok(instances)
    }

    fn visit<F>(
        &self,
        nodes: &[NodeRef],
        stop: &F,
        parent_placement: Option<Transform>,
        chain: bool,
        path: &mut AncestorPath,
        instances: &mut Vec<ResolvedInstance>,
    ) -> Result<()>
    where
        F: Fn(&SceneNode, &[NodeRef]) -> bool,
    {
        for &v in nodes {
            if path.contains(&v) {
                return Err(Error::CyclicReference(v));
            }

            let node = self.scene.node(v)?;
            let placement = match parent_placement {
                None => node.local_placement,
                Some(parent) if chain => parent * node.local_placement,
                Some(parent) => parent,
            };

            let stop_here = stop(node, &path[..]);

            match node.data {
                NodeData::Container { ref children } if !stop_here => {
                    path.push(v);
                    self.visit(children, stop, Some(placement), true, path, instances)?;
                    path.pop();
                }
                NodeData::Link {
                    target,
                    applies_target_placement,
                } if !stop_here => {
                    path.push(v);
                    self.visit(
                        &[target],
                        stop,
                        Some(placement),
                        applies_target_placement,
                        path,
                        instances,
                    )?;
                    path.pop();
                }
                NodeData::Link {
                    target,
                    applies_target_placement: true,
                } => {
                    // Recursion would have picked up the offset of the target.
                    let target = self.scene.node(target)?;
                    instances.push(ResolvedInstance {
                        node: v,
                        world_placement: placement * target.local_placement,
                        ancestor_path: path.clone(),
                    });
                }
                _ => {
                    instances.push(ResolvedInstance {
                        node: v,
                        world_placement: placement,
                        ancestor_path: path.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Enumerates the rendered elements of an array or mirror instance. Any
    /// other instance has no elements.
    pub fn expand_elements(&self, instance: &ResolvedInstance) -> Result<Vec<ElementInstance>> {
        match self.scene.node(instance.node)?.data {
            NodeData::ArrayOrMirror { ref elements, .. } => Ok(elements
                .iter()
                .map(|v| ElementInstance {
                    index: v.index,
                    world_placement: instance.world_placement * v.placement,
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}
