use smallvec::SmallVec;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::*;
use crate::math::Transform;
use crate::scene::{DocumentSet, NodeData, NodeRef, ReferenceIndex};
use crate::utils::FastHashSet;

/// Answers "where is this node in world space" by walking up the reverse
/// ownership edges, without flattening the whole tree.
pub struct Locator<'a> {
    scene: &'a DocumentSet,
    index: ReferenceIndex,
}

impl<'a> Locator<'a> {
    /// Builds the reference index of `scene` once for all later queries.
    pub fn new(scene: &'a DocumentSet) -> Self {
        Locator {
            scene,
            index: ReferenceIndex::build(scene),
        }
    }

    #[inline]
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Gets the placement of `node` in world space.
    ///
    /// When a node on the way up is referenced by several containers or
    /// links, the first referrer is followed. A single `AmbiguousParent`
    /// diagnostic is reported per call, counting every ambiguous level.
    ///
    /// Stepping up from a link target into a link that does not apply the
    /// target placement drops the local placement of the target, the same
    /// way `Resolver` does on the way down.
    pub fn global_placement(&self, node: NodeRef, diagnostics: &dyn Diagnostics) -> Result<Transform> {
        let mut placements = SmallVec::<[Transform; 8]>::new();
        let mut visited = FastHashSet::default();
        let mut ambiguity = None;
        let mut levels = 0;
        let mut current = node;

        loop {
            if !visited.insert(current) {
                return Err(Error::CyclicReference(current));
            }

            placements.push(self.scene.node(current)?.local_placement);

            let parent = match *self.index.referenced_by(current) {
                [] => break,
                [parent] => parent,
                [first, ..] => {
                    levels += 1;
                    if ambiguity.is_none() {
                        let candidates = self.index.referenced_by(current).len();
                        ambiguity = Some((current, first, candidates));
                    }

                    first
                }
            };

            if let NodeData::Link {
                applies_target_placement: false,
                ..
            } = self.scene.node(parent)?.data
            {
                placements.pop();
            }

            current = parent;
        }

        if let Some((node, chosen, candidates)) = ambiguity {
            diagnostics.report(Diagnostic::AmbiguousParent {
                node,
                chosen,
                candidates,
                levels,
            });
        }

        Ok(placements
            .iter()
            .rev()
            .fold(Transform::identity(), |acc, &rhs| acc * rhs))
    }

    /// Gets the placement of `to` expressed in the frame of `from`.
    pub fn relative_placement(
        &self,
        from: NodeRef,
        to: NodeRef,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Transform> {
        let from = self.global_placement(from, diagnostics)?;
        let to = self.global_placement(to, diagnostics)?;
        Ok(from.inverse() * to)
    }
}
