//! Occurrence counting for bills of materials.

use inlinable_string::InlinableString;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::scene::{DocumentSet, NodeData, NodeRef, SceneNode};
use crate::settings::CountSettings;
use crate::utils::FastHashMap;

/// The identity of a part: its label and the kind of shape it is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartKey {
    pub label: InlinableString,
    pub type_tag: InlinableString,
}

/// One line of a bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomRow {
    pub label: String,
    pub type_tag: String,
    pub quantity: usize,
}

/// Number of occurrences per part identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartCount {
    counts: FastHashMap<PartKey, usize>,
}

impl PartCount {
    /// Gets the count of a part, zero if it never occurred.
    pub fn get(&self, label: &str, type_tag: &str) -> usize {
        let key = PartKey {
            label: label.into(),
            type_tag: type_tag.into(),
        };

        self.counts.get(&key).cloned().unwrap_or(0)
    }

    /// Gets the count of the identity `node` belongs to. Structural nodes
    /// are never counted.
    pub fn lookup(&self, node: &SceneNode) -> usize {
        node.type_tag()
            .map(|tag| self.get(node.label(), tag))
            .unwrap_or(0)
    }

    /// Number of distinct part identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every count.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartKey, usize)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Returns the bill of materials sorted by label, then type tag.
    pub fn rows(&self) -> Vec<BomRow> {
        let mut rows: Vec<_> = self
            .counts
            .iter()
            .map(|(k, &v)| BomRow {
                label: k.label.to_string(),
                type_tag: k.type_tag.to_string(),
                quantity: v,
            })
            .collect();

        rows.sort_by(|lhs, rhs| {
            (&lhs.label, &lhs.type_tag).cmp(&(&rhs.label, &rhs.type_tag))
        });
        rows
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows())?)
    }
}

/// Tallies the leaves reachable from a set of roots.
///
/// Every structural path to a leaf adds one occurrence of its identity, so a
/// part reached through two links counts twice. Containers, links and arrays
/// are walked through but never counted themselves.
pub struct OccurrenceCounter<'a> {
    scene: &'a DocumentSet,
    settings: &'a CountSettings,
}

impl<'a> OccurrenceCounter<'a> {
    pub fn new(scene: &'a DocumentSet, settings: &'a CountSettings) -> Self {
        OccurrenceCounter { scene, settings }
    }

    /// Counts the parts reachable from `roots` and applies the multiplier and
    /// correction rules.
    pub fn count(&self, roots: &[NodeRef]) -> Result<PartCount> {
        let raw = self.count_raw(roots)?;
        self.apply_rules(raw)
    }

    /// Counts the parts reachable from `roots` as they are.
    pub fn count_raw(&self, roots: &[NodeRef]) -> Result<PartCount> {
        let mut counts = FastHashMap::default();
        let mut path = Vec::new();

        for &v in roots {
            self.visit(v, &mut path, &mut counts)?;
        }

        Ok(PartCount { counts })
    }

    fn visit(
        &self,
        v: NodeRef,
        path: &mut Vec<NodeRef>,
        counts: &mut FastHashMap<PartKey, usize>,
    ) -> Result<()> {
        if path.contains(&v) {
            return Err(Error::CyclicReference(v));
        }

        let node = self.scene.node(v)?;
        if let NodeData::Leaf { ref type_tag } = node.data {
            let key = PartKey {
                label: node.label.clone(),
                type_tag: type_tag.clone(),
            };

            *counts.entry(key).or_insert(0) += 1;
            return Ok(());
        }

        path.push(v);
        for &child in node.references() {
            self.visit(child, path, counts)?;
        }
        path.pop();

        Ok(())
    }

    /// Applies the label driven rules to a raw count.
    ///
    /// * winding fixture parts are needed once per coil of a phase,
    /// * casting mold parts once per rotor disk,
    /// * the rear rotor disk family loses the occurrences contributed by the
    ///   jig and mold assemblies that share its sub-assembly.
    pub fn apply_rules(&self, mut count: PartCount) -> Result<PartCount> {
        self.settings.validate()?;

        let s = self.settings;
        let matches = |prefix: &str, label: &str| !prefix.is_empty() && label.starts_with(prefix);

        // Sorted so that the first failing entry does not depend on hashing.
        let mut keys: Vec<_> = count.counts.keys().cloned().collect();
        keys.sort();

        for key in keys {
            let label: &str = &key.label;
            let mut value = count.counts[&key];

            if matches(&s.winding_fixture_prefix, label) {
                value = scale(label, value, s.coils_per_phase)?;
            }

            if matches(&s.mold_prefix, label) {
                value = scale(label, value, s.rotor_disks)?;
            }

            if matches(&s.rear_disk_prefix, label) {
                let raw = value;
                value = raw
                    .checked_sub(s.rear_disk_correction)
                    .ok_or_else(|| Error::NegativeCount {
                        label: label.to_owned(),
                        raw,
                        correction: s.rear_disk_correction,
                    })?;
            }

            count.counts.insert(key, value);
        }

        trace!("applied count rules to {} part(s).", count.len());
        Ok(count)
    }
}

fn scale(label: &str, raw: usize, factor: u32) -> Result<usize> {
    raw.checked_mul(factor as usize)
        .ok_or_else(|| Error::CountOverflow {
            label: label.to_owned(),
            raw,
            factor,
        })
}
