//! Finding nodes by their human readable labels.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::*;
use crate::scene::{DocumentSet, NodeData, NodeRef};

/// Finds the first node labelled `label` in the named document.
///
/// Labels are not unique. Several matches silently resolve to the first node
/// in creation order, while zero matches is a `MissingIdentity` error naming
/// both the label and the document.
#[inline]
pub fn find_by_label(scene: &DocumentSet, document: &str, label: &str) -> Result<NodeRef> {
    scene.document_by_name(document)?.find_by_label(label)
}

/// Finds every node labelled `label` in the named document.
#[inline]
pub fn find_all_by_label(scene: &DocumentSet, document: &str, label: &str) -> Result<Vec<NodeRef>> {
    Ok(scene.document_by_name(document)?.find_all_by_label(label))
}

/// Like `find_by_label`, but reports an `AmbiguousLabel` diagnostic when
/// more than one node matches.
pub fn find_unique_by_label(
    scene: &DocumentSet,
    document: &str,
    label: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<NodeRef> {
    let doc = scene.document_by_name(document)?;
    let matches = doc.find_all_by_label(label);

    match matches.first() {
        Some(&first) => {
            if matches.len() > 1 {
                diagnostics.report(Diagnostic::AmbiguousLabel {
                    document: document.into(),
                    label: label.into(),
                    matches: matches.len(),
                });
            }

            Ok(first)
        }
        None => Err(Error::MissingIdentity {
            label: label.to_owned(),
            document: document.to_owned(),
        }),
    }
}

/// Finds a node by a '/' separated path of labels, starting at the roots of
/// the document and descending through container children.
///
/// Empty components are skipped, so "/Frame//Hub" is the same as "Frame/Hub".
pub fn find_path(scene: &DocumentSet, document: &str, path: &str) -> Result<NodeRef> {
    let doc = scene.document_by_name(document)?;
    let missing = || Error::MissingIdentity {
        label: path.to_owned(),
        document: document.to_owned(),
    };

    let mut candidates = doc.roots();
    let mut found = None;

    for component in path.split('/').filter(|v| !v.is_empty()) {
        let mut next = None;
        for &v in &candidates {
            if scene.node(v)?.label() == component {
                next = Some(v);
                break;
            }
        }

        let node = next.ok_or_else(missing)?;
        candidates = match scene.node(node)?.data {
            NodeData::Container { ref children } => children.clone(),
            _ => Vec::new(),
        };

        found = Some(node);
    }

    found.ok_or_else(missing)
}
