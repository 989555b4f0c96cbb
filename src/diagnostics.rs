//! Non-fatal findings reported while resolving a scene.
//!
//! Ambiguities never stop a resolution: the engine picks the first candidate
//! and hands a `Diagnostic` to whichever `Diagnostics` sink the caller passed.

use std::cell::RefCell;
use std::fmt;

use inlinable_string::InlinableString;

use crate::scene::NodeRef;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An upward walk met a node referenced by more than one container or link.
    AmbiguousParent {
        node: NodeRef,
        chosen: NodeRef,
        candidates: usize,
        levels: usize,
    },
    /// A label lookup matched more than one node.
    AmbiguousLabel {
        document: InlinableString,
        label: InlinableString,
        matches: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::AmbiguousParent {
                node,
                chosen,
                candidates,
                levels,
            } => write!(
                f,
                "{} has {} referencing parents, using {} ({} ambiguous level(s)).",
                node, candidates, chosen, levels
            ),
            Diagnostic::AmbiguousLabel {
                ref document,
                ref label,
                matches,
            } => write!(
                f,
                "'{}' matches {} nodes in document '{}', using the first.",
                label, matches, document
            ),
        }
    }
}

/// A sink for diagnostics.
pub trait Diagnostics {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `log` facade as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory, in reporting order.
#[derive(Debug, Default)]
pub struct RecordedDiagnostics {
    records: RefCell<Vec<Diagnostic>>,
}

impl RecordedDiagnostics {
    pub fn new() -> Self {
        RecordedDiagnostics::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Returns a copy of the recorded diagnostics.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    /// Removes and returns the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.records.replace(Vec::new())
    }
}

impl Diagnostics for RecordedDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        trace!("recorded diagnostic: {}", diagnostic);
        self.records.borrow_mut().push(diagnostic);
    }
}
