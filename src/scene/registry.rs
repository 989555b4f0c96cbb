use inlinable_string::InlinableString;

use crate::errors::*;
use crate::utils::{FastHashMap, FastHashSet};

use super::document::Document;
use super::node::{DocumentId, NodeData, NodeRef, SceneNode};

/// The registry of every materialized document taking part in a resolution.
///
/// Links and arrays refer across documents through `NodeRef` handles, and
/// those handles are only ever dereferenced through this registry. It is
/// passed explicitly into each top-level call instead of living as a process
/// wide "active document".
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    remap: FastHashMap<InlinableString, DocumentId>,
    documents: Vec<Document>,
}

impl DocumentSet {
    pub fn new() -> Self {
        DocumentSet::default()
    }

    /// Get the number of documents.
    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Registers a new, empty document.
    pub fn add_document<T: Into<InlinableString>>(&mut self, name: T) -> Result<DocumentId> {
        let name = name.into();
        if self.remap.contains_key(&name) {
            return Err(Error::DuplicateDocument(name.to_string()));
        }

        let id = DocumentId::new(self.documents.len() as u32);
        self.remap.insert(name.clone(), id);
        self.documents.push(Document::new(id, name));
        Ok(id)
    }

    #[inline]
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id.offset())
    }

    #[inline]
    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(id.offset())
    }

    /// Finds a document by name.
    pub fn document_by_name(&self, name: &str) -> Result<&Document> {
        self.remap
            .get(name)
            .and_then(|&id| self.document(id))
            .ok_or_else(|| Error::UnknownDocument(name.to_owned()))
    }

    /// Returns the documents in registration order.
    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Dereferences a node handle.
    #[inline]
    pub fn node(&self, node: NodeRef) -> Result<&SceneNode> {
        self.document(node.document)
            .and_then(|v| v.get(node))
            .ok_or(Error::DanglingReference(node))
    }

    /// Returns the documents that links and arrays of `id` point into, sorted.
    pub fn dependencies(&self, id: DocumentId) -> Vec<DocumentId> {
        let mut deps: Vec<_> = self
            .document(id)
            .into_iter()
            .flat_map(|v| v.nodes())
            .filter_map(|v| match v.data {
                NodeData::Link { target, .. } => Some(target.document),
                NodeData::ArrayOrMirror { source, .. } => Some(source.document),
                _ => None,
            })
            .filter(|&v| v != id)
            .collect();

        deps.sort();
        deps.dedup();
        deps
    }

    /// Returns an order in which documents can be built so that every
    /// document comes after the documents it refers to. Ties keep the
    /// registration order.
    ///
    /// A link or array pointing into a document that was never added fails
    /// with `DanglingReference`, since no order could satisfy it.
    pub fn build_order(&self) -> Result<Vec<DocumentId>> {
        for node in self.documents.iter().flat_map(|v| v.nodes()) {
            match node.data {
                NodeData::Link { target: v, .. } | NodeData::ArrayOrMirror { source: v, .. }
                    if self.document(v.document).is_none() =>
                {
                    return Err(Error::DanglingReference(v));
                }
                _ => {}
            }
        }

        let deps: Vec<_> = self
            .documents
            .iter()
            .map(|v| self.dependencies(v.id()))
            .collect();

        let mut order = Vec::with_capacity(self.documents.len());
        let mut done = FastHashSet::default();

        while order.len() < self.documents.len() {
            let next = self.documents.iter().map(|v| v.id()).find(|id| {
                !done.contains(id) && deps[id.offset()].iter().all(|d| done.contains(d))
            });

            match next {
                Some(id) => {
                    done.insert(id);
                    order.push(id);
                }
                None => {
                    let names: Vec<_> = self
                        .documents
                        .iter()
                        .filter(|v| !done.contains(&v.id()))
                        .map(|v| v.name())
                        .collect();

                    return Err(Error::CyclicDocuments(names.join(", ")));
                }
            }
        }

        Ok(order)
    }
}
