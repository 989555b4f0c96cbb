//! # What is This?
//!
//! An assembly resolution engine for parametric wind turbine models. Upstream
//! document construction materializes every variant as a graph of assembly
//! containers, links, arrays and leaf shapes spread over several documents.
//! This crate flattens those graphs into placed instances for exporters,
//! places single nodes in world space for kinematic queries, and counts part
//! occurrences for bills of materials.
//!
//! Every operation is a pure traversal over an immutable `DocumentSet`.
//!
//! ```
//! use turbine_assembly::prelude::*;
//!
//! let mut scene = DocumentSet::new();
//! let id = scene.add_document("Turbine").unwrap();
//! let doc = scene.document_mut(id).unwrap();
//!
//! let frame = doc.add_container("Frame", Transform::from_position([0.0, 0.0, 1.0]));
//! let hub = doc.add_leaf("Hub", "Part::Feature", Transform::from_position([1.0, 0.0, 0.0]));
//! doc.add_child(frame, hub).unwrap();
//!
//! let instances = Resolver::new(&scene).resolve(&[frame], stop::never()).unwrap();
//! assert_eq!(instances.len(), 1);
//! assert_eq!(instances[0].world_placement.position, Vector3::new(1.0, 0.0, 1.0));
//! ```

#[macro_use]
extern crate log;
#[cfg_attr(test, macro_use)]
extern crate approx;

#[macro_use]
pub mod utils;

pub mod count;
pub mod diagnostics;
pub mod errors;
pub mod export;
pub mod kinematics;
pub mod lookup;
pub mod math;
pub mod resolve;
pub mod scene;
pub mod settings;

pub mod prelude {
    pub use crate::count::{BomRow, OccurrenceCounter, PartCount, PartKey};
    pub use crate::diagnostics::{Diagnostic, Diagnostics, LogDiagnostics, RecordedDiagnostics};
    pub use crate::errors::{Error, Result};
    pub use crate::export::{collect_exportable, InstanceNamer};
    pub use crate::lookup::{find_all_by_label, find_by_label, find_path, find_unique_by_label};
    pub use crate::math::prelude::*;
    pub use crate::resolve::{stop, ElementInstance, Locator, ResolvedInstance, Resolver};
    pub use crate::scene::prelude::*;
    pub use crate::settings::{CountSettings, ExportSettings, Settings};
}

pub use self::errors::{Error, Result};
