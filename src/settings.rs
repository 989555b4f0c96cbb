//! Functions for loading resolution settings.

use serde::{Deserialize, Serialize};

use crate::errors::*;

/// A structure containing the externally supplied parameters the engine needs
/// besides the scene itself. Every field has a default, so a settings file
/// only lists what differs.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub counting: CountSettings,
    pub export: ExportSettings,
}

impl Settings {
    /// Parses and validates settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.counting.validate()
    }
}

/// Multipliers and corrections applied to raw part counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CountSettings {
    /// Number of coil winding fixtures per electrical phase.
    pub coils_per_phase: u32,
    /// Number of rotor disks in the configured topology, 1 or 2.
    pub rotor_disks: u32,
    /// Label prefix of parts needed once per winding fixture.
    pub winding_fixture_prefix: String,
    /// Label prefix of parts needed once per rotor disk.
    pub mold_prefix: String,
    /// Label prefix of the rear rotor disk family.
    pub rear_disk_prefix: String,
    /// How many rear rotor disk occurrences belong to the jig and mold
    /// assemblies sharing the disk sub-assembly.
    pub rear_disk_correction: usize,
}

impl Default for CountSettings {
    fn default() -> Self {
        CountSettings {
            coils_per_phase: 4,
            rotor_disks: 2,
            winding_fixture_prefix: "CoilWinder".to_owned(),
            mold_prefix: "ResinMold".to_owned(),
            rear_disk_prefix: "RearRotorDisk".to_owned(),
            rear_disk_correction: 2,
        }
    }
}

impl CountSettings {
    pub fn validate(&self) -> Result<()> {
        match self.rotor_disks {
            1 | 2 => Ok(()),
            n => Err(Error::InvalidTopology(n)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Label suffixes telling mirrored halves of an assembly apart.
    pub side_markers: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            side_markers: vec!["Front".to_owned(), "Back".to_owned()],
        }
    }
}
