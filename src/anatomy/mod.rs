//! Static anatomical tables: bone rest poses and the muscle map.
//!
//! Declarative data only; all behavior lives in the simulation modules. Tables
//! load from JSON or come from the built-in [`biped`] sample. Bones live in a
//! `BTreeMap` so iteration order, and therefore node indexing, is stable.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod biped;

/// One bone's rest pose. The parent name is informational only; no
/// forward-kinematic chaining happens here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoneSpec {
    pub rest_position: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// One actuator: a named contractile connector between two bones.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MuscleSpec {
    pub name: String,
    pub origin: String,
    pub insertion: String,
    pub relaxed_length: f32,
    pub contracted_length: f32,
    pub attach_points: [[f32; 3]; 2],
    pub energy_per_contraction: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Anatomy {
    pub bones: BTreeMap<String, BoneSpec>,
    pub muscles: Vec<MuscleSpec>,
}

impl Anatomy {
    pub fn from_json_file(path: &Path) -> Result<Self, AnatomyError> {
        let file = File::open(path).map_err(AnatomyError::Io)?;
        serde_json::from_reader(BufReader::new(file)).map_err(AnatomyError::Json)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<(), AnatomyError> {
        let file = File::create(path).map_err(AnatomyError::Io)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(AnatomyError::Json)
    }

    /// Names of all activation channels this anatomy offers.
    pub fn muscle_channels(&self) -> Vec<String> {
        self.muscles.iter().map(|muscle| muscle.name.clone()).collect()
    }
}

#[derive(Debug)]
pub enum AnatomyError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for AnatomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnatomyError::Io(error) => write!(f, "anatomy file: {error}"),
            AnatomyError::Json(error) => write!(f, "anatomy json: {error}"),
        }
    }
}

impl std::error::Error for AnatomyError {}
