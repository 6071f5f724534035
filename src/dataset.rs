//! Exchange records consumed and produced at the crate boundary.
//!
//! Field names follow the external JSON format exactly, so records
//! round-trip through `serde_json` without adapters.

use crate::error::AntennaError;
use crate::model::AntennaType;
use serde::{Deserialize, Serialize};

/// One building as it appears in a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub id: u32,
    pub x: i64,
    pub y: i64,
    #[serde(rename = "populationPeakHours")]
    pub population_peak_hours: u32,
    #[serde(rename = "populationOffPeakHours")]
    pub population_off_peak_hours: u32,
    #[serde(rename = "populationNight")]
    pub population_night: u32,
}

/// A dataset: the list of buildings to serve.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub buildings: Vec<BuildingRecord>,
}

impl Dataset {
    pub fn from_json(text: &str) -> Result<Self, AntennaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, AntennaError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One placed antenna in a solution file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntennaRecord {
    #[serde(rename = "type")]
    pub kind: AntennaType,
    pub x: i64,
    pub y: i64,
    pub buildings: Vec<u32>,
}

/// A solution: the antennas and the buildings each one serves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub antennas: Vec<AntennaRecord>,
}

impl SolutionRecord {
    pub fn from_json(text: &str) -> Result<Self, AntennaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, AntennaError> {
        Ok(serde_json::to_string(self)?)
    }
}
