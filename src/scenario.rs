//! Scenario files: one link configuration swept over a list of distances.
//!
//! Scenarios are JSON documents. Anything with a sensible default may be
//! omitted:
//!
//! ```json
//! {
//!   "name": "repeater to handhelds",
//!   "transmitter": { "height_m": 30, "siting": "careful" },
//!   "receiver": { "height_m": 1.5 },
//!   "climate": "continental_temperate",
//!   "frequency_mhz": 450,
//!   "polarisation": "vertical",
//!   "ground": "average",
//!   "variability": { "time": 90, "location": 90, "situation": 50 },
//!   "distances_km": [1, 5, 10, 20, 40]
//! }
//! ```

use crate::error::{ScenarioError, ScenarioResult};
use itm::{
    AreaParams, Climate, ClimateProfile, GroundConstants, GroundPreset, Model, Polarisation,
    PropagationResult, RadioParameters, SitingCriteria, TerrainStatistics, VariabilityRequest,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One end of the link.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Antenna height above ground (m).
    pub height_m: f64,

    #[serde(default)]
    pub siting: SitingCriteria,
}

/// Ground, either by name or by its electrical constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ground {
    Preset(GroundPreset),
    Custom(GroundConstants),
}

impl Default for Ground {
    fn default() -> Self {
        Ground::Preset(GroundPreset::Average)
    }
}

impl From<Ground> for GroundConstants {
    fn from(ground: Ground) -> Self {
        match ground {
            Ground::Preset(preset) => preset.into(),
            Ground::Custom(constants) => constants,
        }
    }
}

fn default_irregularity() -> f64 {
    TerrainStatistics::default().irregularity_m
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    pub transmitter: Station,
    pub receiver: Station,

    /// Terrain irregularity Δh (m).
    #[serde(default = "default_irregularity")]
    pub terrain_irregularity_m: f64,

    #[serde(default)]
    pub climate: Climate,

    /// Sea-level surface refractivity (N-units). Defaults to the climate's
    /// typical value.
    #[serde(default)]
    pub surface_refractivity: Option<f64>,

    #[serde(default)]
    pub system_elevation_m: f64,

    pub frequency_mhz: f64,

    #[serde(default)]
    pub polarisation: Polarisation,

    #[serde(default)]
    pub ground: Ground,

    #[serde(default)]
    pub variability: VariabilityRequest,

    pub distances_km: Vec<f64>,
}

/// Results of a scenario, in the order of its distances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub line_of_sight_distance_km: f64,
    pub crossover_distance_km: f64,
    pub results: Vec<PropagationResult>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> ScenarioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scenario");
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn area_params(&self) -> AreaParams {
        AreaParams {
            heights: (self.transmitter.height_m, self.receiver.height_m),
            terrain: TerrainStatistics {
                irregularity_m: self.terrain_irregularity_m,
                tx_siting: self.transmitter.siting,
                rx_siting: self.receiver.siting,
            },
            climate: ClimateProfile {
                climate: self.climate,
                surface_refractivity: self
                    .surface_refractivity
                    .unwrap_or_else(|| self.climate.typical_refractivity()),
                system_elevation_m: self.system_elevation_m,
            },
            radio: RadioParameters::over(self.frequency_mhz, self.polarisation, self.ground.into()),
        }
    }

    pub fn model(&self) -> ScenarioResult<Model> {
        Ok(Model::new(&self.area_params())?)
    }

    /// Predicts every distance, stopping at the first rejected one.
    pub fn run(&self) -> ScenarioResult<Report> {
        if self.distances_km.is_empty() {
            return Err(ScenarioError::NoDistances);
        }

        let model = self.model()?;
        info!(
            scenario = %self.name,
            distances = self.distances_km.len(),
            line_of_sight_km = model.line_of_sight_distance_km(),
            "running scenario"
        );

        let results = self
            .distances_km
            .iter()
            .map(|&distance_km| {
                let result = model.predict(distance_km, &self.variability)?;
                if result.warnings.has_warnings() {
                    warn!(
                        scenario = %self.name,
                        distance_km,
                        warnings = %result.warnings,
                        "prediction outside recommended ranges"
                    );
                }
                Ok(result)
            })
            .collect::<ScenarioResult<Vec<_>>>()?;

        Ok(Report {
            name: self.name.clone(),
            line_of_sight_distance_km: model.line_of_sight_distance_km(),
            crossover_distance_km: model.crossover_distance_km(),
            results,
        })
    }
}
