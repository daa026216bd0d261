//! Ground electrical constants.

/// Relative permittivity and conductivity of the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundConstants {
    /// Relative permittivity (dimensionless, ≥ 1).
    pub permittivity: f64,
    /// Conductivity (S/m, > 0).
    pub conductivity: f64,
}

impl GroundConstants {
    pub const AVERAGE: Self = Self::new(15.0, 0.005);
    pub const POOR: Self = Self::new(4.0, 0.001);
    pub const GOOD: Self = Self::new(25.0, 0.02);
    pub const FRESH_WATER: Self = Self::new(81.0, 0.01);
    pub const SEA_WATER: Self = Self::new(81.0, 5.0);

    pub const fn new(permittivity: f64, conductivity: f64) -> Self {
        Self {
            permittivity,
            conductivity,
        }
    }
}

impl Default for GroundConstants {
    fn default() -> Self {
        Self::AVERAGE
    }
}

/// Named ground types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroundPreset {
    Average,
    Poor,
    Good,
    FreshWater,
    SeaWater,
}

impl Default for GroundPreset {
    fn default() -> Self {
        GroundPreset::Average
    }
}

impl From<GroundPreset> for GroundConstants {
    fn from(preset: GroundPreset) -> Self {
        match preset {
            GroundPreset::Average => GroundConstants::AVERAGE,
            GroundPreset::Poor => GroundConstants::POOR,
            GroundPreset::Good => GroundConstants::GOOD,
            GroundPreset::FreshWater => GroundConstants::FRESH_WATER,
            GroundPreset::SeaWater => GroundConstants::SEA_WATER,
        }
    }
}
