//! Input parameters for area predictions.
//!
//! The distance-independent inputs are grouped in [`AreaParams`], which is all
//! a [`Model`](crate::Model) needs to prepare itself. Per-query inputs, the
//! distance and the statistical request, are passed alongside each prediction.

use crate::climate::Climate;
use crate::error::ItmError;
use crate::ground::GroundConstants;
use std::convert::TryFrom;

/// The polarisation of the radio wave.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(i32)]
pub enum Polarisation {
    Horizontal = 0,
    Vertical = 1,
}

impl Default for Polarisation {
    fn default() -> Self {
        Polarisation::Horizontal
    }
}

impl TryFrom<i32> for Polarisation {
    type Error = ItmError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Polarisation::Horizontal),
            1 => Ok(Polarisation::Vertical),
            _ => Err(ItmError::InvalidPolarisation),
        }
    }
}

/// How carefully a terminal was sited with respect to the local terrain.
///
/// Careful siting puts antennas on local high ground, which raises their
/// effective height above the structural one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(i32)]
pub enum SitingCriteria {
    /// No special care taken.
    Random = 0,
    /// Some care taken to find a good spot.
    Careful = 1,
    /// Terminal placed on the best available site.
    VeryCareful = 2,
}

impl Default for SitingCriteria {
    fn default() -> Self {
        SitingCriteria::Random
    }
}

impl SitingCriteria {
    /// Parses a siting code. Which terminal it belongs to decides the error,
    /// so this returns `None` rather than an `ItmError`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SitingCriteria::Random),
            1 => Some(SitingCriteria::Careful),
            2 => Some(SitingCriteria::VeryCareful),
            _ => None,
        }
    }
}

/// Base statistical interpretation of the variability request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(i32)]
pub enum VariabilityMode {
    /// Confidence is the only variable: time, location, and situation are
    /// all folded into one distribution.
    SingleMessage = 0,
    /// Time and situation are folded together; location is separate.
    Accidental = 1,
    /// Time and location are folded together; situation is separate.
    Mobile = 2,
    /// Time, location, and situation are each treated separately.
    Broadcast = 3,
}

impl Default for VariabilityMode {
    fn default() -> Self {
        VariabilityMode::Broadcast
    }
}

/// Mode of variability, a base mode plus optional eliminations.
///
/// The numeric code is `mode + 10 × eliminate_location + 20 ×
/// eliminate_situation`, giving 0–3, 10–13, 20–23, and 30–33.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModeOfVariability {
    pub mode: VariabilityMode,

    /// Location variability is dropped (for example when a terrain database
    /// already accounts for it).
    pub eliminate_location: bool,

    /// Situation variability is dropped.
    pub eliminate_situation: bool,
}

impl ModeOfVariability {
    pub const SINGLE_MESSAGE: Self = Self::base(VariabilityMode::SingleMessage);
    pub const ACCIDENTAL: Self = Self::base(VariabilityMode::Accidental);
    pub const MOBILE: Self = Self::base(VariabilityMode::Mobile);
    pub const BROADCAST: Self = Self::base(VariabilityMode::Broadcast);

    const fn base(mode: VariabilityMode) -> Self {
        Self {
            mode,
            eliminate_location: false,
            eliminate_situation: false,
        }
    }

    /// Create a mode with location variability eliminated.
    pub fn eliminate_location(self) -> Self {
        Self {
            eliminate_location: true,
            ..self
        }
    }

    /// Create a mode with situation variability eliminated.
    pub fn eliminate_situation(self) -> Self {
        Self {
            eliminate_situation: true,
            ..self
        }
    }

    /// The numeric code for this mode.
    pub fn code(self) -> i32 {
        let mut code = self.mode as i32;
        if self.eliminate_location {
            code += 10;
        }
        if self.eliminate_situation {
            code += 20;
        }
        code
    }
}

impl TryFrom<i32> for ModeOfVariability {
    type Error = ItmError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        if !(0..=33).contains(&code) {
            return Err(ItmError::InvalidMdvar);
        }

        let mode = match code % 10 {
            0 => VariabilityMode::SingleMessage,
            1 => VariabilityMode::Accidental,
            2 => VariabilityMode::Mobile,
            3 => VariabilityMode::Broadcast,
            _ => return Err(ItmError::InvalidMdvar),
        };

        let tens = code / 10;
        Ok(Self {
            mode,
            eliminate_location: tens & 1 != 0,
            eliminate_situation: tens & 2 != 0,
        })
    }
}

impl From<ModeOfVariability> for i32 {
    fn from(mode: ModeOfVariability) -> i32 {
        mode.code()
    }
}

/// Statistical description of the terrain between the terminals.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainStatistics {
    /// Terrain irregularity Δh, in metres: the interdecile range of terrain
    /// elevations above a fitted line. 0 is flat, 90 is typical hills, 500 is
    /// rugged mountains.
    pub irregularity_m: f64,

    pub tx_siting: SitingCriteria,
    pub rx_siting: SitingCriteria,
}

impl Default for TerrainStatistics {
    fn default() -> Self {
        Self {
            irregularity_m: 90.0,
            tx_siting: SitingCriteria::Random,
            rx_siting: SitingCriteria::Random,
        }
    }
}

/// Atmospheric inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateProfile {
    pub climate: Climate,

    /// Surface refractivity reduced to sea level (N-units).
    pub surface_refractivity: f64,

    /// Mean elevation of the system above sea level, in metres. Surface
    /// refractivity is scaled down to this elevation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub system_elevation_m: f64,
}

impl Default for ClimateProfile {
    fn default() -> Self {
        let climate = Climate::default();
        Self {
            climate,
            surface_refractivity: climate.typical_refractivity(),
            system_elevation_m: 0.0,
        }
    }
}

/// Radio and ground inputs.
///
/// Refer to [ITU-R P.527] to derive ground permittivity and conductivity for
/// your region/terrain and frequency, or use one of the
/// [`GroundConstants`] presets.
///
/// [ITU-R P.527]: https://www.itu.int/dms_pubrec/itu-r/rec/p/R-REC-P.527-4-201706-I!!PDF-E.pdf
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioParameters {
    /// Frequency of modeled wave (MHz).
    pub frequency_mhz: f64,

    /// Polarisation of modeled wave.
    pub polarisation: Polarisation,

    /// Relative permittivity of the ground (aka "dielectric constant").
    pub permittivity: f64,

    /// Conductivity of the ground (in siemens per metre).
    pub conductivity: f64,
}

impl RadioParameters {
    /// Radio parameters over the given ground.
    pub fn over(frequency_mhz: f64, polarisation: Polarisation, ground: GroundConstants) -> Self {
        Self {
            frequency_mhz,
            polarisation,
            permittivity: ground.permittivity,
            conductivity: ground.conductivity,
        }
    }
}

impl Default for RadioParameters {
    fn default() -> Self {
        Self::over(100.0, Polarisation::Vertical, GroundConstants::AVERAGE)
    }
}

/// All distance-independent inputs of an area prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaParams {
    /// Structural heights above ground of the terminals (antennas), in metres:
    /// transmitter then receiver.
    pub heights: (f64, f64),

    pub terrain: TerrainStatistics,
    pub climate: ClimateProfile,
    pub radio: RadioParameters,
}

impl Default for AreaParams {
    fn default() -> Self {
        Self {
            heights: (10.0, 2.0),
            terrain: TerrainStatistics::default(),
            climate: ClimateProfile::default(),
            radio: RadioParameters::default(),
        }
    }
}

/// The statistical question asked of a prediction.
///
/// Percentages are in the open interval (0, 100): "the loss not exceeded for
/// `time`% of the time, at `location`% of locations, in `situation`% of
/// situations".
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VariabilityRequest {
    pub mode: ModeOfVariability,
    pub time: f64,
    pub location: f64,
    pub situation: f64,
}

impl VariabilityRequest {
    /// Broadcast-mode median in all three dimensions.
    pub fn median() -> Self {
        Self {
            mode: ModeOfVariability::BROADCAST,
            time: 50.0,
            location: 50.0,
            situation: 50.0,
        }
    }

    /// Confidence/reliability request.
    ///
    /// Reliability is expressed as time, confidence as situation, and the
    /// location is held at its median.
    pub fn confidence_reliability(
        mode: ModeOfVariability,
        confidence: f64,
        reliability: f64,
    ) -> Self {
        Self {
            mode,
            time: reliability,
            location: 50.0,
            situation: confidence,
        }
    }
}

impl Default for VariabilityRequest {
    fn default() -> Self {
        Self::median()
    }
}
