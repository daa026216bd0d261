//! Prediction results.

use crate::mode::PropagationMode;
use crate::model::Computed;
use crate::warnings::Warnings;

/// Free-space basic transmission loss, in dB, at `distance` metres for a
/// frequency of `frequency_mhz`.
///
/// Equivalent to _32.44 + 20 log₁₀ f + 20 log₁₀ d_km_.
pub fn free_space_loss(distance: f64, frequency_mhz: f64) -> f64 {
    20.0 * distance.log10() + 20.0 * frequency_mhz.log10() - 27.56
}

/// Values computed along the way, for inspection and cross-checking.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntermediateValues {
    /// Terminal horizon elevation angles (rad): TX, RX.
    pub horizon_angles: (f64, f64),
    /// Terminal horizon distances (m): TX, RX.
    pub horizon_distances_m: (f64, f64),
    /// Terminal effective heights (m): TX, RX.
    pub effective_heights_m: (f64, f64),
    /// Surface refractivity (N-units).
    pub surface_refractivity: f64,
    /// Terrain irregularity (m).
    pub terrain_irregularity_m: f64,
    /// Reference attenuation (dB).
    pub reference_attenuation_db: f64,
    /// Free-space basic transmission loss (dB).
    pub free_space_loss_db: f64,
    /// Path distance (km).
    pub distance_km: f64,
    pub mode: PropagationMode,
}

/// Outcome of one prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropagationResult {
    /// Basic transmission loss not exceeded for the requested percentages (dB).
    pub loss_db: f64,
    pub free_space_loss_db: f64,
    /// Median attenuation over free space, before variability (dB).
    pub reference_attenuation_db: f64,
    pub mode: PropagationMode,
    /// Surface refractivity at the system elevation (N-units).
    pub surface_refractivity: f64,
    pub distance_km: f64,
    pub warnings: Warnings,
    pub intermediate: IntermediateValues,
}

impl PropagationResult {
    /// Attenuation over free space included in the loss (dB).
    pub fn excess_db(&self) -> f64 {
        self.loss_db - self.free_space_loss_db
    }

    /// Packages a prediction.
    ///
    /// `attenuation` is the variability-adjusted attenuation over free space.
    /// A total below free space is kept as-is but flagged.
    pub fn assemble(
        c: &Computed,
        distance_km: f64,
        frequency_mhz: f64,
        reference: f64,
        mode: PropagationMode,
        attenuation: f64,
        mut warnings: Warnings,
    ) -> Self {
        let free_space = free_space_loss(distance_km * 1e3, frequency_mhz);
        let loss_db = free_space + attenuation;
        warnings.set_if(Warnings::LOSS_BELOW_FREE_SPACE, loss_db < free_space);

        Self {
            loss_db,
            free_space_loss_db: free_space,
            reference_attenuation_db: reference,
            mode,
            surface_refractivity: c.surface_refractivity,
            distance_km,
            warnings,
            intermediate: IntermediateValues {
                horizon_angles: c.elevation_angles,
                horizon_distances_m: c.horizon_distances,
                effective_heights_m: c.effective_heights,
                surface_refractivity: c.surface_refractivity,
                terrain_irregularity_m: c.terrain_irregularity,
                reference_attenuation_db: reference,
                free_space_loss_db: free_space,
                distance_km,
                mode,
            },
        }
    }
}
