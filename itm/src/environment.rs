//! Atmosphere, earth curvature, and ground.
//!
//! See ITM section `<41>` and Fig/1.1 to Fig/1.5 of T.A.

use crate::error::{ItmError, ItmResult};
use crate::params::{ClimateProfile, Polarisation, RadioParameters};
use num_complex::Complex64;

/// The carrier or central frequency (in MHz).
///
/// This is pre-computed (in the paper) assuming a speed of light **in air** of
/// 299.7 metres per microsecond. See Fig/1.1 in T.A.
pub const CARRIER_FREQUENCY: f64 = 47.7;

/// Curvature of the actual earth (1 / 6370 km), rounded as in T.A.
pub const ABSOLUTE_CURVATURE: f64 = 157e-9;

/// Scale height of the refractivity decay with elevation (m).
pub const REFRACTIVITY_SCALE_HEIGHT: f64 = 9460.0;

/// Acceptable range of effective earth curvature (1/m).
pub const CURVATURE_LIMITS: (f64, f64) = (75e-9, 250e-9);

/// Surface refractivity at the system's elevation. Fig/1.2 in T.A.
pub fn surface_refractivity(sea_level: f64, elevation: f64) -> f64 {
    if elevation == 0.0 {
        sea_level
    } else {
        sea_level * (-elevation / REFRACTIVITY_SCALE_HEIGHT).exp()
    }
}

/// Effective earth curvature for a surface refractivity. Fig/1.3 in T.A.
pub fn effective_curvature(refractivity: f64) -> f64 {
    ABSOLUTE_CURVATURE * (1.0 - 0.04665 * (refractivity / 179.3).exp())
}

/// Surface transfer impedance of the ground.
///
/// The complex relative permittivity is _ε + j·376.62σ/k_ (Fig/1.5 in T.A.),
/// and the impedance _√(ε_r − 1)_, further divided by _ε_r_ for vertical
/// polarisation (Fig/1.4 in T.A.).
pub fn transfer_impedance(radio: &RadioParameters, wave_number: f64) -> Complex64 {
    let complex_relative_permittivity = Complex64::new(
        radio.permittivity,
        376.62 * radio.conductivity / wave_number,
    );

    let mut zgnd = (complex_relative_permittivity - 1.0).sqrt();
    if radio.polarisation == Polarisation::Vertical {
        zgnd = zgnd / complex_relative_permittivity;
    }

    zgnd
}

/// Propagation environment derived from climate and radio inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    /// [Wave number] of the carrier/central frequency (in radians per unit distance).
    ///
    /// [Wave number]: https://en.wikipedia.org/wiki/Wavenumber
    pub wave_number: f64, // <wn>

    /// Effective surface refractivity at the system's elevation.
    pub surface_refractivity: f64, // <ens>

    /// Earth's effective curvature at the system's elevation.
    pub effective_curvature: f64, // <gme>

    /// Surface transfer impedance to the ground.
    pub transfer_impedance: Complex64, // <zgnd>
}

impl Environment {
    /// Derives the environment, rejecting curvatures and ground impedances
    /// the model cannot work with.
    pub fn new(climate: &ClimateProfile, radio: &RadioParameters) -> ItmResult<Self> {
        let wave_number = radio.frequency_mhz / CARRIER_FREQUENCY;
        let surface_refractivity =
            surface_refractivity(climate.surface_refractivity, climate.system_elevation_m);

        let effective_curvature = effective_curvature(surface_refractivity);
        if !(effective_curvature >= CURVATURE_LIMITS.0 && effective_curvature <= CURVATURE_LIMITS.1)
        {
            return Err(ItmError::EffectiveEarthOutOfRange);
        }

        let transfer_impedance = transfer_impedance(radio, wave_number);
        let Complex64 { re, im } = transfer_impedance;
        if !(re.is_finite() && im.is_finite() && re > im.abs()) {
            return Err(ItmError::InvalidGroundImpedance);
        }

        Ok(Self {
            wave_number,
            surface_refractivity,
            effective_curvature,
            transfer_impedance,
        })
    }

    /// Effective earth radius factor, _k_.
    pub fn earth_radius_factor(&self) -> f64 {
        ABSOLUTE_CURVATURE / self.effective_curvature
    }
}
