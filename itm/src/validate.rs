//! Input validation.
//!
//! Hard limits produce an [`ItmError`]; recommended ranges only raise
//! [`Warnings`]. The first failing check wins.

use crate::error::{ItmError, ItmResult};
use crate::params::{AreaParams, VariabilityRequest};
use crate::warnings::Warnings;

/// Hard limits on terminal structural heights (m).
pub const HEIGHT_LIMITS_M: (f64, f64) = (0.5, 3000.0);
/// Recommended terminal structural heights (m).
pub const HEIGHT_RECOMMENDED_M: (f64, f64) = (1.0, 1000.0);

/// Hard limits on frequency (MHz).
pub const FREQUENCY_LIMITS_MHZ: (f64, f64) = (20.0, 20_000.0);
/// Recommended frequencies (MHz).
pub const FREQUENCY_RECOMMENDED_MHZ: (f64, f64) = (40.0, 10_000.0);

/// Hard limits on sea-level surface refractivity (N-units).
pub const REFRACTIVITY_LIMITS: (f64, f64) = (250.0, 400.0);

/// Recommended path distances (km).
pub const DISTANCE_RECOMMENDED_KM: (f64, f64) = (1.0, 1000.0);
/// Distance past which the model has no empirical support at all (km).
pub const DISTANCE_MODEL_LIMIT_KM: f64 = 2000.0;

/// Recommended upper bound on terrain irregularity (m).
pub const IRREGULARITY_RECOMMENDED_M: f64 = 500.0;

fn within(x: f64, (lo, hi): (f64, f64)) -> bool {
    x >= lo && x <= hi
}

fn check_height(height: f64, error: ItmError, below: Warnings, above: Warnings) -> ItmResult<Warnings> {
    if !within(height, HEIGHT_LIMITS_M) {
        return Err(error);
    }

    let mut warnings = Warnings::NONE;
    warnings.set_if(below, height < HEIGHT_RECOMMENDED_M.0);
    warnings.set_if(above, height > HEIGHT_RECOMMENDED_M.1);
    Ok(warnings)
}

/// Checks the distance-independent inputs.
pub fn check_area(params: &AreaParams) -> ItmResult<Warnings> {
    let mut warnings = check_height(
        params.heights.0,
        ItmError::TxHeightOutOfRange,
        Warnings::TX_HEIGHT_BELOW_RANGE,
        Warnings::TX_HEIGHT_ABOVE_RANGE,
    )?;
    warnings |= check_height(
        params.heights.1,
        ItmError::RxHeightOutOfRange,
        Warnings::RX_HEIGHT_BELOW_RANGE,
        Warnings::RX_HEIGHT_ABOVE_RANGE,
    )?;

    if !within(params.climate.surface_refractivity, REFRACTIVITY_LIMITS)
        || !params.climate.system_elevation_m.is_finite()
    {
        return Err(ItmError::RefractivityOutOfRange);
    }

    let f = params.radio.frequency_mhz;
    if !within(f, FREQUENCY_LIMITS_MHZ) {
        return Err(ItmError::FrequencyOutOfRange);
    }
    warnings.set_if(Warnings::FREQUENCY_BELOW_RANGE, f < FREQUENCY_RECOMMENDED_MHZ.0);
    warnings.set_if(Warnings::FREQUENCY_ABOVE_RANGE, f > FREQUENCY_RECOMMENDED_MHZ.1);

    let epsilon = params.radio.permittivity;
    if !(epsilon >= 1.0 && epsilon.is_finite()) {
        return Err(ItmError::InvalidEpsilon);
    }

    let sigma = params.radio.conductivity;
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(ItmError::InvalidSigma);
    }

    let dh = params.terrain.irregularity_m;
    if !(dh >= 0.0 && dh.is_finite()) {
        return Err(ItmError::DeltaHOutOfRange);
    }
    warnings.set_if(Warnings::TERRAIN_IRREGULARITY, dh > IRREGULARITY_RECOMMENDED_M);

    Ok(warnings)
}

/// Checks a path distance (km).
pub fn check_distance(distance_km: f64) -> ItmResult<Warnings> {
    if !(distance_km > 0.0 && distance_km.is_finite()) {
        return Err(ItmError::DistanceOutOfRange);
    }

    let mut warnings = Warnings::NONE;
    warnings.set_if(
        Warnings::DISTANCE_BELOW_RANGE,
        distance_km < DISTANCE_RECOMMENDED_KM.0,
    );
    warnings.set_if(
        Warnings::DISTANCE_ABOVE_RANGE,
        distance_km > DISTANCE_RECOMMENDED_KM.1,
    );
    warnings.set_if(
        Warnings::DISTANCE_BEYOND_MODEL,
        distance_km > DISTANCE_MODEL_LIMIT_KM,
    );
    Ok(warnings)
}

fn percentage(p: f64) -> bool {
    p > 0.0 && p < 100.0
}

/// Checks the percentages of a variability request.
pub fn check_request(request: &VariabilityRequest) -> ItmResult<()> {
    if !percentage(request.situation) {
        return Err(ItmError::SituationOutOfRange);
    }

    if !percentage(request.time) {
        return Err(ItmError::TimeOutOfRange);
    }

    if !percentage(request.location) {
        return Err(ItmError::LocationOutOfRange);
    }

    Ok(())
}

/// Checks a confidence/reliability pair before it is mapped onto a
/// [`VariabilityRequest`].
pub fn check_confidence_reliability(confidence: f64, reliability: f64) -> ItmResult<()> {
    if !percentage(confidence) {
        return Err(ItmError::ConfidenceOutOfRange);
    }

    if !percentage(reliability) {
        return Err(ItmError::ReliabilityOutOfRange);
    }

    Ok(())
}
