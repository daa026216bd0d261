//! The Longley-Rice Irregular Terrain Model for RF, in area mode.
//!
//! The [Irregular Terrain Model][ITM68], also known as Longley-Rice, is an
//! empirical RF propagation model developed at the U.S. National
//! Telecommunications and Information Administration around the 1960s by Anita
//! Longley and Phil Rice. In area mode, no terrain profile is needed: the
//! terrain is described only by its irregularity, and each terminal by its
//! height and how carefully it was sited. The model then predicts the basic
//! transmission loss at any distance, for given fractions of time, locations,
//! and situations.
//!
//! The code is cross-referenced to the [LaTeX documentation][ITM122] of the
//! ITM version 1.2.2 (sections within that document are referenced with `<N>`
//! in the code), and to George Hufford's 1999 memo describing
//! “[The Algorithm][GH1999]” (referenced as T.A. in the code). Original
//! variable names are noted as `<name>` next to the derived ones.
//!
//! Everything that does not depend on distance is computed once in a
//! [`Model`]; queries only need immutable access and can therefore be done
//! concurrently. For one-off calls with plain numeric codes, use [`evaluate`]
//! or [`evaluate_cr`].
//!
//! This implementation is released in the Public Domain, although note that the
//! NTIA requests any use of the ITM is properly credited.
//!
//! [GH1999]: https://www.its.bldrdoc.gov/media/50676/itm_alg.pdf
//! [ITM122]: https://www.its.bldrdoc.gov/media/50674/itm.pdf
//! [ITM68]: https://www.its.bldrdoc.gov/resources/radio-propagation-software/itm/itm.aspx

#![forbid(unsafe_code)]

use std::convert::TryFrom;

pub mod climate;
pub mod diffraction;
pub mod environment;
pub mod error;
pub mod formulae;
pub mod ground;
pub mod los;
pub mod mode;
pub mod model;
pub mod params;
pub mod result;
pub mod scatter;
pub mod terminal;
pub mod validate;
pub mod variability;
pub mod warnings;

pub use climate::Climate;
pub use error::{ItmError, ItmResult};
pub use ground::{GroundConstants, GroundPreset};
pub use mode::PropagationMode;
pub use model::{Computed, Model};
pub use params::{
    AreaParams, ClimateProfile, ModeOfVariability, Polarisation, RadioParameters,
    SitingCriteria, TerrainStatistics, VariabilityMode, VariabilityRequest,
};
pub use result::{free_space_loss, IntermediateValues, PropagationResult};
pub use warnings::Warnings;

/// Area prediction from plain numeric inputs.
///
/// Heights and Δh are in metres, distance in kilometres, frequency in MHz.
/// Codes are those of the reference ITM: siting 0–2, climate 1–7, polarisation
/// 0 (horizontal) or 1 (vertical), and mode of variability 0–3 plus 10/20 for
/// eliminations. Percentages are in (0, 100).
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    h_tx_m: f64,
    h_rx_m: f64,
    tx_siting: i32,
    rx_siting: i32,
    distance_km: f64,
    delta_h_m: f64,
    climate: i32,
    n_0: f64,
    frequency_mhz: f64,
    polarisation: i32,
    epsilon: f64,
    sigma: f64,
    mdvar: i32,
    time: f64,
    location: f64,
    situation: f64,
) -> ItmResult<PropagationResult> {
    let (params, mode) = area_params(
        h_tx_m,
        h_rx_m,
        tx_siting,
        rx_siting,
        delta_h_m,
        climate,
        n_0,
        frequency_mhz,
        polarisation,
        epsilon,
        sigma,
        mdvar,
    )?;

    let request = VariabilityRequest {
        mode,
        time,
        location,
        situation,
    };

    Model::new(&params)?.predict(distance_km, &request)
}

/// Like [`evaluate`], with the statistics given as confidence and
/// reliability.
///
/// Reliability is the fraction of time, confidence the fraction of
/// situations; locations are held at their median.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_cr(
    h_tx_m: f64,
    h_rx_m: f64,
    tx_siting: i32,
    rx_siting: i32,
    distance_km: f64,
    delta_h_m: f64,
    climate: i32,
    n_0: f64,
    frequency_mhz: f64,
    polarisation: i32,
    epsilon: f64,
    sigma: f64,
    mdvar: i32,
    confidence: f64,
    reliability: f64,
) -> ItmResult<PropagationResult> {
    let (params, mode) = area_params(
        h_tx_m,
        h_rx_m,
        tx_siting,
        rx_siting,
        delta_h_m,
        climate,
        n_0,
        frequency_mhz,
        polarisation,
        epsilon,
        sigma,
        mdvar,
    )?;

    let model = Model::new(&params)?;

    validate::check_confidence_reliability(confidence, reliability)?;
    let request = VariabilityRequest::confidence_reliability(mode, confidence, reliability);

    model.predict(distance_km, &request)
}

#[allow(clippy::too_many_arguments)]
fn area_params(
    h_tx_m: f64,
    h_rx_m: f64,
    tx_siting: i32,
    rx_siting: i32,
    delta_h_m: f64,
    climate: i32,
    n_0: f64,
    frequency_mhz: f64,
    polarisation: i32,
    epsilon: f64,
    sigma: f64,
    mdvar: i32,
) -> ItmResult<(AreaParams, ModeOfVariability)> {
    let tx_siting = SitingCriteria::from_code(tx_siting).ok_or(ItmError::InvalidTxSitingCriteria)?;
    let rx_siting = SitingCriteria::from_code(rx_siting).ok_or(ItmError::InvalidRxSitingCriteria)?;
    let climate = Climate::try_from(climate)?;
    let polarisation = Polarisation::try_from(polarisation)?;
    let mode = ModeOfVariability::try_from(mdvar)?;

    let params = AreaParams {
        heights: (h_tx_m, h_rx_m),
        terrain: TerrainStatistics {
            irregularity_m: delta_h_m,
            tx_siting,
            rx_siting,
        },
        climate: ClimateProfile {
            climate,
            surface_refractivity: n_0,
            system_elevation_m: 0.0,
        },
        radio: RadioParameters {
            frequency_mhz,
            polarisation,
            permittivity: epsilon,
            conductivity: sigma,
        },
    };

    Ok((params, mode))
}
