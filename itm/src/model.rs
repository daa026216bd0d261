//! The prepared area model.

use crate::diffraction::DiffractionLine;
use crate::environment::Environment;
use crate::error::ItmResult;
use crate::formulae::non_negative;
use crate::los::{near_field_taper, LineOfSightCurve};
use crate::mode::{PropagationMode, RegimeWeights};
use crate::params::{AreaParams, VariabilityRequest};
use crate::result::PropagationResult;
use crate::scatter::ScatterLine;
use crate::terminal::Terminal;
use crate::validate;
use crate::variability::{Deviates, Variability};
use crate::warnings::Warnings;
use num_complex::Complex64;
use tracing::{debug, trace};

/// Computed parameters of the model.
///
/// These are computed from the input parameters once, and shared read-only by
/// every regime and query.
///
/// In the source, `<letters>` indicate original variable names, such that one
/// may cross-reference these back to the memos and other implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Computed {
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

    pub terrain_irregularity: f64, // <dh>

    /// Terminal heights above ground.
    pub structural_heights: (f64, f64), // <hg>

    /// Terminal effective heights: adjusted for siting.
    pub effective_heights: (f64, f64), // <he>

    /// Distances from each terminal to its smooth-earth horizon.
    pub smooth_horizon_distances: (f64, f64), // <dls>

    /// Distances from each terminal to its radio horizon.
    pub horizon_distances: (f64, f64), // <dl>

    /// Elevation angles of the horizons from each terminal, in radians.
    pub elevation_angles: (f64, f64), // <the>

    /// Line-of-sight distance: the sum of smooth-earth horizon distances.
    pub line_of_sight_distance: f64, // <dlsa>

    /// Sum of the radio horizon distances.
    pub horizon_distance: f64, // <dla>

    /// Total bending angle of the path.
    pub bending_angle: f64, // <tha>

    /// Shortest path the geometry supports.
    pub minimum_distance: f64, // <dmin>
}

impl Computed {
    /// See `<4>`.
    pub fn new(env: &Environment, tx: &Terminal, rx: &Terminal, dh: f64) -> Self {
        let horizon_distance = tx.horizon_distance + rx.horizon_distance;

        Self {
            wave_number: env.wave_number,
            surface_refractivity: env.surface_refractivity,
            effective_curvature: env.effective_curvature,
            transfer_impedance: env.transfer_impedance,
            terrain_irregularity: dh,
            structural_heights: (tx.structural_height, rx.structural_height),
            effective_heights: (tx.effective_height, rx.effective_height),
            smooth_horizon_distances: (tx.smooth_horizon_distance, rx.smooth_horizon_distance),
            horizon_distances: (tx.horizon_distance, rx.horizon_distance),
            elevation_angles: (tx.horizon_angle, rx.horizon_angle),
            line_of_sight_distance: tx.smooth_horizon_distance + rx.smooth_horizon_distance,
            horizon_distance,
            bending_angle: (tx.horizon_angle + rx.horizon_angle)
                .max(-horizon_distance * env.effective_curvature),
            minimum_distance: (tx.effective_height - rx.effective_height).abs() / 0.2,
        }
    }
}

/// Area propagation model instance.
///
/// Holds all state related to one transmitter/receiver configuration over one
/// kind of terrain and climate, with everything that does not depend on the
/// path distance prepared up front.
///
/// A `Model` instance can then be queried at any distance: queries only need
/// immutable access and can therefore be done concurrently.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    params: AreaParams,
    computed: Computed,
    diffraction: DiffractionLine,
    line_of_sight: LineOfSightCurve,
    scatter: ScatterLine,
    variability: Variability,
    warnings: Warnings,
}

impl Model {
    /// Prepares a model.
    ///
    /// Inputs are validated, then the environment and terminal geometry are
    /// derived, and the three regime curves are fitted:
    ///
    ///  - Within the smooth-earth line-of-sight distance, the line-of-sight
    ///    curve, from the two-ray model.
    ///
    ///  - Beyond it, the diffraction line, from the knife-edge and
    ///    smooth-earth mechanisms.
    ///
    ///  - Beyond the crossover, the scatter line.
    ///
    /// All three are always fitted, so any distance can be queried later.
    pub fn new(params: &AreaParams) -> ItmResult<Self> {
        let mut warnings = validate::check_area(params)?;
        let env = Environment::new(&params.climate, &params.radio)?;

        let dh = params.terrain.irregularity_m;
        let gme = env.effective_curvature;
        let tx = Terminal::area(params.heights.0, params.terrain.tx_siting, dh, gme);
        let rx = Terminal::area(params.heights.1, params.terrain.rx_siting, dh, gme);
        warnings |= tx.warnings(Warnings::TX_HORIZON_ANGLE, Warnings::TX_HORIZON_DISTANCE);
        warnings |= rx.warnings(Warnings::RX_HORIZON_ANGLE, Warnings::RX_HORIZON_DISTANCE);

        let computed = Computed::new(&env, &tx, &rx, dh);
        let diffraction = DiffractionLine::fit(&computed);
        let line_of_sight = LineOfSightCurve::fit(&computed, &diffraction);
        let scatter = ScatterLine::fit(&computed, &diffraction);
        let variability = Variability::new(params.climate.climate, &computed);

        debug!(
            wave_number = computed.wave_number,
            curvature = computed.effective_curvature,
            line_of_sight_m = computed.line_of_sight_distance,
            crossover_m = scatter.crossover,
            %warnings,
            "prepared area model"
        );

        Ok(Self {
            params: *params,
            computed,
            diffraction,
            line_of_sight,
            scatter,
            variability,
            warnings,
        })
    }

    pub fn params(&self) -> &AreaParams {
        &self.params
    }

    pub fn computed(&self) -> &Computed {
        &self.computed
    }

    /// Warnings raised while preparing, carried into every prediction.
    pub fn warnings(&self) -> Warnings {
        self.warnings
    }

    /// Distance at which line of sight gives way to diffraction (km).
    pub fn line_of_sight_distance_km(&self) -> f64 {
        self.computed.line_of_sight_distance / 1e3
    }

    /// Distance at which diffraction gives way to troposcatter (km).
    pub fn crossover_distance_km(&self) -> f64 {
        self.scatter.crossover / 1e3
    }

    /// Attenuation of one regime's curve at `d` metres.
    pub fn regime_attenuation(&self, mode: PropagationMode, d: f64) -> f64 {
        match mode {
            PropagationMode::LineOfSight => self.line_of_sight.at(d),
            PropagationMode::Diffraction => self.diffraction.at(d),
            PropagationMode::Troposcatter => self.scatter.at(d),
        }
    }

    /// Median reference attenuation over free space at `d` metres, and the
    /// dominant regime there. See `<4>`.
    pub fn reference_attenuation(&self, d: f64) -> (f64, PropagationMode) {
        let weights = RegimeWeights::at(
            d,
            self.computed.line_of_sight_distance,
            self.scatter.crossover,
        );
        let aref = weights.blend(|mode, d| self.regime_attenuation(mode, d));

        (non_negative(aref), weights.dominant())
    }

    /// Predicts the loss at `distance_km` for the given statistics.
    ///
    /// Under 1 km the whole attenuation over free space, variability
    /// included, is tapered towards zero. Short paths therefore converge to
    /// free-space loss at every percentile, and the spread between
    /// percentiles shrinks with them.
    pub fn predict(
        &self,
        distance_km: f64,
        request: &VariabilityRequest,
    ) -> ItmResult<PropagationResult> {
        validate::check_request(request)?;
        let mut warnings = self.warnings | validate::check_distance(distance_km)?;

        let d = distance_km * 1e3;
        warnings.set_if(
            Warnings::DISTANCE_BELOW_MINIMUM,
            d < self.computed.minimum_distance,
        );

        let (reference, mode) = self.reference_attenuation(d);

        let deviates = Deviates::from_request(request);
        warnings |= deviates.warnings();

        let attenuation = self
            .variability
            .adjust(reference, d, &self.computed, request, &deviates)
            * near_field_taper(d);

        trace!(distance_km, reference, attenuation, %mode, "prediction");

        Ok(PropagationResult::assemble(
            &self.computed,
            distance_km,
            self.params.radio.frequency_mhz,
            reference,
            mode,
            attenuation,
            warnings,
        ))
    }
}
