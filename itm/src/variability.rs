//! Statistical variability.
//!
//! The reference attenuation is a median over everything. Here it is turned
//! into the loss not exceeded for the requested fractions of time, locations,
//! and situations, using the long-term fading curves of the radio climate.
//! See ITM sections `<27>` to `<40>` and T.A. §5.

use crate::climate::{Climate, ClimateConstants};
use crate::formulae::inverse_normal_complementary;
use crate::model::Computed;
use crate::params::{VariabilityMode, VariabilityRequest};
use crate::warnings::Warnings;

/// Normal deviates beyond this magnitude are extrapolations.
pub const EXTREME_DEVIATE: f64 = 3.1;

/// Time spread damping in the situation variance (T.A. 5.10).
const RT: f64 = 7.8;

/// Location spread damping in the situation variance (T.A. 5.10).
const RL: f64 = 24.0;

/// Standard normal deviates for a request.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deviates {
    pub time: f64,     // <zt>
    pub location: f64, // <zl>
    pub situation: f64, // <zc>
}

impl Deviates {
    /// Converts the request's percentages. Folded dimensions take the deviate
    /// they are folded into.
    pub fn from_request(request: &VariabilityRequest) -> Self {
        let z = |percent: f64| inverse_normal_complementary(percent / 100.0);

        let situation = z(request.situation);
        let (time, location) = match request.mode.mode {
            VariabilityMode::SingleMessage => (situation, situation),
            VariabilityMode::Accidental => (z(request.time), situation),
            VariabilityMode::Mobile => {
                let time = z(request.time);
                (time, time)
            }
            VariabilityMode::Broadcast => (z(request.time), z(request.location)),
        };

        Self {
            time,
            location,
            situation,
        }
    }

    pub fn warnings(&self) -> Warnings {
        let mut warnings = Warnings::NONE;
        warnings.set_if(
            Warnings::EXTREME_VARIABILITIES,
            self.time.abs() > EXTREME_DEVIATE
                || self.location.abs() > EXTREME_DEVIATE
                || self.situation.abs() > EXTREME_DEVIATE,
        );
        warnings
    }
}

/// Distance-independent variability constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variability {
    climate: &'static ClimateConstants,

    /// Distance at which the effective distance scale changes <dexa>.
    pub effective_horizon: f64,
}

impl Variability {
    /// See `<31>`.
    pub fn new(climate: Climate, c: &Computed) -> Self {
        let (he0, he1) = c.effective_heights;
        let effective_horizon =
            (18e6 * he0).sqrt() + (18e6 * he1).sqrt() + (575.7e12 / c.wave_number).cbrt();

        Self {
            climate: climate.constants(),
            effective_horizon,
        }
    }

    /// Effective distance for the climate curves. See `<32>` and T.A. 5.4.
    pub fn effective_distance(&self, d: f64) -> f64 {
        if d < self.effective_horizon {
            130e3 * d / self.effective_horizon
        } else {
            130e3 + d - self.effective_horizon
        }
    }

    /// Applies the variability to reference attenuation `aref` at distance
    /// `d`, giving the attenuation over free space. See `<28>`.
    pub fn adjust(&self, aref: f64, d: f64, c: &Computed, request: &VariabilityRequest, z: &Deviates) -> f64 {
        let de = self.effective_distance(d);
        let stats = self.climate.statistics(de, c.wave_number);

        // location variability, T.A. 5.9
        let sgl = if request.mode.eliminate_location {
            0.0
        } else {
            let q = (1.0 - 0.8 * (-d / 50e3).exp()) * c.terrain_irregularity * c.wave_number;
            10.0 * q / (q + 13.0)
        };

        // situation variability, T.A. 5.10
        let vs0 = if request.mode.eliminate_situation {
            0.0
        } else {
            (5.0 + 3.0 * (-de / 100e3).exp()).powi(2)
        };

        let (zt, zl, zc) = (z.time, z.location, z.situation);

        let sgt = if zt < 0.0 {
            stats.sigma_below
        } else if zt <= self.climate.deep_fade_deviate {
            stats.sigma_above
        } else {
            stats.sigma_deep + stats.deep_offset / zt
        };

        let vs = vs0 + (sgt * zt).powi(2) / (RT + zc.powi(2)) + (sgl * zl).powi(2) / (RL + zc.powi(2));

        let (yr, sgc) = match request.mode.mode {
            VariabilityMode::SingleMessage => (0.0, (sgt.powi(2) + sgl.powi(2) + vs).sqrt()),
            VariabilityMode::Accidental => (sgt * zt, (sgl.powi(2) + vs).sqrt()),
            VariabilityMode::Mobile => ((sgt.powi(2) + sgl.powi(2)).sqrt() * zt, vs.sqrt()),
            VariabilityMode::Broadcast => (sgt * zt + sgl * zl, vs.sqrt()),
        };

        let avarv = aref - stats.median - yr - sgc * zc;

        // T.A. 5.2: large gains over free space are compressed
        if avarv < 0.0 {
            avarv * (29.0 - avarv) / (29.0 - 10.0 * avarv)
        } else {
            avarv
        }
    }
}
