//! Propagation regime selection.
//!
//! The reference attenuation is a weighted combination of the three regime
//! curves. Away from the two thresholds exactly one regime has all the weight;
//! within a narrow band around each threshold the weight moves smoothly from
//! one regime to the next, so the result has no jumps.
//!
//! Each curve is read only over its own range of distances and held flat
//! outside it. Adjacent curves meet at their shared threshold, so the held
//! values are ordered by range and the blend never dips below where it was:
//! it rises with distance whenever the curves do.

use crate::formulae::smoothstep;
use std::fmt;

/// Half-width of the blend band around each threshold, as a fraction of the
/// threshold distance.
pub const BLEND_BAND: f64 = 0.02;

/// Mode of propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(i32)]
pub enum PropagationMode {
    LineOfSight = 1,
    Diffraction = 2,
    Troposcatter = 3,
}

impl PropagationMode {
    /// In order of increasing range.
    pub const ALL: [PropagationMode; 3] = [
        PropagationMode::LineOfSight,
        PropagationMode::Diffraction,
        PropagationMode::Troposcatter,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropagationMode::LineOfSight => "line of sight",
            PropagationMode::Diffraction => "diffraction",
            PropagationMode::Troposcatter => "troposcatter",
        })
    }
}

/// Weight of each regime at one distance. The weights sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeWeights {
    pub line_of_sight: f64,
    pub diffraction: f64,
    pub troposcatter: f64,

    distance: f64,
    horizon: f64,
    crossover: f64,
}

impl RegimeWeights {
    /// Weights at distance `d`, given the line-of-sight distance `horizon` and
    /// the diffraction/scatter `crossover`.
    pub fn at(d: f64, horizon: f64, crossover: f64) -> Self {
        let crossover = crossover.max(horizon);
        let past_horizon = step_around(horizon, d);
        let past_crossover = step_around(crossover, d);

        Self {
            line_of_sight: 1.0 - past_horizon,
            diffraction: (past_horizon - past_crossover).max(0.0),
            troposcatter: past_crossover,
            distance: d,
            horizon,
            crossover,
        }
    }

    /// Distance at which `mode`'s curve is read: the query distance, clamped
    /// to the range over which that regime applies.
    pub fn reading_distance(&self, mode: PropagationMode) -> f64 {
        let d = self.distance;
        match mode {
            PropagationMode::LineOfSight => d.min(self.horizon),
            PropagationMode::Diffraction => d.max(self.horizon).min(self.crossover),
            PropagationMode::Troposcatter => d.max(self.crossover),
        }
    }

    pub fn weight(&self, mode: PropagationMode) -> f64 {
        match mode {
            PropagationMode::LineOfSight => self.line_of_sight,
            PropagationMode::Diffraction => self.diffraction,
            PropagationMode::Troposcatter => self.troposcatter,
        }
    }

    /// The regime with the largest weight, ties going to the shorter range.
    pub fn dominant(&self) -> PropagationMode {
        let mut best = PropagationMode::LineOfSight;
        for &mode in PropagationMode::ALL.iter().skip(1) {
            if self.weight(mode) > self.weight(best) {
                best = mode;
            }
        }
        best
    }

    /// Weighted sum of `attenuation(mode, distance)` over the regimes, each
    /// read at its [`reading_distance`](Self::reading_distance). Regimes
    /// without weight are not evaluated.
    pub fn blend(&self, mut attenuation: impl FnMut(PropagationMode, f64) -> f64) -> f64 {
        PropagationMode::ALL
            .iter()
            .map(|&mode| (self.weight(mode), mode))
            .filter(|(weight, _)| *weight > 0.0)
            .map(|(weight, mode)| weight * attenuation(mode, self.reading_distance(mode)))
            .sum()
    }
}

fn step_around(threshold: f64, d: f64) -> f64 {
    smoothstep(
        threshold * (1.0 - BLEND_BAND),
        threshold * (1.0 + BLEND_BAND),
        d,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const HORIZON: f64 = 30e3;
    const CROSSOVER: f64 = 90e3;

    #[test]
    fn pure_regimes_away_from_thresholds() {
        let w = RegimeWeights::at(10e3, HORIZON, CROSSOVER);
        assert_eq!(w.dominant(), PropagationMode::LineOfSight);
        assert_eq!(w.line_of_sight, 1.0);

        let w = RegimeWeights::at(50e3, HORIZON, CROSSOVER);
        assert_eq!(w.dominant(), PropagationMode::Diffraction);
        assert_eq!(w.diffraction, 1.0);

        let w = RegimeWeights::at(200e3, HORIZON, CROSSOVER);
        assert_eq!(w.dominant(), PropagationMode::Troposcatter);
        assert_eq!(w.troposcatter, 1.0);
    }

    #[test]
    fn weights_sum_to_one() {
        let mut d = 1e3;
        while d < 300e3 {
            let w = RegimeWeights::at(d, HORIZON, CROSSOVER);
            assert_abs_diff_eq!(
                w.line_of_sight + w.diffraction + w.troposcatter,
                1.0,
                epsilon = 1e-12
            );
            d += 250.0;
        }
    }

    #[test]
    fn ties_go_to_shorter_range() {
        let w = RegimeWeights::at(HORIZON, HORIZON, CROSSOVER);
        assert_abs_diff_eq!(w.line_of_sight, 0.5);
        assert_eq!(w.dominant(), PropagationMode::LineOfSight);
    }

    #[test]
    fn blend_is_continuous_across_threshold() {
        // two lines that meet at the threshold
        let los = |d: f64| 10.0 + d * 1e-4;
        let diff = |d: f64| 10.0 + HORIZON * 1e-4 + (d - HORIZON) * 5e-4;
        let at = |d: f64| {
            RegimeWeights::at(d, HORIZON, CROSSOVER).blend(|mode, d| match mode {
                PropagationMode::LineOfSight => los(d),
                _ => diff(d),
            })
        };

        let mut last = at(HORIZON * 0.97);
        let mut d = HORIZON * 0.97;
        while d < HORIZON * 1.03 {
            d += 10.0;
            let next = at(d);
            assert!((next - last).abs() < 0.01, "jump at {}: {} -> {}", d, last, next);
            last = next;
        }
    }

    #[test]
    fn blend_never_falls_past_crossover() {
        // diffraction steeper than scatter: past the crossover the scatter
        // line is the lower of the two
        let diff = |d: f64| 20.0 + d * 5e-4;
        let scatter = |d: f64| diff(CROSSOVER) + (d - CROSSOVER) * 1e-4;
        let at = |d: f64| {
            RegimeWeights::at(d, HORIZON, CROSSOVER).blend(|mode, d| match mode {
                PropagationMode::Troposcatter => scatter(d),
                _ => diff(d),
            })
        };

        let mut d = CROSSOVER * 0.95;
        let mut last = at(d);
        while d < CROSSOVER * 1.05 {
            d += 100.0;
            let next = at(d);
            assert!(next >= last, "fell at {}: {} -> {}", d, last, next);
            last = next;
        }
        assert_abs_diff_eq!(at(CROSSOVER * 1.05), scatter(CROSSOVER * 1.05), epsilon = 1e-9);
    }

    #[test]
    fn curves_are_read_within_their_range() {
        let w = RegimeWeights::at(HORIZON, HORIZON, CROSSOVER);
        assert_eq!(w.reading_distance(PropagationMode::LineOfSight), HORIZON);
        assert_eq!(w.reading_distance(PropagationMode::Diffraction), HORIZON);
        assert_eq!(w.reading_distance(PropagationMode::Troposcatter), CROSSOVER);

        let w = RegimeWeights::at(CROSSOVER * 1.01, HORIZON, CROSSOVER);
        assert_eq!(w.reading_distance(PropagationMode::Diffraction), CROSSOVER);
        assert_eq!(w.reading_distance(PropagationMode::Troposcatter), CROSSOVER * 1.01);
    }

    #[test]
    fn coincident_thresholds() {
        let w = RegimeWeights::at(HORIZON * 1.1, HORIZON, HORIZON);
        assert_eq!(w.dominant(), PropagationMode::Troposcatter);
        assert_eq!(w.diffraction, 0.0);
    }
}
