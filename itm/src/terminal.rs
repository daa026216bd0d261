//! Area-mode terminal geometry.
//!
//! Without a terrain profile, the horizons are estimated statistically from
//! the terrain irregularity and how carefully each terminal was sited. See
//! ITM section `<42>` and T.A. §3.

use crate::params::SitingCriteria;
use crate::warnings::Warnings;

/// Horizon elevation angle past which the geometry is suspect (rad).
///
/// Steeper estimates are flagged and held at this angle.
pub const HORIZON_ANGLE_LIMIT: f64 = 0.2;

/// Acceptable ratio of horizon distance to smooth-earth horizon distance.
///
/// Shorter estimates are flagged and held at the lower bound.
pub const HORIZON_DISTANCE_RATIO: (f64, f64) = (0.1, 3.0);

/// One terminal's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Terminal {
    /// Height of the antenna above ground.
    pub structural_height: f64, // <hg>

    /// Height adjusted for siting on local terrain.
    pub effective_height: f64, // <he>

    /// Distance to the horizon over a smooth earth.
    pub smooth_horizon_distance: f64, // <dls>

    /// Distance to the radio horizon, shortened by terrain.
    pub horizon_distance: f64, // <dl>

    /// Elevation angle of the horizon, in radians.
    pub horizon_angle: f64, // <the>

    /// Whether the estimated angle had to be held at the limit.
    pub steep_horizon: bool,

    /// Whether the estimated horizon distance fell outside the acceptable ratio.
    pub implausible_horizon: bool,
}

impl Terminal {
    /// Estimates the geometry of a terminal at `height` above ground over
    /// terrain of irregularity `dh`, on an earth of curvature `gme`.
    pub fn area(height: f64, siting: SitingCriteria, dh: f64, gme: f64) -> Self {
        let effective_height = effective_height(height, siting, dh);
        let smooth_horizon_distance = (2.0 * effective_height / gme).sqrt();

        let ratio = (-0.07 * (dh / effective_height.max(5.0)).sqrt()).exp();
        let implausible_horizon = ratio < HORIZON_DISTANCE_RATIO.0 || ratio > HORIZON_DISTANCE_RATIO.1;
        let horizon_distance = smooth_horizon_distance
            * ratio.max(HORIZON_DISTANCE_RATIO.0).min(HORIZON_DISTANCE_RATIO.1);

        // T.A. 3.3: the terrain lifts the horizon above the smooth-earth one
        let angle = (0.65 * dh * (smooth_horizon_distance / horizon_distance - 1.0)
            - 2.0 * effective_height)
            / smooth_horizon_distance;
        let steep_horizon = angle.abs() > HORIZON_ANGLE_LIMIT;
        let horizon_angle = angle.max(-HORIZON_ANGLE_LIMIT).min(HORIZON_ANGLE_LIMIT);

        Self {
            structural_height: height,
            effective_height,
            smooth_horizon_distance,
            horizon_distance,
            horizon_angle,
            steep_horizon,
            implausible_horizon,
        }
    }

    /// Flags an implausible horizon.
    pub fn warnings(&self, angle: Warnings, distance: Warnings) -> Warnings {
        let mut warnings = Warnings::NONE;
        warnings.set_if(angle, self.steep_horizon);
        warnings.set_if(distance, self.implausible_horizon);
        warnings
    }
}

/// Effective height of a terminal.
///
/// Randomly sited terminals see their structural height. Careful siting finds
/// local high ground, worth up to 5 m (careful) or 10 m (very careful) over
/// smooth terrain, less as the antenna gets taller relative to the terrain.
pub fn effective_height(height: f64, siting: SitingCriteria, dh: f64) -> f64 {
    let mut q = match siting {
        SitingCriteria::Random => return height,
        SitingCriteria::Careful => 4.0,
        SitingCriteria::VeryCareful => 9.0,
    };

    if height < 5.0 {
        q *= (0.3141593 * height).sin();
    }

    height + (1.0 + q) * (-(2.0 * height / dh.max(1e-3)).min(20.0)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const GME: f64 = 117.75e-9;

    #[test]
    fn random_siting_keeps_structural_height() {
        assert_eq!(effective_height(30.0, SitingCriteria::Random, 90.0), 30.0);
    }

    #[test]
    fn careful_siting_raises_terminal() {
        let random = effective_height(3.0, SitingCriteria::Random, 90.0);
        let careful = effective_height(3.0, SitingCriteria::Careful, 90.0);
        let very = effective_height(3.0, SitingCriteria::VeryCareful, 90.0);
        assert!(random < careful);
        assert!(careful < very);
    }

    #[test]
    fn flat_terrain_matches_smooth_earth() {
        let t = Terminal::area(30.0, SitingCriteria::Random, 0.0, GME);
        assert_abs_diff_eq!(t.horizon_distance, t.smooth_horizon_distance);
        assert_abs_diff_eq!(t.smooth_horizon_distance, 22_573.0, epsilon = 5.0);
        // horizon below the terminal over a smooth sphere
        assert!(t.horizon_angle < 0.0);
        assert_eq!(
            t.warnings(Warnings::TX_HORIZON_ANGLE, Warnings::TX_HORIZON_DISTANCE),
            Warnings::NONE
        );
    }

    #[test]
    fn hills_shorten_horizon() {
        let t = Terminal::area(30.0, SitingCriteria::Random, 90.0, GME);
        assert_abs_diff_eq!(t.horizon_distance, 19_995.0, epsilon = 20.0);
        assert!(t.horizon_distance < t.smooth_horizon_distance);
    }

    #[test]
    fn mountains_raise_horizon_angle() {
        let t = Terminal::area(3.0, SitingCriteria::Random, 3000.0, GME);
        assert_eq!(t.horizon_angle, HORIZON_ANGLE_LIMIT);
        assert_eq!(
            t.warnings(Warnings::RX_HORIZON_ANGLE, Warnings::RX_HORIZON_DISTANCE),
            Warnings::RX_HORIZON_ANGLE
        );
    }

    #[test]
    fn extreme_terrain_is_held_at_limits() {
        for &dh in [1e5, 1e6, 1e9].iter() {
            let t = Terminal::area(3.0, SitingCriteria::Random, dh, GME);
            assert_abs_diff_eq!(
                t.horizon_distance,
                t.smooth_horizon_distance * HORIZON_DISTANCE_RATIO.0,
                epsilon = 1e-9
            );
            assert_eq!(t.horizon_angle, HORIZON_ANGLE_LIMIT);
            assert_eq!(
                t.warnings(Warnings::TX_HORIZON_ANGLE, Warnings::TX_HORIZON_DISTANCE),
                Warnings::TX_HORIZON_ANGLE | Warnings::TX_HORIZON_DISTANCE
            );
        }
    }
}
