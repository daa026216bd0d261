//! Radio climates and their long-term fading constants.
//!
//! The seven climates of the ITM each come with empirical curves giving the
//! median adjustment and the spread of hourly medians as a function of the
//! effective distance. These are the tables of T.A. §5, kept as a static table
//! so every model shares them read-only.

use crate::error::ItmError;
use std::convert::TryFrom;
use std::fmt;

/// Radio-climate regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(i32)]
pub enum Climate {
    Equatorial = 1,
    ContinentalSubtropical = 2,
    MaritimeSubtropical = 3,
    Desert = 4,
    ContinentalTemperate = 5,
    MaritimeTemperateOverLand = 6,
    MaritimeTemperateOverSea = 7,
}

impl Default for Climate {
    fn default() -> Self {
        Climate::ContinentalTemperate
    }
}

impl Climate {
    pub const ALL: [Climate; 7] = [
        Climate::Equatorial,
        Climate::ContinentalSubtropical,
        Climate::MaritimeSubtropical,
        Climate::Desert,
        Climate::ContinentalTemperate,
        Climate::MaritimeTemperateOverLand,
        Climate::MaritimeTemperateOverSea,
    ];

    /// Numeric climate code, 1 through 7.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Constants for this climate.
    pub fn constants(self) -> &'static ClimateConstants {
        &CLIMATE_CONSTANTS[(self.code() - 1) as usize]
    }

    /// Typical sea-level surface refractivity for this climate (N-units).
    ///
    /// Usable as a default when no measurement is available. For the US,
    /// 301 is commonly used regardless of climate.
    pub fn typical_refractivity(self) -> f64 {
        match self {
            Climate::Equatorial => 360.0,
            Climate::ContinentalSubtropical => 320.0,
            Climate::MaritimeSubtropical => 370.0,
            Climate::Desert => 280.0,
            Climate::ContinentalTemperate => 301.0,
            Climate::MaritimeTemperateOverLand => 320.0,
            Climate::MaritimeTemperateOverSea => 350.0,
        }
    }
}

impl TryFrom<i32> for Climate {
    type Error = ItmError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Climate::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or(ItmError::InvalidClimate)
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Climate::Equatorial => "equatorial",
            Climate::ContinentalSubtropical => "continental subtropical",
            Climate::MaritimeSubtropical => "maritime subtropical",
            Climate::Desert => "desert",
            Climate::ContinentalTemperate => "continental temperate",
            Climate::MaritimeTemperateOverLand => "maritime temperate over land",
            Climate::MaritimeTemperateOverSea => "maritime temperate over sea",
        })
    }
}

/// One long-term fading curve.
///
/// This function's only reference is in the FORTRAN source. No comment is given
/// as to how it was derived, and whether the figure in the research are from
/// this function, or whether the function is fit from the figure.
///
/// The figure is available in [Technical Note 101 Volume I][TN101-I] and
/// [Volume II][TN101-II], sections 10 and III respectively.
///
/// [TN101-I]: https://www.its.bldrdoc.gov/publications/2726.aspx
/// [TN101-II]: https://www.its.bldrdoc.gov/publications/2727.aspx
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    pub b: (f64, f64),
    pub x: (f64, f64, f64),
}

impl Curve {
    /// Evaluates the curve at effective distance `de` (metres). See <30>.
    pub fn at(&self, de: f64) -> f64 {
        let (b, x) = (self.b, self.x);
        (b.0 + b.1 / (1.0 + ((de - x.1) / x.2).powi(2))) * (de / x.0).powi(2)
            / (1.0 + (de / x.0).powi(2))
    }
}

/// Frequency gain applied to the time spreads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyGain(pub f64, pub f64, pub f64);

impl FrequencyGain {
    /// Gain at wave number `wn`.
    pub fn at(&self, wn: f64) -> f64 {
        let q = (0.133 * wn).ln();
        self.0 + self.1 / ((self.2 * q).powi(2) + 1.0)
    }
}

/// Climate constants for Long Term Fading calculations.
///
/// Instead of just having a bunch of arrays to hold these, they are grouped
/// in meaningful bunches, and one struct holds all the constants for one
/// climate. See Table 5.1 of T.A.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateConstants {
    pub climate: Climate,

    /// Median adjustment <bv, xv>.
    pub median: Curve,
    /// Spread of hourly medians below the median <bsm, xsm>.
    pub spread_below: Curve,
    /// Spread of hourly medians above the median <bsp, xsp>.
    pub spread_above: Curve,

    /// Deep fade ratio <cd>.
    pub deep_fade_ratio: f64,
    /// Deviate at which deep fading takes over <zd>.
    pub deep_fade_deviate: f64,

    /// <bfm>
    pub gain_below: FrequencyGain,
    /// <bfp>
    pub gain_above: FrequencyGain,
}

/// Long-term fading statistics at one effective distance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FadingStatistics {
    /// Median adjustment <vmd>.
    pub median: f64,
    /// Standard deviation below the median <sgtm>.
    pub sigma_below: f64,
    /// Standard deviation above the median <sgtp>.
    pub sigma_above: f64,
    /// Deep fade standard deviation <sgtd>.
    pub sigma_deep: f64,
    /// Deep fade offset <tgtd>.
    pub deep_offset: f64,
}

impl ClimateConstants {
    /// Computes long-term fading statistics at effective distance `de` for
    /// wave number `wn`. See <32>.
    pub fn statistics(&self, de: f64, wn: f64) -> FadingStatistics {
        let gm = self.gain_below.at(wn);
        let gp = self.gain_above.at(wn);

        let sigma_above = self.spread_above.at(de) * gp;
        let sigma_deep = sigma_above * self.deep_fade_ratio;

        FadingStatistics {
            median: self.median.at(de),
            sigma_below: self.spread_below.at(de) * gm,
            sigma_above,
            sigma_deep,
            deep_offset: (sigma_above - sigma_deep) * self.deep_fade_deviate,
        }
    }
}

const fn curve(b: (f64, f64), x: (f64, f64, f64)) -> Curve {
    Curve { b, x }
}

const FLAT: FrequencyGain = FrequencyGain(1.0, 0.0, 0.0);

static CLIMATE_CONSTANTS: [ClimateConstants; 7] = [
    ClimateConstants {
        climate: Climate::Equatorial,
        median: curve((-9.67, 12.7), (144.9e3, 190.3e3, 133.8e3)),
        spread_below: curve((2.13, 159.5), (762.2e3, 123.6e3, 94.5e3)),
        spread_above: curve((2.11, 102.3), (636.9e3, 134.8e3, 95.6e3)),
        deep_fade_ratio: 1.224,
        deep_fade_deviate: 1.282,
        gain_below: FLAT,
        gain_above: FLAT,
    },
    ClimateConstants {
        climate: Climate::ContinentalSubtropical,
        median: curve((-0.62, 9.19), (228.9e3, 205.2e3, 143.6e3)),
        spread_below: curve((2.66, 7.67), (100.4e3, 172.5e3, 136.4e3)),
        spread_above: curve((6.87, 15.53), (138.7e3, 143.7e3, 98.6e3)),
        deep_fade_ratio: 0.801,
        deep_fade_deviate: 2.161,
        gain_below: FLAT,
        gain_above: FrequencyGain(0.93, 0.31, 2.00),
    },
    ClimateConstants {
        climate: Climate::MaritimeSubtropical,
        median: curve((1.26, 15.5), (262.6e3, 185.2e3, 99.8e3)),
        spread_below: curve((6.11, 6.65), (138.2e3, 242.2e3, 178.6e3)),
        spread_above: curve((10.08, 9.60), (165.3e3, 225.7e3, 129.7e3)),
        deep_fade_ratio: 1.380,
        deep_fade_deviate: 1.282,
        gain_below: FLAT,
        gain_above: FLAT,
    },
    ClimateConstants {
        climate: Climate::Desert,
        median: curve((-9.21, 9.05), (84.1e3, 101.1e3, 98.6e3)),
        spread_below: curve((1.98, 13.11), (139.1e3, 132.7e3, 193.5e3)),
        spread_above: curve((3.68, 159.3), (464.4e3, 93.1e3, 94.2e3)),
        deep_fade_ratio: 1.000,
        deep_fade_deviate: 20.0,
        gain_below: FLAT,
        gain_above: FrequencyGain(0.93, 0.19, 1.79),
    },
    ClimateConstants {
        climate: Climate::ContinentalTemperate,
        median: curve((-0.62, 9.19), (228.9e3, 205.2e3, 143.6e3)),
        spread_below: curve((2.68, 7.16), (93.7e3, 186.8e3, 133.5e3)),
        spread_above: curve((4.75, 8.12), (93.2e3, 135.9e3, 113.4e3)),
        deep_fade_ratio: 1.224,
        deep_fade_deviate: 1.282,
        gain_below: FrequencyGain(0.92, 0.25, 1.77),
        gain_above: FrequencyGain(0.93, 0.31, 2.00),
    },
    ClimateConstants {
        climate: Climate::MaritimeTemperateOverLand,
        median: curve((-0.39, 2.86), (141.7e3, 315.9e3, 167.4e3)),
        spread_below: curve((6.86, 10.38), (187.8e3, 169.6e3, 108.9e3)),
        spread_above: curve((8.58, 13.97), (216.0e3, 152.0e3, 122.7e3)),
        deep_fade_ratio: 1.518,
        deep_fade_deviate: 1.282,
        gain_below: FLAT,
        gain_above: FLAT,
    },
    ClimateConstants {
        climate: Climate::MaritimeTemperateOverSea,
        median: curve((3.15, 857.9), (2222.0e3, 164.8e3, 116.3e3)),
        spread_below: curve((8.51, 169.8), (609.8e3, 119.9e3, 106.6e3)),
        spread_above: curve((8.43, 8.19), (136.2e3, 188.5e3, 122.9e3)),
        deep_fade_ratio: 1.518,
        deep_fade_deviate: 1.282,
        gain_below: FLAT,
        gain_above: FLAT,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn table_is_indexed_by_code() {
        for climate in Climate::ALL.iter() {
            assert_eq!(climate.constants().climate, *climate);
        }
    }

    #[test]
    fn codes_convert() {
        assert_eq!(Climate::try_from(5), Ok(Climate::ContinentalTemperate));
        assert_eq!(Climate::try_from(7), Ok(Climate::MaritimeTemperateOverSea));
        assert_eq!(Climate::try_from(0), Err(ItmError::InvalidClimate));
        assert_eq!(Climate::try_from(99), Err(ItmError::InvalidClimate));
    }

    #[test]
    fn curves_vanish_at_zero_distance() {
        for climate in Climate::ALL.iter() {
            let stats = climate.constants().statistics(0.0, 20.96);
            assert_abs_diff_eq!(stats.median, 0.0);
            assert_abs_diff_eq!(stats.sigma_below, 0.0);
            assert_abs_diff_eq!(stats.sigma_above, 0.0);
        }
    }

    #[test]
    fn flat_gain_is_unity() {
        assert_abs_diff_eq!(FLAT.at(2.0), 1.0);
        assert_abs_diff_eq!(FLAT.at(2000.0), 1.0);
    }

    #[test]
    fn continental_temperate_median_near_fifty_km() {
        // effective distance for a 50 km path with low antennas sits around
        // 60 km: the median adjustment there is small and positive
        let stats = Climate::ContinentalTemperate
            .constants()
            .statistics(60e3, 20.96);
        assert!(stats.median > 0.0 && stats.median < 3.0, "{:?}", stats);
        assert_abs_diff_eq!(stats.sigma_deep, stats.sigma_above * 1.224, epsilon = 1e-12);
    }
}
