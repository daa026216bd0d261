//! Forward scatter in the troposphere.
//!
//! Far beyond the horizon, the field is dominated by energy scattered off
//! refractive inhomogeneities in the common volume of the two terminals'
//! beams. See ITM sections `<22>` to `<26>` and T.A. §4.4.

use crate::diffraction::DiffractionLine;
use crate::formulae::fortran_dim;
use crate::model::Computed;
use tracing::trace;

/// Returned by [`scatter_loss`] when the geometry is unusable.
pub const SCATTER_SENTINEL: f64 = 1001.0;

/// Crossover used when the scatter samples fail (m).
///
/// Far enough that the diffraction line applies to every usable distance.
pub const CROSSOVER_FALLBACK: f64 = 10e6;

/// Spacing of the two scatter samples past the horizons (m).
const SAMPLE_SPACING: f64 = 200e3;

/// Distance-independent scatter constants. See `<23>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScatterConstants {
    /// Difference of the horizon distances <ad>.
    pub horizon_asymmetry: f64,

    /// Effective height ratio, oriented with the horizon asymmetry <rr>.
    pub height_ratio: f64,

    /// Refractivity-dependent efficiency coefficient <etq>.
    pub efficiency: f64,
}

impl ScatterConstants {
    pub fn new(c: &Computed) -> Self {
        let mut horizon_asymmetry = c.horizon_distances.0 - c.horizon_distances.1;
        let mut height_ratio = c.effective_heights.1 / c.effective_heights.0;

        if horizon_asymmetry < 0.0 {
            horizon_asymmetry = -horizon_asymmetry;
            height_ratio = 1.0 / height_ratio;
        }

        let ens = c.surface_refractivity;
        Self {
            horizon_asymmetry,
            height_ratio,
            efficiency: (5.67e-6 * ens - 2.32e-3) * ens + 0.031,
        }
    }
}

/// Scatter attenuation at distance `d`. See `<24>`.
///
/// `h0_memo` carries the frequency gain function value from one sample point to the
/// next: a value above 15 dB is reused as-is, and an over-large new value
/// falls back to the memo when there is one.
pub fn scatter_loss(d: f64, c: &Computed, k: &ScatterConstants, h0_memo: &mut Option<f64>) -> f64 {
    let h0 = match *h0_memo {
        Some(memo) if memo > 15.0 => memo,
        _ => {
            let wn = c.wave_number;
            let (he0, he1) = c.effective_heights;
            let ad = k.horizon_asymmetry;

            let th = c.elevation_angles.0 + c.elevation_angles.1 + d * c.effective_curvature;
            let r1 = 2.0 * wn * th * he0;
            let r2 = 2.0 * wn * th * he1;

            if r1 < 0.2 && r2 < 0.2 {
                return SCATTER_SENTINEL;
            }

            let ss = (d - ad) / (d + ad);
            let q = (k.height_ratio / ss).max(0.1).min(10.0);
            let ss = ss.max(0.1);

            // height of the crossover point above the chord, T.A. 4.62
            let z0 = (d - ad) * (d + ad) * th * 0.25 / d;
            let et = (k.efficiency * (-(z0 / 8.0e3).min(1.7).powi(6)).exp() + 1.0) * z0 / 1.7556e3;
            let ett = et.max(1.0);

            let mut h0 = (frequency_gain(r1, ett) + frequency_gain(r2, ett)) * 0.5;
            h0 += h0.min((1.38 - ett.ln()) * ss.ln() * q.ln() * 0.49);
            h0 = fortran_dim(h0, 0.0);

            if et < 1.0 {
                h0 = et * h0
                    + (1.0 - et)
                        * 4.343
                        * (((1.0 + 1.4142 / r1) * (1.0 + 1.4142 / r2)).powi(2) * (r1 + r2)
                            / (r1 + r2 + 2.8284))
                            .ln();
            }

            match *h0_memo {
                Some(memo) if h0 > 15.0 && memo >= 0.0 => memo,
                _ => h0,
            }
        }
    };

    *h0_memo = Some(h0);

    let th = c.bending_angle + d * c.effective_curvature;
    scatter_angle_function(th * d) + 4.343 * (47.7 * c.wave_number * th.powi(4)).ln()
        - 0.1 * (c.surface_refractivity - 301.0) * (-th * d / 40e3).exp()
        + h0
}

/// The _H₀_ frequency gain function. See `<25>` and T.A. 6.13.
pub fn frequency_gain(r: f64, et: f64) -> f64 {
    const A: [f64; 5] = [25.0, 80.0, 177.0, 395.0, 705.0];
    const B: [f64; 5] = [24.0, 45.0, 68.0, 80.0, 105.0];

    let whole = et.trunc();
    let (it, q) = if whole <= 0.0 {
        (1, 0.0)
    } else if whole >= 5.0 {
        (5, 0.0)
    } else {
        (whole as usize, et - whole)
    };

    let x = (1.0 / r).powi(2);
    let h0fv = 4.343 * ((A[it - 1] * x + B[it - 1]) * x + 1.0).ln();

    if q == 0.0 {
        h0fv
    } else {
        (1.0 - q) * h0fv + q * 4.343 * ((A[it] * x + B[it]) * x + 1.0).ln()
    }
}

/// The _F(θd)_ attenuation function. See `<26>` and T.A. 6.9.
pub fn scatter_angle_function(td: f64) -> f64 {
    const A: [f64; 3] = [133.4, 104.6, 71.8];
    const B: [f64; 3] = [0.332e-3, 0.212e-3, 0.157e-3];
    const C: [f64; 3] = [-4.343, -1.086, 2.171];

    let i = if td <= 10e3 {
        0
    } else if td <= 70e3 {
        1
    } else {
        2
    };

    A[i] + B[i] * td + C[i] * td.ln()
}

/// The scatter line, `A = A_es + m_s · d`, and the distance past which it
/// replaces the diffraction line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScatterLine {
    pub intercept: f64, // <aes>
    pub slope: f64,     // <ems>
    pub crossover: f64, // <dx>
}

impl ScatterLine {
    /// Fits the line through two sample points far past the horizons. See `<7>`.
    ///
    /// The farther point is evaluated first so the nearer one can reuse its
    /// frequency gain. If the geometry defeats the scatter computation, the
    /// line collapses onto the diffraction line and the crossover is pushed
    /// out of reach.
    pub fn fit(c: &Computed, diffraction: &DiffractionLine) -> Self {
        let k = ScatterConstants::new(c);
        let mut h0_memo = None;

        let d5 = c.horizon_distance + SAMPLE_SPACING;
        let d6 = d5 + SAMPLE_SPACING;
        let a6 = scatter_loss(d6, c, &k, &mut h0_memo);
        let a5 = scatter_loss(d5, c, &k, &mut h0_memo);

        let emd = diffraction.slope;
        let aed = diffraction.intercept;

        if a5 < 1000.0 {
            let slope = (a6 - a5) / SAMPLE_SPACING;
            let crossover = c
                .line_of_sight_distance
                .max(c.horizon_distance + 0.3 * diffraction.scale * (47.7 * c.wave_number).ln())
                .max((a5 - aed - slope * d5) / (emd - slope));

            trace!(d5, a5, d6, a6, slope, crossover, "scatter line");

            Self {
                intercept: (emd - slope) * crossover + aed,
                slope,
                crossover,
            }
        } else {
            trace!(d5, a5, "scatter unusable, keeping diffraction");

            Self {
                intercept: aed,
                slope: emd,
                crossover: CROSSOVER_FALLBACK,
            }
        }
    }

    pub fn at(&self, d: f64) -> f64 {
        self.intercept + self.slope * d
    }
}
