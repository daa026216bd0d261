//! Line-of-sight propagation.
//!
//! Within the radio horizon the excess loss comes from the two-ray
//! interference between the direct wave and the ground reflection, with a
//! reflection coefficient reduced by the terrain roughness. It is blended with
//! the extrapolated diffraction line, then fitted with a log-linear curve
//! through a few sample points. See ITM sections `<16>` to `<19>` and T.A. §4.3.

use crate::diffraction::DiffractionLine;
use crate::formulae::{fortran_dim, rms_roughness};
use crate::model::Computed;
use num_complex::Complex64;
use tracing::trace;

/// Distance under which the excess loss tapers off to free space (m).
pub const NEAR_FIELD_DISTANCE: f64 = 1e3;

/// Weight of the two-ray model against the diffraction line <wls>.
pub fn two_ray_weight(c: &Computed) -> f64 {
    0.021
        / (0.021
            + c.wave_number * c.terrain_irregularity / c.line_of_sight_distance.max(10e3))
}

/// Line-of-sight attenuation at distance `d`. See `<19>`.
pub fn two_ray_loss(d: f64, c: &Computed, diffraction: &DiffractionLine, weight: f64) -> f64 {
    let wn = c.wave_number;
    let (he0, he1) = c.effective_heights;

    // roughness at distance, T.A. 4.44
    let s = rms_roughness((1.0 - 0.8 * (-d / 50e3).exp()) * c.terrain_irregularity);

    // grazing angle sine
    let mut q = he0 + he1;
    let sps = q / (d.powi(2) + q.powi(2)).sqrt();

    let sps_c = Complex64::new(sps, 0.0);
    let mut r = (sps_c - c.transfer_impedance) / (sps_c + c.transfer_impedance)
        * (-(wn * s * sps).min(10.0)).exp();

    q = r.norm_sqr();
    if q < 0.25 || q < sps {
        r = r * (sps / q).sqrt();
    }

    let extrapolated = diffraction.at(d);

    // phase difference between the two rays
    q = 2.0 * wn * he0 * he1 / d;
    if q > 1.57 {
        q = 3.14 - 2.4649 / q;
    }

    let direct = Complex64::new(q.cos(), -q.sin());
    (-4.343 * (direct + r).norm_sqr().ln() - extrapolated) * weight + extrapolated
}

/// The line-of-sight curve, `A = A_el + K₁ · d + K₂ · ln d`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineOfSightCurve {
    pub intercept: f64, // <ael>
    pub linear: f64,    // <ak1>
    pub log: f64,       // <ak2>
}

impl LineOfSightCurve {
    /// Fits the curve through two or three two-ray samples and the diffraction
    /// line at the smooth-earth horizon. See `<6>`.
    pub fn fit(c: &Computed, diffraction: &DiffractionLine) -> Self {
        let weight = two_ray_weight(c);
        let sample = |d: f64| two_ray_loss(d, c, diffraction, weight);

        let aed = diffraction.intercept;
        let emd = diffraction.slope;
        let dla = c.horizon_distance;

        let d2 = c.line_of_sight_distance;
        let a2 = diffraction.at(d2);

        let mut d0 = 1.908 * c.wave_number * c.effective_heights.0 * c.effective_heights.1;
        let d1 = if aed >= 0.0 {
            d0 = d0.min(0.5 * dla);
            d0 + 0.25 * (dla - d0)
        } else {
            (-aed / emd).max(0.25 * dla)
        };

        let a1 = sample(d1);

        let mut fitted = None;
        if d0 < d1 {
            let a0 = sample(d0);
            let q = (d2 / d0).ln();

            let mut k2 = (((d2 - d0) * (a1 - a0) - (d1 - d0) * (a2 - a0))
                / ((d2 - d0) * (d1 / d0).ln() - (d1 - d0) * q))
                .max(0.0);

            if aed >= 0.0 || k2 > 0.0 {
                let mut k1 = (a2 - a0 - k2 * q) / (d2 - d0);
                if k1 < 0.0 {
                    k1 = 0.0;
                    k2 = fortran_dim(a2, a0) / q;
                    if k2 == 0.0 {
                        k1 = emd;
                    }
                }

                trace!(d0, a0, d1, a1, d2, a2, "line-of-sight samples");
                fitted = Some((k1, k2));
            }
        }

        let (linear, log) = fitted.unwrap_or_else(|| {
            trace!(d1, a1, d2, a2, "line-of-sight samples, linear fit");
            let k1 = fortran_dim(a2, a1) / (d2 - d1);
            if k1 == 0.0 {
                (emd, 0.0)
            } else {
                (k1, 0.0)
            }
        });

        Self {
            intercept: a2 - linear * d2 - log * d2.ln(),
            linear,
            log,
        }
    }

    pub fn at(&self, d: f64) -> f64 {
        self.intercept + self.linear * d + self.log * d.ln()
    }
}

/// Fraction of the excess loss kept at distance `d`.
///
/// Linear from zero at the transmitter up to one at
/// [`NEAR_FIELD_DISTANCE`], so predictions converge to free space.
pub fn near_field_taper(d: f64) -> f64 {
    (d / NEAR_FIELD_DISTANCE).min(1.0).max(0.0)
}
