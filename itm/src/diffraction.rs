//! Diffraction beyond the radio horizon.
//!
//! The diffraction attenuation is a weighted average of a double knife-edge
//! and a smooth-earth (three radii) computation, plus a clutter term for the
//! roughness around the terminals. Over the distances where it applies, it is
//! approximated by a straight line through two sample points. See ITM sections
//! `<10>` to `<14>` and T.A. §4.2.

use crate::formulae::rms_roughness;
use crate::model::Computed;
use tracing::trace;

/// Upper bound on the clutter term, in dB.
///
/// The roughness contribution saturates here however large the terrain
/// irregularity grows.
pub const CLUTTER_LIMIT: f64 = 15.0;

/// Distance-independent diffraction constants. See `<11>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiffractionConstants {
    /// Terminal height weighting <wd1>.
    pub height_weight: f64,

    /// Distance weighting <xd1>.
    pub distance_weight: f64,

    /// Clutter factor <afo>.
    pub clutter: f64,

    /// Inverse of the ground impedance magnitude <qk>.
    pub impedance_factor: f64,

    /// Height gain sum, offset by 20 dB <aht>.
    pub height_gain: f64,

    /// Normalised height sum <xht>.
    pub normalised_height: f64,
}

impl DiffractionConstants {
    pub fn new(c: &Computed) -> Self {
        let wn = c.wave_number;
        let (hg0, hg1) = c.structural_heights;

        // area mode: 10 m² added to the product of structural heights
        let q = hg0 * hg1;
        let qk = c.effective_heights.0 * c.effective_heights.1 - q;
        let height_weight = (1.0 + qk / (q + 10.0)).sqrt();
        let distance_weight = c.horizon_distance + c.bending_angle / c.effective_curvature;

        // T.A. 4.10: interdecile range of the terrain at the horizon distance
        let q = (1.0 - 0.8 * (-c.line_of_sight_distance / 50e3).exp()) * c.terrain_irregularity;
        let q = rms_roughness(q);
        let clutter = CLUTTER_LIMIT.min(2.171 * (1.0 + 4.77e-4 * hg0 * hg1 * wn * q).ln());

        let impedance_factor = 1.0 / c.transfer_impedance.norm();

        let mut height_gain = 20.0;
        let mut normalised_height = 0.0;
        for &(dl, he) in &[
            (c.horizon_distances.0, c.effective_heights.0),
            (c.horizon_distances.1, c.effective_heights.1),
        ] {
            let a = 0.5 * dl.powi(2) / he;
            let wa = (a * wn).cbrt();
            let pk = impedance_factor / wa;
            let q = (1.607 - pk) * 151.0 * wa * dl / a;
            normalised_height += q;
            height_gain += height_gain_function(q, pk);
        }

        Self {
            height_weight,
            distance_weight,
            clutter,
            impedance_factor,
            height_gain,
            normalised_height,
        }
    }
}

/// Diffraction attenuation at distance `d`. See `<12>`.
pub fn diffraction_loss(d: f64, c: &Computed, k: &DiffractionConstants) -> f64 {
    let wn = c.wave_number;
    let (dl0, dl1) = c.horizon_distances;

    let th = c.bending_angle + d * c.effective_curvature;
    let ds = d - c.horizon_distance;

    // double knife edge, T.A. 4.12
    let q = 0.0795775 * wn * ds * th.powi(2);
    let knife_edges = knife_edge(q * dl0 / (ds + dl0)) + knife_edge(q * dl1 / (ds + dl1));

    // smooth earth, T.A. 4.16 to 4.20
    let a = ds / th;
    let wa = (a * wn).cbrt();
    let pk = k.impedance_factor / wa;
    let q = (1.607 - pk) * 151.0 * wa * th + k.normalised_height;
    let smooth_earth = 0.05751 * q - 4.343 * q.ln() - k.height_gain;

    // weighting, T.A. 4.21; saturates with the terrain irregularity
    let q = (k.height_weight + k.distance_weight / d)
        * ((1.0 - 0.8 * (-d / 50e3).exp()) * c.terrain_irregularity * wn).min(6283.2);
    let wd = 25.1 / (25.1 + q.sqrt());

    smooth_earth * wd + (1.0 - wd) * knife_edges + k.clutter
}

/// Attenuation on a single knife edge.
///
/// This is an approximation of a Fresnel integral, see `<13>` and T.A. 6.1.
pub fn knife_edge(v2: f64) -> f64 {
    if v2 < 5.76 {
        6.02 + 9.11 * v2.sqrt() - 1.27 * v2
    } else {
        12.953 + 10.0 * v2.log10()
    }
}

/// Height gain over a smooth spherical earth. See `<14>` and T.A. 6.2 to 6.6.
pub fn height_gain_function(x: f64, pk: f64) -> f64 {
    if x < 200.0 {
        let w = -pk.ln();

        if pk < 1.0e-5 || x * w.powi(3) > 5495.0 {
            if x > 1.0 {
                40.0 * x.log10() - 117.0
            } else {
                -117.0
            }
        } else {
            2.5e-5 * x.powi(2) / pk - 8.686 * w - 15.0
        }
    } else {
        let fhtv = 0.05751 * x - 10.0 * x.log10();

        if x < 2000.0 {
            let w = 0.0134 * x * (-0.005 * x).exp();
            (1.0 - w) * fhtv + w * (40.0 * x.log10() - 117.0)
        } else {
            fhtv
        }
    }
}

/// The diffraction line, `A = A_ed + m_d · d`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiffractionLine {
    pub intercept: f64, // <aed>
    pub slope: f64,     // <emd>

    /// Scale distance of the smooth-earth diffraction <xae>.
    pub scale: f64,

    pub constants: DiffractionConstants,
}

impl DiffractionLine {
    /// Fits the line through two sample points just past the horizons. See `<5>`.
    pub fn fit(c: &Computed) -> Self {
        let constants = DiffractionConstants::new(c);

        let scale = (c.wave_number * c.effective_curvature.powi(2)).powf(-1.0 / 3.0);
        let d3 = c.line_of_sight_distance.max(1.3787 * scale + c.horizon_distance);
        let d4 = d3 + 2.7574 * scale;

        let a3 = diffraction_loss(d3, c, &constants);
        let a4 = diffraction_loss(d4, c, &constants);

        let slope = (a4 - a3) / (d4 - d3);
        let intercept = a3 - slope * d3;

        trace!(d3, a3, d4, a4, slope, intercept, "diffraction line");

        Self {
            intercept,
            slope,
            scale,
            constants,
        }
    }

    pub fn at(&self, d: f64) -> f64 {
        self.intercept + self.slope * d
    }
}
