//! Utilities for ITM.
//!
//! These are miscellaneous functions that are functionally pure but also
//! implement well-known algorithms and formulae. They might be reusable
//! elsewhere and/or they might benefit from optimisation or being replaced by
//! calls to more efficient or correct versions.

/// Fortran-style DIM operation.
pub fn fortran_dim(x: f64, y: f64) -> f64 {
    (x - y).max(0.0)
}

/// Zero for negative `x`, `x` otherwise.
///
/// Unlike `x.max(0.0)`, a NaN stays NaN.
pub fn non_negative(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        x
    }
}

/// Interdecile range at which [`rms_roughness`] peaks (m).
pub const ROUGHNESS_PEAK: f64 = 4096.0;

/// RMS deviation of the terrain from its interdecile range `q`. See T.A. 4.44.
///
/// The fitted curve turns back down past [`ROUGHNESS_PEAK`]; rougher terrain
/// is held at the peak value instead, about 58.5 m.
pub fn rms_roughness(q: f64) -> f64 {
    let q = q.min(ROUGHNESS_PEAK);
    0.78 * q * (-(q / 16.0).powf(0.25)).exp()
}

/// C group of constants for the qerf/qerfi approximations.
const QERFI_C: (f64, f64, f64) = (2.515516698, 0.802853, 0.010328);

/// D group of constants for the qerf/qerfi approximations.
const QERFI_D: (f64, f64, f64) = (1.432788, 0.189269, 0.001308);

/// The inverse of the standard normal complementary probability function.
///
/// The standard normal complementary function is _Q(x) = 1 / √͞2͞π ∫ e^(-t²/2)_.
/// This inverse is the solution for _x_ to _q = Q(x)_, also noted _Q¯¹(q)_.
///
/// This function is used to scale the inputs (the desired fractions of time,
/// locations, situations to model) to later obtain normal quantiles.
///
/// The implementation is not the normal tables, but rather an approximation by
/// [Cecil Hastings][Hastings55], with a maximum error of 4.5 × 10¯⁴.
///
/// In the FORTRAN, this function was called `qerfi`
/// ("Q error function, inverted"), hence the constants. See <50>, <51>.
///
/// [Hastings55]: https://press.princeton.edu/titles/1133.html
pub fn inverse_normal_complementary(q: f64) -> f64 {
    let x = 0.5 - q;
    let mut t = (0.5 - x.abs()).max(0.000001);
    t = (-2.0 * t.ln()).sqrt();
    let v = t - ((QERFI_C.2 * t + QERFI_C.1) * t + QERFI_C.0)
        / (((QERFI_D.2 * t + QERFI_D.1) * t + QERFI_D.0) * t + 1.0);

    if x < 0.0 {
        -v
    } else {
        v
    }
}

/// Cubic Hermite step between two edges.
///
/// Zero at or below `edge0`, one at or above `edge1`, with zero slope at both
/// ends. Used to cross-fade between the propagation regimes.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if x <= edge0 {
        return 0.0;
    }

    if x >= edge1 {
        return 1.0;
    }

    let t = (x - edge0) / (edge1 - edge0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dim_is_positive_difference() {
        assert_eq!(fortran_dim(5.0, 3.0), 2.0);
        assert_eq!(fortran_dim(3.0, 5.0), 0.0);
        assert_eq!(fortran_dim(-1.0, -1.0), 0.0);
    }

    #[test]
    fn non_negative_keeps_nan() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(3.0), 3.0);
        assert!(non_negative(f64::NAN).is_nan());
    }

    #[test]
    fn roughness_holds_at_peak() {
        assert_eq!(rms_roughness(0.0), 0.0);
        assert_abs_diff_eq!(rms_roughness(ROUGHNESS_PEAK), 58.5, epsilon = 0.1);
        assert_eq!(rms_roughness(1e9), rms_roughness(ROUGHNESS_PEAK));

        let mut last = 0.0;
        for &q in [1.0, 10.0, 100.0, 1000.0, 4000.0, 5000.0, 1e6].iter() {
            let s = rms_roughness(q);
            assert!(s >= last, "{} at {}", s, q);
            last = s;
        }
    }

    #[test]
    fn median_maps_to_zero_deviate() {
        assert_abs_diff_eq!(inverse_normal_complementary(0.5), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn hastings_error_bound() {
        // Q¯¹(0.1) = 1.28155, Q¯¹(0.01) = 2.32635
        assert_abs_diff_eq!(inverse_normal_complementary(0.1), 1.28155, epsilon = 5e-4);
        assert_abs_diff_eq!(inverse_normal_complementary(0.01), 2.32635, epsilon = 5e-4);
        assert_abs_diff_eq!(inverse_normal_complementary(0.9), -1.28155, epsilon = 5e-4);
    }

    #[test]
    fn inverse_is_antisymmetric() {
        for &q in &[0.02, 0.17, 0.33, 0.45] {
            assert_abs_diff_eq!(
                inverse_normal_complementary(q),
                -inverse_normal_complementary(1.0 - q),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(1.0, 2.0, 0.5), 0.0);
        assert_eq!(smoothstep(1.0, 2.0, 2.5), 1.0);
        assert_abs_diff_eq!(smoothstep(1.0, 2.0, 1.5), 0.5, epsilon = 1e-12);
        assert!(smoothstep(1.0, 2.0, 1.25) < smoothstep(1.0, 2.0, 1.75));
    }
}
