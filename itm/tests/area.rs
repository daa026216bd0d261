use approx::assert_abs_diff_eq;
use itm::{
    evaluate, evaluate_cr, free_space_loss, AreaParams, ItmError, Model, PropagationMode,
    RadioParameters, TerrainStatistics, VariabilityRequest, Warnings,
};
use std::thread;

fn at(distance_km: f64, frequency_mhz: f64) -> itm::ItmResult<itm::PropagationResult> {
    evaluate(
        30.0, 3.0, 0, 0, distance_km, 90.0, 5, 301.0, frequency_mhz, 1, 15.0, 0.005, 3, 50.0,
        50.0, 50.0,
    )
}

fn model(frequency_mhz: f64) -> Model {
    let params = AreaParams {
        heights: (30.0, 3.0),
        radio: RadioParameters {
            frequency_mhz,
            ..RadioParameters::default()
        },
        ..AreaParams::default()
    };
    Model::new(&params).expect("valid model")
}

fn rough(distance_km: f64, delta_h_m: f64) -> itm::ItmResult<itm::PropagationResult> {
    evaluate(
        30.0, 3.0, 0, 0, distance_km, delta_h_m, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0,
        50.0, 50.0,
    )
}

/// Checks the median loss never falls in 1 km steps from the horizon out.
fn assert_rises_past_horizon(heights: (f64, f64), delta_h_m: f64, frequency_mhz: f64, end_km: f64) {
    let params = AreaParams {
        heights,
        terrain: TerrainStatistics {
            irregularity_m: delta_h_m,
            ..TerrainStatistics::default()
        },
        radio: RadioParameters {
            frequency_mhz,
            ..RadioParameters::default()
        },
        ..AreaParams::default()
    };
    let m = Model::new(&params).expect("valid model");
    let request = VariabilityRequest::median();

    let mut d = m.line_of_sight_distance_km();
    let mut last = m.predict(d, &request).expect("valid").loss_db;
    while d < end_km {
        d += 1.0;
        let next = m.predict(d, &request).expect("valid").loss_db;
        assert!(
            next >= last - 1e-9,
            "{:?} m, {} MHz: {} dB at {} km after {} dB",
            heights,
            frequency_mhz,
            next,
            d,
            last
        );
        last = next;
    }
}

#[test]
fn free_space_formula() {
    assert_abs_diff_eq!(free_space_loss(10e3, 100.0), 92.44, epsilon = 1e-9);
    assert_abs_diff_eq!(free_space_loss(50e3, 1000.0), 126.42, epsilon = 0.01);
}

#[test]
fn uhf_beyond_horizon_is_diffraction() {
    let r = at(50.0, 1000.0).expect("valid");
    assert_eq!(r.mode, PropagationMode::Diffraction);
    assert_eq!(r.warnings, Warnings::NONE);
    assert_abs_diff_eq!(r.free_space_loss_db, 126.42, epsilon = 0.01);
    assert!(r.loss_db > r.free_space_loss_db);
    assert!(r.loss_db < 250.0);
    assert!(r.reference_attenuation_db > 0.0);
}

#[test]
fn vhf_short_path_is_line_of_sight() {
    let r = at(10.0, 100.0).expect("valid");
    assert_eq!(r.mode, PropagationMode::LineOfSight);
    assert_abs_diff_eq!(r.free_space_loss_db, 92.44, epsilon = 0.01);
    assert!(r.loss_db.is_finite());
    assert_eq!(r.distance_km, 10.0);
}

#[test]
fn microwave_long_path() {
    let r = at(100.0, 5000.0).expect("valid");
    assert_ne!(r.mode, PropagationMode::LineOfSight);
    assert!(r.loss_db > r.free_space_loss_db);
    assert!(r.loss_db.is_finite());

    let nearer = at(50.0, 5000.0).expect("valid");
    assert!(r.loss_db > nearer.loss_db);
}

#[test]
fn converges_to_free_space() {
    let r = at(0.001, 1000.0).expect("valid");
    assert!(r.warnings.contains(Warnings::DISTANCE_BELOW_RANGE));
    assert!(
        (r.loss_db - r.free_space_loss_db).abs() < 0.5,
        "{} vs {}",
        r.loss_db,
        r.free_space_loss_db
    );
}

#[test]
fn loss_grows_beyond_horizon() {
    let mut last = at(40.0, 1000.0).expect("valid").loss_db;
    let mut d = 40.0;
    while d < 600.0 {
        d += 10.0;
        let next = at(d, 1000.0).expect("valid").loss_db;
        assert!(next > last, "{} dB at {} km after {} dB", next, d, last);
        last = next;
    }
}

#[test]
fn continuous_at_thresholds() {
    let m = model(1000.0);
    let request = VariabilityRequest::median();

    for &threshold in [m.line_of_sight_distance_km(), m.crossover_distance_km()].iter() {
        let before = m.predict(threshold * 0.999, &request).expect("valid");
        let after = m.predict(threshold * 1.001, &request).expect("valid");
        assert!(
            (after.loss_db - before.loss_db).abs() < 0.5,
            "jump at {} km: {} -> {}",
            threshold,
            before.loss_db,
            after.loss_db
        );
    }
}

#[test]
fn very_long_paths_warn() {
    let r = at(5000.0, 1000.0).expect("still computed");
    assert!(r.warnings.contains(Warnings::DISTANCE_ABOVE_RANGE));
    assert!(r.warnings.contains(Warnings::DISTANCE_BEYOND_MODEL));
    assert!(r.loss_db.is_finite());
}

#[test]
fn same_answer_on_every_thread() {
    let expected = at(75.0, 600.0).expect("valid");
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| at(75.0, 600.0).expect("valid")))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread"), expected);
    }
}

#[test]
fn invalid_codes() {
    let climate = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 99, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(climate, Err(ItmError::InvalidClimate));
    assert_eq!(ItmError::InvalidClimate.code(), 1002);

    let siting = evaluate(
        30.0, 3.0, 3, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(siting, Err(ItmError::InvalidTxSitingCriteria));

    let siting = evaluate(
        30.0, 3.0, 0, -1, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(siting, Err(ItmError::InvalidRxSitingCriteria));

    let polarisation = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 2, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(polarisation, Err(ItmError::InvalidPolarisation));

    let mdvar = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 4, 50.0, 50.0, 50.0,
    );
    assert_eq!(mdvar, Err(ItmError::InvalidMdvar));
}

#[test]
fn first_failing_check_wins() {
    // bad codes before bad values
    let r = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 99, 301.0, 10.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(r, Err(ItmError::InvalidClimate));

    // area inputs before percentages
    let r = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 10.0, 1, 15.0, 0.005, 3, 0.0, 50.0, 50.0,
    );
    assert_eq!(r, Err(ItmError::FrequencyOutOfRange));

    // percentages before distance
    let r = evaluate(
        30.0, 3.0, 0, 0, 0.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 0.0, 50.0, 50.0,
    );
    assert_eq!(r, Err(ItmError::TimeOutOfRange));

    let r = evaluate(
        30.0, 3.0, 0, 0, 0.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    );
    assert_eq!(r, Err(ItmError::DistanceOutOfRange));
}

#[test]
fn confidence_reliability() {
    let median = at(50.0, 1000.0).expect("valid");
    let cr = evaluate_cr(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0,
    )
    .expect("valid");
    assert_eq!(cr, median);

    let reliable = evaluate_cr(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 95.0,
    )
    .expect("valid");
    assert!(reliable.loss_db > cr.loss_db);

    let r = evaluate_cr(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 0.0, 50.0,
    );
    assert_eq!(r, Err(ItmError::ConfidenceOutOfRange));

    let r = evaluate_cr(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 100.0,
    );
    assert_eq!(r, Err(ItmError::ReliabilityOutOfRange));
}

#[test]
fn eliminating_location_variability() {
    let full = evaluate(
        30.0, 3.0, 0, 0, 80.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 90.0, 50.0,
    )
    .expect("valid");
    let fixed = evaluate(
        30.0, 3.0, 0, 0, 80.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 13, 50.0, 90.0, 50.0,
    )
    .expect("valid");
    assert!(fixed.loss_db < full.loss_db);
}

#[test]
fn loss_never_falls_past_horizon() {
    assert_rises_past_horizon((30.0, 3.0), 90.0, 1000.0, 600.0);
    assert_rises_past_horizon((300.0, 10.0), 0.0, 5000.0, 600.0);
    assert_rises_past_horizon((300.0, 10.0), 0.0, 20_000.0, 600.0);
    assert_rises_past_horizon((3000.0, 3000.0), 0.0, 20_000.0, 1000.0);
}

#[test]
fn converges_to_free_space_at_any_percentile() {
    for &p in [0.1, 1.0, 99.0, 99.9].iter() {
        let r = evaluate(
            30.0, 3.0, 0, 0, 0.001, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, p, p, p,
        )
        .expect("valid");
        assert!(
            (r.loss_db - r.free_space_loss_db).abs() < 0.5,
            "{}%: {} vs {}",
            p,
            r.loss_db,
            r.free_space_loss_db
        );
    }
}

#[test]
fn extreme_terrain_saturates() {
    let flat = rough(50.0, 0.0).expect("valid").loss_db;

    for &dh in [0.0, 90.0, 500.0, 3e3, 1e4, 1e5, 1e6, 1e9].iter() {
        let r = rough(50.0, dh).expect("valid");
        assert!(r.loss_db.is_finite(), "dh {}", dh);
        assert!(r.loss_db >= r.free_space_loss_db, "dh {}: {}", dh, r.loss_db);
    }

    let held = rough(50.0, 1e5).expect("valid").loss_db;
    for &dh in [1e6, 1e9].iter() {
        assert_abs_diff_eq!(rough(50.0, dh).expect("valid").loss_db, held, epsilon = 0.01);
    }
    assert!(held > flat);

    let r = rough(50.0, 1e9).expect("valid");
    assert!(r.warnings.contains(Warnings::TERRAIN_IRREGULARITY));
    assert!(r.warnings.contains(Warnings::TX_HORIZON_ANGLE));
}

#[test]
fn horizontal_polarisation() {
    let vertical = at(10.0, 100.0).expect("valid");
    let horizontal = evaluate(
        30.0, 3.0, 0, 0, 10.0, 90.0, 5, 301.0, 100.0, 0, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    )
    .expect("valid");
    assert!(horizontal.loss_db.is_finite());
    assert_ne!(horizontal.loss_db, vertical.loss_db);
}

#[test]
fn careful_siting_lowers_loss() {
    let random = at(50.0, 1000.0).expect("valid");
    let sited = evaluate(
        30.0, 3.0, 1, 2, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, 0.005, 3, 50.0, 50.0, 50.0,
    )
    .expect("valid");

    assert!(sited.loss_db.is_finite());
    assert!(sited.intermediate.effective_heights_m.0 > 30.0);
    assert!(sited.intermediate.effective_heights_m.1 > 3.0);
    assert!(sited.loss_db < random.loss_db, "{} vs {}", sited.loss_db, random.loss_db);
}

#[test]
fn unbounded_ground_is_rejected() {
    let r = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, f64::INFINITY, 0.005, 3, 50.0, 50.0,
        50.0,
    );
    assert_eq!(r, Err(ItmError::InvalidEpsilon));

    let r = evaluate(
        30.0, 3.0, 0, 0, 50.0, 90.0, 5, 301.0, 1000.0, 1, 15.0, f64::INFINITY, 3, 50.0, 50.0,
        50.0,
    );
    assert_eq!(r, Err(ItmError::InvalidSigma));
}
