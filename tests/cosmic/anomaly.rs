extern crate pretty_env_logger as pel;

use kepler_space::cosmic::anomaly::*;
use kepler_space::utils::angle_diff_deg;
use kepler_space::OrbitError;
use rstest::*;

#[test]
fn circular_kepler_is_identity() {
    for i in 0..360 {
        let ma_deg = i as f64 + 0.25;
        assert_eq!(
            solve_kepler_equation(ma_deg, 0.0, DEFAULT_KEPLER_TOLERANCE).unwrap(),
            ma_deg
        );
    }
}

#[rstest]
#[case(0.01)]
#[case(0.3)]
#[case(0.7)]
#[case(0.9)]
fn anomaly_round_trip(#[case] ecc: f64) {
    let _ = pel::try_init();
    for i in 0..24 {
        let ma_deg = 15.0 * i as f64;
        let solution = solve_kepler(ma_deg, ecc, DEFAULT_KEPLER_TOLERANCE).unwrap();
        assert!(solution.converged, "{solution}");
        assert!(solution.iterations <= KEPLER_MAX_ITER);

        let ta_deg = true_anomaly_from_eccentric(solution.ea_deg, ecc).unwrap();
        let ea_deg = eccentric_anomaly_from_true(ta_deg, ecc).unwrap();
        let ma_back_deg = mean_anomaly_from_eccentric(ea_deg, ecc).unwrap();
        assert!(
            angle_diff_deg(ma_back_deg, ma_deg).abs() < 1e-8,
            "ecc = {ecc}: M = {ma_deg} deg came back as {ma_back_deg} deg"
        );

        let ta_direct_deg = true_anomaly_from_mean(ma_deg, ecc).unwrap();
        assert!(angle_diff_deg(ta_direct_deg, ta_deg).abs() < 1e-10);
    }
}

#[test]
fn kepler_residual() {
    let solution = solve_kepler(27.0, 0.5, DEFAULT_KEPLER_TOLERANCE).unwrap();
    let ea = solution.ea_deg.to_radians();
    let residual = ea - 0.5 * ea.sin() - 27.0_f64.to_radians();
    assert!(residual.abs() < 1e-12);
    assert!(solution.residual_rad < 1e-12);
    assert_eq!(solution.converged_or_err().unwrap(), solution.ea_deg);
}

#[test]
fn kepler_mean_anomaly_is_reduced() {
    let ea_deg = solve_kepler_equation(30.0, 0.2, DEFAULT_KEPLER_TOLERANCE).unwrap();
    let ea_wrapped_deg = solve_kepler_equation(30.0 + 720.0, 0.2, DEFAULT_KEPLER_TOLERANCE).unwrap();
    let ea_negative_deg = solve_kepler_equation(30.0 - 360.0, 0.2, DEFAULT_KEPLER_TOLERANCE).unwrap();
    assert!((ea_deg - ea_wrapped_deg).abs() < 1e-9);
    assert!((ea_deg - ea_negative_deg).abs() < 1e-9);
}

#[test]
fn kepler_non_convergence_is_reported() {
    let _ = pel::try_init();
    // No update can ever be strictly smaller than a zero tolerance
    let solution = solve_kepler(100.0, 0.5, 0.0).unwrap();
    assert!(!solution.converged);
    assert_eq!(solution.iterations, KEPLER_MAX_ITER);
    assert!(matches!(
        solution.converged_or_err(),
        Err(OrbitError::DidNotConverge { iterations: 50, .. })
    ));
    // The best estimate is still returned
    let ea_deg = solve_kepler_equation(100.0, 0.5, 0.0).unwrap();
    assert!((ea_deg - solution.ea_deg).abs() < f64::EPSILON);
}

#[test]
fn unsupported_eccentricities() {
    assert!(solve_kepler(10.0, 1.0, DEFAULT_KEPLER_TOLERANCE)
        .unwrap_err()
        .is_invalid());
    assert!(solve_kepler_equation(10.0, 1.5, DEFAULT_KEPLER_TOLERANCE)
        .unwrap_err()
        .is_invalid());
    assert!(solve_kepler(10.0, -0.2, DEFAULT_KEPLER_TOLERANCE)
        .unwrap_err()
        .is_invalid());
    assert!(true_anomaly_from_eccentric(10.0, 1.0)
        .unwrap_err()
        .is_invalid());
    assert!(true_anomaly_from_eccentric(10.0, 2.0).is_err());
    assert!(eccentric_anomaly_from_true(10.0, 1.0).is_err());
    assert!(mean_anomaly_from_eccentric(10.0, 1.0).is_err());
}

#[test]
fn known_anomalies() {
    // At periapsis and apoapsis, all anomalies match
    for ecc in [0.1, 0.5, 0.8] {
        assert!(true_anomaly_from_mean(0.0, ecc).unwrap().abs() < 1e-12);
        assert!((true_anomaly_from_mean(180.0, ecc).unwrap().abs() - 180.0).abs() < 1e-8);
    }
    // The true anomaly leads the mean anomaly on the way to apoapsis
    let ta_deg = true_anomaly_from_mean(90.0, 0.3).unwrap();
    assert!(ta_deg > 90.0);
    // No branch correction: the result is in (-180, 180]
    let ta_deg = true_anomaly_from_eccentric(270.0, 0.3).unwrap();
    assert!(ta_deg < 0.0 && ta_deg > -180.0);
}
