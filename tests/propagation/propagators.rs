extern crate pretty_env_logger as pel;

use kepler_space::cosmic::calculator::{orbital_period, state_from_orbit};
use kepler_space::dynamics::TwoBody;
use kepler_space::propagators::*;
use kepler_space::time::Unit;
use kepler_space::utils::{angle_diff_deg, between_0_360};
use kepler_space::{CentralBody, OrbitDescriptor, OrbitalState};
use rstest::*;
use std::sync::mpsc::channel;

use crate::propagation::EARTH_MU;

#[fixture]
fn earth() -> CentralBody {
    CentralBody::earth()
}

#[fixture]
fn leo(earth: CentralBody) -> OrbitalState {
    let orbit = OrbitDescriptor::circular(400.0).with_inc_deg(51.6);
    state_from_orbit(&orbit, &earth, 0.0).unwrap()
}

#[rstest]
fn closed_circular_orbit(earth: CentralBody, leo: OrbitalState) {
    let _ = pel::try_init();
    let orbit = OrbitDescriptor::circular(400.0).with_inc_deg(51.6);
    let period_s = orbital_period(&orbit, &earth).unwrap();

    let setup = Propagator::new(
        TwoBody::from_body(&earth),
        PropOpts::with_fixed_step_s(1.0),
    );
    let mut prop = setup.with(leo);
    let final_state = prop.for_duration(period_s * Unit::Second).unwrap();

    println!("{leo}\n{final_state}");
    let err_m = final_state.distance_to(&leo);
    assert!(err_m < 2_000.0, "returned {err_m} m away from the start");
    assert!((final_state.time_s - period_s).abs() < 1e-6);
    assert_eq!(prop.details.steps, period_s.ceil() as u64);

    // The semi-implicit Euler integrator is symplectic: the energy is conserved over one revolution
    let energy_err = (final_state.energy_m2_s2(EARTH_MU) - leo.energy_m2_s2(EARTH_MU))
        / leo.energy_m2_s2(EARTH_MU);
    assert!(energy_err.abs() < 1e-4, "relative energy error {energy_err}");

    // Back to where it started after one revolution
    let ta_err_deg = angle_diff_deg(final_state.ta_deg, leo.ta_deg);
    assert!(ta_err_deg.abs() < 0.1, "true anomaly off by {ta_err_deg} deg");
}

#[rstest]
fn circular_anomaly_tracks_position(earth: CentralBody) {
    let _ = pel::try_init();
    let orbit = OrbitDescriptor::circular(400.0);
    let init = state_from_orbit(&orbit, &earth, 0.0).unwrap();

    let setup = Propagator::new(
        TwoBody::from_body(&earth),
        PropOpts::with_fixed_step_s(1.0),
    );
    let (_, traj) = setup
        .with(init)
        .for_duration_with_traj(300.0 * Unit::Second)
        .unwrap();
    assert_eq!(traj.len(), 301);

    for state in &traj {
        // Equatorial orbit with the periapsis on the X axis
        let geometric_deg = state.position_m.y.atan2(state.position_m.x).to_degrees();
        let err_deg = angle_diff_deg(state.ta_deg, geometric_deg);
        assert!(
            err_deg.abs() < 0.1,
            "t = {} s: ta = {} deg but the satellite is at {geometric_deg} deg",
            state.time_s,
            state.ta_deg
        );
    }
    // About 19.5 degrees in 300 seconds
    let last = traj[traj.len() - 1];
    assert!((last.ta_deg - 19.48).abs() < 0.05, "ta = {}", last.ta_deg);
}

#[rstest]
fn lands_on_stop_time(leo: OrbitalState) {
    let setup = Propagator::default(TwoBody::new(EARTH_MU).unwrap());
    assert_eq!(setup.opts.step, 10.0 * Unit::Second);
    let mut prop = setup.with(leo);

    let state = prop.for_duration(95.5 * Unit::Second).unwrap();
    assert_eq!(state.time_s, 95.5);
    // Nine full steps and the final partial step
    assert_eq!(prop.details.steps, 10);
    assert_eq!(prop.details.step, 5.5 * Unit::Second);

    // The nominal step is restored for the next call
    prop.single_step().unwrap();
    assert_eq!(prop.state.time_s, 105.5);
    assert_eq!(prop.latest_details().step, 10.0 * Unit::Second);

    let state = prop.until_time_s(200.0).unwrap();
    assert_eq!(state.time_s, 200.0);
    assert_eq!(state.elapsed(), 200.0 * Unit::Second);
}

#[rstest]
fn backward_propagation(earth: CentralBody, leo: OrbitalState) {
    let orbit = OrbitDescriptor::circular(400.0).with_inc_deg(51.6);
    let period_s = orbital_period(&orbit, &earth).unwrap();

    let setup = Propagator::new(
        TwoBody::from_body(&earth),
        PropOpts::with_fixed_step_s(0.1),
    );
    let mut prop = setup.with(leo);
    let state = prop.for_duration(-100.5 * Unit::Second).unwrap();
    assert_eq!(state.time_s, -100.5);
    assert_eq!(prop.details.steps, 1005);

    // Compare with the analytical position on the circular orbit
    let ta_deg = between_0_360(-100.5 * 360.0 / period_s);
    let expected = state_from_orbit(&orbit, &earth, ta_deg).unwrap();
    let err_m = state.distance_to(&expected);
    assert!(err_m < 1_000.0, "{err_m} m away from the analytical position");
}

#[rstest]
fn published_end_state_matches_returned(leo: OrbitalState) {
    // Steps which are not exact in binary accumulate rounding in the elapsed time
    let setup = Propagator::new(
        TwoBody::new(EARTH_MU).unwrap(),
        PropOpts::with_fixed_step_s(0.1),
    );
    for duration_s in [-100.5, 100.5, 33.3] {
        // Durations are stored in whole nanoseconds, so 33.3 s is 33.299999999 s
        let duration = duration_s * Unit::Second;
        let (final_state, traj) = setup.with(leo).for_duration_with_traj(duration).unwrap();
        assert_eq!(final_state.time_s, duration.to_seconds());
        assert_eq!(traj[traj.len() - 1], final_state);
        assert_eq!(traj.len() as f64, 1.0 + (duration_s.abs() * 10.0).round());
    }
}

#[rstest]
fn until_time_lands_on_requested_seconds(leo: OrbitalState) {
    let setup = Propagator::new(
        TwoBody::new(EARTH_MU).unwrap(),
        PropOpts::with_fixed_step_s(0.1),
    );
    let mut prop = setup.with(leo);
    let state = prop.until_time_s(33.3).unwrap();
    assert_eq!(state.time_s, 33.3);
    assert_eq!(prop.details.steps, 333);

    let state = prop.until_time_s(-0.7).unwrap();
    assert_eq!(state.time_s, -0.7);
    assert_eq!(prop.details.steps, 333 + 340);
}

#[rstest]
fn trajectory_and_channel(leo: OrbitalState) {
    let setup = Propagator::new(
        TwoBody::new(EARTH_MU).unwrap(),
        PropOpts::with_fixed_step_s(1.0),
    );

    let (final_state, traj) = setup.with(leo).for_duration_with_traj(10.5 * Unit::Second).unwrap();
    // Initial state, ten full steps and the final partial step
    assert_eq!(traj.len(), 12);
    assert_eq!(traj[0], leo);
    assert_eq!(traj[traj.len() - 1], final_state);
    assert_eq!(final_state.time_s, 10.5);
    for pair in traj.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s);
    }

    let (tx, rx) = channel();
    let state = setup
        .with(leo)
        .for_duration_with_channel(5.0 * Unit::Second, tx)
        .unwrap();
    let published: Vec<OrbitalState> = rx.iter().collect();
    assert_eq!(published.len(), 5);
    assert_eq!(published[4], state);

    // A closed channel does not stop the propagation
    let _ = pel::try_init();
    let (tx, rx) = channel();
    drop(rx);
    let dropped = setup
        .with(leo)
        .for_duration_with_channel(5.0 * Unit::Second, tx)
        .unwrap();
    assert_eq!(dropped, state);
}

#[rstest]
fn step_limits(leo: OrbitalState) {
    let opts = PropOpts::builder()
        .step(1.0 * Unit::Second)
        .max_steps(5)
        .build();
    let setup = Propagator::new(TwoBody::new(EARTH_MU).unwrap(), opts);
    let mut prop = setup.with(leo);
    assert_eq!(
        prop.for_duration(10.0 * Unit::Second),
        Err(PropagationError::MaxStepsReached { steps: 5 })
    );
    assert_eq!(prop.details.steps, 5);
    assert_eq!(prop.state.time_s, 5.0);

    // A zero duration is a no-op
    let mut prop = setup.with(leo);
    assert_eq!(prop.for_duration(0.0 * Unit::Second).unwrap(), leo);
    assert_eq!(prop.details.steps, 0);

    let setup = Propagator::new(
        TwoBody::new(EARTH_MU).unwrap(),
        PropOpts::with_fixed_step_s(0.0),
    );
    assert_eq!(
        setup.with(leo).for_duration(10.0 * Unit::Second),
        Err(PropagationError::InvalidStep { step_s: 0.0 })
    );
}

#[test]
fn step_state_from_periapsis() {
    let rp_m = 7.0e6;
    let vp_m_s = (EARTH_MU * (2.0 / rp_m - 1.0 / 8.0e6)).sqrt();
    let mut state = OrbitalState::new(
        [rp_m, 0.0, 0.0].into(),
        [0.0, vp_m_s, 0.0].into(),
        0.0,
        0.0,
    );
    for _ in 0..60 {
        step_state(&mut state, 1.0, EARTH_MU).unwrap();
    }
    assert_eq!(state.time_s, 60.0);
    // The satellite moves prograde away from periapsis
    assert!(state.position_m.y > 0.0);
    assert!(state.ta_deg > 0.0 && state.ta_deg < 90.0);
    assert!(state.rmag_m() > rp_m);
}
