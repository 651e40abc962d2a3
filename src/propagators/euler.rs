/*
    kepler-space, two-body orbital mechanics
    Copyright (C) 2025 kepler-space contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::{DynamicsSnafu, InvalidStepSnafu, PropagationError};
use crate::dynamics::{Dynamics, TwoBody};
use crate::utils::between_0_360;
use crate::OrbitalState;
use snafu::{ensure, ResultExt};

/// Advances the state by one semi-implicit (symplectic) Euler step of `dt_s` seconds.
///
/// The velocity is updated first from the acceleration at the current position, and the position is then updated
/// with the *new* velocity:
///   v ← v + a(r) dt
///   r ← r + v dt
///
/// There is no step size control: the accuracy only depends on `dt_s`. The true anomaly is advanced by the angle swept
/// by the position vector during the step, so it is measured from the periapsis of the initial state. The periapsis of
/// a two body orbit is fixed, and the osculating one drifts with the integration error, especially on circular orbits.
pub fn step<D: Dynamics>(
    state: &mut OrbitalState,
    dt_s: f64,
    dynamics: &D,
) -> Result<(), PropagationError> {
    ensure!(
        dt_s.is_finite() && dt_s != 0.0,
        InvalidStepSnafu { step_s: dt_s }
    );

    let accel = dynamics.accel(&state.position_m).context(DynamicsSnafu)?;

    let r0 = state.position_m;
    state.velocity_m_s += accel * dt_s;
    state.position_m += state.velocity_m_s * dt_s;
    state.time_s += dt_s;

    // Signed angle from r0 to r1, positive in the direction of the orbital motion
    let swept = r0.cross(&state.position_m);
    let sin_sweep = swept.norm().copysign(state.hvec().dot(&swept));
    let sweep_deg = sin_sweep.atan2(r0.dot(&state.position_m)).to_degrees();
    state.ta_deg = between_0_360(state.ta_deg + sweep_deg);

    trace!("{state}");

    Ok(())
}

/// Advances the state by one semi-implicit Euler step of `dt_s` seconds under the two body gravity of `mu_m3_s2`.
pub fn step_state(
    state: &mut OrbitalState,
    dt_s: f64,
    mu_m3_s2: f64,
) -> Result<(), PropagationError> {
    let dynamics = TwoBody::new(mu_m3_s2).context(DynamicsSnafu)?;
    step(state, dt_s, &dynamics)
}
