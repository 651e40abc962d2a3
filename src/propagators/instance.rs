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

use super::{step, IntegrationDetails, InvalidStepSnafu, MaxStepsReachedSnafu, PropagationError, Propagator};
use crate::dynamics::Dynamics;
use crate::time::{Duration, Unit};
use crate::OrbitalState;
use snafu::ensure;
use std::sync::mpsc::{channel, Sender};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// A remaining duration shorter than this is considered to be on the stop time (float rounding of the elapsed time).
const STOP_TIME_TOLERANCE_S: f64 = 1e-9;

/// A PropInstance is a propagator bound to a state, which it mutates at each step.
///
/// It includes the options of the propagator and the details of the previous step.
#[derive(Debug)]
pub struct PropInstance<'a, D: Dynamics> {
    /// The state of this propagator instance
    pub state: OrbitalState,
    /// The propagator setup (dynamics and options)
    pub prop: &'a Propagator<D>,
    /// Stores the details of the previous integration step
    pub details: IntegrationDetails,
    pub(crate) step_size: Duration, // Stores the step for the _next_ call
}

impl<'a, D: Dynamics> PropInstance<'a, D> {
    /// Allows setting the step size of the propagator
    pub fn set_step(&mut self, step_size: Duration) {
        self.step_size = step_size;
    }

    /// Take a single propagator step of the current step size
    pub fn single_step(&mut self) -> Result<(), PropagationError> {
        self.step_by_s(self.step_size.to_seconds())
    }

    fn step_by_s(&mut self, dt_s: f64) -> Result<(), PropagationError> {
        if let Some(max_steps) = self.prop.opts.max_steps {
            ensure!(
                self.details.steps < max_steps,
                MaxStepsReachedSnafu { steps: max_steps }
            );
        }
        step(&mut self.state, dt_s, &self.prop.dynamics)?;
        self.details.step = dt_s * Unit::Second;
        self.details.steps += 1;
        Ok(())
    }

    fn for_duration_channel_option(
        &mut self,
        duration: Duration,
        maybe_tx_chan: Option<Sender<OrbitalState>>,
    ) -> Result<OrbitalState, PropagationError> {
        let stop_s = self.state.time_s + duration.to_seconds();
        self.until_time_s_channel_option(stop_s, maybe_tx_chan)
    }

    /// Steps until `stop_s`, in seconds since the start of the simulation, which the returned state lands on exactly.
    fn until_time_s_channel_option(
        &mut self,
        stop_s: f64,
        maybe_tx_chan: Option<Sender<OrbitalState>>,
    ) -> Result<OrbitalState, PropagationError> {
        let duration = (stop_s - self.state.time_s) * Unit::Second;
        if duration == Duration::ZERO {
            return Ok(self.state);
        }
        ensure!(
            self.step_size > Duration::ZERO,
            InvalidStepSnafu {
                step_s: self.step_size.to_seconds()
            }
        );

        #[cfg(not(target_arch = "wasm32"))]
        let tick = Instant::now();
        let log_progress = duration.abs() >= 2 * Unit::Minute;

        if log_progress {
            info!(
                "Propagating for {} with {} using {}",
                duration, self.prop.opts, self.prop.dynamics
            );
        }

        let backprop = duration.is_negative();
        let nominal_step = self.step_size;
        if backprop {
            self.step_size = -self.step_size; // Invert the step size
        }

        loop {
            let remaining_s = stop_s - self.state.time_s;
            // The final step absorbs the rounding of the elapsed time
            let last_step = if backprop {
                remaining_s >= self.step_size.to_seconds() - STOP_TIME_TOLERANCE_S
            } else {
                remaining_s <= self.step_size.to_seconds() + STOP_TIME_TOLERANCE_S
            };

            if last_step {
                if remaining_s.abs() > STOP_TIME_TOLERANCE_S {
                    // Take one final step of exactly the needed duration until the stop time
                    if let Err(e) = self.step_by_s(remaining_s) {
                        self.set_step(nominal_step);
                        return Err(e);
                    }

                    // Avoid accumulating the rounding of the time through the steps
                    self.state.time_s = stop_s;

                    // Publish to channel if provided
                    if let Some(ref chan) = maybe_tx_chan {
                        if let Err(e) = chan.send(self.state) {
                            warn!("{} when sending on channel", e)
                        }
                    }
                } else {
                    // Only reachable for a duration within the tolerance, so no state was published
                    self.state.time_s = stop_s;
                }

                self.set_step(nominal_step);

                #[cfg(not(target_arch = "wasm32"))]
                {
                    if log_progress {
                        let tock: Duration = tick.elapsed().into();
                        info!("Done in {} after {} steps", tock, self.details.steps);
                    }
                }

                return Ok(self.state);
            } else {
                if let Err(e) = self.single_step() {
                    self.set_step(nominal_step);
                    return Err(e);
                }
                // Publish to channel if provided
                if let Some(ref chan) = maybe_tx_chan {
                    if let Err(e) = chan.send(self.state) {
                        warn!("{} when sending on channel", e)
                    }
                }
            }
        }
    }

    /// This method propagates the provided Dynamics for the provided duration.
    pub fn for_duration(&mut self, duration: Duration) -> Result<OrbitalState, PropagationError> {
        self.for_duration_channel_option(duration, None)
    }

    /// This method propagates the provided Dynamics for the provided duration and publishes each state on the channel.
    pub fn for_duration_with_channel(
        &mut self,
        duration: Duration,
        tx_chan: Sender<OrbitalState>,
    ) -> Result<OrbitalState, PropagationError> {
        self.for_duration_channel_option(duration, Some(tx_chan))
    }

    /// Propagates the provided Dynamics until the provided time in seconds since the start of the simulation. Returns the end state.
    pub fn until_time_s(&mut self, end_time_s: f64) -> Result<OrbitalState, PropagationError> {
        self.until_time_s_channel_option(end_time_s, None)
    }

    /// Propagates the provided Dynamics for the provided duration and returns the end state and the trajectory.
    ///
    /// The trajectory starts with the initial state and includes every intermediate state.
    pub fn for_duration_with_traj(
        &mut self,
        duration: Duration,
    ) -> Result<(OrbitalState, Vec<OrbitalState>), PropagationError> {
        let start_state = self.state;
        let (tx, rx) = channel();
        let end_state = self.for_duration_with_channel(duration, tx)?;

        let mut traj = vec![start_state];
        traj.extend(rx.try_iter());

        Ok((end_state, traj))
    }

    /// Returns the details of the previous integration step
    pub fn latest_details(&self) -> IntegrationDetails {
        self.details
    }
}
