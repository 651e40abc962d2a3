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

use super::{IntegrationDetails, PropInstance, PropOpts};
use crate::dynamics::Dynamics;
use crate::OrbitalState;

/// A Propagator allows propagating a set of dynamics forward or backward in time with a fixed step
/// semi-implicit Euler integrator.
#[derive(Clone, Debug)]
pub struct Propagator<D: Dynamics> {
    pub dynamics: D,
    pub opts: PropOpts,
}

impl<D: Dynamics> Propagator<D> {
    /// Each propagator must be initialized with `new` which stores propagator information.
    pub fn new(dynamics: D, opts: PropOpts) -> Self {
        Self { dynamics, opts }
    }

    /// Set the step size of the propagator.
    pub fn set_step(&mut self, opts: PropOpts) {
        self.opts = opts;
    }

    /// Default propagator is a 10 second fixed step.
    pub fn default(dynamics: D) -> Self {
        Self::new(dynamics, PropOpts::default())
    }

    /// Creates a new instance of this propagator with the provided state.
    pub fn with(&self, state: OrbitalState) -> PropInstance<'_, D> {
        PropInstance {
            state,
            prop: self,
            details: IntegrationDetails {
                step: self.opts.step,
                steps: 0,
            },
            step_size: self.opts.step,
        }
    }
}
