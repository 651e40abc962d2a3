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

use snafu::prelude::*;
use std::fmt;

/// The semi-implicit Euler integration step.
pub mod euler;
pub use self::euler::*;

// Re-Export
mod instance;
pub use instance::*;
mod propagator;
pub use propagator::*;
mod options;
pub use options::*;

use crate::{dynamics::DynamicsError, time::Duration};

/// Stores the details of the previous integration step of a given propagator. Access as `my_prop.clone().latest_details()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntegrationDetails {
    /// step size used
    pub step: Duration,
    /// number of steps taken since this instance was created
    pub steps: u64,
}

impl fmt::Display for IntegrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IntegrationDetails {{step: {}, steps: {}}}",
            self.step, self.steps
        )
    }
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PropagationError {
    #[snafu(display("encountered a dynamics error {source}"))]
    Dynamics { source: DynamicsError },
    #[snafu(display("integration step must be finite and non-zero, got {step_s} s"))]
    InvalidStep { step_s: f64 },
    #[snafu(display("maximum number of steps ({steps}) reached before the end of the propagation"))]
    MaxStepsReached { steps: u64 },
}
