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

use std::fmt;

use crate::time::{Duration, Unit};

use typed_builder::TypedBuilder;

/// PropOpts stores the integrator options: the fixed step size and an optional cap on the number of steps.
///
/// The step size is fixed, there is no adaptive step control.
#[derive(Clone, Copy, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct PropOpts {
    #[builder(default_code = "10.0 * Unit::Second")]
    pub step: Duration,
    #[builder(default, setter(strip_option))]
    pub max_steps: Option<u64>,
}

impl PropOpts {
    /// `with_fixed_step` initializes an `PropOpts` such that the integrator is used with the provided step size.
    pub fn with_fixed_step(step: Duration) -> Self {
        Self {
            step,
            max_steps: None,
        }
    }

    pub fn with_fixed_step_s(step: f64) -> Self {
        Self::with_fixed_step(step * Unit::Second)
    }

    /// Returns a string with the information about these options
    pub fn info(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for PropOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_steps {
            Some(max_steps) => write!(f, "fixed step: {}, max steps: {}", self.step, max_steps),
            None => write!(f, "fixed step: {}", self.step),
        }
    }
}

impl Default for PropOpts {
    fn default() -> PropOpts {
        PropOpts {
            step: 10.0 * Unit::Second,
            max_steps: None,
        }
    }
}

#[test]
fn test_options() {
    let opts = PropOpts::with_fixed_step_s(1e-1);
    assert_eq!(opts.step, 1e-1 * Unit::Second);
    assert_eq!(opts.max_steps, None);

    let opts: PropOpts = Default::default();
    assert_eq!(opts.step, 10.0 * Unit::Second);
    assert_eq!(opts, PropOpts::builder().build());

    let opts = PropOpts::builder()
        .step(1.0 * Unit::Minute)
        .max_steps(100)
        .build();
    assert_eq!(opts.step, 60.0 * Unit::Second);
    assert_eq!(opts.max_steps, Some(100));
    assert!(opts.info().contains("max steps: 100"));
}
