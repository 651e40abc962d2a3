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

use super::{Dynamics, DynamicsError, InvalidMuSnafu, ZeroRadiusSnafu};
use crate::cosmic::CentralBody;
use crate::linalg::Vector3;
use snafu::ensure;
use std::fmt;

/// `TwoBody` provides the Newtonian point mass acceleration of the central body: a = -μ r / |r|³.
///
/// There are no perturbations: this is the only force acting on the satellite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoBody {
    mu_m3_s2: f64,
}

impl TwoBody {
    /// Initializes the two body dynamics from a gravitational parameter in m^3/s^2
    pub fn new(mu_m3_s2: f64) -> Result<Self, DynamicsError> {
        ensure!(mu_m3_s2 > 0.0, InvalidMuSnafu { mu_m3_s2 });
        Ok(Self { mu_m3_s2 })
    }

    /// Initializes the two body dynamics of the provided central body
    pub fn from_body(body: &CentralBody) -> Self {
        // A CentralBody always has a positive gravitational parameter
        Self {
            mu_m3_s2: body.mu_m3_s2(),
        }
    }
}

impl fmt::Display for TwoBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "two body dynamics (mu = {:e} m^3/s^2)", self.mu_m3_s2)
    }
}

impl Dynamics for TwoBody {
    fn mu_m3_s2(&self) -> f64 {
        self.mu_m3_s2
    }

    fn accel(&self, radius_m: &Vector3<f64>) -> Result<Vector3<f64>, DynamicsError> {
        let rmag_m = radius_m.norm();
        ensure!(rmag_m > 0.0 && rmag_m.is_finite(), ZeroRadiusSnafu { rmag_m });
        Ok((-self.mu_m3_s2 / rmag_m.powi(3)) * radius_m)
    }
}
