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

use crate::cosmic::ECC_EPSILON;
use crate::linalg::Vector3;
use crate::time::{Duration, Unit};
use crate::utils::between_0_360;
use approx::abs_diff_eq;
use std::f64::consts::PI;
use std::fmt;

/// OrbitalState is the Cartesian state of a satellite, as propagated.
///
/// The position is in meters, the velocity in meters per second, both relative to the center of the central body.
/// The true anomaly is in degrees and the time in seconds since the start of the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitalState {
    pub position_m: Vector3<f64>,
    pub velocity_m_s: Vector3<f64>,
    pub ta_deg: f64,
    pub time_s: f64,
}

impl OrbitalState {
    pub fn new(position_m: Vector3<f64>, velocity_m_s: Vector3<f64>, ta_deg: f64, time_s: f64) -> Self {
        Self {
            position_m,
            velocity_m_s,
            ta_deg,
            time_s,
        }
    }

    /// Returns the time since the start of the simulation as a Duration
    pub fn elapsed(&self) -> Duration {
        self.time_s * Unit::Second
    }

    /// Returns the norm of the position vector, in meters
    pub fn rmag_m(&self) -> f64 {
        self.position_m.norm()
    }

    /// Returns the norm of the velocity vector, in meters per second
    pub fn vmag_m_s(&self) -> f64 {
        self.velocity_m_s.norm()
    }

    /// Returns the specific orbital energy v²/2 - μ/r, in m²/s²
    pub fn energy_m2_s2(&self, mu_m3_s2: f64) -> f64 {
        self.vmag_m_s().powi(2) / 2.0 - mu_m3_s2 / self.rmag_m()
    }

    /// Returns the specific angular momentum vector r × v, in m²/s
    pub fn hvec(&self) -> Vector3<f64> {
        self.position_m.cross(&self.velocity_m_s)
    }

    /// Returns the norm of the specific angular momentum, in m²/s
    pub fn hmag_m2_s(&self) -> f64 {
        self.hvec().norm()
    }

    /// Returns the eccentricity vector
    pub fn evec(&self, mu_m3_s2: f64) -> Vector3<f64> {
        let r = self.position_m;
        let v = self.velocity_m_s;
        ((v.norm_squared() - mu_m3_s2 / r.norm()) * r - r.dot(&v) * v) / mu_m3_s2
    }

    /// Returns the eccentricity (no unit)
    pub fn ecc(&self, mu_m3_s2: f64) -> f64 {
        self.evec(mu_m3_s2).norm()
    }

    /// Returns the semi-major axis -μ / 2E, in meters
    pub fn sma_m(&self, mu_m3_s2: f64) -> f64 {
        -mu_m3_s2 / (2.0 * self.energy_m2_s2(mu_m3_s2))
    }

    /// Returns the osculating true anomaly in degrees, in [0, 360).
    ///
    /// LIMITATION: the true anomaly is ill-defined for circular orbits, in which case a warning is logged and the
    /// tracked true anomaly of this state is returned instead.
    pub fn osculating_ta_deg(&self, mu_m3_s2: f64) -> f64 {
        let ecc = self.ecc(mu_m3_s2);
        if ecc < ECC_EPSILON {
            warn!("true anomaly ill-defined for circular orbit (e = {ecc})");
            return self.ta_deg;
        }
        let cos_nu = self.evec(mu_m3_s2).dot(&self.position_m) / (ecc * self.rmag_m());
        // Close to the apsides, rounding can push the cosine out of bounds
        let ta = cos_nu.acos();
        if ta.is_nan() {
            if cos_nu > 1.0 {
                0.0
            } else {
                180.0
            }
        } else if self.position_m.dot(&self.velocity_m_s) < 0.0 {
            (2.0 * PI - ta).to_degrees()
        } else {
            between_0_360(ta.to_degrees())
        }
    }

    /// Returns the distance between the positions of both states, in meters
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.position_m - other.position_m).norm()
    }

    /// Returns whether both states are within the provided position (m) and velocity (m/s) tolerances
    pub fn eq_within(&self, other: &Self, position_tol_m: f64, velocity_tol_m_s: f64) -> bool {
        abs_diff_eq!(self.position_m, other.position_m, epsilon = position_tol_m)
            && abs_diff_eq!(
                self.velocity_m_s,
                other.velocity_m_s,
                epsilon = velocity_tol_m_s
            )
    }
}

impl Default for OrbitalState {
    fn default() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros(), 0.0, 0.0)
    }
}

impl fmt::Display for OrbitalState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[t = {:.3} s] position = [{:.6}, {:.6}, {:.6}] m\tvelocity = [{:.6}, {:.6}, {:.6}] m/s\tta = {:.6} deg",
            self.time_s,
            self.position_m[0],
            self.position_m[1],
            self.position_m[2],
            self.velocity_m_s[0],
            self.velocity_m_s[1],
            self.velocity_m_s[2],
            self.ta_deg
        )
    }
}
