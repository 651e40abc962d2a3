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

pub use crate::errors::OrbitError;

// Re-Export the central bodies
mod bodies;
pub use self::bodies::*;

// Re-Export the orbit descriptor
mod orbit;
pub use self::orbit::*;

/// Conversions between mean, eccentric and true anomalies, including the Kepler equation solver.
pub mod anomaly;
pub use self::anomaly::{
    eccentric_anomaly_from_true, mean_anomaly_from_eccentric, solve_kepler, solve_kepler_equation,
    true_anomaly_from_eccentric, true_anomaly_from_mean, KeplerSolution,
};

/// Orbital period, velocity, angular velocity and position calculators.
pub mod calculator;

/// Newtonian constant of gravitation, in m^3 kg^-1 s^-2 (CODATA 2018)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Below this eccentricity, an orbit descriptor is treated as circular.
pub const CIRCULAR_ECC_EPSILON: f64 = 1e-10;

/// If a state vector has an eccentricity below the following value, its true anomaly is ill-defined (only affects how it is tracked)
pub const ECC_EPSILON: f64 = 1e-11;

/// Altitude of the geostationary belt above Earth's equator, in kilometers
pub const GEO_ALTITUDE_KM: f64 = 35_786.0;
