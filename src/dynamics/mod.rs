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

use crate::linalg::Vector3;
use snafu::Snafu;
use std::fmt;

/// Point mass two-body dynamics.
pub mod orbital;
pub use self::orbital::*;

/// A trait for models which provide the acceleration of a satellite from its position.
///
/// The propagators only depend on this trait, so they can integrate any position dependent acceleration.
pub trait Dynamics: Clone + Send + Sync + fmt::Display {
    /// Returns the gravitational parameter of the central body, in m^3/s^2
    fn mu_m3_s2(&self) -> f64;

    /// Returns the acceleration in m/s^2 at the provided position in meters, relative to the center of the body.
    fn accel(&self, radius_m: &Vector3<f64>) -> Result<Vector3<f64>, DynamicsError>;
}

/// Dynamical model errors.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// The position is at the center of the body, where the acceleration is undefined.
    #[snafu(display("acceleration undefined at the center of the central body (|r| = {rmag_m} m)"))]
    ZeroRadius { rmag_m: f64 },
    /// The gravitational parameter must be positive.
    #[snafu(display("gravitational parameter must be positive, got {mu_m3_s2} m^3/s^2"))]
    InvalidMu { mu_m3_s2: f64 },
}
