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

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OrbitError {
    /// Neither a semi-major axis nor an altitude of a circular orbit is available.
    #[snafu(display(
        "cannot compute {action}: insufficient parameters (sma = {sma_km} km, alt = {altitude_km} km, ecc = {ecc})"
    ))]
    InsufficientParameters {
        action: &'static str,
        sma_km: f64,
        altitude_km: f64,
        ecc: f64,
    },
    /// Structurally invalid orbit (unsupported eccentricity, negative altitudes, etc.)
    #[snafu(display("invalid orbit: {msg}"))]
    InvalidOrbit { msg: String },
    /// Newton-Raphson iterations exhausted before the requested tolerance was reached
    #[snafu(display(
        "Kepler's equation did not converge after {iterations} iterations (residual = {residual:e} rad)"
    ))]
    DidNotConverge { iterations: usize, residual: f64 },
}

impl OrbitError {
    /// Returns true if this error is due to an underdetermined orbit
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientParameters { .. })
    }

    /// Returns true if this error is due to a structurally invalid orbit
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidOrbit { .. })
    }
}
