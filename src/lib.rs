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

/*! # kepler-space

Classical two-body orbital mechanics for a satellite around a single massive body:
Kepler's equation and anomaly conversions, vis-viva based calculators for period, speed,
angular rate and position, and a fixed-step semi-implicit Euler state propagator.

All calculators are pure functions on plain value types and return an [`OrbitError`]
when the orbit is underdetermined or structurally invalid.
*/

/// Provides the fixed step propagator and the single step integrator.
pub mod propagators;

/// Provides the two-body gravitational dynamics used by the propagators.
pub mod dynamics;

/// Provides the central bodies, the orbit descriptor, the anomaly conversions and the orbital calculators.
pub mod cosmic;

/// Utility functions shared by different modules, including the unit conversion boundary.
pub mod utils;

mod errors;
/// Calculators never panic: functions which may fail return an error.
pub use self::errors::OrbitError;

/// Orbital state vector, as used by the propagators.
pub mod state;

/// YAML configuration of scenarios.
pub mod io;

/// Mission design records: satellites, orbit types and the satellite registry.
pub mod md;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{CentralBody, OrbitDescriptor};
pub use self::state::OrbitalState;
