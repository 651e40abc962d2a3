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

//! Mission design records: satellites, their orbit type and the registry which stores them by name.

use crate::cosmic::calculator::{angular_velocity, orbital_period, orbital_velocity};
use crate::cosmic::{CentralBody, OrbitDescriptor, GEO_ALTITUDE_KM};
use crate::errors::OrbitError;
use crate::utils::m_to_km;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

mod registry;
pub use registry::*;

/// Maximum distance from the geostationary altitude for a circular orbit to be considered geostationary, in km.
pub const GEO_ALTITUDE_TOLERANCE_KM: f64 = 50.0;

/// The orbit type of a satellite, as a tag which does not change the computations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitType {
    Circular,
    Elliptical,
    Geostationary,
    Polar,
    Molniya,
}

impl OrbitType {
    /// Classifies the orbit with the following heuristics, in order:
    /// + Molniya: e > 0.6 and 62 deg < i < 65 deg
    /// + Geostationary: circular, within 50 km of the geostationary altitude and i < 1 deg
    /// + Polar: 80 deg <= i <= 100 deg
    /// + otherwise Circular or Elliptical depending on the eccentricity
    pub fn classify(orbit: &OrbitDescriptor, body: &CentralBody) -> Self {
        if orbit.ecc > 0.6 && orbit.inc_deg > 62.0 && orbit.inc_deg < 65.0 {
            Self::Molniya
        } else if orbit.is_circular()
            && orbit.inc_deg < 1.0
            && (Self::altitude_km(orbit, body) - GEO_ALTITUDE_KM).abs() < GEO_ALTITUDE_TOLERANCE_KM
        {
            Self::Geostationary
        } else if (80.0..=100.0).contains(&orbit.inc_deg) {
            Self::Polar
        } else if orbit.is_circular() {
            Self::Circular
        } else {
            Self::Elliptical
        }
    }

    fn altitude_km(orbit: &OrbitDescriptor, body: &CentralBody) -> f64 {
        if orbit.has_sma() {
            orbit.sma_km - body.radius_km()
        } else {
            orbit.altitude_km
        }
    }
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Circular => "circular",
            Self::Elliptical => "elliptical",
            Self::Geostationary => "geostationary",
            Self::Polar => "polar",
            Self::Molniya => "Molniya",
        };
        write!(f, "{name}")
    }
}

/// A satellite record: its orbit and the results derived from it.
///
/// The derived results are `None` until [`Satellite::refresh`] is called.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    pub orbit: OrbitDescriptor,
    pub orbit_type: OrbitType,
    /// Orbital period in seconds
    pub period_s: Option<f64>,
    /// Orbital velocity at the current anomaly, in meters per second
    pub velocity_m_s: Option<f64>,
    /// Mean angular velocity in degrees per second
    pub angular_velocity_deg_s: Option<f64>,
}

impl Satellite {
    /// Creates a new satellite record, classified around the provided body, without any derived result.
    pub fn new<S: Into<String>>(name: S, orbit: OrbitDescriptor, body: &CentralBody) -> Self {
        Self {
            name: name.into(),
            orbit,
            orbit_type: OrbitType::classify(&orbit, body),
            period_s: None,
            velocity_m_s: None,
            angular_velocity_deg_s: None,
        }
    }

    /// Computes the period, the velocity at the current anomaly and the mean angular velocity and stores them on
    /// this record. The orbit type is also reclassified.
    ///
    /// On error, the previous results are left untouched.
    pub fn refresh(&mut self, body: &CentralBody) -> Result<(), OrbitError> {
        let period_s = orbital_period(&self.orbit, body)?;
        let velocity_m_s = orbital_velocity(&self.orbit, body, self.orbit.anomaly_deg)?;

        self.orbit_type = OrbitType::classify(&self.orbit, body);
        self.period_s = Some(period_s);
        self.velocity_m_s = Some(velocity_m_s);
        self.angular_velocity_deg_s = Some(angular_velocity(period_s));
        Ok(())
    }

    /// Replaces the orbit of this satellite, which clears all the derived results.
    pub fn set_orbit(&mut self, orbit: OrbitDescriptor, body: &CentralBody) {
        *self = Self::new(self.name.clone(), orbit, body);
    }

    /// Returns whether all of the derived results are available
    pub fn is_computed(&self) -> bool {
        self.period_s.is_some() && self.velocity_m_s.is_some() && self.angular_velocity_deg_s.is_some()
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} orbit, {})", self.name, self.orbit_type, self.orbit)?;
        if let (Some(period_s), Some(velocity_m_s)) = (self.period_s, self.velocity_m_s) {
            write!(
                f,
                "\tperiod = {:.3} min\tvelocity = {:.3} km/s",
                period_s / 60.0,
                m_to_km(velocity_m_s)
            )?;
        }
        Ok(())
    }
}
