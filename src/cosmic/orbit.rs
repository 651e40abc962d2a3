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

use super::CIRCULAR_ECC_EPSILON;
use crate::errors::{InvalidOrbitSnafu, OrbitError};
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;
use typed_builder::TypedBuilder;

/// OrbitDescriptor holds the known orbital parameters of a satellite, as entered by a user or stored in a registry.
///
/// Unlike a state vector, not every field is required. The semi-major axis, when strictly positive, takes priority over
/// the altitude, which is only meaningful for circular orbits. All calculators resolve the semi-major axis through
/// [`super::calculator::resolve_sma_m`].
///
/// **Units:** km, km, none, degrees, degrees, degrees, degrees
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
#[serde(default)]
pub struct OrbitDescriptor {
    /// Altitude above the surface of the central body, in km. Only used for circular orbits.
    #[builder(default)]
    pub altitude_km: f64,
    /// Semi-major axis in km, unknown if zero.
    #[builder(default)]
    pub sma_km: f64,
    /// Eccentricity, in [0, 1)
    #[builder(default)]
    pub ecc: f64,
    /// Inclination in degrees, in [0, 180]
    #[builder(default)]
    pub inc_deg: f64,
    /// Argument of periapsis in degrees, in [0, 360]
    #[builder(default)]
    pub aop_deg: f64,
    /// Right ascension of the ascending node in degrees, in [0, 360]
    #[builder(default)]
    pub raan_deg: f64,
    /// Current anomaly in degrees, in [0, 360]
    #[builder(default)]
    pub anomaly_deg: f64,
}

impl OrbitDescriptor {
    /// Creates a circular orbit at the provided altitude above the surface, in km.
    pub fn circular(altitude_km: f64) -> Self {
        Self {
            altitude_km,
            ..Default::default()
        }
    }

    /// Creates an elliptical orbit from its semi-major axis (km) and eccentricity.
    pub fn elliptical(sma_km: f64, ecc: f64) -> Self {
        Self {
            sma_km,
            ecc,
            ..Default::default()
        }
    }

    /// Returns a copy of this orbit with the provided inclination in degrees
    pub fn with_inc_deg(mut self, inc_deg: f64) -> Self {
        self.inc_deg = inc_deg;
        self
    }

    /// Returns a copy of this orbit with the provided current anomaly in degrees
    pub fn with_anomaly_deg(mut self, anomaly_deg: f64) -> Self {
        self.anomaly_deg = anomaly_deg;
        self
    }

    /// Returns whether this orbit is considered circular
    pub fn is_circular(&self) -> bool {
        self.ecc.abs() < CIRCULAR_ECC_EPSILON
    }

    /// Returns whether the semi-major axis of this orbit is known
    pub fn has_sma(&self) -> bool {
        self.sma_km > 0.0
    }

    /// Checks that all of the angles, the eccentricity and the distances are within their domain.
    ///
    /// This does not check that the orbit is fully determined, which depends on the computation requested.
    pub fn validate(&self) -> Result<(), OrbitError> {
        ensure!(
            self.altitude_km >= 0.0,
            InvalidOrbitSnafu {
                msg: format!("altitude must be non-negative, got {} km", self.altitude_km)
            }
        );
        ensure!(
            self.sma_km >= 0.0,
            InvalidOrbitSnafu {
                msg: format!("semi-major axis must be non-negative, got {} km", self.sma_km)
            }
        );
        ensure!(
            (0.0..1.0).contains(&self.ecc),
            InvalidOrbitSnafu {
                msg: format!("eccentricity must be in [0, 1), got {}", self.ecc)
            }
        );
        ensure!(
            (0.0..=180.0).contains(&self.inc_deg),
            InvalidOrbitSnafu {
                msg: format!("inclination must be in [0, 180] deg, got {}", self.inc_deg)
            }
        );
        for (name, angle) in [
            ("argument of periapsis", self.aop_deg),
            ("RAAN", self.raan_deg),
            ("anomaly", self.anomaly_deg),
        ] {
            ensure!(
                (0.0..=360.0).contains(&angle),
                InvalidOrbitSnafu {
                    msg: format!("{name} must be in [0, 360] deg, got {angle}")
                }
            );
        }
        Ok(())
    }
}

impl fmt::Display for OrbitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.has_sma() {
            write!(f, "sma = {} km", self.sma_km)?;
        } else {
            write!(f, "alt = {} km", self.altitude_km)?;
        }
        write!(
            f,
            "\tecc = {}\tinc = {} deg\traan = {} deg\taop = {} deg\tanomaly = {} deg",
            self.ecc, self.inc_deg, self.raan_deg, self.aop_deg, self.anomaly_deg
        )
    }
}
