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

use super::GRAVITATIONAL_CONSTANT;
use crate::errors::{InvalidOrbitSnafu, OrbitError};
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;

/// A massive body around which a satellite orbits.
///
/// The radius is in kilometers, the gravitational parameter in m^3/s^2.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CentralBodySerde")]
pub struct CentralBody {
    name: String,
    radius_km: f64,
    mass_kg: Option<f64>,
    mu_m3_s2: f64,
}

impl CentralBody {
    /// Creates a new central body, checking that the radius, the mass (if provided) and the gravitational parameter are positive.
    pub fn new(
        name: impl Into<String>,
        radius_km: f64,
        mass_kg: Option<f64>,
        mu_m3_s2: f64,
    ) -> Result<Self, OrbitError> {
        let name = name.into();
        ensure!(
            radius_km > 0.0,
            InvalidOrbitSnafu {
                msg: format!("radius of {name} must be positive, got {radius_km} km")
            }
        );
        if let Some(mass) = mass_kg {
            ensure!(
                mass > 0.0,
                InvalidOrbitSnafu {
                    msg: format!("mass of {name} must be positive, got {mass} kg")
                }
            );
        }
        ensure!(
            mu_m3_s2 > 0.0,
            InvalidOrbitSnafu {
                msg: format!(
                    "gravitational parameter of {name} must be positive, got {mu_m3_s2} m^3/s^2"
                )
            }
        );
        Ok(Self {
            name,
            radius_km,
            mass_kg,
            mu_m3_s2,
        })
    }

    /// Creates a new central body whose gravitational parameter is G * mass.
    pub fn from_mass(
        name: impl Into<String>,
        radius_km: f64,
        mass_kg: f64,
    ) -> Result<Self, OrbitError> {
        Self::new(name, radius_km, Some(mass_kg), mu_from_mass(mass_kg))
    }

    pub fn earth() -> Self {
        Self::preset("Earth", 6371.0, 5.9722e24, 3.986004418e14)
    }

    pub fn mars() -> Self {
        Self::preset("Mars", 3389.5, 6.4171e23, 4.282837e13)
    }

    pub fn moon() -> Self {
        Self::preset("Moon", 1737.4, 7.342e22, 4.9048695e12)
    }

    fn preset(name: &str, radius_km: f64, mass_kg: f64, mu_m3_s2: f64) -> Self {
        Self {
            name: name.to_string(),
            radius_km,
            mass_kg: Some(mass_kg),
            mu_m3_s2,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mean radius in kilometers
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Mass in kilograms, if known
    pub fn mass_kg(&self) -> Option<f64> {
        self.mass_kg
    }

    /// Gravitational parameter in m^3/s^2
    pub fn mu_m3_s2(&self) -> f64 {
        self.mu_m3_s2
    }
}

impl fmt::Display for CentralBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (R = {} km, mu = {:e} m^3/s^2)",
            self.name, self.radius_km, self.mu_m3_s2
        )
    }
}

/// Returns the gravitational parameter G * mass, in m^3/s^2.
pub fn mu_from_mass(mass_kg: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * mass_kg
}

/// Serialized form of a central body: the gravitational parameter may be omitted if the mass is provided.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CentralBodySerde {
    pub name: String,
    pub radius_km: f64,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default)]
    pub mu_m3_s2: Option<f64>,
}

impl TryFrom<CentralBodySerde> for CentralBody {
    type Error = OrbitError;

    fn try_from(repr: CentralBodySerde) -> Result<Self, Self::Error> {
        let mu = match (repr.mu_m3_s2, repr.mass_kg) {
            (Some(mu), _) => mu,
            (None, Some(mass)) => mu_from_mass(mass),
            (None, None) => {
                return InvalidOrbitSnafu {
                    msg: format!(
                        "{} requires either a mass or a gravitational parameter",
                        repr.name
                    ),
                }
                .fail()
            }
        };
        Self::new(repr.name, repr.radius_km, repr.mass_kg, mu)
    }
}
