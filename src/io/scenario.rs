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

use super::{ConfigError, ConfigRepr, InvalidConfigSnafu, OrbitSnafu};
use crate::cosmic::calculator::state_from_orbit;
use crate::cosmic::{CentralBody, OrbitDescriptor};
use crate::dynamics::TwoBody;
use crate::md::{RegistryError, SatelliteRegistry};
use crate::propagators::{PropOpts, Propagator};
use crate::time::{Duration, Unit};
use crate::OrbitalState;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSerde {
    pub name: String,
    pub orbit: OrbitDescriptor,
}

/// The propagation options of a scenario, in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationSerde {
    pub step_s: f64,
    pub duration_s: f64,
    #[serde(default)]
    pub max_steps: Option<u64>,
}

/// The serializable representation of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSerde {
    pub body: CentralBody,
    #[serde(default)]
    pub satellites: Vec<SatelliteSerde>,
    #[serde(default)]
    pub propagation: Option<PropagationSerde>,
}

impl ConfigRepr for ScenarioSerde {}

/// A validated scenario: a registry of satellites around its central body, and how to propagate them.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub registry: SatelliteRegistry,
    pub opts: PropOpts,
    /// Propagation duration, if one was configured
    pub duration: Option<Duration>,
}

impl Scenario {
    /// Loads and validates a scenario from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_config(ScenarioSerde::load(path)?)
    }

    /// Validates the configuration and builds the registry of satellites.
    pub fn from_config(cfg: ScenarioSerde) -> Result<Self, ConfigError> {
        let (opts, duration) = match cfg.propagation {
            Some(prop) => {
                ensure!(
                    prop.step_s.is_finite() && prop.step_s > 0.0,
                    InvalidConfigSnafu {
                        msg: format!("step must be strictly positive, got {} s", prop.step_s)
                    }
                );
                ensure!(
                    prop.duration_s.is_finite(),
                    InvalidConfigSnafu {
                        msg: format!("duration must be finite, got {} s", prop.duration_s)
                    }
                );
                let opts = PropOpts {
                    step: prop.step_s * Unit::Second,
                    max_steps: prop.max_steps,
                };
                (opts, Some(prop.duration_s * Unit::Second))
            }
            None => (PropOpts::default(), None),
        };

        let mut registry = SatelliteRegistry::new(cfg.body);
        for sat in cfg.satellites {
            match registry.add(sat.name, sat.orbit) {
                Ok(_) => {}
                Err(RegistryError::SatelliteOrbit { source, .. }) => {
                    return Err(ConfigError::Orbit { source });
                }
                Err(e) => {
                    return InvalidConfigSnafu {
                        msg: e.to_string(),
                    }
                    .fail();
                }
            }
        }

        info!(
            "Loaded scenario with {} satellite(s) around {}",
            registry.len(),
            registry.body()
        );

        Ok(Self {
            registry,
            opts,
            duration,
        })
    }

    /// The central body of this scenario
    pub fn body(&self) -> &CentralBody {
        self.registry.body()
    }

    /// Builds the propagator of this scenario: two body dynamics of the central body and the configured options.
    pub fn propagator(&self) -> Propagator<TwoBody> {
        Propagator::new(TwoBody::from_body(self.body()), self.opts)
    }

    /// Builds the initial state of the provided satellite from its orbit, at its current anomaly.
    pub fn initial_state(&self, name: &str) -> Result<OrbitalState, ConfigError> {
        let sat = self.registry.get(name).context(InvalidConfigSnafu {
            msg: format!("no satellite named {name}"),
        })?;
        state_from_orbit(&sat.orbit, self.body(), sat.orbit.anomaly_deg).context(OrbitSnafu)
    }
}
