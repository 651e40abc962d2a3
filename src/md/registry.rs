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

use super::Satellite;
use crate::cosmic::{CentralBody, OrbitDescriptor};
use crate::errors::OrbitError;
use rayon::prelude::*;
use snafu::prelude::*;
use std::collections::btree_map::{BTreeMap, Values};

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    #[snafu(display("satellite {name} already exists"))]
    DuplicateSatellite { name: String },
    #[snafu(display("no satellite named {name}"))]
    UnknownSatellite { name: String },
    #[snafu(display("satellite {name}: {source}"))]
    SatelliteOrbit { name: String, source: OrbitError },
}

/// An in-memory registry of satellites, stored by name, around a single central body.
///
/// Iteration is in the lexicographic order of the names.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteRegistry {
    body: CentralBody,
    satellites: BTreeMap<String, Satellite>,
}

impl SatelliteRegistry {
    pub fn new(body: CentralBody) -> Self {
        Self {
            body,
            satellites: BTreeMap::new(),
        }
    }

    /// The central body of all of the satellites of this registry
    pub fn body(&self) -> &CentralBody {
        &self.body
    }

    /// Adds a new satellite with the provided orbit, which must be valid. Returns a reference to the new record.
    pub fn add<S: Into<String>>(
        &mut self,
        name: S,
        orbit: OrbitDescriptor,
    ) -> Result<&Satellite, RegistryError> {
        let name = name.into();
        ensure!(
            !self.satellites.contains_key(&name),
            DuplicateSatelliteSnafu { name }
        );
        orbit
            .validate()
            .context(SatelliteOrbitSnafu { name: name.clone() })?;

        debug!("adding satellite {name} with {orbit}");
        let sat = Satellite::new(name.clone(), orbit, &self.body);
        Ok(self.satellites.entry(name).or_insert(sat))
    }

    pub fn get(&self, name: &str) -> Option<&Satellite> {
        self.satellites.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.satellites.contains_key(name)
    }

    /// Removes the satellite from the registry and returns it.
    pub fn remove(&mut self, name: &str) -> Result<Satellite, RegistryError> {
        self.satellites
            .remove(name)
            .context(UnknownSatelliteSnafu { name })
    }

    /// Replaces the orbit of an existing satellite. The derived results of that satellite are cleared.
    pub fn update(&mut self, name: &str, orbit: OrbitDescriptor) -> Result<&Satellite, RegistryError> {
        orbit.validate().context(SatelliteOrbitSnafu { name })?;
        let sat = self
            .satellites
            .get_mut(name)
            .context(UnknownSatelliteSnafu { name })?;
        sat.set_orbit(orbit, &self.body);
        Ok(sat)
    }

    /// Computes the derived results of a single satellite and returns the refreshed record.
    pub fn refresh(&mut self, name: &str) -> Result<&Satellite, RegistryError> {
        let sat = self
            .satellites
            .get_mut(name)
            .context(UnknownSatelliteSnafu { name })?;
        sat.refresh(&self.body)
            .context(SatelliteOrbitSnafu { name })?;
        Ok(sat)
    }

    /// Computes the derived results of all of the satellites in parallel.
    ///
    /// All of the satellites which can be computed are refreshed; the first error in name order is returned.
    pub fn refresh_all(&mut self) -> Result<(), RegistryError> {
        let body = &self.body;
        let errors: Vec<RegistryError> = self
            .satellites
            .par_iter_mut()
            .filter_map(|(name, sat)| {
                sat.refresh(body)
                    .context(SatelliteOrbitSnafu { name: name.clone() })
                    .err()
            })
            .collect();

        match errors.into_iter().next() {
            Some(err) => {
                warn!("{err}");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Iterates through all of the satellites, in name order
    pub fn iter(&self) -> Values<'_, String, Satellite> {
        self.satellites.values()
    }

    /// Returns the names of all of the satellites, in order
    pub fn names(&self) -> Vec<&str> {
        self.satellites.keys().map(|name| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}
