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

//! Orbital calculators on an [`OrbitDescriptor`] around a [`CentralBody`].
//!
//! Inputs are in kilometers and degrees, outputs in meters, seconds and degrees. Every calculator which needs the
//! semi-major axis resolves it with [`resolve_sma_m`], so the precedence of the semi-major axis over the altitude
//! and the resulting error kinds are identical everywhere.

use super::{CentralBody, OrbitDescriptor};
use crate::errors::{InsufficientParametersSnafu, InvalidOrbitSnafu, OrbitError};
use crate::linalg::Vector3;
use crate::state::OrbitalState;
use crate::utils::{km_to_m, perifocal_to_inertial};
use snafu::ensure;
use std::f64::consts::TAU;

fn insufficient(action: &'static str, orbit: &OrbitDescriptor) -> OrbitError {
    InsufficientParametersSnafu {
        action,
        sma_km: orbit.sma_km,
        altitude_km: orbit.altitude_km,
        ecc: orbit.ecc,
    }
    .build()
}

/// Returns the semi-major axis in kilometers from the periapsis and apoapsis ALTITUDES above the surface (km).
///
/// a = ((h_p + R) + (h_a + R)) / 2. The ordering of the apsides is not checked here, see [`calculate_eccentricity`].
pub fn calculate_semi_major_axis(
    periapsis_altitude_km: f64,
    apoapsis_altitude_km: f64,
    radius_km: f64,
) -> f64 {
    let rp_km = periapsis_altitude_km + radius_km;
    let ra_km = apoapsis_altitude_km + radius_km;
    (rp_km + ra_km) / 2.0
}

/// Returns the eccentricity from the periapsis and apoapsis altitudes above the surface (km): e = (r_a - r_p) / (r_a + r_p).
pub fn calculate_eccentricity(
    periapsis_altitude_km: f64,
    apoapsis_altitude_km: f64,
    radius_km: f64,
) -> Result<f64, OrbitError> {
    ensure!(
        periapsis_altitude_km >= 0.0 && apoapsis_altitude_km >= 0.0,
        InvalidOrbitSnafu {
            msg: format!(
                "altitudes cannot be negative (periapsis = {periapsis_altitude_km} km, apoapsis = {apoapsis_altitude_km} km)"
            )
        }
    );
    ensure!(
        apoapsis_altitude_km >= periapsis_altitude_km,
        InvalidOrbitSnafu {
            msg: format!(
                "apoapsis ({apoapsis_altitude_km} km) must be greater than periapsis ({periapsis_altitude_km} km)"
            )
        }
    );
    let rp_km = periapsis_altitude_km + radius_km;
    let ra_km = apoapsis_altitude_km + radius_km;
    Ok((ra_km - rp_km) / (ra_km + rp_km))
}

/// Returns the semi-major axis in meters, by priority:
/// 1. the semi-major axis of the orbit, if strictly positive;
/// 2. the radius of the body plus the altitude, if the altitude is strictly positive and the orbit is circular.
///
/// Errors with `InsufficientParameters` if neither is available, and with `InvalidOrbit` if the eccentricity is
/// outside [0, 1) or if the resolved semi-major axis is not positive.
pub fn resolve_sma_m(orbit: &OrbitDescriptor, body: &CentralBody) -> Result<f64, OrbitError> {
    resolve_sma_m_for("semi-major axis", orbit, body)
}

fn resolve_sma_m_for(
    action: &'static str,
    orbit: &OrbitDescriptor,
    body: &CentralBody,
) -> Result<f64, OrbitError> {
    ensure!(
        orbit.ecc < 1.0 && orbit.ecc > -super::CIRCULAR_ECC_EPSILON,
        InvalidOrbitSnafu {
            msg: format!(
                "{action} requires an elliptical orbit, got ecc = {}",
                orbit.ecc
            )
        }
    );

    let sma_m = if orbit.has_sma() {
        km_to_m(orbit.sma_km)
    } else if orbit.altitude_km > 0.0 && orbit.is_circular() {
        km_to_m(body.radius_km() + orbit.altitude_km)
    } else {
        return Err(insufficient(action, orbit));
    };

    ensure!(
        sma_m > 0.0,
        InvalidOrbitSnafu {
            msg: format!("semi-major axis must be positive, got {sma_m} m")
        }
    );

    Ok(sma_m)
}

/// Returns the orbital period in seconds from Kepler's third law: T = 2π √(a³ / μ).
///
/// For a 400 km circular orbit around the Earth, this is about 5550 seconds (92.5 minutes).
pub fn orbital_period(orbit: &OrbitDescriptor, body: &CentralBody) -> Result<f64, OrbitError> {
    let sma_m = resolve_sma_m_for("orbital period", orbit, body)?;
    Ok(TAU * (sma_m.powi(3) / body.mu_m3_s2()).sqrt())
}

/// Returns the distance from the center of the body in meters at the provided true anomaly (degrees).
///
/// For a circular orbit, this is the semi-major axis regardless of the true anomaly. Otherwise this is the conic
/// section radius r = a (1 - e²) / (1 + e cos θ).
pub fn current_distance_m(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
    ta_deg: f64,
) -> Result<f64, OrbitError> {
    let sma_m = resolve_sma_m_for("current distance", orbit, body)?;
    Ok(conic_radius_m(sma_m, orbit.ecc, ta_deg))
}

fn conic_radius_m(sma_m: f64, ecc: f64, ta_deg: f64) -> f64 {
    if ecc == 0.0 {
        sma_m
    } else {
        sma_m * (1.0 - ecc.powi(2)) / (1.0 + ecc * ta_deg.to_radians().cos())
    }
}

/// Returns the orbital velocity in meters per second at the provided true anomaly (degrees).
///
/// Elliptical orbits require a known semi-major axis and use the vis-viva equation v = √(μ (2/r - 1/a)).
/// Circular orbits use v = √(μ / a), where the true anomaly is ignored.
/// For circular orbits too, the semi-major axis takes precedence over the altitude when both are provided.
pub fn orbital_velocity(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
    ta_deg: f64,
) -> Result<f64, OrbitError> {
    let mu = body.mu_m3_s2();
    // Non-circular orbits only resolve from the semi-major axis
    let sma_m = resolve_sma_m_for("orbital velocity", orbit, body)?;
    if orbit.is_circular() {
        Ok((mu / sma_m).sqrt())
    } else {
        let r_m = conic_radius_m(sma_m, orbit.ecc, ta_deg);
        Ok((mu * (2.0 / r_m - 1.0 / sma_m)).sqrt())
    }
}

/// Returns the mean angular velocity in degrees per second: ω = 360 / T.
///
/// This is exact only for circular orbits. The period must not be zero, which is NOT checked.
pub fn angular_velocity(period_s: f64) -> f64 {
    360.0 / period_s
}

/// Returns the instantaneous angular velocity in degrees per second at the provided true anomaly (degrees): ω = h / r².
///
/// The specific angular momentum is h = √(μ a (1 - e²)). The angular velocity is largest at periapsis.
pub fn instantaneous_angular_velocity(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
    ta_deg: f64,
) -> Result<f64, OrbitError> {
    let sma_m = resolve_sma_m_for("instantaneous angular velocity", orbit, body)?;
    let hmag = (body.mu_m3_s2() * sma_m * (1.0 - orbit.ecc.powi(2))).sqrt();
    let r_m = conic_radius_m(sma_m, orbit.ecc, ta_deg);
    Ok((hmag / r_m.powi(2)).to_degrees())
}

/// Returns the (x, y) coordinates in meters of the satellite in the orbital plane, with X pointing to periapsis.
///
/// This is a 2-D position: neither the inclination nor the argument of periapsis are applied, see [`position_3d_m`].
pub fn calculate_elliptical_position(
    orbit: &OrbitDescriptor,
    ta_deg: f64,
) -> Result<(f64, f64), OrbitError> {
    if !orbit.has_sma() {
        return Err(insufficient("elliptical position", orbit));
    }
    let sma_m = km_to_m(orbit.sma_km);
    let r_m = sma_m * (1.0 - orbit.ecc.powi(2)) / (1.0 + orbit.ecc * ta_deg.to_radians().cos());
    let (sin_ta, cos_ta) = ta_deg.to_radians().sin_cos();
    Ok((r_m * cos_ta, r_m * sin_ta))
}

/// Returns the radius of periapsis in meters
pub fn periapsis_radius_m(orbit: &OrbitDescriptor, body: &CentralBody) -> Result<f64, OrbitError> {
    Ok(resolve_sma_m_for("periapsis radius", orbit, body)? * (1.0 - orbit.ecc))
}

/// Returns the radius of apoapsis in meters
pub fn apoapsis_radius_m(orbit: &OrbitDescriptor, body: &CentralBody) -> Result<f64, OrbitError> {
    Ok(resolve_sma_m_for("apoapsis radius", orbit, body)? * (1.0 + orbit.ecc))
}

/// Returns the semi parameter (or semilatus rectum) p = a (1 - e²), in meters
pub fn semi_parameter_m(orbit: &OrbitDescriptor, body: &CentralBody) -> Result<f64, OrbitError> {
    Ok(resolve_sma_m_for("semi parameter", orbit, body)? * (1.0 - orbit.ecc.powi(2)))
}

/// Returns the specific mechanical energy -μ / 2a, in m²/s²
pub fn specific_energy_m2_s2(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
) -> Result<f64, OrbitError> {
    let sma_m = resolve_sma_m_for("specific energy", orbit, body)?;
    Ok(-body.mu_m3_s2() / (2.0 * sma_m))
}

/// Returns the position in meters in the inertial frame of the body, by rotating the perifocal position by the
/// argument of periapsis, the inclination and the right ascension of the ascending node.
pub fn position_3d_m(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
    ta_deg: f64,
) -> Result<Vector3<f64>, OrbitError> {
    let r_m = current_distance_m(orbit, body, ta_deg)?;
    let (sin_ta, cos_ta) = ta_deg.to_radians().sin_cos();
    let dcm = perifocal_to_inertial(orbit.raan_deg, orbit.inc_deg, orbit.aop_deg);
    Ok(dcm * Vector3::new(r_m * cos_ta, r_m * sin_ta, 0.0))
}

/// Builds the orbital state (inertial position and velocity) of this orbit at the provided true anomaly (degrees).
///
/// The perifocal velocity is √(μ / p) (-sin θ, e + cos θ, 0), rotated to the inertial frame as in [`position_3d_m`].
/// The time of the returned state is zero.
pub fn state_from_orbit(
    orbit: &OrbitDescriptor,
    body: &CentralBody,
    ta_deg: f64,
) -> Result<OrbitalState, OrbitError> {
    let sma_m = resolve_sma_m_for("orbital state", orbit, body)?;
    let ecc = if orbit.is_circular() { 0.0 } else { orbit.ecc };
    let p_m = sma_m * (1.0 - ecc.powi(2));
    let r_m = p_m / (1.0 + ecc * ta_deg.to_radians().cos());
    let (sin_ta, cos_ta) = ta_deg.to_radians().sin_cos();

    let dcm = perifocal_to_inertial(orbit.raan_deg, orbit.inc_deg, orbit.aop_deg);
    let position_m = dcm * Vector3::new(r_m * cos_ta, r_m * sin_ta, 0.0);
    let velocity_m_s =
        dcm * ((body.mu_m3_s2() / p_m).sqrt() * Vector3::new(-sin_ta, ecc + cos_ta, 0.0));

    Ok(OrbitalState::new(position_m, velocity_m_s, ta_deg, 0.0))
}
