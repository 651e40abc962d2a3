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

use crate::linalg::Matrix3;

/// Number of meters in a kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Converts a distance in kilometers into meters.
///
/// This is the only place where kilometer inputs enter the meter based physics.
pub fn km_to_m(km: f64) -> f64 {
    km * METERS_PER_KM
}

/// Converts a distance in meters into kilometers.
pub fn m_to_km(m: f64) -> f64 {
    m / METERS_PER_KM
}

/// Returns the provided angle bounded between 0.0 and 360.0
pub fn between_0_360(angle: f64) -> f64 {
    let mut bounded = angle % 360.0;
    if bounded < 0.0 {
        bounded += 360.0;
    }
    bounded
}

/// Returns the provided angle bounded between -180.0 and +180.0
pub fn between_pm_180(angle: f64) -> f64 {
    let mut bounded = between_0_360(angle);
    if bounded > 180.0 {
        bounded -= 360.0;
    }
    bounded
}

/// Returns the smallest signed difference between two angles in degrees, in [-180, 180]
pub fn angle_diff_deg(a: f64, b: f64) -> f64 {
    between_pm_180(a - b)
}

/// Rotation matrix about the X axis (passive rotation of the frame by `angle_rad`)
pub fn r1(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation matrix about the Z axis (passive rotation of the frame by `angle_rad`)
pub fn r3(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Returns the direction cosine matrix from the perifocal frame to the inertial frame.
///
/// R = R3(-raan) * R1(-inc) * R3(-aop), all angles in degrees.
pub fn perifocal_to_inertial(raan_deg: f64, inc_deg: f64, aop_deg: f64) -> Matrix3<f64> {
    r3(-raan_deg.to_radians()) * r1(-inc_deg.to_radians()) * r3(-aop_deg.to_radians())
}
