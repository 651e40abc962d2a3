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
use crate::errors::{DidNotConvergeSnafu, InvalidOrbitSnafu, OrbitError};
use snafu::ensure;
use std::f64::consts::TAU;
use std::fmt;

/// Default tolerance on the eccentric anomaly update, in radians
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1e-12;

/// Maximum number of Newton-Raphson iterations
pub const KEPLER_MAX_ITER: usize = 50;

/// Outcome of the Newton-Raphson solution of Kepler's equation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in degrees
    pub ea_deg: f64,
    /// Number of Newton-Raphson iterations used
    pub iterations: usize,
    /// Absolute value of E - e sin(E) - M at the returned estimate, in radians
    pub residual_rad: f64,
    /// Whether the last update was smaller than the requested tolerance
    pub converged: bool,
}

impl KeplerSolution {
    /// Returns the eccentric anomaly in degrees if the solver converged, and a `DidNotConverge` error otherwise.
    pub fn converged_or_err(self) -> Result<f64, OrbitError> {
        ensure!(
            self.converged,
            DidNotConvergeSnafu {
                iterations: self.iterations,
                residual: self.residual_rad
            }
        );
        Ok(self.ea_deg)
    }
}

impl fmt::Display for KeplerSolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "E = {} deg after {} iterations (residual {:.3e} rad, converged: {})",
            self.ea_deg, self.iterations, self.residual_rad, self.converged
        )
    }
}

fn check_elliptical(ecc: f64) -> Result<(), OrbitError> {
    ensure!(
        ecc < 1.0,
        InvalidOrbitSnafu {
            msg: format!("only elliptical orbits are supported, got ecc = {ecc}")
        }
    );
    ensure!(
        ecc >= 0.0,
        InvalidOrbitSnafu {
            msg: format!("eccentricity must be non-negative, got {ecc}")
        }
    );
    Ok(())
}

/// Solves Kepler's equation M = E - e sin(E) with Newton-Raphson, and reports whether the solution converged.
///
/// The mean anomaly `ma_deg` is in degrees. For a circular orbit (|e| < 1e-10), E = M and no iteration is performed.
/// Otherwise, M is reduced to [0, 2π), the iterations are seeded with E = M and stop once the update is smaller than
/// `tolerance` (in radians), or after [`KEPLER_MAX_ITER`] iterations.
pub fn solve_kepler(ma_deg: f64, ecc: f64, tolerance: f64) -> Result<KeplerSolution, OrbitError> {
    if ecc.abs() < CIRCULAR_ECC_EPSILON {
        return Ok(KeplerSolution {
            ea_deg: ma_deg,
            iterations: 0,
            residual_rad: 0.0,
            converged: true,
        });
    }

    check_elliptical(ecc)?;

    let mut ma = ma_deg.to_radians() % TAU;
    if ma < 0.0 {
        ma += TAU;
    }

    let mut ea = ma;
    let mut iterations = 0;
    let mut converged = false;
    while iterations < KEPLER_MAX_ITER {
        iterations += 1;
        let f = ea - ecc * ea.sin() - ma;
        let f_prime = 1.0 - ecc * ea.cos();
        let next_ea = ea - f / f_prime;
        let delta = (next_ea - ea).abs();
        ea = next_ea;
        if delta < tolerance {
            converged = true;
            break;
        }
    }

    Ok(KeplerSolution {
        ea_deg: ea.to_degrees(),
        iterations,
        residual_rad: (ea - ecc * ea.sin() - ma).abs(),
        converged,
    })
}

/// Solves Kepler's equation M = E - e sin(E) and returns the eccentric anomaly in degrees.
///
/// If the solver has not converged within [`KEPLER_MAX_ITER`] iterations, the best estimate is returned and a warning
/// is logged. Use [`solve_kepler`] to inspect the convergence of the solution.
pub fn solve_kepler_equation(ma_deg: f64, ecc: f64, tolerance: f64) -> Result<f64, OrbitError> {
    let solution = solve_kepler(ma_deg, ecc, tolerance)?;
    if !solution.converged {
        warn!(
            "Kepler's equation not solved to {tolerance:e} rad for M = {ma_deg} deg, ecc = {ecc}: {solution}"
        );
    }
    Ok(solution.ea_deg)
}

/// Converts an eccentric anomaly into a true anomaly, both in degrees: θ = 2 atan(√((1+e)/(1-e)) tan(E/2)).
///
/// LIMITATION: no branch correction is applied, so the result is within (-180, 180] deg even if the input is in [0, 360).
pub fn true_anomaly_from_eccentric(ea_deg: f64, ecc: f64) -> Result<f64, OrbitError> {
    ensure!(
        (ecc - 1.0).abs() >= CIRCULAR_ECC_EPSILON,
        InvalidOrbitSnafu {
            msg: "parabolic orbits are not supported".to_string()
        }
    );

    if ecc.abs() < CIRCULAR_ECC_EPSILON {
        return Ok(ea_deg);
    }

    check_elliptical(ecc)?;

    let half_ea = ea_deg.to_radians() / 2.0;
    let term = ((1.0 + ecc) / (1.0 - ecc)).sqrt() * half_ea.tan();
    Ok((2.0 * term.atan()).to_degrees())
}

/// Converts a true anomaly into an eccentric anomaly, both in degrees: E = 2 atan(√((1-e)/(1+e)) tan(θ/2)).
///
/// As for [`true_anomaly_from_eccentric`], the result is within (-180, 180] deg.
pub fn eccentric_anomaly_from_true(ta_deg: f64, ecc: f64) -> Result<f64, OrbitError> {
    if ecc.abs() < CIRCULAR_ECC_EPSILON {
        return Ok(ta_deg);
    }

    check_elliptical(ecc)?;

    let half_ta = ta_deg.to_radians() / 2.0;
    let term = ((1.0 - ecc) / (1.0 + ecc)).sqrt() * half_ta.tan();
    Ok((2.0 * term.atan()).to_degrees())
}

/// Returns the mean anomaly M = E - e sin(E), in degrees, from the eccentric anomaly in degrees.
///
/// The result is not reduced to [0, 360).
pub fn mean_anomaly_from_eccentric(ea_deg: f64, ecc: f64) -> Result<f64, OrbitError> {
    if ecc.abs() < CIRCULAR_ECC_EPSILON {
        return Ok(ea_deg);
    }

    check_elliptical(ecc)?;

    let ea = ea_deg.to_radians();
    Ok((ea - ecc * ea.sin()).to_degrees())
}

/// Returns the true anomaly in degrees from the mean anomaly in degrees, using the default solver tolerance.
pub fn true_anomaly_from_mean(ma_deg: f64, ecc: f64) -> Result<f64, OrbitError> {
    let ea_deg = solve_kepler_equation(ma_deg, ecc, DEFAULT_KEPLER_TOLERANCE)?;
    true_anomaly_from_eccentric(ea_deg, ecc)
}
