use crate::constants::{Degree, Radian, DPI};
use crate::errors::AlmagestError;

/// Convergence tolerance of the anomaly solvers, in radians
const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration cap of the fixed-point solvers. Realistic eccentricities converge in
/// under 10 iterations; the cap only guards against ill-posed inputs.
const ITMAX: usize = 50;

/// Reduce an angle in radians to its principal value in [0, 2π).
pub fn unwind(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Reduce an angle in degrees to [0, 360).
pub fn unwind_deg(a: Degree) -> Degree {
    a.rem_euclid(360.0)
}

/// Principal difference between two angles in radians, in [−π, π].
pub(crate) fn angle_diff(a: Radian, b: Radian) -> Radian {
    let mut diff = unwind(a) - unwind(b);
    if diff > std::f64::consts::PI {
        diff -= DPI;
    } else if diff < -std::f64::consts::PI {
        diff += DPI;
    }
    diff
}

/// Solve Kepler's equation `E - e·sin E = M` for the eccentric anomaly.
///
/// Newton's method starting from `E₀ = M`, iterating
/// `E ← E − (E − e·sin E − M) / (1 − e·cos E)` until the residual
/// `|E − e·sin E − M|` drops below 1e-6 radians.
///
/// Arguments
/// ---------
/// * `am`: mean anomaly in radians (any value; reduced to [0, 2π) internally).
/// * `ec`: orbital eccentricity, valid in [0, 1).
///
/// Return
/// ------
/// * The eccentric anomaly in radians, or [`AlmagestError::ConvergenceFailure`] if the
///   iteration cap is exceeded.
///
/// See also
/// --------
/// * [`true_anomaly`] – derives the true anomaly from this solution.
pub fn eccentric_anomaly(am: Radian, ec: f64) -> Result<Radian, AlmagestError> {
    let m = unwind(am);
    // E₀ = M is fine for planetary eccentricities; for highly eccentric orbits
    // Newton's method can overshoot from that start, while E₀ = π converges for
    // any M and e < 1.
    let mut ae = if ec < 0.5 { m } else { std::f64::consts::PI };

    for _ in 0..ITMAX {
        let d = ae - ec * ae.sin() - m;
        if d.abs() < KEPLER_TOLERANCE {
            return Ok(ae);
        }
        ae -= d / (1.0 - ec * ae.cos());
    }

    Err(AlmagestError::ConvergenceFailure {
        solver: "eccentric_anomaly",
        iterations: ITMAX,
    })
}

/// True anomaly from mean anomaly and eccentricity, via the half-angle tangent identity
/// `tan(ν/2) = √((1+e)/(1−e)) · tan(E/2)`.
///
/// Arguments
/// ---------
/// * `am`: mean anomaly in radians.
/// * `ec`: orbital eccentricity, valid in [0, 1).
///
/// Return
/// ------
/// * The true anomaly in radians, in (−π, π].
pub fn true_anomaly(am: Radian, ec: f64) -> Result<Radian, AlmagestError> {
    let ae = eccentric_anomaly(am, ec)?;
    let a = ((1.0 + ec) / (1.0 - ec)).sqrt() * (ae / 2.0).tan();
    Ok(2.0 * a.atan())
}

/// Solve the parabolic-orbit cubic `s³ + 3s = w` by fixed-point iteration.
///
/// Used in place of Kepler's equation when the eccentricity is fixed at 1: the solution
/// `s = tan(ν/2)` gives the true anomaly of a body on a parabolic orbit. Iterates
/// `s ← (2s³ + w) / (3(s² + 1))` from `s₀ = w/3` until `|(s² + 3)·s − w| < 1e-6`.
///
/// Return
/// ------
/// * The root `s`, or [`AlmagestError::ConvergenceFailure`] past the iteration cap.
pub fn parabolic_anomaly(w: f64) -> Result<f64, AlmagestError> {
    let mut s = w / 3.0;

    for _ in 0..ITMAX {
        if ((s * s + 3.0) * s - w).abs() < KEPLER_TOLERANCE {
            return Ok(s);
        }
        let s2 = s * s;
        s = (2.0 * s * s2 + w) / (3.0 * (s2 + 1.0));
    }

    Err(AlmagestError::ConvergenceFailure {
        solver: "parabolic_anomaly",
        iterations: ITMAX,
    })
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eccentric_anomaly_residual() {
        // Residual bound must hold across the whole admissible (e, M) plane.
        for i in 0..100 {
            let ec = i as f64 * 0.0099;
            for j in 0..36 {
                let am = j as f64 * DPI / 36.0;
                let ae = eccentric_anomaly(am, ec).unwrap();
                assert!((ae - ec * ae.sin() - unwind(am)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_circular_orbit() {
        // With e = 0 both anomalies collapse onto the mean anomaly.
        let am = 1.2345;
        assert_relative_eq!(eccentric_anomaly(am, 0.0).unwrap(), am, epsilon = 1e-6);
        assert_relative_eq!(true_anomaly(am, 0.0).unwrap(), am, epsilon = 1e-6);
    }

    #[test]
    fn test_true_anomaly_sign() {
        // Past apoapsis (M > π) the body approaches periapsis: ν reduced to (−π, π] is negative.
        let at = true_anomaly(4.5, 0.3).unwrap();
        assert!(at < 0.0);
        assert!(at > -std::f64::consts::PI);
    }

    #[test]
    fn test_parabolic_anomaly() {
        // s = 1 is the exact root of s³ + 3s = 4.
        let s = parabolic_anomaly(4.0).unwrap();
        assert_relative_eq!(s, 1.0, epsilon = 1e-6);

        // Root of the residual form, any w.
        let s = parabolic_anomaly(-2.7).unwrap();
        assert!(((s * s + 3.0) * s + 2.7).abs() < 1e-6);
    }

    #[test]
    fn test_unwind_idempotent() {
        for x in [-12.7, -0.1, 0.0, 3.5, 27.9] {
            let once = unwind(x);
            assert_eq!(unwind(once), once);
            assert!((0.0..DPI).contains(&once));
        }
        for x in [-730.0, -1.0, 0.0, 359.9, 3610.0] {
            let once = unwind_deg(x);
            assert_eq!(unwind_deg(once), once);
            assert!((0.0..360.0).contains(&once));
        }
    }
}
