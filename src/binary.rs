//! Apparent orbits of visual binary stars.
//!
//! The secondary's position angle and separation follow from one Kepler solve on
//! the catalog elements and the projection of the true orbit onto the sky plane.

use crate::catalog::BinaryElements;
use crate::constants::{Degree, RADEG};
use crate::errors::AlmagestError;
use crate::kepler::{eccentric_anomaly, true_anomaly, unwind_deg};
use crate::time::{civil_date_to_julian_date, julian_date_to_decimal_year};

/// Apparent position angle (degrees east of north) and separation (arcseconds) of
/// a binary's secondary for a Greenwich calendar date.
///
/// The mean anomaly advances 360° per period from the periastron epoch; the true
/// orbit `(ν, r)` is then tilted by the inclination and rotated to the node's
/// position angle:
///
/// ```text
/// θ = atan2(sin(ν + ω)·cos i, cos(ν + ω)) + Ω
/// ρ = r·cos(ν + ω) / cos(θ − Ω)
/// ```
pub fn binary_star_orbit(
    elements: &BinaryElements,
    greenwich_day: f64,
    month: u32,
    year: i32,
) -> Result<(Degree, f64), AlmagestError> {
    let jd = civil_date_to_julian_date(greenwich_day, month, year);
    let years = julian_date_to_decimal_year(jd) - elements.epoch_periastron;
    let mean_anomaly = unwind_deg(360.0 * years / elements.period) * RADEG;

    let ae = eccentric_anomaly(mean_anomaly, elements.eccentricity)?;
    let nu = true_anomaly(mean_anomaly, elements.eccentricity)?;
    let r = elements.semi_major_axis * (1.0 - elements.eccentricity * ae.cos());

    let u = nu + elements.periastron_longitude * RADEG;
    let i = elements.inclination * RADEG;
    let theta = (u.sin() * i.cos()).atan2(u.cos()) + elements.node_position_angle * RADEG;
    let rho = r * u.cos() / (theta - elements.node_position_angle * RADEG).cos();

    Ok((unwind_deg(theta / RADEG), rho.abs()))
}

#[cfg(test)]
mod binary_test {
    use super::*;
    use crate::catalog::binary_elements;
    use approx::assert_relative_eq;

    #[test]
    fn test_eta_cor_1980() {
        // eta-Cor at 1 Jan 1980: position angle 318.5°, separation 0.41".
        let b = binary_elements("eta-Cor").unwrap();
        let (pa, sep) = binary_star_orbit(b, 1.0, 1, 1980).unwrap();
        assert_relative_eq!(pa, 318.5, epsilon = 0.5);
        assert_relative_eq!(sep, 0.41, epsilon = 0.02);
    }

    #[test]
    fn test_separation_bounded_by_orbit() {
        // The projected separation never exceeds the apoastron distance.
        let b = binary_elements("gamma-Vir").unwrap();
        let max = b.semi_major_axis * (1.0 + b.eccentricity);
        for year in (1840..2030).step_by(7) {
            let (_, sep) = binary_star_orbit(b, 1.0, 1, year).unwrap();
            assert!(sep <= max + 1e-9, "sep {sep} in {year}");
        }
    }
}
