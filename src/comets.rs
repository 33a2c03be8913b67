//! Cometary positions: elliptical orbits from the periodic-comet catalog and
//! parabolic orbits anchored at a perihelion date.
//!
//! The elliptical case runs through the same Kepler solve and heliocentric →
//! geocentric projection as the planets; the parabolic case swaps Kepler's
//! equation for the cubic solver (eccentricity fixed at 1).

use crate::catalog::{CometEllipticalElements, CometParabolicElements};
use crate::constants::{Degree, Hour, PARABOLIC_RATE, RADEG};
use crate::errors::AlmagestError;
use crate::kepler::{parabolic_anomaly, unwind_deg};
use crate::planets::{heliocentric_state, project_to_geocentric, Heliocentric};
use crate::ref_system::ecliptic_to_equatorial;
use crate::sun::sun_ephemeris;
use crate::time::{
    civil_date_to_julian_date, greenwich_date_of_local, julian_date_to_decimal_year,
    local_civil_to_universal,
};

/// Equatorial position of a periodic comet for a local civil instant.
///
/// The mean anomaly advances 360° per orbital period from the perihelion epoch;
/// the rest is the shared elliptical machinery.
///
/// Return
/// ------
/// * `(right ascension in decimal hours, declination in degrees)`.
pub fn position_of_elliptical_comet(
    elements: &CometEllipticalElements,
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<(Hour, Degree), AlmagestError> {
    let ut = local_civil_to_universal(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let (gd, gm, gy) =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let jd = civil_date_to_julian_date(gd, gm, gy) + ut / 24.0;

    let years_since_perihelion = julian_date_to_decimal_year(jd) - elements.epoch_perihelion;
    let mean_anomaly = unwind_deg(360.0 * years_since_perihelion / elements.period);

    let h = heliocentric_state(
        mean_anomaly,
        elements.perihelion_longitude,
        elements.eccentricity,
        elements.semi_major_axis,
        elements.inclination,
        elements.node_longitude,
        0.0,
        0.0,
    )?;

    let sun = sun_ephemeris(ut, gd, gm, gy)?;
    let le = unwind_deg(sun.true_longitude + 180.0);
    let (lambda, beta) = project_to_geocentric(&h, le, sun.distance);
    Ok(ecliptic_to_equatorial(lambda, beta, gd, gm, gy))
}

/// Equatorial position of a parabolic comet for a local civil instant.
///
/// The anomaly comes from the cubic `s³ + 3s = w` with
/// `w = 0.0364911624·d / q^{3/2}` for `d` days from perihelion; the true anomaly is
/// `2·atan s` and the radius `q·(1 + s²)`.
pub fn position_of_parabolic_comet(
    elements: &CometParabolicElements,
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<(Hour, Degree), AlmagestError> {
    let ut = local_civil_to_universal(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let (gd, gm, gy) =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let jd = civil_date_to_julian_date(gd, gm, gy) + ut / 24.0;
    let jd_peri = civil_date_to_julian_date(
        elements.perihelion_day,
        elements.perihelion_month,
        elements.perihelion_year,
    );

    let d = jd - jd_peri;
    let q = elements.perihelion_distance;
    let w = PARABOLIC_RATE * d / (q * q.sqrt());
    let s = parabolic_anomaly(w)?;

    let nu = 2.0 * s.atan();
    let r = q * (1.0 + s * s);

    let lp = nu / RADEG + elements.perihelion_argument + elements.node_longitude;
    let lo = (lp - elements.node_longitude) * RADEG;
    let i = elements.inclination * RADEG;
    let psi = (lo.sin() * i.sin()).asin();
    let ld = (lo.sin() * i.cos()).atan2(lo.cos()) / RADEG + elements.node_longitude;
    let h = Heliocentric {
        ld,
        rd: r * psi.cos(),
        psi,
        r,
    };

    let sun = sun_ephemeris(ut, gd, gm, gy)?;
    let le = unwind_deg(sun.true_longitude + 180.0);
    let (lambda, beta) = project_to_geocentric(&h, le, sun.distance);
    Ok(ecliptic_to_equatorial(lambda, beta, gd, gm, gy))
}
