//! Apparent-place corrections: atmospheric refraction, annual aberration, and
//! diurnal (geocentric → topocentric) parallax.

use crate::constants::{Degree, Hour, Radian, EARTH_FLATTENING, EARTH_MAJOR_AXIS, RADEG};

/// Refraction in degrees for an *apparent* altitude, using the two-branch empirical
/// formula: an inverse-tangent law above ~15°, a pressure/temperature rational
/// polynomial between −5° and 15°, and zero far below the horizon.
///
/// Arguments
/// ---------
/// * `apparent_alt`: apparent altitude in degrees.
/// * `pressure`: atmospheric pressure in millibars.
/// * `temperature`: air temperature in °C.
fn refraction_amount(apparent_alt: Degree, pressure: f64, temperature: f64) -> Degree {
    let y = apparent_alt * RADEG;
    if y >= 0.2617994 {
        return 0.00452 * pressure / ((273.0 + temperature) * y.tan());
    }
    if y < -0.087 {
        return 0.0;
    }
    let yd = apparent_alt;
    let a = ((0.00002 * yd + 0.0196) * yd + 0.1594) * pressure;
    let b = (273.0 + temperature) * ((0.0845 * yd + 0.505) * yd + 1.0);
    a / b
}

/// Observed (apparent) altitude → true altitude. Closed form: the refraction is
/// evaluated at the apparent altitude and subtracted.
pub fn apparent_to_true_altitude(apparent_alt: Degree, pressure: f64, temperature: f64) -> Degree {
    apparent_alt - refraction_amount(apparent_alt, pressure, temperature)
}

/// True altitude → observed (apparent) altitude.
///
/// The refraction formula is written in terms of the apparent altitude, so this
/// direction iterates the forward formula to a fixed point; convergence is reached
/// in a handful of passes everywhere above the horizon cutoff.
pub fn true_to_apparent_altitude(true_alt: Degree, pressure: f64, temperature: f64) -> Degree {
    let mut r = 0.0;
    for _ in 0..10 {
        let r1 = refraction_amount(true_alt + r, pressure, temperature);
        if (r1 - r).abs() < 1e-6 {
            return true_alt + r1;
        }
        r = r1;
    }
    true_alt + r
}

/// Annual aberration correction of geocentric ecliptic coordinates.
///
/// The displacement is −20.5″ scaled by the Sun–body geometry:
/// `Δλ = −20.5·cos(λ☉ − λ)/cos β`, `Δβ = −20.5·sin(λ☉ − λ)·sin β`.
///
/// Arguments
/// ---------
/// * `ecl_long`, `ecl_lat`: true ecliptic coordinates of the body, degrees.
/// * `sun_true_long`: the Sun's true ecliptic longitude at the same instant, degrees.
///
/// Return
/// ------
/// * Apparent `(longitude, latitude)` in degrees.
pub fn correct_for_aberration(
    ecl_long: Degree,
    ecl_lat: Degree,
    sun_true_long: Degree,
) -> (Degree, Degree) {
    let d = (sun_true_long - ecl_long) * RADEG;
    let d_long = -20.5 * d.cos() / (ecl_lat * RADEG).cos();
    let d_lat = -20.5 * d.sin() * (ecl_lat * RADEG).sin();
    (ecl_long + d_long / 3600.0, ecl_lat + d_lat / 3600.0)
}

/// Geocentric position factors of an observer: `ρ·cos φ'` and `ρ·sin φ'` in units of
/// the equatorial radius, from the geodetic latitude and the height above sea level.
struct ObserverPosition {
    rc: f64,
    rs: f64,
}

impl ObserverPosition {
    fn new(latitude: Degree, height_m: f64) -> Self {
        let phi = latitude * RADEG;
        let u = (EARTH_FLATTENING * phi.tan()).atan();
        let h = height_m / EARTH_MAJOR_AXIS;
        ObserverPosition {
            rc: u.cos() + h * phi.cos(),
            rs: EARTH_FLATTENING * u.sin() + h * phi.sin(),
        }
    }
}

/// One pass of the parallax displacement: apparent hour angle and declination
/// produced from the current estimate of the topocentric position.
///
/// The same bundle is recomputed each pass of the fixed-point loop, so it lives in
/// one struct rather than a pair of per-output helpers.
struct ParallaxGeometry {
    ha: Radian,
    dec: Radian,
}

impl ParallaxGeometry {
    /// Evaluate the displacement at estimate `(x1, y1)`, applying it to the true
    /// position `x` (hour angle, radians) and `y` (declination, radians).
    fn pass(x: Radian, x1: Radian, y1: Radian, obs: &ObserverPosition, rp: f64) -> Self {
        let cx = x1.cos();
        let sy = y1.sin();
        let cy = y1.cos();

        let dx = ((obs.rc * x1.sin()) / (rp * cy - obs.rc * cx)).atan();
        let ha = x + dx;
        let dec = (ha.cos() * (rp * sy - obs.rs) / (rp * cy * cx - obs.rc)).atan();

        ParallaxGeometry { ha, dec }
    }
}

/// Diurnal parallax: geocentric (true) → topocentric (apparent) hour angle and
/// declination.
///
/// The displacement formula is exact in the apparent coordinates, so the true →
/// apparent direction runs a **2-iteration fixed-point refinement**: the geometry is
/// evaluated at the true position, then once more at the refined estimate. This is
/// the same refinement structure (and tolerance class) as the rise/set solver's
/// two-pass loop.
///
/// Arguments
/// ---------
/// * `hour_angle`: geocentric hour angle in decimal hours.
/// * `dec`: geocentric declination in degrees.
/// * `latitude`: geodetic latitude in degrees.
/// * `height_m`: observer height above sea level in meters.
/// * `horizontal_parallax`: equatorial horizontal parallax of the body, degrees.
pub fn geocentric_to_topocentric(
    hour_angle: Hour,
    dec: Degree,
    latitude: Degree,
    height_m: f64,
    horizontal_parallax: Degree,
) -> (Hour, Degree) {
    let obs = ObserverPosition::new(latitude, height_m);
    let rp = 1.0 / (horizontal_parallax * RADEG).sin();

    let x = hour_angle * 15.0 * RADEG;
    let y = dec * RADEG;

    // Pass 1 at the true position, pass 2 at the refined estimate.
    let first = ParallaxGeometry::pass(x, x, y, &obs, rp);
    let geom = ParallaxGeometry::pass(x, first.ha, first.dec, &obs, rp);

    (geom.ha / RADEG / 15.0, geom.dec / RADEG)
}

/// Diurnal parallax: topocentric (apparent) → geocentric (true).
///
/// Runs the same two-pass refinement in reverse: a candidate geocentric position is
/// pushed through the forward displacement and corrected by the residual against the
/// observed coordinates.
pub fn topocentric_to_geocentric(
    hour_angle: Hour,
    dec: Degree,
    latitude: Degree,
    height_m: f64,
    horizontal_parallax: Degree,
) -> (Hour, Degree) {
    let obs = ObserverPosition::new(latitude, height_m);
    let rp = 1.0 / (horizontal_parallax * RADEG).sin();

    let x = hour_angle * 15.0 * RADEG;
    let y = dec * RADEG;

    let mut x1 = x;
    let mut y1 = y;
    for _ in 0..2 {
        let geom = ParallaxGeometry::pass(x1, x1, y1, &obs, rp);
        x1 += x - geom.ha;
        y1 += y - geom.dec;
    }

    (x1 / RADEG / 15.0, y1 / RADEG)
}

#[cfg(test)]
mod apparent_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_refraction_branches() {
        // Horizon refraction at standard conditions is close to 34 arcmin.
        let r = refraction_amount(0.0, 1012.0, 10.0);
        assert_relative_eq!(r, 0.57, epsilon = 0.02);

        // The two branches agree near the 15° seam.
        let low = refraction_amount(14.999, 1012.0, 10.0);
        let high = refraction_amount(15.001, 1012.0, 10.0);
        assert!((low - high).abs() < 0.002);

        // Far below the horizon there is nothing to refract.
        assert_eq!(refraction_amount(-6.0, 1012.0, 10.0), 0.0);
    }

    #[test]
    fn test_refraction_round_trip() {
        for alt in [1.0, 5.0, 19.334345, 62.0] {
            let apparent = true_to_apparent_altitude(alt, 1012.0, 21.7);
            assert!(apparent > alt);
            let back = apparent_to_true_altitude(apparent, 1012.0, 21.7);
            assert_relative_eq!(back, alt, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_aberration_scale() {
        // A body at opposition to the Sun is displaced by the full −20.5" in longitude.
        let (lon, lat) = correct_for_aberration(200.0, 0.0, 20.0);
        assert_relative_eq!(lon, 200.0 + 20.5 / 3600.0, epsilon = 1e-9);
        assert_eq!(lat, 0.0);

        // In quadrature the longitude displacement vanishes.
        let (lon, _) = correct_for_aberration(110.0, 30.0, 20.0);
        assert_relative_eq!(lon, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallax_round_trip() {
        // Moon-sized parallax; the 2-pass refinement inverts the single-pass formula
        // to well under an arcsecond.
        let (ha, dec) = geocentric_to_topocentric(22.588611, -7.686944, 50.0, 60.0, 1.019167);
        // Northern observer sees the body pushed south.
        assert!(dec < -7.686944);

        let (ha0, dec0) = topocentric_to_geocentric(ha, dec, 50.0, 60.0, 1.019167);
        assert_relative_eq!(ha0, 22.588611, epsilon = 1e-4);
        assert_relative_eq!(dec0, -7.686944, epsilon = 1e-3);
    }

    #[test]
    fn test_parallax_vanishes_for_distant_body() {
        // Solar-scale parallax barely moves the coordinates.
        let (ha, dec) = geocentric_to_topocentric(1.0, 10.0, 45.0, 0.0, 0.0024);
        assert_relative_eq!(ha, 1.0, epsilon = 1e-3);
        assert_relative_eq!(dec, 10.0, epsilon = 1e-2);
    }
}
