//! Celestial coordinate transforms.
//!
//! Equatorial ↔ horizon by spherical trigonometry; ecliptic ↔ equatorial and
//! equatorial ↔ galactic as frame rotations; mean obliquity, the nutation series,
//! and the secular precession correction.
//!
//! The frame rotations are built as [`nalgebra`] matrices from elementary axis
//! rotations, so a transform is one matrix–vector product on the unit direction
//! vector of the coordinate pair.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Degree, Hour, Radian, J1900, J2000, JULIAN_CENTURY, RADEG};
use crate::kepler::{unwind, unwind_deg};
use crate::time::civil_date_to_julian_date;

/// Unit direction vector of a (longitude-like, latitude-like) angle pair in radians.
fn spherical_to_unit(lon: Radian, lat: Radian) -> Vector3<f64> {
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Inverse of [`spherical_to_unit`]; longitude comes back in [0, 2π).
fn unit_to_spherical(u: &Vector3<f64>) -> (Radian, Radian) {
    (unwind(u.y.atan2(u.x)), u.z.clamp(-1.0, 1.0).asin())
}

/// Rotation matrix around one of the principal axes (0 = X, 1 = Y, 2 = Z), direct sense.
fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };
    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Mean obliquity of the ecliptic for a Greenwich calendar date, in degrees.
///
/// Cubic polynomial in Julian centuries since J2000; the nutation term is **not**
/// included (see [`true_obliquity`]).
pub fn mean_obliquity(day: f64, month: u32, year: i32) -> Degree {
    let jd = civil_date_to_julian_date(day, month, year);
    let t = (jd - J2000) / JULIAN_CENTURY;
    let de = t * (46.815 + t * (0.0006 - t * 0.00181));
    23.439292 - de / 3600.0
}

/// Nutation in ecliptic longitude and in obliquity for a Greenwich calendar date.
///
/// Trigonometric series in the mean longitudes and anomalies of the Sun and Moon and
/// in the longitude of the Moon's ascending node, all expressed as linear rates plus
/// small quadratic corrections in centuries since 1900.0.
///
/// Return
/// ------
/// * `(Δψ, Δε)` in degrees.
pub fn nutation(day: f64, month: u32, year: i32) -> (Degree, Degree) {
    let t = (civil_date_to_julian_date(day, month, year) - J1900) / JULIAN_CENTURY;
    let t2 = t * t;

    // Fundamental arguments, degrees reduced to one revolution before use
    let a = 100.0021358 * t;
    let l1 = 279.6967 + 0.000303 * t2 + 360.0 * (a - a.floor());
    let l2 = 2.0 * l1 * RADEG;

    let a = 1336.855231 * t;
    let d1 = 270.4342 - 0.001133 * t2 + 360.0 * (a - a.floor());
    let d2 = 2.0 * d1 * RADEG;

    let a = 99.99736056 * t;
    let m1 = (358.4758 - 0.00015 * t2 + 360.0 * (a - a.floor())) * RADEG;

    let a = 1325.552359 * t;
    let m2 = (296.1046 + 0.009192 * t2 + 360.0 * (a - a.floor())) * RADEG;

    let a = 5.372616667 * t;
    let n1 = (259.1833 + 0.002078 * t2 - 360.0 * (a - a.floor())) * RADEG;
    let n2 = 2.0 * n1;

    let mut dp = (-17.2327 - 0.01737 * t) * n1.sin();
    dp += (-1.2729 - 0.00013 * t) * l2.sin() + 0.2088 * n2.sin();
    dp -= 0.2037 * d2.sin();
    dp += (0.1261 - 0.00031 * t) * m1.sin();
    dp += 0.0675 * m2.sin();
    dp -= (0.0497 - 0.00012 * t) * (l2 + m1).sin();
    dp -= 0.0342 * (d2 - n1).sin();
    dp -= 0.0261 * (d2 + m2).sin();
    dp += 0.0214 * (l2 - m1).sin();
    dp -= 0.0149 * (l2 - d2 + m2).sin();
    dp += 0.0124 * (l2 - n1).sin();
    dp += 0.0114 * (d2 - m2).sin();

    let mut de = (9.21 + 0.00091 * t) * n1.cos();
    de += (0.5522 - 0.00029 * t) * l2.cos();
    de -= 0.0904 * n2.cos();
    de += 0.0884 * d2.cos();
    de += 0.0216 * (l2 + m1).cos();
    de += 0.0183 * (d2 - n1).cos();
    de += 0.0113 * (d2 + m2).cos();
    de -= 0.0093 * (l2 - m1).cos();
    de -= 0.0066 * (l2 - n1).cos();

    (dp / 3600.0, de / 3600.0)
}

/// True obliquity of the ecliptic: mean obliquity plus the nutation-in-obliquity term.
pub fn true_obliquity(day: f64, month: u32, year: i32) -> Degree {
    mean_obliquity(day, month, year) + nutation(day, month, year).1
}

/// Ecliptic → equatorial conversion for a Greenwich calendar date, through the true
/// obliquity of that date.
///
/// Arguments
/// ---------
/// * `ecl_long`, `ecl_lat`: geocentric ecliptic coordinates in degrees.
///
/// Return
/// ------
/// * `(right ascension in decimal hours, declination in degrees)`.
pub fn ecliptic_to_equatorial(
    ecl_long: Degree,
    ecl_lat: Degree,
    day: f64,
    month: u32,
    year: i32,
) -> (Hour, Degree) {
    let obl = true_obliquity(day, month, year) * RADEG;
    let u = rotmt(obl, 0) * spherical_to_unit(ecl_long * RADEG, ecl_lat * RADEG);
    let (ra, dec) = unit_to_spherical(&u);
    (ra / RADEG / 15.0, dec / RADEG)
}

/// Equatorial → ecliptic conversion, the transpose rotation of
/// [`ecliptic_to_equatorial`].
pub fn equatorial_to_ecliptic(
    ra: Hour,
    dec: Degree,
    day: f64,
    month: u32,
    year: i32,
) -> (Degree, Degree) {
    let obl = true_obliquity(day, month, year) * RADEG;
    let u = rotmt(-obl, 0) * spherical_to_unit(ra * 15.0 * RADEG, dec * RADEG);
    let (lon, lat) = unit_to_spherical(&u);
    (lon / RADEG, lat / RADEG)
}

/// Right ascension of the galactic north pole, degrees (1950.0 convention).
const GALACTIC_POLE_RA: f64 = 192.25;
/// Declination of the galactic north pole, degrees.
const GALACTIC_POLE_DEC: f64 = 27.4;
/// Galactic longitude of the ascending node of the galactic plane on the equator.
const GALACTIC_NODE_OFFSET: f64 = 33.0;

/// Orthonormal equatorial→galactic basis: rows are the l = 0 direction, the l = 90°
/// direction, and the galactic pole.
fn galactic_matrix() -> Matrix3<f64> {
    let pole = spherical_to_unit(GALACTIC_POLE_RA * RADEG, GALACTIC_POLE_DEC * RADEG);
    // Ascending node of the galactic plane on the equator, at pole RA + 90°
    let node = spherical_to_unit((GALACTIC_POLE_RA + 90.0) * RADEG, 0.0);
    // The node sits at l = 33°, so the l = 0 axis is 33° back along the plane
    let e1 = Rotation3::from_axis_angle(
        &nalgebra::Unit::new_normalize(pole),
        -GALACTIC_NODE_OFFSET * RADEG,
    ) * node;
    let e2 = pole.cross(&e1);
    Matrix3::from_rows(&[e1.transpose(), e2.transpose(), pole.transpose()])
}

/// Equatorial → galactic conversion (fixed 1950.0 pole, no epoch argument).
pub fn equatorial_to_galactic(ra: Hour, dec: Degree) -> (Degree, Degree) {
    let u = galactic_matrix() * spherical_to_unit(ra * 15.0 * RADEG, dec * RADEG);
    let (l, b) = unit_to_spherical(&u);
    (l / RADEG, b / RADEG)
}

/// Galactic → equatorial conversion.
pub fn galactic_to_equatorial(gal_long: Degree, gal_lat: Degree) -> (Hour, Degree) {
    let u = galactic_matrix().transpose()
        * spherical_to_unit(gal_long * RADEG, gal_lat * RADEG);
    let (ra, dec) = unit_to_spherical(&u);
    (ra / RADEG / 15.0, dec / RADEG)
}

/// Hour angle of a body from its right ascension and the local sidereal time,
/// in decimal hours.
pub fn right_ascension_to_hour_angle(ra: Hour, lst: Hour) -> Hour {
    let h = lst - ra;
    if h < 0.0 {
        h + 24.0
    } else {
        h
    }
}

/// Right ascension from hour angle and local sidereal time. The operation is its own
/// inverse.
pub fn hour_angle_to_right_ascension(hour_angle: Hour, lst: Hour) -> Hour {
    right_ascension_to_hour_angle(hour_angle, lst)
}

/// Equatorial (hour angle, declination) → horizon (azimuth, altitude) for a
/// geographical latitude, in degrees. Azimuth is measured from north through east.
pub fn equatorial_to_horizon(hour_angle: Hour, dec: Degree, latitude: Degree) -> (Degree, Degree) {
    let h = hour_angle * 15.0 * RADEG;
    let d = dec * RADEG;
    let p = latitude * RADEG;

    let sin_alt = d.sin() * p.sin() + d.cos() * p.cos() * h.cos();
    let alt = sin_alt.asin();

    let y = -d.cos() * p.cos() * h.sin();
    let x = d.sin() - p.sin() * sin_alt;
    let az = y.atan2(x);

    (unwind_deg(az / RADEG), alt / RADEG)
}

/// Horizon (azimuth, altitude) → equatorial (hour angle in decimal hours,
/// declination in degrees).
pub fn horizon_to_equatorial(azimuth: Degree, altitude: Degree, latitude: Degree) -> (Hour, Degree) {
    let az = azimuth * RADEG;
    let alt = altitude * RADEG;
    let p = latitude * RADEG;

    let sin_dec = alt.sin() * p.sin() + alt.cos() * p.cos() * az.cos();
    let dec = sin_dec.asin();

    let y = -alt.cos() * p.cos() * az.sin();
    let x = alt.sin() - p.sin() * sin_dec;
    let ha = y.atan2(x);

    (unwind_deg(ha / RADEG) / 15.0, dec / RADEG)
}

/// Precess equatorial coordinates from one epoch to another.
///
/// Secular-rate formulation: annual precession in right ascension is
/// `m + n·sin α·tan δ` (seconds of time), in declination `n·cos α` (arcseconds),
/// with `m = 3.07234 + 0.00186·T₀` and `n = 20.0468 − 0.0085·T₀`, `T₀` in centuries
/// of the starting epoch since 1900.0.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: coordinates at the first epoch (decimal hours, degrees).
/// * `epoch1`, `epoch2`: Greenwich calendar dates `(day, month, year)`.
pub fn correct_for_precession(
    ra: Hour,
    dec: Degree,
    epoch1: (f64, u32, i32),
    epoch2: (f64, u32, i32),
) -> (Hour, Degree) {
    let jd1 = civil_date_to_julian_date(epoch1.0, epoch1.1, epoch1.2);
    let jd2 = civil_date_to_julian_date(epoch2.0, epoch2.1, epoch2.2);
    let t0 = (jd1 - J1900) / JULIAN_CENTURY;

    let m = 3.07234 + 0.00186 * t0;
    let n = 20.0468 - 0.0085 * t0;
    let years = (jd2 - jd1) / 365.25;

    let ra_rad = ra * 15.0 * RADEG;
    let dec_rad = dec * RADEG;

    let s1 = (m + n * ra_rad.sin() * dec_rad.tan() / 15.0) * years / 3600.0;
    let s2 = n * ra_rad.cos() * years / 3600.0;

    (ra + s1, dec + s2)
}
