//! Solar ephemeris and the Sun-driven horizon events.
//!
//! The position series evaluates the Sun's mean elements as polynomials in
//! centuries since the 1900.0 epoch, solves Kepler's equation for the true
//! anomaly, and applies the five-term periodic perturbation correction. Sunrise,
//! sunset, and the twilights wrap the generic rise/set solver in the two-pass
//! fixed-point refinement: the Sun's longitude is evaluated at a rough estimate of
//! the event, and the event is recomputed from the refined longitude.

use crate::constants::{
    Au, Degree, Hour, Radian, J1900, JULIAN_CENTURY, RADEG, SUN_DIA_1AU, SUN_VERTICAL_SHIFT,
};
use crate::errors::AlmagestError;
use crate::kepler::{eccentric_anomaly, true_anomaly, unwind};
use crate::ref_system::ecliptic_to_equatorial;
use crate::riseset::{
    rise_azimuth, rise_set_local_sidereal_times, set_azimuth, RiseSetStatus, TwilightStatus,
};
use crate::time::{
    civil_date_to_julian_date, greenwich_date_of_local, greenwich_sidereal_to_universal,
    local_civil_to_universal, local_sidereal_to_greenwich_sidereal, universal_to_local_civil,
    SiderealConversionStatus,
};

/// Twilight depression angles below the geometric horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwilightKind {
    Civil,
    Nautical,
    Astronomical,
}

impl TwilightKind {
    fn depression(self) -> Degree {
        match self {
            TwilightKind::Civil => 6.0,
            TwilightKind::Nautical => 12.0,
            TwilightKind::Astronomical => 18.0,
        }
    }
}

/// Geocentric solar position quantities for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEphemeris {
    /// True ecliptic longitude, degrees in [0, 360).
    pub true_longitude: Degree,
    /// Earth–Sun distance in AU.
    pub distance: Au,
    /// Apparent angular diameter, degrees.
    pub angular_diameter: Degree,
    /// Mean anomaly, radians.
    pub mean_anomaly: Radian,
}

/// Evaluate the solar position series at a universal time on a Greenwich calendar
/// date.
///
/// The mean longitude, mean anomaly, and orbital eccentricity are low-order
/// polynomials in centuries since 1900.0; the equation of centre comes from the
/// Kepler solver; five periodic terms correct the longitude and three more the
/// radius vector.
pub fn sun_ephemeris(
    ut: Hour,
    greenwich_day: f64,
    month: u32,
    year: i32,
) -> Result<SunEphemeris, AlmagestError> {
    let jd = civil_date_to_julian_date(greenwich_day, month, year);
    let t = (jd - J1900) / JULIAN_CENTURY + ut / 876600.0;
    let t2 = t * t;

    let a = 100.0021359 * t;
    let l = 279.69668 + 0.0003025 * t2 + 360.0 * (a - a.floor());

    let a = 99.99736042 * t;
    let m1 = 358.47583 - (0.00015 + 0.0000033 * t) * t2 + 360.0 * (a - a.floor());

    let ec = 0.01675104 - 0.0000418 * t - 0.000000126 * t2;

    let am = m1 * RADEG;
    let at = true_anomaly(am, ec)?;
    let ae = eccentric_anomaly(am, ec)?;

    // Perturbations by the Moon and the major planets
    let a = 62.55209472 * t;
    let a1 = (153.23 + 360.0 * (a - a.floor())) * RADEG;
    let a = 125.1041894 * t;
    let b1 = (216.57 + 360.0 * (a - a.floor())) * RADEG;
    let a = 91.56766028 * t;
    let c1 = (312.69 + 360.0 * (a - a.floor())) * RADEG;
    let a = 1236.853095 * t;
    let d1 = (350.74 - 0.00144 * t2 + 360.0 * (a - a.floor())) * RADEG;
    let e1 = (231.19 + 20.2 * t) * RADEG;
    let a = 183.1353208 * t;
    let h1 = (353.4 + 360.0 * (a - a.floor())) * RADEG;

    let d2 = 0.00134 * a1.cos() + 0.00154 * b1.cos() + 0.002 * c1.cos()
        + 0.00179 * d1.sin()
        + 0.00178 * e1.sin();
    let d3 = 0.00000543 * a1.sin() + 0.00001575 * b1.sin() + 0.00001627 * c1.sin()
        + 0.00003076 * d1.cos()
        + 0.00000927 * h1.sin();

    let sr = unwind(at + (l - m1 + d2) * RADEG);
    let rr = 1.0000002 * (1.0 - ec * ae.cos()) + d3;

    Ok(SunEphemeris {
        true_longitude: sr / RADEG,
        distance: rr,
        angular_diameter: SUN_DIA_1AU / rr,
        mean_anomaly: am,
    })
}

/// Precise equatorial position of the Sun for a local civil instant.
///
/// Return
/// ------
/// * `(right ascension in decimal hours, declination in degrees)`.
pub fn precise_position_of_sun(
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
    let eph = sun_ephemeris(ut, gd, gm, gy)?;
    Ok(ecliptic_to_equatorial(eph.true_longitude, 0.0, gd, gm, gy))
}

/// Earth–Sun distance in AU for a local civil instant.
pub fn sun_distance(
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<Au, AlmagestError> {
    let ut = local_civil_to_universal(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let (gd, gm, gy) =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    Ok(sun_ephemeris(ut, gd, gm, gy)?.distance)
}

/// Apparent angular diameter of the Sun in degrees for a local civil instant.
pub fn sun_angular_diameter(
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<Degree, AlmagestError> {
    let ut = local_civil_to_universal(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let (gd, gm, gy) =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    Ok(sun_ephemeris(ut, gd, gm, gy)?.angular_diameter)
}

/// Result of a Sun horizon event search (sunrise, sunset, or a twilight boundary).
#[derive(Debug, Clone, Copy, PartialEq)]
struct SunHorizonEvent {
    /// Universal time of the event, decimal hours.
    ut: Hour,
    /// The Sun's declination at the refined event time, degrees.
    dec: Degree,
    /// Greenwich calendar date the universal time refers to.
    greenwich_date: (f64, u32, i32),
}

/// Two-pass search for the universal time at which the Sun crosses the shifted
/// horizon. The first pass uses the Sun's longitude at local noon; the second
/// re-evaluates the longitude at the first estimate of the event.
fn sun_horizon_event(
    day: f64,
    month: u32,
    year: i32,
    daylight_saving: bool,
    zone_correction: f64,
    longitude: Degree,
    latitude: Degree,
    vertical_shift: Degree,
    rising: bool,
) -> Result<(RiseSetStatus, Option<SunHorizonEvent>), AlmagestError> {
    let (gd, gm, gy) =
        greenwich_date_of_local(12.0, 0.0, 0.0, daylight_saving, zone_correction, day, month, year);
    let noon_ut =
        local_civil_to_universal(12.0, 0.0, 0.0, daylight_saving, zone_correction, day, month, year);

    let mut lambda = sun_ephemeris(noon_ut, gd, gm, gy)?.true_longitude;
    let mut event = None;

    for _ in 0..2 {
        let (ra, dec) = ecliptic_to_equatorial(lambda, 0.0, gd, gm, gy);
        let (status, times) = rise_set_local_sidereal_times(ra, dec, vertical_shift, latitude);
        let Some((lst_rise, lst_set)) = times else {
            return Ok((status, None));
        };

        let lst = if rising { lst_rise } else { lst_set };
        let gst = local_sidereal_to_greenwich_sidereal(lst, 0.0, 0.0, longitude);
        let (ut, warn) = greenwich_sidereal_to_universal(gst, 0.0, 0.0, gd, gm, gy);
        if warn == SiderealConversionStatus::Warning {
            return Ok((RiseSetStatus::ConversionWarning, None));
        }

        lambda = sun_ephemeris(ut, gd, gm, gy)?.true_longitude;
        event = Some(SunHorizonEvent {
            ut,
            dec,
            greenwich_date: (gd, gm, gy),
        });
    }

    Ok((RiseSetStatus::Ok, event))
}

/// Local civil time of sunrise, with the rising azimuth.
///
/// Uses the standard 0.8333333° vertical shift (horizon refraction plus the Sun's
/// mean semi-diameter).
///
/// Return
/// ------
/// * The status, the local civil time in decimal hours when the status is
///   [`RiseSetStatus::Ok`], and the azimuth of the rising point in degrees.
pub fn sunrise(
    day: f64,
    month: u32,
    year: i32,
    daylight_saving: bool,
    zone_correction: f64,
    longitude: Degree,
    latitude: Degree,
) -> Result<(RiseSetStatus, Option<Hour>, Option<Degree>), AlmagestError> {
    let (status, event) = sun_horizon_event(
        day,
        month,
        year,
        daylight_saving,
        zone_correction,
        longitude,
        latitude,
        SUN_VERTICAL_SHIFT,
        true,
    )?;
    let Some(ev) = event else {
        return Ok((status, None, None));
    };
    let (gd, gm, gy) = ev.greenwich_date;
    let lct = universal_to_local_civil(ev.ut, 0.0, 0.0, daylight_saving, zone_correction, gd, gm, gy);
    let az = rise_azimuth(ev.dec, SUN_VERTICAL_SHIFT, latitude);
    Ok((status, Some(lct), az))
}

/// Local civil time of sunset, with the setting azimuth.
pub fn sunset(
    day: f64,
    month: u32,
    year: i32,
    daylight_saving: bool,
    zone_correction: f64,
    longitude: Degree,
    latitude: Degree,
) -> Result<(RiseSetStatus, Option<Hour>, Option<Degree>), AlmagestError> {
    let (status, event) = sun_horizon_event(
        day,
        month,
        year,
        daylight_saving,
        zone_correction,
        longitude,
        latitude,
        SUN_VERTICAL_SHIFT,
        false,
    )?;
    let Some(ev) = event else {
        return Ok((status, None, None));
    };
    let (gd, gm, gy) = ev.greenwich_date;
    let lct = universal_to_local_civil(ev.ut, 0.0, 0.0, daylight_saving, zone_correction, gd, gm, gy);
    let az = set_azimuth(ev.dec, SUN_VERTICAL_SHIFT, latitude);
    Ok((status, Some(lct), az))
}

/// Local civil time at which morning twilight of the given kind begins.
pub fn morning_twilight(
    day: f64,
    month: u32,
    year: i32,
    daylight_saving: bool,
    zone_correction: f64,
    longitude: Degree,
    latitude: Degree,
    kind: TwilightKind,
) -> Result<(TwilightStatus, Option<Hour>), AlmagestError> {
    let (status, event) = sun_horizon_event(
        day,
        month,
        year,
        daylight_saving,
        zone_correction,
        longitude,
        latitude,
        kind.depression(),
        true,
    )?;
    let Some(ev) = event else {
        return Ok((status.into(), None));
    };
    let (gd, gm, gy) = ev.greenwich_date;
    let lct = universal_to_local_civil(ev.ut, 0.0, 0.0, daylight_saving, zone_correction, gd, gm, gy);
    Ok((TwilightStatus::Ok, Some(lct)))
}

/// Local civil time at which evening twilight of the given kind ends.
pub fn evening_twilight(
    day: f64,
    month: u32,
    year: i32,
    daylight_saving: bool,
    zone_correction: f64,
    longitude: Degree,
    latitude: Degree,
    kind: TwilightKind,
) -> Result<(TwilightStatus, Option<Hour>), AlmagestError> {
    let (status, event) = sun_horizon_event(
        day,
        month,
        year,
        daylight_saving,
        zone_correction,
        longitude,
        latitude,
        kind.depression(),
        false,
    )?;
    let Some(ev) = event else {
        return Ok((status.into(), None));
    };
    let (gd, gm, gy) = ev.greenwich_date;
    let lct = universal_to_local_civil(ev.ut, 0.0, 0.0, daylight_saving, zone_correction, gd, gm, gy);
    Ok((TwilightStatus::Ok, Some(lct)))
}

/// Equation of time for a Greenwich calendar date: apparent minus mean solar time,
/// in decimal hours (positive when the sundial is ahead of the clock).
pub fn equation_of_time(day: f64, month: u32, year: i32) -> Result<Hour, AlmagestError> {
    let eph = sun_ephemeris(12.0, day, month, year)?;
    let (ra, _) = ecliptic_to_equatorial(eph.true_longitude, 0.0, day, month, year);
    // At transit the Greenwich sidereal time equals the Sun's right ascension.
    let (transit_ut, _) = greenwich_sidereal_to_universal(ra, 0.0, 0.0, day, month, year);
    Ok(12.0 - transit_ut)
}

/// Angular separation between a body and the Sun on the celestial sphere, degrees.
pub fn solar_elongation(ra: Hour, dec: Degree, sun_ra: Hour, sun_dec: Degree) -> Degree {
    let a = ra * 15.0 * RADEG;
    let d = dec * RADEG;
    let b = sun_ra * 15.0 * RADEG;
    let e = sun_dec * RADEG;
    let cos_sep = d.sin() * e.sin() + d.cos() * e.cos() * (a - b).cos();
    cos_sep.clamp(-1.0, 1.0).acos() / RADEG
}

#[cfg(test)]
mod sun_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_longitude_at_equinox_and_solstice() {
        // March equinox 2020: 2020-03-20 03:50 UT, λ☉ crosses 0°.
        let eph = sun_ephemeris(3.8333, 20.0, 3, 2020).unwrap();
        let lon = eph.true_longitude;
        assert!(lon < 0.1 || lon > 359.9, "equinox longitude was {lon}");

        // June solstice 2009: 2009-06-21 05:45 UT, λ☉ crosses 90°.
        let eph = sun_ephemeris(5.75, 21.0, 6, 2009).unwrap();
        assert_relative_eq!(eph.true_longitude, 90.0, epsilon = 0.1);
    }

    #[test]
    fn test_sun_distance_extremes() {
        // Aphelion early July, perihelion early January.
        let far = sun_ephemeris(20.0, 6.0, 7, 2015).unwrap().distance;
        let near = sun_ephemeris(0.0, 4.0, 1, 2015).unwrap().distance;
        assert_relative_eq!(far, 1.0167, epsilon = 0.001);
        assert_relative_eq!(near, 0.9833, epsilon = 0.001);
        // Angular diameter moves opposite to distance.
        assert!(
            sun_ephemeris(0.0, 4.0, 1, 2015).unwrap().angular_diameter
                > sun_ephemeris(20.0, 6.0, 7, 2015).unwrap().angular_diameter
        );
    }

    #[test]
    fn test_sunrise_sunset_boston() {
        // 10 Mar 1986, Boston (71.05°W, 42.37°N), zone −5: up about 6:05, down 17:45.
        let (status, rise, az) = sunrise(10.0, 3, 1986, false, -5.0, -71.05, 42.37).unwrap();
        assert_eq!(status, RiseSetStatus::Ok);
        assert!((rise.unwrap() * 60.0 - (6.0 * 60.0 + 5.0)).abs() < 2.0);
        // Sun still south of the equator: rises south of east.
        assert!(az.unwrap() > 90.0);

        let (status, set, _) = sunset(10.0, 3, 1986, false, -5.0, -71.05, 42.37).unwrap();
        assert_eq!(status, RiseSetStatus::Ok);
        assert!((set.unwrap() * 60.0 - (17.0 * 60.0 + 45.0)).abs() < 2.0);
    }

    #[test]
    fn test_astronomical_twilight() {
        // Greenwich meridian, lat 52°N, 7 Sep 1979: astronomical twilight 3:17–20:37.
        let (status, start) =
            morning_twilight(7.0, 9, 1979, false, 0.0, 0.0, 52.0, TwilightKind::Astronomical)
                .unwrap();
        assert_eq!(status, TwilightStatus::Ok);
        assert!((start.unwrap() * 60.0 - (3.0 * 60.0 + 17.0)).abs() < 3.0);

        let (status, end) =
            evening_twilight(7.0, 9, 1979, false, 0.0, 0.0, 52.0, TwilightKind::Astronomical)
                .unwrap();
        assert_eq!(status, TwilightStatus::Ok);
        assert!((end.unwrap() * 60.0 - (20.0 * 60.0 + 37.0)).abs() < 3.0);
    }

    #[test]
    fn test_midsummer_twilight_lasts_all_night() {
        // At 60°N near midsummer the Sun never reaches 18° below the horizon.
        let (status, t) =
            morning_twilight(21.0, 6, 2010, false, 0.0, 0.0, 60.0, TwilightKind::Astronomical)
                .unwrap();
        assert_eq!(status, TwilightStatus::LastsAllNight);
        assert_eq!(t, None);
    }

    #[test]
    fn test_equation_of_time_november() {
        // Early November: the sundial runs about 16.4 minutes fast.
        let eot = equation_of_time(3.0, 11, 2010).unwrap() * 60.0;
        assert!((eot - 16.4).abs() < 0.5, "equation of time was {eot} min");
    }

    #[test]
    fn test_solar_elongation() {
        // Body at the Sun's position has zero elongation; at opposition, 180°.
        assert_relative_eq!(solar_elongation(10.0, 5.0, 10.0, 5.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            solar_elongation(22.0, -5.0, 10.0, 5.0),
            180.0,
            epsilon = 1e-9
        );
    }
}
