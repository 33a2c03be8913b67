//! Rise and set geometry.
//!
//! The spherical hour-angle solver shared by every body: given right ascension,
//! declination, a vertical shift (horizon refraction plus semi-diameter, or a
//! twilight depression angle), and the latitude, it yields the local sidereal times
//! of rising and setting, or a classification when the body never crosses the
//! shifted horizon. The Sun/Moon drivers in their own modules wrap this solver in
//! their fixed-point refinement loops.

use std::fmt;

use crate::constants::{Degree, Hour, RADEG};
use crate::conversion::decimal_degrees_to_hours;
use crate::kepler::unwind_deg;
use crate::time::{
    greenwich_sidereal_to_universal, local_sidereal_to_greenwich_sidereal,
    SiderealConversionStatus,
};

/// Classification of a body against the shifted horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiseSetStatus {
    /// Both rise and set hour angles exist.
    Ok,
    /// The body stays below the shifted horizon all day.
    NeverRises,
    /// The body stays above the shifted horizon all day.
    Circumpolar,
    /// The sidereal → universal conversion landed in its ambiguity window.
    ConversionWarning,
}

impl fmt::Display for RiseSetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiseSetStatus::Ok => "OK",
            RiseSetStatus::NeverRises => "never rises",
            RiseSetStatus::Circumpolar => "circumpolar",
            RiseSetStatus::ConversionWarning => "GST to UT conversion warning",
        };
        f.write_str(s)
    }
}

/// Twilight classification; the same horizon geometry read for the Sun against a
/// civil/nautical/astronomical depression angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwilightStatus {
    Ok,
    /// The Sun never reaches the depression angle: twilight lasts all night.
    LastsAllNight,
    /// The Sun never rises above the depression angle.
    SunTooFarBelowHorizon,
    ConversionWarning,
}

impl fmt::Display for TwilightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TwilightStatus::Ok => "OK",
            TwilightStatus::LastsAllNight => "lasts all night",
            TwilightStatus::SunTooFarBelowHorizon => "Sun too far below horizon",
            TwilightStatus::ConversionWarning => "GST to UT conversion warning",
        };
        f.write_str(s)
    }
}

impl From<RiseSetStatus> for TwilightStatus {
    fn from(status: RiseSetStatus) -> Self {
        match status {
            RiseSetStatus::Ok => TwilightStatus::Ok,
            RiseSetStatus::NeverRises => TwilightStatus::SunTooFarBelowHorizon,
            RiseSetStatus::Circumpolar => TwilightStatus::LastsAllNight,
            RiseSetStatus::ConversionWarning => TwilightStatus::ConversionWarning,
        }
    }
}

/// Cosine of the rise/set hour angle:
/// `cos H = −(sin d + sin φ·sin δ) / (cos φ·cos δ)` with `d` the vertical shift.
fn rise_set_cosine(dec: Degree, vertical_shift: Degree, latitude: Degree) -> f64 {
    let c = dec * RADEG;
    let d = vertical_shift * RADEG;
    let e = latitude * RADEG;
    -(d.sin() + e.sin() * c.sin()) / (e.cos() * c.cos())
}

/// Classify a body against the shifted horizon without computing times.
pub fn rise_set_status(dec: Degree, vertical_shift: Degree, latitude: Degree) -> RiseSetStatus {
    let f = rise_set_cosine(dec, vertical_shift, latitude);
    if f >= 1.0 {
        RiseSetStatus::NeverRises
    } else if f <= -1.0 {
        RiseSetStatus::Circumpolar
    } else {
        RiseSetStatus::Ok
    }
}

/// Local sidereal times of rising and setting, in decimal hours.
///
/// Return
/// ------
/// * The status, and `Some((lst_rise, lst_set))` when the status is
///   [`RiseSetStatus::Ok`].
pub fn rise_set_local_sidereal_times(
    ra: Hour,
    dec: Degree,
    vertical_shift: Degree,
    latitude: Degree,
) -> (RiseSetStatus, Option<(Hour, Hour)>) {
    let f = rise_set_cosine(dec, vertical_shift, latitude);
    let status = rise_set_status(dec, vertical_shift, latitude);
    if status != RiseSetStatus::Ok {
        return (status, None);
    }

    let h = decimal_degrees_to_hours(f.acos() / RADEG);
    let rise = (ra - h).rem_euclid(24.0);
    let set = (ra + h).rem_euclid(24.0);
    (status, Some((rise, set)))
}

/// Azimuth of the rising point, degrees east of north:
/// `cos A = (sin δ + sin d·sin φ) / (cos d·cos φ)`.
pub fn rise_azimuth(dec: Degree, vertical_shift: Degree, latitude: Degree) -> Option<Degree> {
    if rise_set_status(dec, vertical_shift, latitude) != RiseSetStatus::Ok {
        return None;
    }
    let c = dec * RADEG;
    let d = vertical_shift * RADEG;
    let e = latitude * RADEG;
    let f = (c.sin() + d.sin() * e.sin()) / (d.cos() * e.cos());
    Some(unwind_deg(f.clamp(-1.0, 1.0).acos() / RADEG))
}

/// Azimuth of the setting point, the mirror of [`rise_azimuth`] about the meridian.
pub fn set_azimuth(dec: Degree, vertical_shift: Degree, latitude: Degree) -> Option<Degree> {
    rise_azimuth(dec, vertical_shift, latitude).map(|a| unwind_deg(360.0 - a))
}

/// Rise/set circumstances of a fixed body (star-like: RA/Dec constant over the day).
#[derive(Debug, Clone, PartialEq)]
pub struct RiseSet {
    pub status: RiseSetStatus,
    /// Universal time of rising, decimal hours.
    pub ut_rise: Option<Hour>,
    /// Universal time of setting, decimal hours.
    pub ut_set: Option<Hour>,
    pub azimuth_rise: Option<Degree>,
    pub azimuth_set: Option<Degree>,
}

/// Rising and setting of a fixed body on a Greenwich calendar date.
///
/// The local sidereal times from [`rise_set_local_sidereal_times`] are carried to
/// Greenwich by the observer's longitude and converted to universal time; a
/// conversion landing in the sidereal ambiguity window surfaces as
/// [`RiseSetStatus::ConversionWarning`].
///
/// Arguments
/// ---------
/// * `ra`, `dec`: equatorial coordinates (decimal hours, degrees).
/// * `greenwich_day`, `month`, `year`: Greenwich calendar date.
/// * `longitude`, `latitude`: observer position, degrees (east positive).
/// * `vertical_shift`: horizon depression in degrees.
pub fn rise_and_set(
    ra: Hour,
    dec: Degree,
    greenwich_day: f64,
    month: u32,
    year: i32,
    longitude: Degree,
    latitude: Degree,
    vertical_shift: Degree,
) -> RiseSet {
    let (status, times) = rise_set_local_sidereal_times(ra, dec, vertical_shift, latitude);
    let Some((lst_rise, lst_set)) = times else {
        return RiseSet {
            status,
            ut_rise: None,
            ut_set: None,
            azimuth_rise: None,
            azimuth_set: None,
        };
    };

    let gst_rise = local_sidereal_to_greenwich_sidereal(lst_rise, 0.0, 0.0, longitude);
    let gst_set = local_sidereal_to_greenwich_sidereal(lst_set, 0.0, 0.0, longitude);
    let (ut_rise, w1) =
        greenwich_sidereal_to_universal(gst_rise, 0.0, 0.0, greenwich_day, month, year);
    let (ut_set, w2) =
        greenwich_sidereal_to_universal(gst_set, 0.0, 0.0, greenwich_day, month, year);

    let status = if w1 == SiderealConversionStatus::Warning || w2 == SiderealConversionStatus::Warning
    {
        RiseSetStatus::ConversionWarning
    } else {
        RiseSetStatus::Ok
    };

    RiseSet {
        status,
        ut_rise: Some(ut_rise),
        ut_set: Some(ut_set),
        azimuth_rise: rise_azimuth(dec, vertical_shift, latitude),
        azimuth_set: set_azimuth(dec, vertical_shift, latitude),
    }
}

#[cfg(test)]
mod riseset_test {
    use super::*;
    use crate::conversion::hms_to_decimal_hours;
    use approx::assert_relative_eq;

    #[test]
    fn test_status_classification() {
        // From latitude 52° a body at declination +80° never sets ...
        assert_eq!(rise_set_status(80.0, 0.5667, 52.0), RiseSetStatus::Circumpolar);
        // ... and one at −80° never rises.
        assert_eq!(rise_set_status(-80.0, 0.5667, 52.0), RiseSetStatus::NeverRises);
        assert_eq!(rise_set_status(21.7, 0.5667, 30.0), RiseSetStatus::Ok);
    }

    #[test]
    fn test_rise_set_times_for_star() {
        // Star at RA 23h39m20s, Dec 21°42', 24 Aug 2010, longitude 64°E, latitude 30°N,
        // horizon depression 0.5667°: rises 14:16 UT, sets 4:10 UT.
        let ra = hms_to_decimal_hours(23.0, 39.0, 20.0);
        let result = rise_and_set(ra, 21.7, 24.0, 8, 2010, 64.0, 30.0, 0.5667);
        assert_eq!(result.status, RiseSetStatus::Ok);
        assert_eq!((result.ut_rise.unwrap() * 60.0).round(), 14.0 * 60.0 + 16.0);
        assert_eq!((result.ut_set.unwrap() * 60.0).round(), 4.0 * 60.0 + 10.0);

        // Rise and set azimuths mirror about the meridian.
        let az_r = result.azimuth_rise.unwrap();
        let az_s = result.azimuth_set.unwrap();
        assert_relative_eq!(az_r + az_s, 360.0, epsilon = 1e-9);
        assert!(az_r < 90.0); // northern declination rises north of east
    }

    #[test]
    fn test_rise_set_sidereal_symmetry() {
        // Rise and set LSTs are symmetric about the transit at LST = RA.
        let (status, times) = rise_set_local_sidereal_times(6.0, 10.0, 0.5667, 40.0);
        assert_eq!(status, RiseSetStatus::Ok);
        let (rise, set) = times.unwrap();
        let to_transit = (6.0 - rise).rem_euclid(24.0);
        let from_transit = (set - 6.0).rem_euclid(24.0);
        assert_relative_eq!(to_transit, from_transit, epsilon = 1e-9);
    }

    #[test]
    fn test_never_rises_has_no_times() {
        let result = rise_and_set(12.0, -80.0, 24.0, 8, 2010, 0.0, 52.0, 0.5667);
        assert_eq!(result.status, RiseSetStatus::NeverRises);
        assert_eq!(result.ut_rise, None);
        assert_eq!(result.azimuth_rise, None);
    }
}
