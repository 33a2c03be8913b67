//! Calendar and time-scale conversions.
//!
//! Civil dates ↔ Julian Date (with the Julian/Gregorian cutover at 1582-10-15),
//! local civil time ↔ universal time, and universal ↔ Greenwich/local sidereal
//! time. Everything here is closed-form; the only subtlety is the cutover edge
//! case and the ambiguity window of the sidereal → universal conversion.

use crate::constants::{
    Degree, Hour, JulianDate, GREGORIAN_CUTOVER_JD, J1900, J2000, JULIAN_CENTURY, SIDEREAL_RATE,
    SIDEREAL_WARNING_WINDOW, SOLAR_RATE, TROPICAL_YEAR,
};
use crate::conversion::hms_to_decimal_hours;

/// Outcome flag of the Greenwich sidereal → universal time conversion.
///
/// Near the sidereal-day discontinuity the conversion is non-unique: two civil
/// instants about 3m56s apart share the same sidereal time on the same calendar
/// day. Results landing inside that window carry the `Warning` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiderealConversionStatus {
    Ok,
    Warning,
}

/// Convert a Greenwich calendar date to a Julian Date.
///
/// Dates on or after 1582-10-15 use the Gregorian leap rule; earlier dates use the
/// Julian calendar, so the ten dropped days (5–14 Oct 1582) never appear. The day
/// may be fractional.
///
/// Arguments
/// ---------
/// * `day`: day of the month, fractional days allowed.
/// * `month`: 1–12.
/// * `year`: astronomical year numbering (1 BC is year 0).
pub fn civil_date_to_julian_date(day: f64, month: u32, year: i32) -> JulianDate {
    let (y, m) = if month < 3 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let gregorian =
        year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15.0)));
    let b = if gregorian {
        let a = (y as f64 / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    let c = if y < 0 {
        (365.25 * y as f64 - 0.75).floor()
    } else {
        (365.25 * y as f64).floor()
    };
    let d = (30.6001 * (m as f64 + 1.0)).floor();

    b + c + d + day + 1720994.5
}

/// Decompose a Julian Date into its Greenwich calendar (day, month, year).
/// The returned day is fractional.
pub fn julian_date_to_civil(jd: JulianDate) -> (f64, u32, i32) {
    let i = (jd + 0.5).floor();
    let f = jd + 0.5 - i;

    let b = if jd >= GREGORIAN_CUTOVER_JD {
        let a = ((i - 1867216.25) / 36524.25).floor();
        i + 1.0 + a - (a / 4.0).floor()
    } else {
        i
    };

    let c = b + 1524.0;
    let d = ((c - 122.1) / 365.25).floor();
    let e = (365.25 * d).floor();
    let g = ((c - e) / 30.6001).floor();

    let day = c - e + f - (30.6001 * g).floor();
    let month = if g < 13.5 { g - 1.0 } else { g - 13.0 };
    let year = if month > 2.5 { d - 4716.0 } else { d - 4715.0 };

    (day, month as u32, year as i32)
}

/// Day of the month (fractional) of a Julian Date.
pub fn julian_date_day(jd: JulianDate) -> f64 {
    julian_date_to_civil(jd).0
}

/// Month of a Julian Date.
pub fn julian_date_month(jd: JulianDate) -> u32 {
    julian_date_to_civil(jd).1
}

/// Year of a Julian Date.
pub fn julian_date_year(jd: JulianDate) -> i32 {
    julian_date_to_civil(jd).2
}

/// English weekday name of the civil day containing a Julian Date.
pub fn julian_date_day_of_week(jd: JulianDate) -> &'static str {
    const NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    let idx = ((jd + 1.5).floor() as i64).rem_euclid(7);
    NAMES[idx as usize]
}

/// Decimal year ("epoch") of a Julian Date, counted in tropical years from 1900.0.
/// Used by the binary-star orbit solver, whose periastron epochs are decimal years.
pub fn julian_date_to_decimal_year(jd: JulianDate) -> f64 {
    1900.0 + (jd - J1900) / TROPICAL_YEAR
}

/// Convert a local civil time to universal time (decimal hours).
///
/// The daylight-saving flag and the zone correction (hours east of Greenwich,
/// fractional zones allowed) are subtracted, and the instant is renormalized through
/// the Julian Date so that conversions crossing midnight land on the correct
/// Greenwich day. Use [`greenwich_date_of_local`] for that day.
pub fn local_civil_to_universal(
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Hour {
    let a = hms_to_decimal_hours(hour, min, sec);
    let b = a - if daylight_saving { 1.0 } else { 0.0 } - zone_correction;
    let c = day + b / 24.0;
    let jd = civil_date_to_julian_date(c, month, year);
    let e = julian_date_day(jd);
    24.0 * (e - e.floor())
}

/// Greenwich calendar date (day, month, year) of a local civil instant. The day is
/// whole (the time of day is reported by [`local_civil_to_universal`]).
pub fn greenwich_date_of_local(
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> (f64, u32, i32) {
    let a = hms_to_decimal_hours(hour, min, sec);
    let b = a - if daylight_saving { 1.0 } else { 0.0 } - zone_correction;
    let c = day + b / 24.0;
    let jd = civil_date_to_julian_date(c, month, year);
    let (gd, gm, gy) = julian_date_to_civil(jd);
    (gd.floor(), gm, gy)
}

/// Convert a universal time on a Greenwich calendar date back to local civil time
/// (decimal hours).
pub fn universal_to_local_civil(
    ut_hour: f64,
    ut_min: f64,
    ut_sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    greenwich_day: f64,
    greenwich_month: u32,
    greenwich_year: i32,
) -> Hour {
    let a = hms_to_decimal_hours(ut_hour, ut_min, ut_sec);
    let b = a + zone_correction + if daylight_saving { 1.0 } else { 0.0 };
    let jd = civil_date_to_julian_date(greenwich_day, greenwich_month, greenwich_year) + b / 24.0;
    let e = julian_date_day(jd);
    24.0 * (e - e.floor())
}

/// Local calendar date (day, month, year) of a universal instant.
pub fn local_date_of_universal(
    ut_hour: f64,
    ut_min: f64,
    ut_sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    greenwich_day: f64,
    greenwich_month: u32,
    greenwich_year: i32,
) -> (f64, u32, i32) {
    let a = hms_to_decimal_hours(ut_hour, ut_min, ut_sec);
    let b = a + zone_correction + if daylight_saving { 1.0 } else { 0.0 };
    let jd = civil_date_to_julian_date(greenwich_day, greenwich_month, greenwich_year) + b / 24.0;
    let (d, m, y) = julian_date_to_civil(jd);
    (d.floor(), m, y)
}

/// Sidereal time at Greenwich for 0h UT of a calendar date, in decimal hours.
fn sidereal_time_at_midnight(day: f64, month: u32, year: i32) -> Hour {
    let jd = civil_date_to_julian_date(day, month, year);
    let t = (jd - J2000) / JULIAN_CENTURY;
    let d = 6.697374558 + 2400.051336 * t + 0.000025862 * t * t;
    d - 24.0 * (d / 24.0).floor()
}

/// Convert universal time to Greenwich sidereal time (decimal hours).
///
/// Applies the 1.002737909 sidereal-rate multiplier to the elapsed universal time
/// and adds it to the sidereal time at 0h UT of the given Greenwich date.
pub fn universal_to_greenwich_sidereal(
    ut_hour: f64,
    ut_min: f64,
    ut_sec: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Hour {
    let t0 = sidereal_time_at_midnight(day, month, year);
    let ut = hms_to_decimal_hours(ut_hour, ut_min, ut_sec);
    let gst = t0 + ut * SIDEREAL_RATE;
    gst - 24.0 * (gst / 24.0).floor()
}

/// Convert Greenwich sidereal time back to universal time (decimal hours).
///
/// The sidereal day is shorter than the solar day, so once per day this conversion
/// is ambiguous: results below the ~4-minute window come back flagged
/// [`SiderealConversionStatus::Warning`].
pub fn greenwich_sidereal_to_universal(
    gst_hour: f64,
    gst_min: f64,
    gst_sec: f64,
    day: f64,
    month: u32,
    year: i32,
) -> (Hour, SiderealConversionStatus) {
    let t0 = sidereal_time_at_midnight(day, month, year);
    let gst = hms_to_decimal_hours(gst_hour, gst_min, gst_sec);
    let a = gst - t0;
    let b = a - 24.0 * (a / 24.0).floor();
    let ut = b * SOLAR_RATE;
    let status = if ut < SIDEREAL_WARNING_WINDOW {
        SiderealConversionStatus::Warning
    } else {
        SiderealConversionStatus::Ok
    };
    (ut, status)
}

/// Greenwich sidereal time → local sidereal time for a geographical longitude
/// (degrees, east positive).
pub fn greenwich_sidereal_to_local_sidereal(
    gst_hour: f64,
    gst_min: f64,
    gst_sec: f64,
    longitude: Degree,
) -> Hour {
    let a = hms_to_decimal_hours(gst_hour, gst_min, gst_sec) + longitude / 15.0;
    a - 24.0 * (a / 24.0).floor()
}

/// Local sidereal time → Greenwich sidereal time.
pub fn local_sidereal_to_greenwich_sidereal(
    lst_hour: f64,
    lst_min: f64,
    lst_sec: f64,
    longitude: Degree,
) -> Hour {
    let a = hms_to_decimal_hours(lst_hour, lst_min, lst_sec) - longitude / 15.0;
    a - 24.0 * (a / 24.0).floor()
}

#[cfg(test)]
mod time_test {
    use super::*;
    use crate::conversion::{decimal_hours_to_hms, round_to};
    use approx::assert_relative_eq;

    #[test]
    fn test_civil_date_to_julian_date() {
        assert_eq!(civil_date_to_julian_date(19.75, 6, 2009), 2455002.25);
        // Both sides of the Gregorian cutover.
        assert_eq!(civil_date_to_julian_date(4.0, 10, 1582), 2299159.5);
        assert_eq!(civil_date_to_julian_date(15.0, 10, 1582), 2299160.5);
    }

    #[test]
    fn test_julian_date_round_trip_across_cutover() {
        for (d, m, y) in [
            (4.0, 10, 1582),
            (15.0, 10, 1582),
            (19.75, 6, 2009),
            (1.0, 1, 1900),
            (31.5, 12, 2025),
        ] {
            let jd = civil_date_to_julian_date(d, m, y);
            let (dd, mm, yy) = julian_date_to_civil(jd);
            assert_relative_eq!(dd, d, epsilon = 1e-6);
            assert_eq!(mm, m);
            assert_eq!(yy, y);
        }
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(julian_date_day_of_week(2455432.5), "Tuesday");
        assert_eq!(julian_date_day_of_week(2455001.5), "Friday");
    }

    #[test]
    fn test_local_civil_to_universal() {
        // 03:37:00 local, DST, zone +4, 1 Jul 2013 -> 22:37:00 UT on 30 Jun.
        let ut = local_civil_to_universal(3.0, 37.0, 0.0, true, 4.0, 1.0, 7, 2013);
        let (h, m, s) = decimal_hours_to_hms(ut);
        assert_eq!((h, m, s), (22.0, 37.0, 0.0));
        assert_eq!(
            greenwich_date_of_local(3.0, 37.0, 0.0, true, 4.0, 1.0, 7, 2013),
            (30.0, 6, 2013)
        );

        let lct = universal_to_local_civil(22.0, 37.0, 0.0, true, 4.0, 30.0, 6, 2013);
        assert_eq!(decimal_hours_to_hms(lct), (3.0, 37.0, 0.0));
        assert_eq!(
            local_date_of_universal(22.0, 37.0, 0.0, true, 4.0, 30.0, 6, 2013),
            (1.0, 7, 2013)
        );
    }

    #[test]
    fn test_universal_to_greenwich_sidereal() {
        let gst = universal_to_greenwich_sidereal(14.0, 36.0, 51.67, 22.0, 4, 1980);
        let (h, m, s) = decimal_hours_to_hms(gst);
        assert_eq!((h, m), (4.0, 40.0));
        assert_relative_eq!(s, 5.23, epsilon = 0.02);
    }

    #[test]
    fn test_greenwich_sidereal_to_universal() {
        let (ut, status) = greenwich_sidereal_to_universal(4.0, 40.0, 5.23, 22.0, 4, 1980);
        assert_eq!(status, SiderealConversionStatus::Ok);
        let (h, m, s) = decimal_hours_to_hms(ut);
        assert_eq!((h, m), (14.0, 36.0));
        assert_relative_eq!(s, 51.67, epsilon = 0.02);
    }

    #[test]
    fn test_sidereal_conversion_warning_window() {
        // A GST one second past the midnight sidereal time maps to ~0h UT, inside the window.
        let t0 = sidereal_time_at_midnight(22.0, 4, 1980);
        let (h, m, s) = decimal_hours_to_hms(t0);
        let (ut, status) =
            greenwich_sidereal_to_universal(h, m, round_to(s, 2) + 1.0, 22.0, 4, 1980);
        assert!(ut < 0.065741);
        assert_eq!(status, SiderealConversionStatus::Warning);
    }

    #[test]
    fn test_local_sidereal() {
        let lst = greenwich_sidereal_to_local_sidereal(4.0, 40.0, 5.23, -64.0);
        let (h, m, s) = decimal_hours_to_hms(lst);
        assert_eq!((h, m), (0.0, 24.0));
        assert_relative_eq!(s, 5.23, epsilon = 0.02);

        let gst = local_sidereal_to_greenwich_sidereal(0.0, 24.0, 5.23, -64.0);
        let (h, m, _) = decimal_hours_to_hms(gst);
        assert_eq!((h, m), (4.0, 40.0));
    }
}
