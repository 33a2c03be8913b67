//! Sexagesimal angle conversions.
//!
//! Decimal degrees/hours ↔ (degrees/hours, minutes, seconds) triples, with the
//! 60-second carry rule at the rounding boundary: a seconds component that rounds
//! to 60.00 carries into the minutes (and, transitively, the degrees/hours) instead
//! of being reported as 60. The sign of a triple applies to the value as a whole,
//! not per component.

use crate::constants::{Degree, Hour};

/// Round to a fixed number of decimal places. Façade outputs use this before
/// decomposing into triples.
pub fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

/// Seconds component of a decimal value interpreted sexagesimally, rounded to two
/// decimals, with the carry rule: a component that rounds to 60 is reported as 0.
fn sexagesimal_seconds(value: f64) -> f64 {
    let b = value.abs() * 3600.0;
    let c = round_to(b - 60.0 * (b / 60.0).floor(), 2);
    if c == 60.0 {
        0.0
    } else {
        c
    }
}

/// Total seconds adjusted for the carry: when the seconds component rounds to 60,
/// the minute above it absorbs the full minute.
fn carried_seconds(value: f64) -> f64 {
    let b = value.abs() * 3600.0;
    let c = round_to(b - 60.0 * (b / 60.0).floor(), 2);
    if c == 60.0 {
        b + 60.0
    } else {
        b
    }
}

/// Convert a (degrees, minutes, seconds) triple to decimal degrees.
///
/// The triple is negative if **any** component carries a minus sign; the sign then
/// applies to the whole angle.
pub fn angle_to_decimal_degrees(deg: f64, min: f64, sec: f64) -> Degree {
    let a = sec.abs() / 60.0;
    let b = (min.abs() + a) / 60.0;
    let c = deg.abs() + b;
    if deg < 0.0 || min < 0.0 || sec < 0.0 {
        -c
    } else {
        c
    }
}

/// Decompose decimal degrees into a (degrees, minutes, seconds) triple.
///
/// Seconds are rounded to two decimals; minutes and seconds land in [0, 60) with the
/// carry applied. The sign rides on the degrees component.
pub fn decimal_degrees_to_angle(dd: Degree) -> (f64, f64, f64) {
    let e = carried_seconds(dd);
    let degrees = (e / 3600.0).floor();
    let minutes = (e / 60.0).floor() % 60.0;
    let seconds = sexagesimal_seconds(dd);
    let degrees = if dd < 0.0 { -degrees } else { degrees };
    (degrees, minutes, seconds)
}

/// Convert an (hours, minutes, seconds) triple to decimal hours. Sign rule as for
/// [`angle_to_decimal_degrees`].
pub fn hms_to_decimal_hours(hour: f64, min: f64, sec: f64) -> Hour {
    angle_to_decimal_degrees(hour, min, sec)
}

/// Decompose decimal hours into an (hours, minutes, seconds) triple, with the same
/// rounding and carry rules as [`decimal_degrees_to_angle`].
pub fn decimal_hours_to_hms(dh: Hour) -> (f64, f64, f64) {
    decimal_degrees_to_angle(dh)
}

/// Degrees → hours (15° per hour).
pub fn decimal_degrees_to_hours(d: Degree) -> Hour {
    d / 15.0
}

/// Hours → degrees.
pub fn decimal_hours_to_degrees(h: Hour) -> Degree {
    h * 15.0
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_to_decimal_degrees() {
        assert_relative_eq!(
            angle_to_decimal_degrees(182.0, 31.0, 27.0),
            182.524167,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            angle_to_decimal_degrees(-0.0, 30.0, 0.0),
            0.5,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            angle_to_decimal_degrees(0.0, -30.0, 0.0),
            -0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_decimal_degrees_round_trip() {
        // Round-trip exactness holds for any triple already on the rounding grid.
        for (d, m, s) in [
            (182.0, 31.0, 27.0),
            (0.0, 0.0, 0.01),
            (359.0, 59.0, 59.99),
            (12.0, 0.0, 0.0),
        ] {
            let dd = angle_to_decimal_degrees(d, m, s);
            assert_eq!(decimal_degrees_to_angle(dd), (d, m, s));
        }
    }

    #[test]
    fn test_sixty_second_carry() {
        // 59.999" rounds to 60.00 and must carry into the minute.
        let dd = 10.0 + 59.0 / 60.0 + 59.999 / 3600.0;
        assert_eq!(decimal_degrees_to_angle(dd), (11.0, 0.0, 0.0));

        let dh = 23.0 + 59.0 / 60.0 + 59.999 / 3600.0;
        assert_eq!(decimal_hours_to_hms(dh), (24.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_triple_sign() {
        let (d, m, s) = decimal_degrees_to_angle(-11.527297);
        assert_eq!(d, -11.0);
        assert_eq!(m, 31.0);
        assert_relative_eq!(s, 38.27, epsilon = 0.005);
    }

    #[test]
    fn test_degree_hour_scaling() {
        assert_eq!(decimal_degrees_to_hours(345.0), 23.0);
        assert_eq!(decimal_hours_to_degrees(23.0), 345.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(182.5241666, 2), 182.52);
        assert_eq!(round_to(-0.005, 2), -0.01);
    }
}
