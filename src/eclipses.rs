//! Eclipse occurrence tests and circumstance searches.
//!
//! Two structurally identical pipelines. The occurrence test anchors on the
//! syzygy nearest the given date (full moon for lunar, new moon for solar) and
//! folds the Moon's argument of latitude to its distance from the nearest node:
//! below 0.2426 rad the eclipse is certain, below 0.37 rad possible, otherwise
//! there is none. The circumstance search samples the luminaries one hour before
//! and after the syzygy, forms linear hourly rates, and solves the contact
//! quadratic for each shadow-radius case; a negative discriminant means the phase
//! does not occur and propagates as an absent value.
//!
//! Every search is a fresh, independent computation rooted at the supplied date;
//! no state survives between calls.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::constants::{Degree, Hour, MOON_SD_RATIO, RADEG, SUN_DIA_1AU, SUN_HP};
use crate::apparent::geocentric_to_topocentric;
use crate::errors::AlmagestError;
use crate::kepler::{angle_diff, unwind};
use crate::moon::{moon_ephemeris, syzygy_latitude_argument};
use crate::ref_system::{
    ecliptic_to_equatorial, equatorial_to_ecliptic, hour_angle_to_right_ascension,
    right_ascension_to_hour_angle,
};
use crate::sun::sun_ephemeris;
use crate::time::{
    greenwich_sidereal_to_local_sidereal, julian_date_to_civil, universal_to_greenwich_sidereal,
};

/// Node-distance threshold below which an eclipse is certain, radians.
const ECLIPSE_CERTAIN: f64 = 0.2426;
/// Node-distance threshold below which an eclipse is possible, radians.
const ECLIPSE_POSSIBLE: f64 = 0.37;

/// Atmospheric enlargement factor of the Earth's shadow.
const SHADOW_ENLARGEMENT: f64 = 1.02;
/// Flattening reduction applied to the Moon's parallax in the shadow radii.
const SHADOW_FLATTENING: f64 = 0.99834;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseKind {
    Lunar,
    Solar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseOccurrence {
    Certain,
    Possible,
    NoEclipse,
}

/// Occurrence classification paired with its body, rendering the fixed status
/// vocabulary (`"Lunar eclipse certain"`, `"No solar eclipse"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EclipseStatus {
    pub kind: EclipseKind,
    pub occurrence: EclipseOccurrence,
}

impl fmt::Display for EclipseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cap, low) = match self.kind {
            EclipseKind::Lunar => ("Lunar", "lunar"),
            EclipseKind::Solar => ("Solar", "solar"),
        };
        match self.occurrence {
            EclipseOccurrence::Certain => write!(f, "{cap} eclipse certain"),
            EclipseOccurrence::Possible => write!(f, "{cap} eclipse possible"),
            EclipseOccurrence::NoEclipse => write!(f, "No {low} eclipse"),
        }
    }
}

/// Distance of the syzygy's argument of latitude from the nearest node, radians.
fn node_distance(f: f64) -> f64 {
    let mut df = unwind(f);
    if df > PI {
        df = 2.0 * PI - df;
    }
    if df > FRAC_PI_2 {
        df = PI - df;
    }
    df
}

fn classify(f: f64) -> EclipseOccurrence {
    let df = node_distance(f);
    if df < ECLIPSE_CERTAIN {
        EclipseOccurrence::Certain
    } else if df < ECLIPSE_POSSIBLE {
        EclipseOccurrence::Possible
    } else {
        EclipseOccurrence::NoEclipse
    }
}

/// Linear track of the Moon relative to the shadow (or Sun) centre around the
/// syzygy: position at the syzygy instant plus hourly rates, all in radians.
///
/// The same bundle serves every contact accessor, so it is computed once per
/// search instead of once per output.
#[derive(Debug, Clone, Copy)]
struct ShadowTrack {
    /// UT of the syzygy on the event's Greenwich date, decimal hours.
    t0: Hour,
    x0: f64,
    y0: f64,
    /// Hourly rates.
    xh: f64,
    yh: f64,
}

impl ShadowTrack {
    /// Time offset (hours from the syzygy) and value of the least separation.
    fn least_separation(&self) -> (f64, f64) {
        let a = self.xh * self.xh + self.yh * self.yh;
        let tau = -(self.x0 * self.xh + self.y0 * self.yh) / a;
        let x = self.x0 + self.xh * tau;
        let y = self.y0 + self.yh * tau;
        (tau, x.hypot(y))
    }

    /// UT offsets of the two crossings of separation `radius`, or `None` when the
    /// discriminant is negative (that phase does not occur).
    fn contacts(&self, radius: f64) -> Option<(f64, f64)> {
        let a = self.xh * self.xh + self.yh * self.yh;
        let b = 2.0 * (self.x0 * self.xh + self.y0 * self.yh);
        let c = self.x0 * self.x0 + self.y0 * self.y0 - radius * radius;
        let dd = b * b - 4.0 * a * c;
        if dd < 0.0 {
            return None;
        }
        let root = dd.sqrt();
        Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
    }
}

/// Circumstances of a lunar eclipse.
///
/// All times are universal time in decimal hours referred to the event's
/// Greenwich date; values may fall outside [0, 24) when a contact crosses
/// midnight relative to that date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarEclipseCircumstances {
    pub occurrence: EclipseOccurrence,
    /// Greenwich calendar date of the syzygy (day, month, year).
    pub event_date: (f64, u32, i32),
    /// UT of maximum eclipse.
    pub ut_max: Hour,
    /// First and last penumbral contact.
    pub ut_first_contact: Option<Hour>,
    pub ut_last_contact: Option<Hour>,
    /// Start and end of the umbral (partial) phase.
    pub ut_umbra_start: Option<Hour>,
    pub ut_umbra_end: Option<Hour>,
    /// Start and end of totality.
    pub ut_total_start: Option<Hour>,
    pub ut_total_end: Option<Hour>,
    /// Umbral magnitude, absent when the Moon misses the umbra.
    pub magnitude_umbral: Option<f64>,
    /// Penumbral magnitude, absent when there is no penumbral contact.
    pub magnitude_penumbral: Option<f64>,
}

/// Occurrence test for a lunar eclipse near a local calendar date.
///
/// Return
/// ------
/// * The status and the Greenwich calendar date of the nearest full moon.
pub fn lunar_eclipse_occurrence(
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> (EclipseStatus, (f64, u32, i32)) {
    let (jd, f) = syzygy_latitude_argument(daylight_saving, zone_correction, day, month, year, true);
    let (d, m, y) = julian_date_to_civil(jd);
    (
        EclipseStatus {
            kind: EclipseKind::Lunar,
            occurrence: classify(f),
        },
        (d.floor(), m, y),
    )
}

/// Full circumstance search for a lunar eclipse near a local calendar date.
///
/// Returns `None` when the occurrence test reports no eclipse; otherwise every
/// phase that does not happen carries `None` in its field.
pub fn lunar_eclipse_circumstances(
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<Option<LunarEclipseCircumstances>, AlmagestError> {
    let (jd, f) = syzygy_latitude_argument(daylight_saving, zone_correction, day, month, year, true);
    let occurrence = classify(f);
    if occurrence == EclipseOccurrence::NoEclipse {
        return Ok(None);
    }

    let (gfrac, gm, gy) = julian_date_to_civil(jd);
    let igday = gfrac.floor();
    let t0 = (gfrac - igday) * 24.0;

    // Sample the Moon against the anti-solar point one hour either side of the
    // syzygy.
    let mut xs = [0.0; 2];
    let mut ys = [0.0; 2];
    let mut hps = [0.0; 2];
    let mut dist = [0.0; 2];
    for (i, ut) in [t0 - 1.0, t0 + 1.0].into_iter().enumerate() {
        let moon = moon_ephemeris(ut, igday, gm, gy);
        let sun = sun_ephemeris(ut, igday, gm, gy)?;
        let shadow = (sun.true_longitude + 180.0) * RADEG;
        xs[i] = angle_diff(moon.longitude * RADEG, shadow);
        ys[i] = moon.latitude * RADEG;
        hps[i] = moon.horizontal_parallax * RADEG;
        dist[i] = sun.distance;
    }

    let track = ShadowTrack {
        t0,
        x0: (xs[0] + xs[1]) / 2.0,
        y0: (ys[0] + ys[1]) / 2.0,
        xh: (xs[1] - xs[0]) / 2.0,
        yh: (ys[1] - ys[0]) / 2.0,
    };

    let hp = (hps[0] + hps[1]) / 2.0;
    let rs = (dist[0] + dist[1]) / 2.0;
    let sd_sun = SUN_DIA_1AU / rs / 2.0 * RADEG;
    let hp_sun = SUN_HP / rs;
    let sd_moon = MOON_SD_RATIO * hp.sin();

    let penumbra = SHADOW_ENLARGEMENT * (SHADOW_FLATTENING * hp + hp_sun + sd_sun);
    let umbra = SHADOW_ENLARGEMENT * (SHADOW_FLATTENING * hp + hp_sun - sd_sun);

    let (tau_min, d_min) = track.least_separation();
    let pen_contacts = track.contacts(penumbra + sd_moon);
    let umb_contacts = track.contacts(umbra + sd_moon);
    let total_contacts = track.contacts(umbra - sd_moon);

    Ok(Some(LunarEclipseCircumstances {
        occurrence,
        event_date: (igday, gm, gy),
        ut_max: t0 + tau_min,
        ut_first_contact: pen_contacts.map(|(a, _)| t0 + a),
        ut_last_contact: pen_contacts.map(|(_, b)| t0 + b),
        ut_umbra_start: umb_contacts.map(|(a, _)| t0 + a),
        ut_umbra_end: umb_contacts.map(|(_, b)| t0 + b),
        ut_total_start: total_contacts.map(|(a, _)| t0 + a),
        ut_total_end: total_contacts.map(|(_, b)| t0 + b),
        magnitude_umbral: umb_contacts
            .map(|_| (umbra + sd_moon - d_min) / (2.0 * sd_moon)),
        magnitude_penumbral: pen_contacts
            .map(|_| (penumbra + sd_moon - d_min) / (2.0 * sd_moon)),
    }))
}

/// Circumstances of a solar eclipse for one observing site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEclipseCircumstances {
    pub occurrence: EclipseOccurrence,
    /// Greenwich calendar date of the syzygy (day, month, year).
    pub event_date: (f64, u32, i32),
    /// UT of maximum eclipse at the site.
    pub ut_max: Hour,
    pub ut_first_contact: Option<Hour>,
    pub ut_last_contact: Option<Hour>,
    /// Fraction of the solar diameter covered at maximum, absent when the discs
    /// never touch at this site.
    pub magnitude: Option<f64>,
}

/// Occurrence test for a solar eclipse near a local calendar date.
pub fn solar_eclipse_occurrence(
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> (EclipseStatus, (f64, u32, i32)) {
    let (jd, f) =
        syzygy_latitude_argument(daylight_saving, zone_correction, day, month, year, false);
    let (d, m, y) = julian_date_to_civil(jd);
    (
        EclipseStatus {
            kind: EclipseKind::Solar,
            occurrence: classify(f),
        },
        (d.floor(), m, y),
    )
}

/// Full circumstance search for a solar eclipse near a local calendar date, for
/// an observer at the given longitude/latitude (degrees, east positive).
///
/// The pipeline mirrors the lunar one, except that the Moon is compared against
/// the Sun itself and its position is corrected for diurnal parallax at the site,
/// which is what makes solar circumstances local.
pub fn solar_eclipse_circumstances(
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
    longitude: Degree,
    latitude: Degree,
) -> Result<Option<SolarEclipseCircumstances>, AlmagestError> {
    let (jd, f) =
        syzygy_latitude_argument(daylight_saving, zone_correction, day, month, year, false);
    let occurrence = classify(f);
    if occurrence == EclipseOccurrence::NoEclipse {
        return Ok(None);
    }

    let (gfrac, gm, gy) = julian_date_to_civil(jd);
    let igday = gfrac.floor();
    let t0 = (gfrac - igday) * 24.0;

    let mut xs = [0.0; 2];
    let mut ys = [0.0; 2];
    let mut hps = [0.0; 2];
    let mut dist = [0.0; 2];
    for (i, ut) in [t0 - 1.0, t0 + 1.0].into_iter().enumerate() {
        let moon = moon_ephemeris(ut, igday, gm, gy);
        let sun = sun_ephemeris(ut, igday, gm, gy)?;

        // Topocentric Moon: through the equatorial frame, parallax applied at the
        // site, and back to the ecliptic.
        let (ra, dec) = ecliptic_to_equatorial(moon.longitude, moon.latitude, igday, gm, gy);
        let gst = universal_to_greenwich_sidereal(ut, 0.0, 0.0, igday, gm, gy);
        let lst = greenwich_sidereal_to_local_sidereal(gst, 0.0, 0.0, longitude);
        let ha = right_ascension_to_hour_angle(ra, lst);
        let (ha_t, dec_t) =
            geocentric_to_topocentric(ha, dec, latitude, 0.0, moon.horizontal_parallax);
        let ra_t = hour_angle_to_right_ascension(ha_t, lst);
        let (lon_t, lat_t) = equatorial_to_ecliptic(ra_t, dec_t, igday, gm, gy);

        xs[i] = angle_diff(lon_t * RADEG, sun.true_longitude * RADEG);
        ys[i] = lat_t * RADEG;
        hps[i] = moon.horizontal_parallax * RADEG;
        dist[i] = sun.distance;
    }

    let track = ShadowTrack {
        t0,
        x0: (xs[0] + xs[1]) / 2.0,
        y0: (ys[0] + ys[1]) / 2.0,
        xh: (xs[1] - xs[0]) / 2.0,
        yh: (ys[1] - ys[0]) / 2.0,
    };

    let hp = (hps[0] + hps[1]) / 2.0;
    let rs = (dist[0] + dist[1]) / 2.0;
    let sd_sun = SUN_DIA_1AU / rs / 2.0 * RADEG;
    let sd_moon = MOON_SD_RATIO * hp.sin();

    let (tau_min, d_min) = track.least_separation();
    let contacts = track.contacts(sd_moon + sd_sun);

    Ok(Some(SolarEclipseCircumstances {
        occurrence,
        event_date: (igday, gm, gy),
        ut_max: t0 + tau_min,
        ut_first_contact: contacts.map(|(a, _)| t0 + a),
        ut_last_contact: contacts.map(|(_, b)| t0 + b),
        magnitude: contacts.map(|_| (sd_moon + sd_sun - d_min) / (2.0 * sd_sun)),
    }))
}

#[cfg(test)]
mod eclipses_test {
    use super::*;

    #[test]
    fn test_lunar_eclipse_occurrence_april_2015() {
        // Local date 1 Apr 2015, no DST, zone +10: total lunar eclipse of 4 Apr 2015.
        let (status, date) = lunar_eclipse_occurrence(false, 10.0, 1.0, 4, 2015);
        assert_eq!(status.occurrence, EclipseOccurrence::Certain);
        assert_eq!(status.to_string(), "Lunar eclipse certain");
        assert_eq!(date, (4.0, 4, 2015));
    }

    #[test]
    fn test_lunar_eclipse_circumstances_april_2015() {
        let c = lunar_eclipse_circumstances(false, 10.0, 1.0, 4, 2015)
            .unwrap()
            .expect("eclipse certain");
        // Maximum near 12:00 UT on 4 Apr 2015.
        assert!((c.ut_max - 12.0).abs() < 1.0, "ut_max {}", c.ut_max);
        assert!(c.ut_first_contact.is_some());
        assert!(c.ut_umbra_start.is_some());
        // Contacts bracket the maximum in order.
        assert!(c.ut_first_contact.unwrap() < c.ut_umbra_start.unwrap());
        assert!(c.ut_umbra_end.unwrap() < c.ut_last_contact.unwrap());
        // Just-total eclipse: umbral magnitude hovers around 1.
        let mag = c.magnitude_umbral.unwrap();
        assert!((0.8..1.3).contains(&mag), "umbral magnitude {mag}");
    }

    #[test]
    fn test_no_lunar_eclipse_january_2015() {
        let (status, _) = lunar_eclipse_occurrence(false, 0.0, 1.0, 1, 2015);
        assert_eq!(status.occurrence, EclipseOccurrence::NoEclipse);
        assert_eq!(status.to_string(), "No lunar eclipse");
        assert!(lunar_eclipse_circumstances(false, 0.0, 1.0, 1, 2015)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_solar_eclipse_march_2015() {
        // 20 Mar 2015: deep partial eclipse over northwest Europe.
        let (status, date) = solar_eclipse_occurrence(false, 0.0, 20.0, 3, 2015);
        assert_eq!(status.occurrence, EclipseOccurrence::Certain);
        assert_eq!(date.1, 3);
        assert_eq!(date.2, 2015);

        // At London (0.1°W, 51.5°N) the discs overlap most of the solar diameter
        // around 09:30 UT.
        let c = solar_eclipse_circumstances(false, 0.0, 20.0, 3, 2015, -0.1, 51.5)
            .unwrap()
            .expect("eclipse certain");
        assert!((c.ut_max - 9.5).abs() < 1.5, "ut_max {}", c.ut_max);
        let mag = c.magnitude.expect("discs overlap at this site");
        assert!((0.5..1.1).contains(&mag), "magnitude {mag}");
        assert!(c.ut_first_contact.unwrap() < c.ut_max);
        assert!(c.ut_max < c.ut_last_contact.unwrap());
    }

    #[test]
    fn test_node_distance_folds_to_quarter_circle() {
        for f in [0.1, PI - 0.1, PI + 0.1, 2.0 * PI - 0.1, 7.0] {
            let d = node_distance(f);
            assert!((0.0..=FRAC_PI_2).contains(&d), "folded {f} to {d}");
        }
    }
}
