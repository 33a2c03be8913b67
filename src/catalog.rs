//! Reference element tables for named planets, comets, and binary stars.
//!
//! Pure data: the maps are built once behind [`Lazy`] statics, never mutated, and
//! safe to read concurrently. Lookup by name is case-insensitive and returns
//! `None` for unknown bodies; callers branch on the option instead of inspecting
//! sentinel records.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::constants::{Au, Degree};

/// Osculating elements of a major planet at the 2010.0 epoch, plus the visual
/// constants referred to 1 AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetElements {
    pub name: &'static str,
    /// Orbital period, tropical years.
    pub period: f64,
    /// Mean longitude at the epoch, degrees.
    pub longitude_epoch: Degree,
    /// Longitude of the perihelion, degrees.
    pub perihelion_longitude: Degree,
    pub eccentricity: f64,
    /// Semi-major axis, AU.
    pub semi_major_axis: Au,
    /// Orbital inclination, degrees.
    pub inclination: Degree,
    /// Longitude of the ascending node, degrees.
    pub node_longitude: Degree,
    /// Angular diameter at 1 AU, arcseconds.
    pub angular_diameter_1au: f64,
    /// Visual magnitude at 1 AU.
    pub magnitude_1au: f64,
}

/// Elements of a periodic comet on an elliptical orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometEllipticalElements {
    pub name: &'static str,
    /// Epoch of perihelion passage, decimal year.
    pub epoch_perihelion: f64,
    /// Longitude of the perihelion, degrees.
    pub perihelion_longitude: Degree,
    /// Longitude of the ascending node, degrees.
    pub node_longitude: Degree,
    /// Orbital period, tropical years.
    pub period: f64,
    /// Semi-major axis, AU.
    pub semi_major_axis: Au,
    pub eccentricity: f64,
    pub inclination: Degree,
}

/// Elements of a comet on a parabolic orbit, anchored at the perihelion date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometParabolicElements {
    pub name: &'static str,
    /// Perihelion passage: Greenwich calendar day (fractional), month, year.
    pub perihelion_day: f64,
    pub perihelion_month: u32,
    pub perihelion_year: i32,
    /// Argument of the perihelion, degrees.
    pub perihelion_argument: Degree,
    /// Longitude of the ascending node, degrees.
    pub node_longitude: Degree,
    /// Perihelion distance, AU.
    pub perihelion_distance: Au,
    pub inclination: Degree,
}

/// Apparent-orbit elements of a visual binary star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryElements {
    pub name: &'static str,
    /// Orbital period, tropical years.
    pub period: f64,
    /// Epoch of periastron passage, decimal year.
    pub epoch_periastron: f64,
    pub eccentricity: f64,
    /// Semi-major axis of the apparent orbit, arcseconds.
    pub semi_major_axis: f64,
    /// Orbital inclination, degrees.
    pub inclination: Degree,
    /// Position angle of the ascending node, degrees.
    pub node_position_angle: Degree,
    /// Longitude of the periastron, degrees.
    pub periastron_longitude: Degree,
}

static PLANETS: Lazy<AHashMap<&'static str, PlanetElements>> = Lazy::new(|| {
    let rows = [
        PlanetElements {
            name: "Mercury",
            period: 0.24085,
            longitude_epoch: 75.5671,
            perihelion_longitude: 77.612,
            eccentricity: 0.205627,
            semi_major_axis: 0.387098,
            inclination: 7.0051,
            node_longitude: 48.449,
            angular_diameter_1au: 6.74,
            magnitude_1au: -0.42,
        },
        PlanetElements {
            name: "Venus",
            period: 0.615207,
            longitude_epoch: 272.30044,
            perihelion_longitude: 131.54,
            eccentricity: 0.006812,
            semi_major_axis: 0.723329,
            inclination: 3.3947,
            node_longitude: 76.769,
            angular_diameter_1au: 16.92,
            magnitude_1au: -4.4,
        },
        PlanetElements {
            name: "Earth",
            period: 0.999996,
            longitude_epoch: 99.556772,
            perihelion_longitude: 103.2055,
            eccentricity: 0.016671,
            semi_major_axis: 0.999985,
            inclination: 0.0,
            node_longitude: 0.0,
            angular_diameter_1au: 0.0,
            magnitude_1au: 0.0,
        },
        PlanetElements {
            name: "Mars",
            period: 1.880765,
            longitude_epoch: 109.09646,
            perihelion_longitude: 336.217,
            eccentricity: 0.093348,
            semi_major_axis: 1.523689,
            inclination: 1.8497,
            node_longitude: 49.632,
            angular_diameter_1au: 9.36,
            magnitude_1au: -1.52,
        },
        PlanetElements {
            name: "Jupiter",
            period: 11.857911,
            longitude_epoch: 337.917132,
            perihelion_longitude: 14.6633,
            eccentricity: 0.048907,
            semi_major_axis: 5.20278,
            inclination: 1.3035,
            node_longitude: 100.595,
            angular_diameter_1au: 196.74,
            magnitude_1au: -9.4,
        },
        PlanetElements {
            name: "Saturn",
            period: 29.310579,
            longitude_epoch: 172.398316,
            perihelion_longitude: 89.567,
            eccentricity: 0.053853,
            semi_major_axis: 9.51134,
            inclination: 2.4873,
            node_longitude: 113.752,
            angular_diameter_1au: 165.6,
            magnitude_1au: -8.88,
        },
        PlanetElements {
            name: "Uranus",
            period: 84.039492,
            longitude_epoch: 271.063148,
            perihelion_longitude: 172.884833,
            eccentricity: 0.046321,
            semi_major_axis: 19.21814,
            inclination: 0.773059,
            node_longitude: 73.926961,
            angular_diameter_1au: 65.8,
            magnitude_1au: -7.19,
        },
        PlanetElements {
            name: "Neptune",
            period: 165.845392,
            longitude_epoch: 326.895127,
            perihelion_longitude: 23.07,
            eccentricity: 0.010483,
            semi_major_axis: 30.1985,
            inclination: 1.7673,
            node_longitude: 131.879,
            angular_diameter_1au: 62.2,
            magnitude_1au: -6.87,
        },
    ];
    rows.into_iter().map(|p| (p.name, p)).collect()
});

static COMETS_ELLIPTICAL: Lazy<AHashMap<&'static str, CometEllipticalElements>> =
    Lazy::new(|| {
        let rows = [
            CometEllipticalElements {
                name: "Encke",
                epoch_perihelion: 1974.32,
                perihelion_longitude: 160.1,
                node_longitude: 334.2,
                period: 3.3,
                semi_major_axis: 2.21,
                eccentricity: 0.85,
                inclination: 12.0,
            },
            CometEllipticalElements {
                name: "Temple 2",
                epoch_perihelion: 1972.87,
                perihelion_longitude: 310.2,
                node_longitude: 119.3,
                period: 5.26,
                semi_major_axis: 3.02,
                eccentricity: 0.55,
                inclination: 12.5,
            },
            CometEllipticalElements {
                name: "Borrelly",
                epoch_perihelion: 1974.36,
                perihelion_longitude: 67.8,
                node_longitude: 75.1,
                period: 6.76,
                semi_major_axis: 3.58,
                eccentricity: 0.63,
                inclination: 30.2,
            },
            CometEllipticalElements {
                name: "Whipple",
                epoch_perihelion: 1970.77,
                perihelion_longitude: 18.2,
                node_longitude: 188.4,
                period: 7.47,
                semi_major_axis: 3.82,
                eccentricity: 0.35,
                inclination: 10.2,
            },
            CometEllipticalElements {
                name: "Halley",
                epoch_perihelion: 1986.112,
                perihelion_longitude: 170.011,
                node_longitude: 58.154,
                period: 76.0081,
                semi_major_axis: 17.9435,
                eccentricity: 0.9673,
                inclination: 162.2384,
            },
        ];
        rows.into_iter().map(|c| (c.name, c)).collect()
    });

static COMETS_PARABOLIC: Lazy<AHashMap<&'static str, CometParabolicElements>> =
    Lazy::new(|| {
        let rows = [CometParabolicElements {
            name: "Kohler",
            perihelion_day: 10.5659,
            perihelion_month: 11,
            perihelion_year: 1977,
            perihelion_argument: 163.4799,
            node_longitude: 181.8175,
            perihelion_distance: 0.990662,
            inclination: 48.7196,
        }];
        rows.into_iter().map(|c| (c.name, c)).collect()
    });

static BINARIES: Lazy<AHashMap<&'static str, BinaryElements>> = Lazy::new(|| {
    let rows = [
        BinaryElements {
            name: "eta-Cor",
            period: 41.623,
            epoch_periastron: 1934.008,
            eccentricity: 0.2763,
            semi_major_axis: 0.907,
            inclination: 59.025,
            node_position_angle: 23.717,
            periastron_longitude: 219.907,
        },
        BinaryElements {
            name: "gamma-Vir",
            period: 171.37,
            epoch_periastron: 1836.433,
            eccentricity: 0.8808,
            semi_major_axis: 3.746,
            inclination: 146.05,
            node_position_angle: 31.78,
            periastron_longitude: 252.88,
        },
        BinaryElements {
            name: "eta-Cas",
            period: 480.0,
            epoch_periastron: 1889.6,
            eccentricity: 0.497,
            semi_major_axis: 11.9939,
            inclination: 34.76,
            node_position_angle: 278.42,
            periastron_longitude: 68.08,
        },
        BinaryElements {
            name: "alpha-CMa",
            period: 50.09,
            epoch_periastron: 1894.13,
            eccentricity: 0.5923,
            semi_major_axis: 7.5,
            inclination: 136.53,
            node_position_angle: 44.57,
            periastron_longitude: 147.27,
        },
        BinaryElements {
            name: "alpha-Cen",
            period: 79.92,
            epoch_periastron: 1955.56,
            eccentricity: 0.516,
            semi_major_axis: 17.583,
            inclination: 79.24,
            node_position_angle: 204.868,
            periastron_longitude: 231.56,
        },
    ];
    rows.into_iter().map(|b| (b.name, b)).collect()
});

fn lookup<'a, T>(map: &'a AHashMap<&'static str, T>, name: &str) -> Option<&'a T> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Elements of a named planet, or `None` when unknown.
pub fn planet_elements(name: &str) -> Option<&'static PlanetElements> {
    lookup(&PLANETS, name)
}

/// Elements of a named periodic comet, or `None` when unknown.
pub fn comet_elliptical_elements(name: &str) -> Option<&'static CometEllipticalElements> {
    lookup(&COMETS_ELLIPTICAL, name)
}

/// Elements of a named parabolic comet, or `None` when unknown.
pub fn comet_parabolic_elements(name: &str) -> Option<&'static CometParabolicElements> {
    lookup(&COMETS_PARABOLIC, name)
}

/// Elements of a named binary star, or `None` when unknown.
pub fn binary_elements(name: &str) -> Option<&'static BinaryElements> {
    lookup(&BINARIES, name)
}
