//! # Constants and type definitions for Almagest
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `almagest` library.
//!
//! ## Overview
//!
//! - Epoch definitions (1900.0, J2000.0, the Gregorian cutover)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians)
//! - Solar and lunar geometry constants shared by the rise/set and eclipse solvers
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the time conversions, the
//! coordinate transforms, and the Sun/Moon/planet ephemerides.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// JD of the 1900.0 reference epoch (1900 January 0.5), origin of the ephemeris polynomials
pub const J1900: f64 = 2415020.0;

/// JD of the J2000.0 reference epoch (2000-01-01 12:00:00)
pub const J2000: f64 = 2451545.0;

/// Days per Julian century
pub const JULIAN_CENTURY: f64 = 36525.0;

/// Julian Date of 1582-10-15 00:00, first day of the Gregorian calendar
pub const GREGORIAN_CUTOVER_JD: f64 = 2299160.5;

/// Ratio of a mean solar day to a mean sidereal day
pub const SIDEREAL_RATE: f64 = 1.002737909;

/// Inverse of [`SIDEREAL_RATE`], used for the sidereal → universal conversion
pub const SOLAR_RATE: f64 = 0.9972695663;

/// Width of the sidereal-day ambiguity window in hours (about 3m56s of universal time).
/// A sidereal → universal conversion landing below this value is flagged as unreliable.
pub const SIDEREAL_WARNING_WINDOW: f64 = 0.065741;

/// Mean length of the synodic month in days
pub const SYNODIC_MONTH: f64 = 29.53058868;

/// Synodic months per tropical year, the rate of the linear new-moon ephemeris
pub const LUNATIONS_PER_YEAR: f64 = 12.3685;

/// Ratio of the Moon's semi-diameter to its equatorial horizontal parallax
pub const MOON_SD_RATIO: f64 = 0.27249;

/// Equatorial horizontal parallax of the Sun in radians (8.794 arcsec)
pub const SUN_HP: f64 = 8.794 * RADSEC;

/// Angular diameter of the Sun at 1 AU, in degrees
pub const SUN_DIA_1AU: f64 = 0.533128;

/// Standard vertical shift for sunrise/sunset: refraction at the horizon plus the
/// Sun's mean semi-diameter, in degrees
pub const SUN_VERTICAL_SHIFT: f64 = 0.8333333;

/// Geocentric flattening factor applied to the sine of the geodetic latitude
pub const EARTH_FLATTENING: f64 = 0.996647;

/// Earth equatorial radius in meters
pub const EARTH_MAJOR_AXIS: f64 = 6_378_160.0;

/// Earth equatorial radius in kilometers, used for the Moon-distance conversion
pub const EARTH_RADIUS_KM: f64 = 6378.14;

/// Day-rate constant of the parabolic-orbit cubic
pub const PARABOLIC_RATE: f64 = 0.0364911624;

/// Mean length of the tropical year in days
pub const TROPICAL_YEAR: f64 = 365.242191;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in decimal hours (right ascensions, hour angles, sidereal times)
pub type Hour = f64;
/// Angle in radians
pub type Radian = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Continuous day count from the Julian epoch
pub type JulianDate = f64;
/// Distance in astronomical units
pub type Au = f64;
