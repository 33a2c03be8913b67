//! Planetary positions.
//!
//! The precise series evaluates each planet's mean elements as cubics in
//! centuries since 1900.0 and applies body-specific periodic perturbation
//! corrections: distinct term sets for Mercury, Venus, Mars, the coupled
//! Jupiter/Saturn pair (the great-inequality argument `5M♄ − 2M♃`), and the
//! Uranus/Neptune pair. Both the precise and the catalog-driven approximate
//! routines share one heliocentric → geocentric projection, which branches on the
//! inner/outer comparison `rd < re`.

use crate::catalog::PlanetElements;
use crate::constants::{Au, Degree, Hour, Radian, J1900, JULIAN_CENTURY, RADEG, TROPICAL_YEAR};
use crate::errors::AlmagestError;
use crate::kepler::{true_anomaly, unwind, unwind_deg};
use crate::ref_system::ecliptic_to_equatorial;
use crate::sun::sun_ephemeris;
use crate::time::{civil_date_to_julian_date, greenwich_date_of_local, local_civil_to_universal};

/// JD of the 2010 January 0.0 epoch used by the catalog element records.
const EPOCH_2010: f64 = 2455196.5;

/// Light travel time in days per AU of geocentric distance.
const LIGHT_DAYS_PER_AU: f64 = 0.005772;

/// The major planets handled by the precise series (Earth is derived from the solar
/// ephemeris).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub fn from_name(name: &str) -> Option<Planet> {
        let p = match name.to_ascii_lowercase().as_str() {
            "mercury" => Planet::Mercury,
            "venus" => Planet::Venus,
            "mars" => Planet::Mars,
            "jupiter" => Planet::Jupiter,
            "saturn" => Planet::Saturn,
            "uranus" => Planet::Uranus,
            "neptune" => Planet::Neptune,
            _ => return None,
        };
        Some(p)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    fn polynomial(&self) -> &'static ElementPolynomials {
        match self {
            Planet::Mercury => &MERCURY,
            Planet::Venus => &VENUS,
            Planet::Mars => &MARS,
            Planet::Jupiter => &JUPITER,
            Planet::Saturn => &SATURN,
            Planet::Uranus => &URANUS,
            Planet::Neptune => &NEPTUNE,
        }
    }
}

/// Mean-element cubics in centuries since 1900.0: value = c₀ + c₁T + c₂T² + c₃T³.
struct ElementPolynomials {
    mean_longitude: [f64; 4],
    eccentricity: [f64; 4],
    inclination: [f64; 4],
    perihelion_longitude: [f64; 4],
    node_longitude: [f64; 4],
    semi_major_axis: f64,
}

const MERCURY: ElementPolynomials = ElementPolynomials {
    mean_longitude: [178.179078, 149474.07078, 0.0003011, 0.0],
    eccentricity: [0.20561421, 0.00002046, -0.00000003, 0.0],
    inclination: [7.002881, 0.0018608, -0.0000183, 0.0],
    perihelion_longitude: [75.899697, 1.5554889, 0.0002947, 0.0],
    node_longitude: [47.145944, 1.1852083, 0.0001739, 0.0],
    semi_major_axis: 0.3870986,
};

const VENUS: ElementPolynomials = ElementPolynomials {
    mean_longitude: [342.767053, 58519.21191, 0.0003097, 0.0],
    eccentricity: [0.00682069, -0.00004774, 0.000000091, 0.0],
    inclination: [3.393631, 0.0010058, -0.000001, 0.0],
    perihelion_longitude: [130.163833, 1.4080361, -0.0009764, 0.0],
    node_longitude: [75.779647, 0.89985, 0.00041, 0.0],
    semi_major_axis: 0.7233316,
};

const MARS: ElementPolynomials = ElementPolynomials {
    mean_longitude: [293.737334, 19141.69551, 0.0003107, 0.0],
    eccentricity: [0.09331290, 0.000092064, -0.000000077, 0.0],
    inclination: [1.850333, -0.000675, 0.0000126, 0.0],
    perihelion_longitude: [334.218203, 1.8407584, 0.0001299, -0.00000119],
    node_longitude: [48.786442, 0.7709917, -0.0000014, -0.00000533],
    semi_major_axis: 1.5236883,
};

const JUPITER: ElementPolynomials = ElementPolynomials {
    mean_longitude: [238.049257, 3036.301986, 0.0003347, -0.00000165],
    eccentricity: [0.04833475, 0.00016418, -0.0000004676, -0.0000000017],
    inclination: [1.308736, -0.0056961, 0.0000039, 0.0],
    perihelion_longitude: [12.720972, 1.6099617, 0.00105627, -0.00000343],
    node_longitude: [99.443414, 1.01053, 0.00035222, -0.00000851],
    semi_major_axis: 5.202561,
};

const SATURN: ElementPolynomials = ElementPolynomials {
    mean_longitude: [266.564377, 1223.509884, 0.0003245, -0.0000058],
    eccentricity: [0.05589232, -0.0003455, -0.000000728, 0.00000000074],
    inclination: [2.492519, -0.0039189, -0.00001549, 0.00000004],
    perihelion_longitude: [91.098214, 1.9584158, 0.00082636, 0.00000461],
    node_longitude: [112.790414, 0.8731951, -0.00015218, -0.00000531],
    semi_major_axis: 9.554747,
};

const URANUS: ElementPolynomials = ElementPolynomials {
    mean_longitude: [244.19747, 429.863546, 0.000316, -0.0000006],
    eccentricity: [0.0463444, -0.00002658, 0.000000077, 0.0],
    inclination: [0.772464, 0.0006253, 0.0000395, 0.0],
    perihelion_longitude: [171.548692, 1.4844328, 0.000234, -0.000000449],
    node_longitude: [73.477111, 0.4986678, 0.0013117, 0.0],
    semi_major_axis: 19.21814,
};

const NEPTUNE: ElementPolynomials = ElementPolynomials {
    mean_longitude: [84.457994, 219.885914, 0.0003205, -0.0000006],
    eccentricity: [0.00899704, 0.00000633, -0.000000002, 0.0],
    inclination: [1.779242, -0.0095436, -0.0000091, 0.0],
    perihelion_longitude: [46.727364, 1.4245744, 0.00039082, -0.000000605],
    node_longitude: [130.681389, 1.098935, 0.00024987, -0.000004718],
    semi_major_axis: 30.10957,
};

fn poly(c: &[f64; 4], t: f64) -> f64 {
    ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
}

/// Shared arguments of the perturbation series: the auxiliary epoch variable and
/// the mean anomalies of the perturbing bodies, radians.
struct PerturbationArgs {
    /// Centuries since 1900.0
    t: f64,
    j1: f64,
    /// Jupiter
    j2: Radian,
    /// Saturn
    j3: Radian,
    /// Uranus
    j4: Radian,
    /// Great inequality: 5M♄ − 2M♃
    j5: Radian,
    /// Neptune
    j6: Radian,
    /// Sun
    ms: Radian,
    /// Mercury
    mme: Radian,
    /// Venus
    mv: Radian,
    /// Mars
    mm: Radian,
}

impl PerturbationArgs {
    fn at(t: f64) -> Self {
        let anomaly = |p: &ElementPolynomials| {
            unwind((poly(&p.mean_longitude, t) - poly(&p.perihelion_longitude, t)) * RADEG)
        };
        let j2 = unwind(4.14473 + 52.9691 * t);
        let j3 = unwind(4.641118 + 21.32991 * t);
        PerturbationArgs {
            t,
            j1: t / 5.0 + 0.1,
            j2,
            j3,
            j4: unwind(4.250177 + 7.478172 * t),
            j5: 5.0 * j3 - 2.0 * j2,
            j6: unwind(1.46205 + 3.81337 * t),
            ms: unwind(
                (358.47583 + 35999.04975 * t - (0.00015 + 0.0000033 * t) * t * t) * RADEG,
            ),
            mme: anomaly(&MERCURY),
            mv: anomaly(&VENUS),
            mm: anomaly(&MARS),
        }
    }
}

/// Periodic corrections to the heliocentric longitude (degrees) and radius vector
/// (AU) of one planet.
fn perturbations(planet: Planet, p: &PerturbationArgs) -> (Degree, Au) {
    let (j1, j2, j3, j4, j5, j6) = (p.j1, p.j2, p.j3, p.j4, p.j5, p.j6);
    let (ms, mme, mv, mm) = (p.ms, p.mme, p.mv, p.mm);
    // Jupiter's own mean anomaly doubles as a perturbation argument
    let mj = j2;

    match planet {
        Planet::Mercury => {
            let mut dl = 0.00204 * (5.0 * mv - 2.0 * mme + 0.21328).cos();
            dl += 0.00103 * (2.0 * mv - mme - 2.8046).cos();
            dl += 0.00091 * (2.0 * mj - mme - 0.6187).cos();
            dl += 0.00078 * (5.0 * mv - 3.0 * mme + 0.5559).cos();

            let mut dr = 0.000007525 * (2.0 * mj - mme + 0.925251).cos();
            dr += 0.000006802 * (5.0 * mv - 3.0 * mme - 4.53642).cos();
            dr += 0.000005457 * (2.0 * mv - 2.0 * mme - 1.24246).cos();
            dr += 0.000003569 * (5.0 * mv - mme - 1.35699).cos();
            (dl, dr)
        }
        Planet::Venus => {
            let mut dl = 0.00077 * (4.1406 + 2.6227 * p.t).sin();
            dl += 0.00313 * (2.0 * ms - 2.0 * mv - 2.587).cos();
            dl += 0.00198 * (3.0 * ms - 3.0 * mv + 0.044768).cos();
            dl += 0.00136 * (ms - mv - 2.0788).cos();
            dl += 0.00096 * (3.0 * ms - 2.0 * mv - 2.3721).cos();
            dl += 0.00082 * (mj - mv - 3.6318).cos();

            let mut dr = 0.000022501 * (2.0 * ms - 2.0 * mv - 1.01592).cos();
            dr += 0.000019045 * (3.0 * ms - 3.0 * mv + 1.61577).cos();
            dr += 0.000006887 * (mj - mv - 2.06106).cos();
            dr += 0.000005172 * (ms - mv - 0.508065).cos();
            dr += 0.00000362 * (5.0 * ms - 4.0 * mv - 1.81877).cos();
            dr += 0.000003283 * (4.0 * ms - 4.0 * mv + 1.10851).cos();
            dr += 0.000003074 * (2.0 * mj - 2.0 * mv - 0.962846).cos();
            (dl, dr)
        }
        Planet::Mars => {
            let mut dl = 0.00705 * (mj - mm - 0.85448).cos();
            dl += 0.00607 * (2.0 * mj - mm - 3.2873).cos();
            dl += 0.00445 * (2.0 * mj - 2.0 * mm - 3.3492).cos();
            dl += 0.00388 * (ms - 2.0 * mm + 0.35771).cos();
            dl += 0.00238 * (ms - mm + 0.61256).cos();
            dl += 0.00204 * (2.0 * ms - 3.0 * mm + 2.7688).cos();
            dl += 0.00177 * (3.0 * mm - mv - 1.0053).cos();
            dl += 0.00136 * (2.0 * ms - 4.0 * mm + 2.6894).cos();
            dl += 0.00104 * (mj + 0.30749).cos();

            let mut dr = 0.000053227 * (mj - mm + 0.717864).cos();
            dr += 0.000050989 * (2.0 * mj - 2.0 * mm - 1.77997).cos();
            dr += 0.000038278 * (2.0 * mj - mm - 1.71617).cos();
            dr += 0.000015996 * (ms - mm - 0.969618).cos();
            dr += 0.000014764 * (2.0 * ms - 3.0 * mm + 1.19768).cos();
            dr += 0.000008966 * (mj - 2.0 * mm + 0.761225).cos();
            dr += 0.000007914 * (3.0 * mj - 2.0 * mm - 2.43887).cos();
            dr += 0.000007004 * (2.0 * mj - 3.0 * mm - 1.79573).cos();
            dr += 0.00000662 * (ms - 2.0 * mm + 1.97575).cos();
            dr += 0.00000493 * (3.0 * mj - 3.0 * mm - 1.33069).cos();
            dr += 0.000004693 * (3.0 * ms - 5.0 * mm + 3.32665).cos();
            dr += 0.000004571 * (2.0 * ms - 4.0 * mm + 4.27086).cos();
            dr += 0.000004409 * (3.0 * mj - mm - 2.02158).cos();
            (dl, dr)
        }
        Planet::Jupiter => {
            let mut dl = (0.331364 - (0.010281 + 0.004692 * j1) * j1) * j5.sin();
            dl += (0.003228 - (0.064436 - 0.002075 * j1) * j1) * j5.cos();
            dl -= (0.003083 + (0.000275 - 0.000489 * j1) * j1) * (2.0 * j5).sin();
            (dl, 0.0)
        }
        Planet::Saturn => {
            let j7 = j3 - j2;
            let mut dl = (-0.814181 + (0.01815 + 0.016714 * j1) * j1) * j5.sin();
            dl += (-0.010497 + (0.160906 - 0.0041 * j1) * j1) * j5.cos();
            dl += 0.007581 * (2.0 * j5).sin();
            dl -= 0.007986 * j6.sin();
            dl -= 0.148811 * j7.sin();
            dl -= 0.040786 * (2.0 * j7).sin();
            dl -= 0.015208 * (3.0 * j7).sin();
            dl -= 0.006339 * (4.0 * j7).sin();
            (dl, 0.0)
        }
        Planet::Uranus => {
            let j9 = j4 - j3;
            let mut dl = (0.864319 - 0.001583 * j1) * j9.sin();
            dl += (0.082222 - 0.006833 * j1) * j9.cos();
            dl += 0.036017 * (2.0 * j9).sin();
            dl -= 0.003019 * (2.0 * j9).cos();
            dl += 0.008122 * j6.sin();
            (dl, 0.0)
        }
        Planet::Neptune => {
            let j8 = j4 - j6;
            let mut dl = (0.089085 - 0.002979 * j1) * j8.sin();
            dl += 0.008189 * j8.cos();
            dl += 0.004391 * (2.0 * j8).sin();
            (dl, 0.0)
        }
    }
}

/// Heliocentric state of a body, referred to the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Heliocentric {
    /// Heliocentric longitude projected onto the ecliptic, degrees.
    pub ld: Degree,
    /// Radius vector projected onto the ecliptic, AU.
    pub rd: Au,
    /// Heliocentric latitude, radians.
    pub psi: Radian,
    /// True radius vector, AU.
    pub r: Au,
}

/// Solve the orbit and tilt it onto the ecliptic.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: degrees.
/// * `perihelion_longitude`, `node_longitude`, `inclination`: degrees.
/// * `dl`, `dr`: perturbation corrections to the longitude (degrees) and radius (AU).
pub(crate) fn heliocentric_state(
    mean_anomaly: Degree,
    perihelion_longitude: Degree,
    eccentricity: f64,
    semi_major_axis: Au,
    inclination: Degree,
    node_longitude: Degree,
    dl: Degree,
    dr: Au,
) -> Result<Heliocentric, AlmagestError> {
    let nu = true_anomaly(mean_anomaly * RADEG, eccentricity)?;
    let lp = nu / RADEG + perihelion_longitude + dl;
    let r = semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * nu.cos())
        + dr;

    let lo = (lp - node_longitude) * RADEG;
    let i = inclination * RADEG;
    let psi = (lo.sin() * i.sin()).asin();
    let ld = (lo.sin() * i.cos()).atan2(lo.cos()) / RADEG + node_longitude;
    let rd = r * psi.cos();

    Ok(Heliocentric { ld, rd, psi, r })
}

/// Project a heliocentric state to geocentric ecliptic coordinates, given the
/// Earth's heliocentric longitude (degrees) and radius (AU).
///
/// The inferior branch (`rd < re`) sights past the Sun; the superior branch sights
/// outward. Both reduce to the same triangle solved from opposite corners.
pub(crate) fn project_to_geocentric(h: &Heliocentric, le: Degree, re: Au) -> (Degree, Degree) {
    let lp1 = h.ld * RADEG;
    let le1 = le * RADEG;

    let lam = if h.rd < re {
        (h.rd * (le1 - lp1).sin()).atan2(re - h.rd * (le1 - lp1).cos()) + le1 + std::f64::consts::PI
    } else {
        (re * (lp1 - le1).sin()).atan2(h.rd - re * (lp1 - le1).cos()) + lp1
    };
    let lam = unwind(lam);

    let beta = (h.rd * h.psi.tan() * (lam - lp1).sin() / (re * (lp1 - le1).sin())).atan();
    (lam / RADEG, beta / RADEG)
}

/// Geocentric distance from the heliocentric triangle, AU.
fn geocentric_distance(h: &Heliocentric, le: Degree, re: Au) -> Au {
    let d = (h.ld - le) * RADEG;
    (h.rd * h.rd + re * re - 2.0 * h.rd * re * d.cos() + (h.r * h.psi.sin()).powi(2)).sqrt()
}

/// Internal bundle shared by the position and visual-aspect routines.
struct PlanetGeometry {
    /// Geocentric ecliptic longitude/latitude, degrees.
    lambda: Degree,
    beta: Degree,
    /// Heliocentric radius, AU.
    r: Au,
    /// Geocentric distance, AU.
    rho: Au,
    /// Heliocentric longitude (ecliptic-projected), degrees.
    ld: Degree,
}

fn planet_geometry(
    planet: Planet,
    ut: Hour,
    greenwich_date: (f64, u32, i32),
) -> Result<PlanetGeometry, AlmagestError> {
    let (gd, gm, gy) = greenwich_date;
    let jd = civil_date_to_julian_date(gd, gm, gy);
    let t0 = (jd - J1900) / JULIAN_CENTURY + ut / 876600.0;

    let sun = sun_ephemeris(ut, gd, gm, gy)?;
    let le = unwind_deg(sun.true_longitude + 180.0);
    let re = sun.distance;

    // Two passes: the second is antedated by the light travel time.
    let mut light_days = 0.0;
    let mut geometry = None;
    for _ in 0..2 {
        let t = t0 - light_days / JULIAN_CENTURY;
        let el = planet.polynomial();
        let args = PerturbationArgs::at(t);
        let (dl, dr) = perturbations(planet, &args);

        let mean_anomaly =
            unwind_deg(poly(&el.mean_longitude, t) - poly(&el.perihelion_longitude, t));
        let h = heliocentric_state(
            mean_anomaly,
            poly(&el.perihelion_longitude, t),
            poly(&el.eccentricity, t),
            el.semi_major_axis,
            poly(&el.inclination, t),
            poly(&el.node_longitude, t),
            dl,
            dr,
        )?;

        let rho = geocentric_distance(&h, le, re);
        light_days = LIGHT_DAYS_PER_AU * rho;
        let (lambda, beta) = project_to_geocentric(&h, le, re);
        geometry = Some(PlanetGeometry {
            lambda,
            beta,
            r: h.r,
            rho,
            ld: h.ld,
        });
    }

    Ok(geometry.expect("two passes always ran"))
}

/// Precise equatorial position of a planet for a local civil instant, from the
/// polynomial element series with perturbations and the light-time correction.
///
/// Return
/// ------
/// * `(right ascension in decimal hours, declination in degrees)`.
pub fn precise_position_of_planet(
    planet: Planet,
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
    let gdate =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let g = planet_geometry(planet, ut, gdate)?;
    Ok(ecliptic_to_equatorial(g.lambda, g.beta, gdate.0, gdate.1, gdate.2))
}

/// Approximate equatorial position from a catalog element record (single-epoch
/// elements, no perturbations).
pub fn approximate_position_of_planet(
    elements: &PlanetElements,
    earth: &PlanetElements,
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
    let d = civil_date_to_julian_date(gd, gm, gy) + ut / 24.0 - EPOCH_2010;

    let mean = |e: &PlanetElements| {
        unwind_deg(
            360.0 / TROPICAL_YEAR * d / e.period + e.longitude_epoch - e.perihelion_longitude,
        )
    };

    let h = heliocentric_state(
        mean(elements),
        elements.perihelion_longitude,
        elements.eccentricity,
        elements.semi_major_axis,
        elements.inclination,
        elements.node_longitude,
        0.0,
        0.0,
    )?;
    let earth_h = heliocentric_state(
        mean(earth),
        earth.perihelion_longitude,
        earth.eccentricity,
        earth.semi_major_axis,
        0.0,
        0.0,
        0.0,
        0.0,
    )?;

    let (lambda, beta) = project_to_geocentric(&h, earth_h.ld, earth_h.rd);
    Ok(ecliptic_to_equatorial(lambda, beta, gd, gm, gy))
}

/// Visual aspects of a planet: distance, apparent size, illuminated fraction, and
/// magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetAspects {
    /// Geocentric distance, AU.
    pub distance: Au,
    /// Apparent angular diameter, arcseconds.
    pub angular_diameter: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub phase: f64,
    /// Apparent visual magnitude.
    pub magnitude: f64,
}

/// Compute the visual aspects of a planet for a local civil instant, combining the
/// precise geometry with the 1-AU constants from the catalog record.
pub fn visual_aspects(
    planet: Planet,
    elements: &PlanetElements,
    hour: f64,
    min: f64,
    sec: f64,
    daylight_saving: bool,
    zone_correction: f64,
    day: f64,
    month: u32,
    year: i32,
) -> Result<PlanetAspects, AlmagestError> {
    let ut = local_civil_to_universal(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let gdate =
        greenwich_date_of_local(hour, min, sec, daylight_saving, zone_correction, day, month, year);
    let g = planet_geometry(planet, ut, gdate)?;

    let phase = (1.0 + ((g.lambda - g.ld) * RADEG).cos()) / 2.0;
    let angular_diameter = elements.angular_diameter_1au / g.rho;
    let magnitude = 5.0 * (g.r * g.rho / phase.max(1e-12).sqrt()).log10() + elements.magnitude_1au;

    Ok(PlanetAspects {
        distance: g.rho,
        angular_diameter,
        phase,
        magnitude,
    })
}

#[cfg(test)]
mod planets_test {
    use super::*;
    use crate::catalog::planet_elements;
    use crate::sun::{precise_position_of_sun, solar_elongation};

    #[test]
    fn test_inner_planets_stay_near_the_sun() {
        // Maximum elongation: Mercury ~28°, Venus ~47°. Holds on any date.
        for (day, month, year) in [(15.0, 2, 1988), (1.0, 9, 2003), (20.0, 6, 2015)] {
            let (sun_ra, sun_dec) =
                precise_position_of_sun(0.0, 0.0, 0.0, false, 0.0, day, month, year).unwrap();

            let (ra, dec) = precise_position_of_planet(
                Planet::Mercury,
                0.0,
                0.0,
                0.0,
                false,
                0.0,
                day,
                month,
                year,
            )
            .unwrap();
            let elong = solar_elongation(ra, dec, sun_ra, sun_dec);
            assert!(elong < 29.0, "Mercury elongation {elong} on {day}/{month}/{year}");

            let (ra, dec) = precise_position_of_planet(
                Planet::Venus,
                0.0,
                0.0,
                0.0,
                false,
                0.0,
                day,
                month,
                year,
            )
            .unwrap();
            let elong = solar_elongation(ra, dec, sun_ra, sun_dec);
            assert!(elong < 48.5, "Venus elongation {elong} on {day}/{month}/{year}");
        }
    }

    #[test]
    fn test_position_ranges() {
        for planet in [
            Planet::Mercury,
            Planet::Venus,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
        ] {
            let (ra, dec) =
                precise_position_of_planet(planet, 0.0, 0.0, 0.0, false, 0.0, 1.0, 9, 2003)
                    .unwrap();
            assert!((0.0..24.0).contains(&ra), "{} ra {ra}", planet.name());
            assert!((-90.0..90.0).contains(&dec), "{} dec {dec}", planet.name());
            // Planets stay within a few degrees of the ecliptic.
            let (_, beta) = crate::ref_system::equatorial_to_ecliptic(ra, dec, 1.0, 9, 2003);
            assert!(beta.abs() < 10.0, "{} ecliptic latitude {beta}", planet.name());
        }
    }

    #[test]
    fn test_approximate_agrees_with_precise() {
        // The single-epoch catalog elements drift slowly; near the 2010 epoch the two
        // methods agree to well under a degree.
        let earth = planet_elements("Earth").unwrap();
        for name in ["Jupiter", "Saturn"] {
            let planet = Planet::from_name(name).unwrap();
            let elements = planet_elements(name).unwrap();
            let (ra1, dec1) = approximate_position_of_planet(
                elements, earth, 0.0, 0.0, 0.0, false, 0.0, 10.0, 11, 2010,
            )
            .unwrap();
            let (ra2, dec2) =
                precise_position_of_planet(planet, 0.0, 0.0, 0.0, false, 0.0, 10.0, 11, 2010)
                    .unwrap();
            assert!((ra1 - ra2).abs() * 15.0 < 1.5, "{name} RA {ra1} vs {ra2}");
            assert!((dec1 - dec2).abs() < 1.5, "{name} Dec {dec1} vs {dec2}");
        }
    }

    #[test]
    fn test_visual_aspects_bounds() {
        let elements = planet_elements("Venus").unwrap();
        let aspects =
            visual_aspects(Planet::Venus, elements, 0.0, 0.0, 0.0, false, 0.0, 1.0, 9, 2003)
                .unwrap();
        assert!((0.25..1.75).contains(&aspects.distance), "{}", aspects.distance);
        assert!((9.0..70.0).contains(&aspects.angular_diameter));
        assert!((0.0..=1.0).contains(&aspects.phase));
        assert!(aspects.magnitude < 0.0, "Venus magnitude {}", aspects.magnitude);
    }
}
