//! Equatorial to Cartesian conversion
//!
//! Positions are heliocentric, in parsecs, with x toward RA 0 / Dec 0,
//! y toward RA 90° and z toward the north celestial pole.

use nalgebra::Point3;

/// Milliarcseconds of parallax at one parsec
const MAS_PER_PARSEC: f64 = 1000.0;

/// Distance in parsecs for a parallax in milliarcseconds.
///
/// A parallax of zero or less has no meaningful distance and maps to 0,
/// which places the object at the origin.
pub fn parallax_to_distance(parallax_mas: f64) -> f64 {
    if parallax_mas > 0.0 {
        MAS_PER_PARSEC / parallax_mas
    } else {
        0.0
    }
}

/// Convert right ascension and declination (degrees) plus parallax (mas)
/// into Cartesian coordinates in parsecs.
pub fn convert(ra_deg: f64, dec_deg: f64, parallax_mas: f64) -> (f64, f64, f64) {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    let distance = parallax_to_distance(parallax_mas);

    (
        distance * dec.cos() * ra.cos(),
        distance * dec.cos() * ra.sin(),
        distance * dec.sin(),
    )
}

/// [`convert`] returning a point
pub fn to_point(ra_deg: f64, dec_deg: f64, parallax_mas: f64) -> Point3<f64> {
    let (x, y, z) = convert(ra_deg, dec_deg, parallax_mas);
    Point3::new(x, y, z)
}
