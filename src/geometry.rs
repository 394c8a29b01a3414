//! Geometry kernel
//!
//! Euclidean distance and circumcircles of three points in the plane.

use glam::DVec2;

use crate::error::GeometryError;

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: DVec2, p2: DVec2) -> f64 {
    p1.distance(p2)
}

/// Center of the circle through three points
///
/// Intersects the perpendicular bisectors of chords `(p1, p2)` and `(p2, p3)`.
/// Each bisector is kept in normal form `(b - a) · X = (b - a) · midpoint`,
/// so vertical and horizontal chords are ordinary inputs and the only way the
/// 2×2 system can be singular is parallel bisectors.
///
/// # Errors
///
/// - [`GeometryError::NonFinite`] if any input or the solved center is NaN/infinite
/// - [`GeometryError::CoincidentPoints`] if two of the points are equal
/// - [`GeometryError::Collinear`] if the bisectors are parallel
pub fn circumcenter(p1: DVec2, p2: DVec2, p3: DVec2) -> Result<DVec2, GeometryError> {
    let non_finite = GeometryError::NonFinite {
        a: p1,
        b: p2,
        c: p3,
    };
    if !(p1.is_finite() && p2.is_finite() && p3.is_finite()) {
        return Err(non_finite);
    }
    for (a, b) in [(p1, p2), (p2, p3), (p1, p3)] {
        if a == b {
            return Err(GeometryError::CoincidentPoints { a, b });
        }
    }

    let chord12 = p2 - p1;
    let chord23 = p3 - p2;
    let mid12 = (p1 + p2) * 0.5;
    let mid23 = (p2 + p3) * 0.5;
    let rhs12 = chord12.dot(mid12);
    let rhs23 = chord23.dot(mid23);

    let det = chord12.perp_dot(chord23);
    if det.abs() <= f64::EPSILON * chord12.length() * chord23.length() {
        return Err(GeometryError::Collinear {
            a: p1,
            b: p2,
            c: p3,
        });
    }

    let center = DVec2::new(
        (rhs12 * chord23.y - chord12.y * rhs23) / det,
        (chord12.x * rhs23 - rhs12 * chord23.x) / det,
    );
    if center.is_finite() {
        Ok(center)
    } else {
        Err(non_finite)
    }
}

/// Circumradius given the center and any of the three vertices
#[inline]
pub fn circumradius(center: DVec2, vertex: DVec2) -> f64 {
    distance(center, vertex)
}

/// A circle through three points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circumcircle {
    /// Compute the circumcircle of three points
    pub fn from_points(p1: DVec2, p2: DVec2, p3: DVec2) -> Result<Self, GeometryError> {
        let center = circumcenter(p1, p2, p3)?;
        Ok(Self {
            center,
            radius: circumradius(center, p1),
        })
    }

    /// Strict interior test; points on the circle are outside.
    ///
    /// Points within rounding distance of the circle may land either way.
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        distance(self.center, point) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)), 5.0);
        assert_relative_eq!(distance(DVec2::new(-2.0, 7.0), DVec2::new(-2.0, 7.0)), 0.0);
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        // Hypotenuse midpoint; both chords are axis aligned
        let center = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 6.0),
            DVec2::new(8.0, 6.0),
        )
        .unwrap();
        assert_relative_eq!(center.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let (a, b, c) = (
            DVec2::new(12.0, 31.0),
            DVec2::new(47.0, 15.0),
            DVec2::new(88.0, 40.0),
        );
        let center = circumcenter(a, b, c).unwrap();
        let r = circumradius(center, a);
        assert_relative_eq!(distance(center, b), r, epsilon = 1e-9);
        assert_relative_eq!(distance(center, c), r, epsilon = 1e-9);
    }

    #[test]
    fn test_circumcenter_collinear() {
        let result = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(10.0, 10.0),
        );
        assert!(matches!(result, Err(GeometryError::Collinear { .. })));
    }

    #[test]
    fn test_circumcenter_coincident() {
        let p = DVec2::new(3.0, 3.0);
        let result = circumcenter(p, DVec2::new(9.0, 1.0), p);
        assert!(matches!(result, Err(GeometryError::CoincidentPoints { .. })));
    }

    #[test]
    fn test_circumcenter_non_finite() {
        let result = circumcenter(
            DVec2::new(f64::NAN, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
        );
        assert!(matches!(result, Err(GeometryError::NonFinite { .. })));
    }

    #[test]
    fn test_circumcircle_contains_is_strict() {
        let circle = Circumcircle::from_points(
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(circle.radius, 1.0, epsilon = 1e-12);
        assert!(circle.contains(DVec2::new(0.2, -0.3)));
        assert!(!circle.contains(DVec2::new(0.0, -1.0)));
        assert!(!circle.contains(DVec2::new(2.0, 0.0)));
    }
}
