//! # Geo Utility
//!
//! Point-in-polygon containment and polygon area for market polygons.
//!
//! These functions feed an optional location filter, so malformed geometry
//! degrades to a safe default (point excluded, area zero) instead of
//! raising. Nothing in this module allocates state or performs I/O.

use serde::{Deserialize, Serialize};

/// Approximate meters per degree of latitude (and of longitude at the
/// equator). Good to well under 1 % at market-polygon scale.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Square meters per acre.
const SQ_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// A geographic point as a `(longitude, latitude)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A market polygon, represented by its exterior ring.
///
/// The ring need not be explicitly closed; the last vertex is joined back
/// to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPolygon {
    ring: Vec<GeoPoint>,
}

impl GeoPolygon {
    /// Creates a polygon from its exterior ring.
    #[must_use]
    pub fn new(ring: Vec<GeoPoint>) -> Self {
        Self { ring }
    }

    /// Creates a polygon from `(longitude, latitude)` pairs.
    #[must_use]
    pub fn from_lon_lat(coords: &[(f64, f64)]) -> Self {
        Self {
            ring: coords
                .iter()
                .map(|&(lon, lat)| GeoPoint::new(lon, lat))
                .collect(),
        }
    }

    /// Returns the exterior ring.
    #[must_use]
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Returns true if the point lies inside the polygon.
    ///
    /// Ray casting over the exterior ring. Rings with fewer than 3 vertices
    /// always return `false`. Boundary tie-break: each edge's latitude span
    /// is half-open (`min <= lat < max`), so a point exactly on the
    /// minimum-latitude edge of the ring counts as inside and one on the
    /// maximum-latitude edge as outside; a point on a west-facing vertical
    /// edge is inside, on an east-facing one outside. Non-finite
    /// coordinates fail every crossing test and resolve to `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use comp_select::domain::value_objects::geo::{GeoPoint, GeoPolygon};
    ///
    /// let square = GeoPolygon::from_lon_lat(&[
    ///     (0.0, 0.0),
    ///     (1.0, 0.0),
    ///     (1.0, 1.0),
    ///     (0.0, 1.0),
    /// ]);
    /// assert!(square.contains(GeoPoint::new(0.5, 0.5)));
    /// assert!(!square.contains(GeoPoint::new(1.5, 0.5)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        if self.ring.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut prev = match self.ring.last() {
            Some(p) => *p,
            None => return false,
        };
        for &cur in &self.ring {
            if (cur.lat > point.lat) != (prev.lat > point.lat) {
                let x_cross =
                    prev.lon + (point.lat - prev.lat) * (cur.lon - prev.lon) / (cur.lat - prev.lat);
                if point.lon < x_cross {
                    inside = !inside;
                }
            }
            prev = cur;
        }
        inside
    }

    /// Returns the polygon area in acres.
    ///
    /// Shoelace formula over the exterior ring, with degree coordinates
    /// projected to meters by an equirectangular approximation at the
    /// ring's mean latitude. Degenerate or malformed geometry returns
    /// `0.0`; this function never fails.
    #[must_use]
    pub fn area_acres(&self) -> f64 {
        if self.ring.len() < 3 {
            return 0.0;
        }

        let mean_lat =
            self.ring.iter().map(|p| p.lat).sum::<f64>() / self.ring.len() as f64;
        let lon_scale = METERS_PER_DEGREE * mean_lat.to_radians().cos();

        let mut twice_area = 0.0;
        let mut prev = match self.ring.last() {
            Some(p) => *p,
            None => return 0.0,
        };
        for &cur in &self.ring {
            let (x0, y0) = (prev.lon * lon_scale, prev.lat * METERS_PER_DEGREE);
            let (x1, y1) = (cur.lon * lon_scale, cur.lat * METERS_PER_DEGREE);
            twice_area += x0 * y1 - x1 * y0;
            prev = cur;
        }

        let acres = (twice_area / 2.0).abs() / SQ_METERS_PER_ACRE;
        if acres.is_finite() { acres } else { 0.0 }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square() -> GeoPolygon {
        GeoPolygon::from_lon_lat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn interior_point_is_inside() {
        assert!(unit_square().contains(GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn exterior_point_is_outside() {
        assert!(!unit_square().contains(GeoPoint::new(2.0, 0.5)));
        assert!(!unit_square().contains(GeoPoint::new(0.5, -0.5)));
    }

    #[test]
    fn degenerate_ring_is_never_inside() {
        let two_points = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!two_points.contains(GeoPoint::new(0.5, 0.5)));
        assert!(!GeoPolygon::default().contains(GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn boundary_tie_break_is_half_open() {
        let square = unit_square();
        // Minimum-latitude edge counts inside, maximum-latitude edge outside.
        assert!(square.contains(GeoPoint::new(0.5, 0.0)));
        assert!(!square.contains(GeoPoint::new(0.5, 1.0)));
        // West vertical edge inside, east vertical edge outside.
        assert!(square.contains(GeoPoint::new(0.0, 0.5)));
        assert!(!square.contains(GeoPoint::new(1.0, 0.5)));
    }

    #[test]
    fn non_finite_point_is_outside() {
        assert!(!unit_square().contains(GeoPoint::new(f64::NAN, 0.5)));
    }

    #[test]
    fn concave_polygon_containment() {
        // A "U" shape; the notch between the prongs is outside.
        let u_shape = GeoPolygon::from_lon_lat(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        assert!(u_shape.contains(GeoPoint::new(0.5, 2.0)));
        assert!(u_shape.contains(GeoPoint::new(2.5, 2.0)));
        assert!(!u_shape.contains(GeoPoint::new(1.5, 2.0)));
    }

    #[test]
    fn area_of_small_equatorial_square() {
        // 0.01 deg x 0.01 deg at the equator is roughly 1113 m on a side,
        // about 306 acres.
        let square = GeoPolygon::from_lon_lat(&[
            (0.0, 0.0),
            (0.01, 0.0),
            (0.01, 0.01),
            (0.0, 0.01),
        ]);
        let acres = square.area_acres();
        assert!((acres - 306.2).abs() < 3.0, "got {acres}");
    }

    #[test]
    fn area_of_degenerate_polygon_is_zero() {
        assert_eq!(GeoPolygon::default().area_acres(), 0.0);
        let line = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(line.area_acres(), 0.0);
        let collinear = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(collinear.area_acres().abs() < 1e-6);
    }

    #[test]
    fn area_with_non_finite_vertex_is_zero() {
        let bad = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]);
        assert_eq!(bad.area_acres(), 0.0);
    }

    #[test]
    fn area_ignores_winding_direction() {
        let cw = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0)]);
        let ccw = GeoPolygon::from_lon_lat(&[(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)]);
        assert!((cw.area_acres() - ccw.area_acres()).abs() < 1e-9);
    }
}
