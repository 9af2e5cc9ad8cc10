use crate::error::{GeometryError, Result};
use crate::geometry::curve::Line3;
use crate::math::intersect_3d::{
    classify_point_plane, line_plane_intersect, plane_plane_intersect,
    project_segment_onto_plane, PlaneHit, PointPlaneClassification,
};
use crate::math::{normalize_or_zero, Point3, Vector3, TOLERANCE};

/// An implicit plane `a*x + b*y + c*z + d = 0` in 3D space.
///
/// Planes built from three points carry a unit normal. Planes built from raw
/// coefficients keep them as given, so distances scale with `|(a, b, c)|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Plane {
    /// Creates a plane from its four coefficients. No normalization.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Creates a plane from its coefficients, refusing a zero normal.
    ///
    /// # Errors
    ///
    /// Returns an error if `(a, b, c)` is zero-length.
    pub fn try_new(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if Vector3::new(a, b, c).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self::new(a, b, c, d))
    }

    /// Creates the plane through three points.
    ///
    /// The normal is the normalized `(v2 - v0) × (v1 - v0)`, which is
    /// opposite to the face normal of the triangle `(v0, v1, v2)`. Collinear
    /// points give a zero normal and `d = 0`.
    #[must_use]
    pub fn from_points(v0: Point3, v1: Point3, v2: Point3) -> Self {
        let normal = normalize_or_zero(&(v2 - v0).cross(&(v1 - v0)));
        let d = -normal.dot(&v0.coords);
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// Creates the plane through three points, refusing collinear input.
    ///
    /// # Errors
    ///
    /// Returns an error if the three points are collinear or coincident.
    pub fn try_from_points(v0: Point3, v1: Point3, v2: Point3) -> Result<Self> {
        if (v2 - v0).cross(&(v1 - v0)).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane points are collinear".into()).into());
        }
        Ok(Self::from_points(v0, v1, v2))
    }

    /// Replaces all four coefficients.
    pub fn reset(&mut self, a: f64, b: f64, c: f64, d: f64) {
        *self = Self::new(a, b, c, d);
    }

    /// Replaces the plane with the one through three points.
    pub fn reset_from_points(&mut self, v0: Point3, v1: Point3, v2: Point3) {
        *self = Self::from_points(v0, v1, v2);
    }

    /// Returns `[a, b, c, d]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns the constant term `d`.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Returns `(a, b, c)` as stored, without renormalizing.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Signed distance of `p` to the plane.
    ///
    /// Zero on the plane, positive on the side the normal points to.
    #[must_use]
    pub fn distance(&self, p: &Point3) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Which side of the plane `p` lies on.
    #[must_use]
    pub fn classify(&self, p: &Point3) -> PointPlaneClassification {
        classify_point_plane(p, self)
    }

    /// Point where the infinite line through `p1` and `p2` crosses the plane.
    ///
    /// Not guarded against lines parallel to the plane; the result is then
    /// non-finite.
    #[must_use]
    pub fn project_segment(&self, p1: &Point3, p2: &Point3) -> Point3 {
        project_segment_onto_plane(p1, p2, self)
    }

    /// Intersects the infinite line through `line` with the plane.
    ///
    /// Returns `None` if the line is parallel to the plane.
    #[must_use]
    pub fn intersect_line(&self, line: &Line3) -> Option<PlaneHit> {
        line_plane_intersect(line, self)
    }

    /// Computes the line shared by this plane and `other`.
    ///
    /// Returns `None` if the planes are parallel.
    #[must_use]
    pub fn intersect_plane(&self, other: &Self) -> Option<Line3> {
        plane_plane_intersect(self, other)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}
