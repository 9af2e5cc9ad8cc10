use crate::error::{GeometryError, Result};
use crate::geometry::curve::Line3;
use crate::math::intersect_3d::{line_triangle_intersect, Sidedness};
use crate::math::{normalize_or_zero, Point3, Vector3, TOLERANCE};

use super::Plane;

/// A triangle in 3D space, stored as an origin vertex and two edges.
///
/// Covers the points `origin + s * edge0 + t * edge1` with `s >= 0`,
/// `t >= 0` and `s + t <= 1`. The face normal is `edge0 × edge1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    origin: Point3,
    edge0: Vector3,
    edge1: Vector3,
}

impl Triangle {
    /// Creates the triangle with vertices `v0`, `v1`, `v2`.
    #[must_use]
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self::from_edges(v0, v1 - v0, v2 - v0)
    }

    /// Creates a triangle from its first vertex and the two edges leaving it.
    #[must_use]
    pub fn from_edges(origin: Point3, edge0: Vector3, edge1: Vector3) -> Self {
        Self {
            origin,
            edge0,
            edge1,
        }
    }

    /// Creates a triangle, refusing vertices that span no area.
    ///
    /// # Errors
    ///
    /// Returns an error if the three vertices are collinear or coincident.
    pub fn try_new(v0: Point3, v1: Point3, v2: Point3) -> Result<Self> {
        let tri = Self::new(v0, v1, v2);
        if tri.edge0.cross(&tri.edge1).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("triangle has zero area".into()).into());
        }
        Ok(tri)
    }

    /// Replaces all three vertices.
    pub fn reset(&mut self, v0: Point3, v1: Point3, v2: Point3) {
        *self = Self::new(v0, v1, v2);
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Edge from vertex 0 to vertex 1.
    #[must_use]
    pub fn edge0(&self) -> &Vector3 {
        &self.edge0
    }

    /// Edge from vertex 0 to vertex 2.
    #[must_use]
    pub fn edge1(&self) -> &Vector3 {
        &self.edge1
    }

    /// Unit face normal, or the zero vector for a degenerate triangle.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        normalize_or_zero(&self.edge0.cross(&self.edge1))
    }

    /// Center of gravity.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        self.origin + (self.edge0 + self.edge1) / 3.0
    }

    /// Returns vertex `i` for `i` in `0..3`, and the coordinate origin for any
    /// other index.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point3 {
        match i {
            0 => self.origin,
            1 => self.origin + self.edge0,
            2 => self.origin + self.edge1,
            _ => Point3::origin(),
        }
    }

    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.vertex(0), self.vertex(1), self.vertex(2)]
    }

    /// Point at edge coordinates `(s, t)`: `origin + s * edge0 + t * edge1`.
    #[must_use]
    pub fn point_at(&self, s: f64, t: f64) -> Point3 {
        self.origin + self.edge0 * s + self.edge1 * t
    }

    /// Supporting plane through the three vertices.
    ///
    /// Its normal points opposite to [`normal`](Self::normal).
    #[must_use]
    pub fn plane(&self) -> Plane {
        let [v0, v1, v2] = self.vertices();
        Plane::from_points(v0, v1, v2)
    }

    /// Intersects the segment `line` with the triangle.
    ///
    /// Returns the line parameter `t` of the hit, which lies in `[0, 1]` up to
    /// a small tolerance.
    #[must_use]
    pub fn intersect(&self, line: &Line3, sidedness: Sidedness) -> Option<f64> {
        line_triangle_intersect(line, self, sidedness)
    }

    /// Like [`intersect`](Self::intersect), culling hits on the back face.
    #[must_use]
    pub fn intersect_one_sided(&self, line: &Line3) -> Option<f64> {
        self.intersect(line, Sidedness::OneSided)
    }

    /// Like [`intersect`](Self::intersect), accepting hits on either face.
    #[must_use]
    pub fn intersect_two_sided(&self, line: &Line3) -> Option<f64> {
        self.intersect(line, Sidedness::TwoSided)
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::from_edges(Point3::origin(), Vector3::zeros(), Vector3::zeros())
    }
}
