use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::{line_line_closest, ClosestApproach};
use crate::math::{Point3, Vector3};

/// A 3D line segment defined by an origin point and a direction vector.
///
/// The parametric form is `P(t) = origin + t * direction`. The segment is
/// `t` in `[0, 1]`; distance and closest-point queries work on the infinite
/// line. The direction is stored as given and may be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    origin: Point3,
    direction: Vector3,
}

impl Line3 {
    /// Creates a line from an origin and a direction.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Creates the segment running from `start` to `end`.
    #[must_use]
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self::new(start, end - start)
    }

    /// Replaces both endpoints.
    pub fn reset(&mut self, start: Point3, end: Point3) {
        *self = Self::from_points(start, end);
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the (unnormalized) direction of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the end point `origin + direction`.
    #[must_use]
    pub fn end(&self) -> Point3 {
        self.origin + self.direction
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction.norm()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.direction.norm_squared()
    }

    /// Point at parameter `t`. It is only on the segment for `t` in `[0, 1]`.
    #[must_use]
    pub fn interpolated(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Returns the unit direction vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn unit_direction(&self) -> Result<Vector3> {
        self.direction
            .try_normalize(0.0)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    /// Parameter `t` of the point on the infinite line closest to `p`.
    ///
    /// A line without direction is a point; its parameter is always `0`.
    #[must_use]
    pub fn closest_point_parameter(&self, p: &Point3) -> f64 {
        let l = self.direction.norm_squared();
        if l > 0.0 {
            self.direction.dot(&(p - self.origin)) / l
        } else {
            0.0
        }
    }

    /// Point on the infinite line closest to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Point3) -> Point3 {
        self.interpolated(self.closest_point_parameter(p))
    }

    /// Perpendicular distance from `p` to the infinite line, or the distance
    /// to `origin` if the line has no direction.
    #[must_use]
    pub fn distance(&self, p: &Point3) -> f64 {
        let diff = p - self.origin;
        let l = self.direction.norm_squared();
        if l > 0.0 {
            let t = self.direction.dot(&diff) / l;
            (diff - self.direction * t).norm()
        } else {
            diff.norm()
        }
    }

    /// Shortest connection between this line and `other`, both taken as
    /// infinite lines.
    ///
    /// Returns `None` if either line has no direction or they are parallel.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<ClosestApproach> {
        line_line_closest(self, other)
    }
}

impl Default for Line3 {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::zeros())
    }
}
