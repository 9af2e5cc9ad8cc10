use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{segment_segment_bourke, SegmentPairRelation};
use crate::math::{Point2, Vector2};

/// A 2D line segment from `origin` to `origin + direction`.
///
/// The parametric form is `P(t) = origin + t * direction`; `t` in `[0, 1]`
/// stays on the segment. A zero `direction` is allowed and describes a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    origin: Point2,
    direction: Vector2,
}

impl Line2 {
    /// Creates a segment from an origin and a direction.
    #[must_use]
    pub fn new(origin: Point2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    /// Creates the segment running from `start` to `end`.
    #[must_use]
    pub fn from_points(start: Point2, end: Point2) -> Self {
        Self::new(start, end - start)
    }

    /// Replaces both endpoints.
    pub fn reset(&mut self, start: Point2, end: Point2) {
        *self = Self::from_points(start, end);
    }

    /// Returns the origin point of the segment.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the (unnormalized) direction of the segment.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Returns the start point, identical to [`origin`](Self::origin).
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the end point `origin + direction`.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.origin + self.direction
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction.norm()
    }

    /// Point at parameter `t`; outside `[0, 1]` it lies on the extended line.
    #[must_use]
    pub fn interpolated(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Returns the unit direction vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has zero length.
    pub fn unit_direction(&self) -> Result<Vector2> {
        self.direction
            .try_normalize(0.0)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    /// Classifies how this segment meets `other`.
    #[must_use]
    pub fn relation(&self, other: &Self) -> SegmentPairRelation {
        segment_segment_bourke(
            &self.origin,
            &self.direction,
            &other.origin,
            &other.direction,
        )
    }

    /// Intersects two bounded segments.
    ///
    /// Collinear overlapping segments report the midpoint of `self` rather
    /// than the actual overlap. Returns `None` for parallel segments and for
    /// crossings outside either segment.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Point2> {
        self.relation(other).point()
    }
}

impl Default for Line2 {
    fn default() -> Self {
        Self::new(Point2::origin(), Vector2::zeros())
    }
}
