use tracing::trace;

use super::{Point2, Vector2, DIRECTION_EPSILON};

/// Relationship between two bounded 2D segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentPairRelation {
    /// The segments cross at a single point.
    ///
    /// `mua` and `mub` are the parameters of the crossing along the first
    /// and second segment, both in `[0, 1]`.
    Crossing { point: Point2, mua: f64, mub: f64 },
    /// The segments lie on the same line.
    ///
    /// No overlap interval is computed; `midpoint` is the midpoint of the
    /// first segment.
    Coincident { midpoint: Point2 },
    /// The segments are parallel and not on the same line.
    Parallel,
    /// The supporting lines cross outside one or both segments.
    Disjoint,
}

impl SegmentPairRelation {
    /// Returns the reported intersection point, if any.
    #[must_use]
    pub fn point(&self) -> Option<Point2> {
        match *self {
            Self::Crossing { point, .. } => Some(point),
            Self::Coincident { midpoint } => Some(midpoint),
            Self::Parallel | Self::Disjoint => None,
        }
    }
}

/// Segment-segment intersection in 2D (Paul Bourke's determinant method).
///
/// The segments are `a0 + mua * da` and `b0 + mub * db` with `mua, mub`
/// in `[0, 1]`.
#[must_use]
pub fn segment_segment_bourke(
    a0: &Point2,
    da: &Vector2,
    b0: &Point2,
    db: &Vector2,
) -> SegmentPairRelation {
    let diff = a0 - b0;

    let denom = db.y * da.x - db.x * da.y;
    let numer_a = db.x * diff.y - db.y * diff.x;
    let numer_b = da.x * diff.y - da.y * diff.x;

    let denom_zero = denom.abs() < DIRECTION_EPSILON;
    if denom_zero && numer_a.abs() < DIRECTION_EPSILON && numer_b.abs() < DIRECTION_EPSILON {
        return SegmentPairRelation::Coincident {
            midpoint: a0 + da * 0.5,
        };
    }
    if denom_zero {
        trace!(denom, "segments are parallel");
        return SegmentPairRelation::Parallel;
    }

    let mua = numer_a / denom;
    let mub = numer_b / denom;
    if !(0.0..=1.0).contains(&mua) || !(0.0..=1.0).contains(&mub) {
        trace!(mua, mub, "segment crossing lies outside the segments");
        return SegmentPairRelation::Disjoint;
    }

    SegmentPairRelation::Crossing {
        point: a0 + da * mua,
        mua,
        mub,
    }
}
