use tracing::trace;

use crate::geometry::curve::Line3;
use crate::geometry::surface::{Plane, Triangle};

use super::{
    Point3, DIRECTION_EPSILON, LINE_PLANE_PARALLEL_TOLERANCE, LINE_SAMPLE_SPAN,
    PLANE_PLANE_PARALLEL_TOLERANCE, TOLERANCE, TRIANGLE_TOLERANCE,
};

/// Closest approach between two infinite 3D lines.
///
/// For lines that really intersect, `on_self` and `on_other` coincide up to
/// floating-point error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Closest point on the first line.
    pub on_self: Point3,
    /// Closest point on the second line.
    pub on_other: Point3,
    /// Parameter of `on_self` along the first line (`origin + t * direction`).
    pub t_self: f64,
    /// Parameter of `on_other` along the second line.
    pub t_other: f64,
}

impl ClosestApproach {
    /// Length of the shortest segment connecting the two lines.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.on_other - self.on_self).norm()
    }
}

/// Computes the closest-approach points of two infinite lines
/// (Paul Bourke's line/line method).
///
/// Each line is sampled at `t = 0` and `t = LINE_SAMPLE_SPAN`. Returns `None`
/// when either direction is (numerically) zero or the lines are parallel.
#[must_use]
pub fn line_line_closest(a: &Line3, b: &Line3) -> Option<ClosestApproach> {
    let p1 = *a.origin();
    let p2 = a.interpolated(LINE_SAMPLE_SPAN);
    let p3 = *b.origin();
    let p4 = b.interpolated(LINE_SAMPLE_SPAN);

    let p13 = p1 - p3;
    let p43 = p4 - p3;
    if p43.iter().all(|c| c.abs() < DIRECTION_EPSILON) {
        trace!("second line has no direction");
        return None;
    }
    let p21 = p2 - p1;
    if p21.iter().all(|c| c.abs() < DIRECTION_EPSILON) {
        trace!("first line has no direction");
        return None;
    }

    let d1343 = p13.dot(&p43);
    let d4321 = p43.dot(&p21);
    let d1321 = p13.dot(&p21);
    let d4343 = p43.dot(&p43);
    let d2121 = p21.dot(&p21);

    let denom = d2121 * d4343 - d4321 * d4321;
    if denom.abs() < DIRECTION_EPSILON {
        trace!(denom, "lines are parallel");
        return None;
    }
    let numer = d1343 * d4321 - d1321 * d4343;

    let mua = numer / denom;
    let mub = (d1343 + d4321 * mua) / d4343;

    Some(ClosestApproach {
        on_self: p1 + p21 * mua,
        on_other: p3 + p43 * mub,
        t_self: mua * LINE_SAMPLE_SPAN,
        t_other: mub * LINE_SAMPLE_SPAN,
    })
}

/// A line/plane crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    /// The crossing point.
    pub point: Point3,
    /// Parameter of `point` along the line (`origin + t * direction`).
    pub t: f64,
}

/// Intersects the infinite line through `line` with `plane`.
///
/// Returns `None` if the line is parallel to the plane, i.e. the projection
/// of its direction onto the plane normal is within
/// `LINE_PLANE_PARALLEL_TOLERANCE` of zero.
#[must_use]
pub fn line_plane_intersect(line: &Line3, plane: &Plane) -> Option<PlaneHit> {
    let f0 = plane.distance(line.origin());
    let f1 = -plane.normal().dot(line.direction());

    if f1.abs() <= LINE_PLANE_PARALLEL_TOLERANCE {
        trace!(f1, "line is parallel to plane");
        return None;
    }

    let t = f0 / f1;
    Some(PlaneHit {
        point: line.interpolated(t),
        t,
    })
}

/// Point where the infinite line through `p1` and `p2` crosses `plane`.
///
/// Unguarded: a line parallel to the plane divides by (near) zero and
/// yields non-finite coordinates.
#[must_use]
pub fn project_segment_onto_plane(p1: &Point3, p2: &Point3, plane: &Plane) -> Point3 {
    let u = plane.distance(p1) / plane.normal().dot(&(p1 - p2));
    p1 + (p2 - p1) * u
}

/// Computes the line along which two planes meet.
///
/// The returned line has direction `n0 × n1` (not normalized) and an origin
/// lying on both planes. Returns `None` for parallel planes.
#[must_use]
pub fn plane_plane_intersect(a: &Plane, b: &Plane) -> Option<Line3> {
    let n0 = a.normal();
    let n1 = b.normal();

    let n00 = n0.dot(&n0);
    let n01 = n0.dot(&n1);
    let n11 = n1.dot(&n1);
    let det = n00 * n11 - n01 * n01;

    if det.abs() < PLANE_PLANE_PARALLEL_TOLERANCE {
        trace!(det, "planes are parallel");
        return None;
    }

    // Solve n0·p = -d0 and n1·p = -d1 for p = c0 * n0 + c1 * n1.
    let inv_det = 1.0 / det;
    let c0 = (n01 * b.d() - n11 * a.d()) * inv_det;
    let c1 = (n01 * a.d() - n00 * b.d()) * inv_det;

    Some(Line3::new(Point3::from(n0 * c0 + n1 * c1), n0.cross(&n1)))
}

/// Which faces of a triangle a line may enter through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sidedness {
    /// Only lines travelling against the face normal `edge0 × edge1` hit;
    /// back faces are culled.
    #[default]
    OneSided,
    /// Lines hit from either side; only (near) parallel lines are rejected.
    TwoSided,
}

/// Intersects the segment `line` (`t` in `[0, 1]`) with `tri`.
///
/// Returns the line parameter of the hit. Containment is tested by writing
/// the hit relative to the triangle origin as `s0 * edge0 + s1 * edge1` and
/// checking unnormalized coefficients against the edge Gram determinant.
#[must_use]
pub fn line_triangle_intersect(line: &Line3, tri: &Triangle, sidedness: Sidedness) -> Option<f64> {
    let tol = TRIANGLE_TOLERANCE;
    let e0 = tri.edge0();
    let e1 = tri.edge1();
    let norm = e0.cross(e1);
    let denom = norm.dot(line.direction());

    let rejected = match sidedness {
        Sidedness::OneSided => denom >= -tol,
        Sidedness::TwoSided => {
            denom * denom <= tol * line.direction().norm_squared() * norm.norm_squared()
        }
    };
    if rejected {
        trace!(denom, ?sidedness, "line is parallel to or behind triangle");
        return None;
    }

    let diff0 = line.origin() - tri.origin();
    let t = -norm.dot(&diff0) / denom;
    if t < -tol || t > 1.0 + tol {
        trace!(t, "triangle plane lies outside the segment");
        return None;
    }

    let diff1 = diff0 + line.direction() * t;

    let e00 = e0.dot(e0);
    let e01 = e0.dot(e1);
    let e11 = e1.dot(e1);
    let det = (e00 * e11 - e01 * e01).abs();
    let r0 = e0.dot(&diff1);
    let r1 = e1.dot(&diff1);

    let s0 = e11 * r0 - e01 * r1;
    let s1 = e00 * r1 - e01 * r0;

    if s0 >= -tol && s1 >= -tol && s0 + s1 <= det + tol {
        Some(t)
    } else {
        trace!(s0, s1, det, "hit lies outside triangle");
        None
    }
}

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneClassification {
    /// Point is on the positive side (in the direction of the normal).
    Front,
    /// Point is on the negative side (opposite the normal).
    Back,
    /// Point lies on the plane (within tolerance).
    On,
}

/// Classifies a point by the sign of its plane distance.
///
/// For planes built from raw, non-unit coefficients the tolerance band
/// scales with the normal length.
#[must_use]
pub fn classify_point_plane(point: &Point3, plane: &Plane) -> PointPlaneClassification {
    let dist = plane.distance(point);

    if dist > TOLERANCE {
        PointPlaneClassification::Front
    } else if dist < -TOLERANCE {
        PointPlaneClassification::Back
    } else {
        PointPlaneClassification::On
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::math::{init_test_tracing, Vector3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    // ── line_line_closest ──

    #[test]
    fn skew_lines_closest_points() {
        init_test_tracing();
        let a = Line3::from_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = Line3::from_points(p(0.0, 1.0, 0.0), p(0.0, -1.0, 1.0));

        let approach = line_line_closest(&a, &b).unwrap();
        assert_abs_diff_eq!(approach.on_self, p(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(approach.on_other, p(0.0, 0.2, 0.4), epsilon = 1e-12);
        assert_abs_diff_eq!(approach.t_self, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(approach.t_other, 0.4, epsilon = 1e-12);

        // No sampled pair of points is closer than the reported pair.
        let best = approach.distance();
        for i in -20..=20 {
            for j in -20..=20 {
                let pa = a.interpolated(f64::from(i) * 0.1);
                let pb = b.interpolated(f64::from(j) * 0.1);
                assert!((pb - pa).norm() >= best - 1e-12);
            }
        }
    }

    #[test]
    fn crossing_lines_meet_in_one_point() {
        let a = Line3::new(p(-1.0, 0.0, 2.0), v(2.0, 0.0, 0.0));
        let b = Line3::new(p(0.0, -3.0, 2.0), v(0.0, 1.0, 0.0));

        let approach = line_line_closest(&a, &b).unwrap();
        assert_abs_diff_eq!(approach.on_self, p(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(approach.on_other, p(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(approach.distance(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(approach.t_self, 0.5);
        assert_relative_eq!(approach.t_other, 3.0);
    }

    #[test]
    fn parallel_lines_have_no_closest_approach() {
        let a = Line3::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let b = Line3::new(p(0.0, 1.0, 0.0), v(1.0, 0.0, 0.0));
        assert!(line_line_closest(&a, &b).is_none());
    }

    #[test]
    fn degenerate_line_has_no_closest_approach() {
        let a = Line3::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let point = Line3::new(p(0.0, 1.0, 0.0), Vector3::zeros());
        assert!(line_line_closest(&a, &point).is_none());
        assert!(line_line_closest(&point, &a).is_none());
    }

    // ── line_plane_intersect ──

    #[test]
    fn line_hits_plane() {
        let plane = Plane::new(0.0, 0.0, 1.0, -5.0);
        let line = Line3::new(p(0.0, 0.0, 0.0), v(0.0, 0.0, 10.0));

        let hit = line_plane_intersect(&line, &plane).unwrap();
        assert_relative_eq!(hit.t, 0.5);
        assert_relative_eq!(hit.point, p(0.0, 0.0, 5.0));
    }

    #[test]
    fn oblique_hit_lies_on_plane_and_line() {
        let plane = Plane::from_points(p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0));
        let line = Line3::from_points(p(-1.0, -2.0, -3.0), p(2.0, 3.0, 1.0));

        let hit = line_plane_intersect(&line, &plane).unwrap();
        assert_abs_diff_eq!(plane.distance(&hit.point), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.point, line.interpolated(hit.t), epsilon = 1e-12);
    }

    #[test]
    fn line_parallel_to_plane() {
        let plane = Plane::new(0.0, 0.0, 1.0, -5.0);
        let line = Line3::new(p(0.0, 0.0, 0.0), v(1.0, 1.0, 0.0));
        assert!(line_plane_intersect(&line, &plane).is_none());
    }

    #[test]
    fn nearly_parallel_line_is_rejected_by_tolerance() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let line = Line3::new(p(0.0, 0.0, 1.0), v(1.0, 0.0, -0.000_05));
        assert!(line_plane_intersect(&line, &plane).is_none());
    }

    #[test]
    fn hit_outside_segment_is_still_reported() {
        let plane = Plane::new(1.0, 0.0, 0.0, -4.0);
        let line = Line3::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));

        let hit = line_plane_intersect(&line, &plane).unwrap();
        assert_relative_eq!(hit.t, 4.0);
    }

    // ── project_segment_onto_plane ──

    #[test]
    fn segment_projects_to_crossing_point() {
        let plane = Plane::new(0.0, 1.0, 0.0, -1.0);
        let point = project_segment_onto_plane(&p(0.0, 0.0, 0.0), &p(2.0, 4.0, 0.0), &plane);
        assert_relative_eq!(point, p(0.5, 1.0, 0.0));
    }

    #[test]
    fn parallel_segment_projects_to_non_finite_point() {
        let plane = Plane::new(0.0, 1.0, 0.0, -1.0);
        let point = project_segment_onto_plane(&p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0), &plane);
        assert!(point.iter().any(|c| !c.is_finite()));
    }

    // ── plane_plane_intersect ──

    #[test]
    fn perpendicular_planes_meet_on_shared_line() {
        init_test_tracing();
        let a = Plane::new(1.0, 0.0, 0.0, -1.0);
        let b = Plane::new(0.0, 1.0, 0.0, -2.0);

        let line = plane_plane_intersect(&a, &b).unwrap();
        assert_relative_eq!(*line.direction(), v(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(a.distance(line.origin()), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.distance(line.origin()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn oblique_planes_line_lies_on_both() {
        let a = Plane::from_points(p(0.0, 0.0, 3.0), p(1.0, 0.0, 3.0), p(0.0, 1.0, 3.0));
        let b = Plane::from_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 1.0));

        let line = plane_plane_intersect(&a, &b).unwrap();
        for t in [-2.0, 0.0, 0.5, 7.0] {
            let q = line.interpolated(t);
            assert_abs_diff_eq!(a.distance(&q), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(b.distance(&q), 0.0, epsilon = 1e-9);
        }
        assert!(line.direction().normalize().x.abs() > 0.99);
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let a = Plane::new(0.0, 0.0, 1.0, 0.0);
        let b = Plane::new(0.0, 0.0, 1.0, -5.0);
        assert!(plane_plane_intersect(&a, &b).is_none());
    }

    #[test]
    fn anti_parallel_planes_do_not_intersect() {
        let a = Plane::new(0.0, 0.0, 1.0, 0.0);
        let b = Plane::new(0.0, 0.0, -1.0, 3.0);
        assert!(plane_plane_intersect(&a, &b).is_none());
    }

    // ── line_triangle_intersect ──

    fn unit_triangle() -> Triangle {
        // Face normal edge0 × edge1 points along +Z.
        Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
    }

    #[test]
    fn one_sided_hits_front_face() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(0.25, 0.25, 1.0), p(0.25, 0.25, -1.0));
        let t = line_triangle_intersect(&line, &tri, Sidedness::OneSided).unwrap();
        assert_relative_eq!(t, 0.5);
    }

    #[test]
    fn one_sided_culls_back_face() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(0.25, 0.25, -1.0), p(0.25, 0.25, 1.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::OneSided).is_none());
    }

    #[test]
    fn two_sided_hits_both_faces() {
        let tri = unit_triangle();
        let down = Line3::from_points(p(0.25, 0.25, 1.0), p(0.25, 0.25, -3.0));
        let up = Line3::from_points(p(0.25, 0.25, -3.0), p(0.25, 0.25, 1.0));

        let t_down = line_triangle_intersect(&down, &tri, Sidedness::TwoSided).unwrap();
        let t_up = line_triangle_intersect(&up, &tri, Sidedness::TwoSided).unwrap();
        assert_relative_eq!(t_down, 0.25);
        assert_relative_eq!(t_up, 0.75);
    }

    #[test]
    fn two_sided_rejects_parallel_line() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(-1.0, 0.25, 0.0), p(2.0, 0.25, 0.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::TwoSided).is_none());
    }

    #[test]
    fn segment_ending_before_triangle_misses() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(0.25, 0.25, 2.0), p(0.25, 0.25, 1.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::OneSided).is_none());
        assert!(line_triangle_intersect(&line, &tri, Sidedness::TwoSided).is_none());
    }

    #[test]
    fn hit_outside_triangle_misses() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(0.75, 0.75, 1.0), p(0.75, 0.75, -1.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::OneSided).is_none());
    }

    #[test]
    fn hit_on_edge_is_accepted() {
        let tri = unit_triangle();
        let line = Line3::from_points(p(0.5, 0.5, 1.0), p(0.5, 0.5, -1.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::OneSided).is_some());
    }

    #[test]
    fn degenerate_triangle_never_hits() {
        let tri = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        let line = Line3::from_points(p(0.5, 0.0, 1.0), p(0.5, 0.0, -1.0));
        assert!(line_triangle_intersect(&line, &tri, Sidedness::OneSided).is_none());
        assert!(line_triangle_intersect(&line, &tri, Sidedness::TwoSided).is_none());
    }

    // ── classify_point_plane ──

    #[test]
    fn point_in_front_of_plane() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(
            classify_point_plane(&p(0.0, 0.0, 1.0), &plane),
            PointPlaneClassification::Front
        );
    }

    #[test]
    fn point_behind_plane() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(
            classify_point_plane(&p(0.0, 0.0, -1.0), &plane),
            PointPlaneClassification::Back
        );
    }

    #[test]
    fn point_on_plane() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(
            classify_point_plane(&p(5.0, 3.0, 0.0), &plane),
            PointPlaneClassification::On
        );
    }
}
