pub mod intersect_2d;
pub mod intersect_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for on-plane classification.
pub const TOLERANCE: f64 = 1e-10;

/// Below this magnitude a direction component or a determinant of the
/// line/line solvers counts as zero.
pub const DIRECTION_EPSILON: f64 = 2.22e-16;

/// Parameter of the second sample point taken on each line by the
/// line/line closest-approach solver.
pub const LINE_SAMPLE_SPAN: f64 = 10.0;

/// A line whose direction projects onto a plane normal with magnitude at
/// most this is treated as parallel to the plane.
pub const LINE_PLANE_PARALLEL_TOLERANCE: f64 = 1e-4;

/// Two planes whose normal Gram determinant is below this are parallel.
pub const PLANE_PLANE_PARALLEL_TOLERANCE: f64 = 1e-6;

/// Slack for the line/triangle test, applied to the line parameter, the
/// facing test and the containment coefficients.
pub const TRIANGLE_TOLERANCE: f64 = 1e-4;

/// Normalizes `v`, returning the zero vector when `v` has no length.
#[must_use]
pub fn normalize_or_zero(v: &Vector3) -> Vector3 {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}
