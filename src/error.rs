use thiserror::Error;

/// Top-level error type for the primitives library.
///
/// Intersection and distance queries never fail; only the strict
/// constructors that refuse degenerate input produce these.
#[derive(Debug, Error)]
pub enum GeoprimError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors related to geometric input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`GeoprimError`].
pub type Result<T> = std::result::Result<T, GeoprimError>;
