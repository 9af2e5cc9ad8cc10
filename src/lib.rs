pub mod error;
pub mod geometry;
pub mod math;

pub use error::{GeoprimError, Result};
pub use geometry::{Line2, Line3, Plane, Triangle};
