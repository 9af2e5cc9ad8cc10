pub mod curve;
pub mod surface;

pub use curve::{Line2, Line3};
pub use surface::{Plane, Triangle};
