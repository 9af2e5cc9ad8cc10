mod line2;
mod line3;

pub use line2::Line2;
pub use line3::Line3;
