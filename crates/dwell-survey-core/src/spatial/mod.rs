//! Playfield coordinate types
//!
//! All coordinates are in playfield units with the origin at the top-left
//! corner, matching what the sensor adapter projects joints into.

mod layout;
mod point;
mod segment;

pub use layout::Layout;
pub use point::Point2D;
pub use segment::Segment;
