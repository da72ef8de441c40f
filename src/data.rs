mod border;
mod candidate;
pub mod frame;
mod path;
mod point;
mod rect;
mod segment;

pub use border::*;
pub use candidate::*;
pub use frame::{BorderPosition, Direction, Frame};
pub use path::*;
pub use point::Point;
pub use rect::*;
pub use segment::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
