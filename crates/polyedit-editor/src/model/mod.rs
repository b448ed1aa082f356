//! Point model for editable shapes.

mod path_point;

pub use path_point::{CommittedPoint, PathPoint, PointRole};
