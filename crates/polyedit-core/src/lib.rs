//! # Polyedit Core
//!
//! Core value types shared by the Polyedit crates: canvas points, the opaque
//! identities used for path points and labels, colours, and the chain error type.

pub mod color;
pub mod error;
pub mod ids;
pub mod point;

pub use color::Rgba;
pub use error::{ChainError, Result};
pub use ids::{LabelId, PointId};
pub use point::Point;
