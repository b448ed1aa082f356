//! # Polyedit Editor
//!
//! Editing engine for polygons and polylines drawn on a 2D canvas. It keeps
//! a chain of path points, turns pointer gestures into structural edits and
//! reports whether the resulting shape is valid.
//!
//! ## Core Components
//!
//! - **Geometry**: orientation, segment intersection, bounds
//! - **Model**: path points with a VERTEX, MID or CURVE role
//! - **Chain**: index-addressed point sequence with circular (closed) or
//!   linear (open) neighbour lookup, plus the topology edits: append, close,
//!   delete vertex, promote midpoint, toggle straight/curve, drag
//! - **Interaction**: explicit DRAW / EDIT-IDLE / EDIT-DRAG state machine
//! - **Validity**: minimum bounding area and self-intersection for closed
//!   shapes, vertex count for open ones
//! - **Registry**: notifications to the store that owns committed shapes
//! - **Render / Raster**: drawing boundary, tiny-skia sink and pixel picking
//! - **Serialization**: JSON shape files
//!
//! ## Architecture
//!
//! ```text
//! PolygonEditor (state machine, held keys, config)
//!   ├── PointChain (points + topology edits)
//!   │     └── geometry (predicates)
//!   ├── validity (advisory check)
//!   ├── LabelRegistry (persistence notifications)
//!   └── render ──> RenderSink (PixmapSink for tiny-skia)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polyedit_editor::{ChainKind, InMemoryRegistry, PolygonEditor};
//!
//! let mut registry = InMemoryRegistry::new();
//! let label = registry.allocate_label();
//! let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
//!
//! editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
//! editor.pointer_down(Point::new(40.0, 0.0), None, &mut registry);
//! editor.pointer_down(Point::new(40.0, 40.0), None, &mut registry);
//! editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry); // closes
//! ```

pub mod chain;
pub mod geometry;
pub mod interaction;
pub mod keys;
pub mod model;
pub mod raster;
pub mod registry;
pub mod render;
pub mod serialization;
pub mod validity;

pub use chain::{ChainKind, CurveToggle, DragSnapshot, PointChain};
pub use geometry::{orientation, on_segment, segments_intersect, Bounds, Orientation, Segment};
pub use interaction::{EditOutcome, EditorState, Handle, PolygonEditor};
pub use keys::HeldKeys;
pub use model::{CommittedPoint, PathPoint, PointRole};
pub use raster::{pick, PixmapSink};
pub use registry::{InMemoryRegistry, LabelRegistry, RegistryEvent, ShapeRecord};
pub use render::{
    render, render_chain, ColorEncoder, IndexColorEncoder, PathCommand, RenderMode,
    RenderOptions, RenderSink, StrokeStyle,
};
pub use serialization::{ShapeFile, ShapeMetadata};
pub use validity::Validity;
