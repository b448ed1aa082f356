//! # Polyedit
//!
//! Editable polygon and polyline geometry engine for interactive 2D
//! annotation tools.
//!
//! ## Architecture
//!
//! Polyedit is organized as a workspace with multiple crates:
//!
//! 1. **polyedit-core** - Points, point and label identities, colours, errors
//! 2. **polyedit-settings** - Editor configuration, TOML/JSON files, validation
//! 3. **polyedit-editor** - Point chains, topology edits, interaction state
//!    machine, validity checks, rendering boundary and shape files
//! 4. **polyedit** - This facade plus the `polyedit` command line tool
//!
//! ## Features
//!
//! - **Drawing**: click to append vertices, close near the first vertex
//! - **Editing**: drag vertices or whole shapes, promote midpoints, delete
//!   vertices, toggle straight and curved edges
//! - **Validity**: minimum bounding area and self-intersection checks
//! - **Picking**: index-encoded hit-test rendering through tiny-skia

pub mod check;

pub use polyedit_core::{ChainError, LabelId, Point, PointId, Result, Rgba};
pub use polyedit_editor as editor;
pub use polyedit_editor::{
    ChainKind, EditOutcome, EditorState, Handle, InMemoryRegistry, LabelRegistry, PathPoint,
    PointChain, PointRole, PolygonEditor, ShapeFile, ShapeRecord, Validity,
};
pub use polyedit_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
