//! Shape files.
//!
//! Committed shapes are saved as pretty-printed JSON with file metadata.
//! Only the persisted projection is written (vertices and curve control
//! points); MID fillers are regenerated when a shape is opened for editing.

use crate::chain::PointChain;
use crate::registry::{InMemoryRegistry, ShapeRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Shape file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete shape file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeFile {
    pub version: String,
    pub metadata: ShapeMetadata,
    pub shapes: Vec<ShapeRecord>,
}

/// File metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ShapeFile {
    /// Create a new empty shape file
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: ShapeMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            shapes: Vec::new(),
        }
    }

    /// Snapshot every shape held by a registry
    pub fn from_registry(name: impl Into<String>, registry: &InMemoryRegistry) -> Self {
        let mut file = Self::new(name);
        file.shapes = registry.shapes().cloned().collect();
        file
    }

    /// Load every shape into a registry
    pub fn restore_into(&self, registry: &mut InMemoryRegistry) {
        for record in &self.shapes {
            registry.restore(record.clone());
        }
    }

    /// Rebuild the live chain of every shape, failing on the first broken one
    pub fn chains(&self) -> Result<Vec<PointChain>> {
        self.shapes
            .iter()
            .map(|record| {
                PointChain::from_committed(&record.points, record.kind)
                    .with_context(|| format!("Invalid point list for {}", record.label))
            })
            .collect()
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize shapes")?;

        std::fs::write(path.as_ref(), json).context("Failed to write shape file")?;
        debug!("Saved {} shapes to {:?}", self.shapes.len(), path.as_ref());

        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read shape file")?;

        let mut file: ShapeFile =
            serde_json::from_str(&content).context("Failed to parse shape file")?;

        file.metadata.modified = Utc::now();
        debug!("Loaded {} shapes from {:?}", file.shapes.len(), path.as_ref());

        Ok(file)
    }
}
