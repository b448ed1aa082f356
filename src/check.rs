//! Validity report for saved shape files.

use anyhow::{Context, Result};
use polyedit_core::LabelId;
use polyedit_editor::{validity, ChainKind, ShapeFile, Validity};
use polyedit_settings::EditorConfig;
use std::path::Path;

/// Validity of one stored shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeReport {
    pub label: LabelId,
    pub kind: ChainKind,
    pub vertices: usize,
    pub validity: Validity,
}

/// Checks every shape in `file` against the configured minimum area.
pub fn check_shapes(file: &ShapeFile, config: &EditorConfig) -> Result<Vec<ShapeReport>> {
    let chains = file.chains()?;
    Ok(file
        .shapes
        .iter()
        .zip(chains)
        .map(|(record, chain)| ShapeReport {
            label: record.label,
            kind: record.kind,
            vertices: chain.vertex_count(),
            validity: validity::check(&chain, config.geometry.min_area),
        })
        .collect())
}

/// Loads a shape file and checks it.
pub fn check_file(path: &Path, config: &EditorConfig) -> Result<Vec<ShapeReport>> {
    let file = ShapeFile::load_from_file(path)
        .with_context(|| format!("Cannot check {}", path.display()))?;
    check_shapes(&file, config)
}
