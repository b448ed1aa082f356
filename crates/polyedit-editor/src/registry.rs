//! Boundary with the label registry that owns committed shapes.
//!
//! The editor never owns a committed shape: on every structural change it
//! hands the registry the ordered non-MID projection of its chain, and it
//! links or unlinks individual points through [`LabelRegistry::associate`]
//! and [`LabelRegistry::unassociate`].

use crate::chain::ChainKind;
use crate::model::CommittedPoint;
use polyedit_core::{LabelId, PointId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A committed shape as the registry stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub label: LabelId,
    pub kind: ChainKind,
    pub points: Vec<CommittedPoint>,
}

/// Receiver for the editor's persistence notifications.
///
/// Only [`store_shape`](LabelRegistry::store_shape) is required; the other
/// notifications default to no-ops.
pub trait LabelRegistry {
    /// Called with the full persisted projection after every committed change
    fn store_shape(&mut self, label: LabelId, kind: ChainKind, points: Vec<CommittedPoint>);

    /// Called when a point becomes part of `label`
    fn associate(&mut self, _label: LabelId, _point: PointId) {}

    /// Called when a point stops being part of `label`
    fn unassociate(&mut self, _label: LabelId, _point: PointId) {}

    /// Called for points created while drawing, before the shape is committed
    fn point_added_temporarily(&mut self, _label: LabelId, _point: &CommittedPoint) {}

    /// Called when a persisted point moves
    fn point_updated(&mut self, _label: LabelId, _point: &CommittedPoint) {}

    /// Called after any change that needs persisting
    fn label_updated(&mut self, _label: LabelId) {}

    /// Called when an uncommitted shape is thrown away
    fn discard(&mut self, _label: LabelId) {}
}

/// Notification recorded by [`InMemoryRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    Associated(LabelId, PointId),
    Unassociated(LabelId, PointId),
    AddedTemporarily(LabelId, PointId),
    Stored(LabelId, usize),
    PointUpdated(LabelId, PointId),
    LabelUpdated(LabelId),
    Discarded(LabelId),
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Associated(label, point) => write!(f, "{} <- {}", label, point),
            RegistryEvent::Unassociated(label, point) => write!(f, "{} -x {}", label, point),
            RegistryEvent::AddedTemporarily(label, point) => {
                write!(f, "{} temporary {}", label, point)
            }
            RegistryEvent::Stored(label, count) => write!(f, "{} stored ({} points)", label, count),
            RegistryEvent::PointUpdated(label, point) => write!(f, "{} moved {}", label, point),
            RegistryEvent::LabelUpdated(label) => write!(f, "{} updated", label),
            RegistryEvent::Discarded(label) => write!(f, "{} discarded", label),
        }
    }
}

/// Registry keeping committed shapes in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    next_id: u64,
    shapes: BTreeMap<LabelId, ShapeRecord>,
    temporary: BTreeMap<LabelId, Vec<CommittedPoint>>,
    owners: HashMap<PointId, LabelId>,
    events: Vec<RegistryEvent>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh label identity.
    pub fn allocate_label(&mut self) -> LabelId {
        self.next_id += 1;
        LabelId(self.next_id)
    }

    /// Inserts a previously persisted shape, keeping label allocation ahead of it.
    pub fn restore(&mut self, record: ShapeRecord) {
        self.next_id = self.next_id.max(record.label.0);
        for point in &record.points {
            self.owners.insert(point.id, record.label);
        }
        self.shapes.insert(record.label, record);
    }

    pub fn shape(&self, label: LabelId) -> Option<&ShapeRecord> {
        self.shapes.get(&label)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.values()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Points created while drawing a shape that has not been committed yet.
    pub fn temporary_points(&self, label: LabelId) -> &[CommittedPoint] {
        self.temporary.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Label a point is currently associated with.
    pub fn owner_of(&self, point: PointId) -> Option<LabelId> {
        self.owners.get(&point).copied()
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

impl LabelRegistry for InMemoryRegistry {
    fn store_shape(&mut self, label: LabelId, kind: ChainKind, points: Vec<CommittedPoint>) {
        self.temporary.remove(&label);
        self.events.push(RegistryEvent::Stored(label, points.len()));
        self.shapes.insert(
            label,
            ShapeRecord {
                label,
                kind,
                points,
            },
        );
    }

    fn associate(&mut self, label: LabelId, point: PointId) {
        self.owners.insert(point, label);
        self.events.push(RegistryEvent::Associated(label, point));
    }

    fn unassociate(&mut self, label: LabelId, point: PointId) {
        if self.owners.get(&point) == Some(&label) {
            self.owners.remove(&point);
        }
        self.events.push(RegistryEvent::Unassociated(label, point));
    }

    fn point_added_temporarily(&mut self, label: LabelId, point: &CommittedPoint) {
        self.temporary.entry(label).or_default().push(*point);
        self.events
            .push(RegistryEvent::AddedTemporarily(label, point.id));
    }

    fn point_updated(&mut self, label: LabelId, point: &CommittedPoint) {
        if let Some(stored) = self
            .shapes
            .get_mut(&label)
            .and_then(|shape| shape.points.iter_mut().find(|p| p.id == point.id))
        {
            *stored = *point;
        }
        self.events.push(RegistryEvent::PointUpdated(label, point.id));
    }

    fn label_updated(&mut self, label: LabelId) {
        self.events.push(RegistryEvent::LabelUpdated(label));
    }

    fn discard(&mut self, label: LabelId) {
        self.temporary.remove(&label);
        self.shapes.remove(&label);
        self.owners.retain(|_, owner| *owner != label);
        self.events.push(RegistryEvent::Discarded(label));
    }
}
