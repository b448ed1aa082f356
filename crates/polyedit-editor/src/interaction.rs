//! Pointer and keyboard interaction for a single editable shape.
//!
//! [`PolygonEditor`] maps pointer gestures to structural edits on its
//! [`PointChain`]. The editor is always in exactly one [`EditorState`]:
//!
//! ```text
//! Draw ──(click near first vertex / finish)──> EditIdle <──(pointer up)── EditDrag
//!                                                 │                          ^
//!                                                 └──(pointer down on handle)┘
//! ```
//!
//! While idle, a pointer-down consults the held keys: with the delete key held
//! the addressed vertex is deleted, with the curve key held the addressed gap
//! is toggled between straight and curved. Otherwise the handle starts a drag
//! (a MID handle is promoted to a vertex first). Key events only update the
//! held-key set; they never edit on their own.

use crate::chain::{ChainKind, CurveToggle, DragSnapshot, PointChain};
use crate::geometry::{distance_to_segment, point_in_polygon};
use crate::keys::HeldKeys;
use crate::model::PointRole;
use crate::registry::{LabelRegistry, ShapeRecord};
use crate::validity::{self, Validity};
use polyedit_core::{LabelId, Point, Result};
use polyedit_settings::EditorConfig;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// What a pointer event is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// A chain index
    Point(usize),
    /// The shape as a whole
    Shape,
}

impl Handle {
    /// Decodes a raw hit-test index, where `len` (the chain length) stands
    /// for the whole shape.
    pub fn from_index(index: usize, len: usize) -> Option<Handle> {
        match index.cmp(&len) {
            Ordering::Less => Some(Handle::Point(index)),
            Ordering::Equal => Some(Handle::Shape),
            Ordering::Greater => None,
        }
    }

    /// Raw hit-test index of this handle.
    pub fn index(&self, len: usize) -> usize {
        match self {
            Handle::Point(index) => *index,
            Handle::Shape => len,
        }
    }
}

/// Interaction state. Drag data only exists while dragging.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// Shape not yet committed; each click appends a vertex
    Draw { cursor: Option<Point> },
    /// Shape committed, nothing being manipulated
    EditIdle,
    /// A point or the whole shape follows the pointer
    EditDrag {
        handle: Handle,
        snapshot: DragSnapshot,
    },
}

/// Effect of an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Nothing changed
    Ignored,
    /// A vertex was appended while drawing
    VertexAdded(usize),
    /// The shape was committed; validity is advisory
    Committed(Validity),
    VertexDeleted,
    CurveToggled,
    DragStarted(Handle),
    Dragged,
    Released,
    Cancelled,
}

/// Editing engine for one polygon or polyline.
#[derive(Debug, Clone)]
pub struct PolygonEditor {
    label: LabelId,
    chain: PointChain,
    target: ChainKind,
    state: EditorState,
    keys: HeldKeys,
    config: EditorConfig,
    scale: f64,
    highlight: Option<Handle>,
    selected: bool,
}

impl PolygonEditor {
    /// Starts drawing a new shape of the given kind.
    pub fn begin(label: LabelId, kind: ChainKind, config: EditorConfig) -> Self {
        debug!("Begin drawing {:?} shape for {}", kind, label);
        Self {
            label,
            chain: PointChain::new(ChainKind::Open),
            target: kind,
            state: EditorState::Draw { cursor: None },
            keys: HeldKeys::new(),
            config,
            scale: 1.0,
            highlight: None,
            selected: false,
        }
    }

    /// Opens a committed shape for editing.
    pub fn from_record(record: &ShapeRecord, config: EditorConfig) -> Result<Self> {
        let mut chain = PointChain::from_committed(&record.points, record.kind)?;
        for point in chain.iter_mut().filter(|p| p.role.is_persisted()) {
            point.associate(record.label);
        }
        Ok(Self {
            label: record.label,
            chain,
            target: record.kind,
            state: EditorState::EditIdle,
            keys: HeldKeys::new(),
            config,
            scale: 1.0,
            highlight: None,
            selected: false,
        })
    }

    pub fn label(&self) -> LabelId {
        self.label
    }

    pub fn chain(&self) -> &PointChain {
        &self.chain
    }

    /// Kind the shape has once committed.
    pub fn kind(&self) -> ChainKind {
        self.target
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EditorState::Draw { .. })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn keys(&self) -> &HeldKeys {
        &self.keys
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the canvas-to-screen scale used for radii and stroke widths.
    ///
    /// Returns `false` and keeps the current scale when `scale` is not a
    /// positive finite number.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            debug!("Ignoring scale {} for {}", scale, self.label);
            return false;
        }
        self.scale = scale;
        true
    }

    pub fn highlight(&self) -> Option<Handle> {
        self.highlight
    }

    pub fn set_highlight(&mut self, handle: Option<Handle>) {
        self.highlight = handle;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Checks the current chain. Only meaningful once the shape is committed.
    pub fn validity(&self) -> Validity {
        validity::check(&self.chain, self.config.geometry.min_area)
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.release(key);
    }

    /// Handles a pointer press at `position` on `handle`.
    pub fn pointer_down(
        &mut self,
        position: Point,
        handle: Option<Handle>,
        registry: &mut dyn LabelRegistry,
    ) -> EditOutcome {
        if let Some(Handle::Point(index)) = handle {
            if index >= self.chain.len() {
                debug!("Handle {} out of range for {}", index, self.label);
                return EditOutcome::Ignored;
            }
        }

        match self.state {
            EditorState::Draw { .. } => self.draw_click(position, handle, registry),
            EditorState::EditDrag { .. } => {
                debug!("Pointer down during drag on {}, ending drag", self.label);
                self.state = EditorState::EditIdle;
                self.edit_click(handle, registry)
            }
            EditorState::EditIdle => self.edit_click(handle, registry),
        }
    }

    /// Tracks the pointer: the rubber-band cursor while drawing, the hover
    /// highlight otherwise.
    pub fn pointer_move(&mut self, position: Point, handle: Option<Handle>) {
        match &mut self.state {
            EditorState::Draw { cursor } => *cursor = Some(position),
            EditorState::EditIdle => self.highlight = handle,
            EditorState::EditDrag { .. } => {}
        }
    }

    /// Applies a drag step. `delta` is the total pointer offset since the
    /// drag started, replayed against the drag snapshot.
    pub fn pointer_drag(&mut self, delta: Point, registry: &mut dyn LabelRegistry) -> EditOutcome {
        let EditorState::EditDrag { handle, snapshot } = &self.state else {
            return EditOutcome::Ignored;
        };

        match *handle {
            Handle::Point(index) => {
                if !self.chain.translate_point(index, snapshot, delta) {
                    return EditOutcome::Ignored;
                }
                if let Some(point) = self.chain.get(index).filter(|p| p.role.is_persisted()) {
                    registry.point_updated(self.label, &point.to_committed());
                }
            }
            Handle::Shape => {
                self.chain.translate_all(snapshot, delta);
                for point in self.chain.points().iter().filter(|p| p.role.is_persisted()) {
                    registry.point_updated(self.label, &point.to_committed());
                }
            }
        }
        registry.label_updated(self.label);
        EditOutcome::Dragged
    }

    /// Handles a pointer release. Always accepted; ends any drag.
    pub fn pointer_up(&mut self) -> EditOutcome {
        if let EditorState::EditDrag { handle, .. } = &self.state {
            debug!("Drag of {:?} on {} ended", handle, self.label);
            self.state = EditorState::EditIdle;
        }
        EditOutcome::Released
    }

    /// Commits an open polyline that is still being drawn.
    pub fn finish(&mut self, registry: &mut dyn LabelRegistry) -> EditOutcome {
        if !self.is_drawing() || self.target != ChainKind::Open || self.chain.vertex_count() < 2 {
            return EditOutcome::Ignored;
        }
        self.commit(registry)
    }

    /// Throws away a shape that is still being drawn.
    pub fn cancel(&mut self, registry: &mut dyn LabelRegistry) -> EditOutcome {
        if !self.is_drawing() {
            return EditOutcome::Ignored;
        }
        info!("Discarding uncommitted shape {}", self.label);
        self.chain = PointChain::new(ChainKind::Open);
        self.state = EditorState::Draw { cursor: None };
        registry.discard(self.label);
        EditOutcome::Cancelled
    }

    /// Geometric hit test: the nearest point within the hit radius (vertices
    /// win over fillers), else the whole shape when `position` is inside a
    /// closed shape or near an edge of an open one.
    pub fn hit_test(&self, position: Point) -> Option<Handle> {
        let radius = self.config.geometry.hit_radius / self.scale;

        let nearest = self
            .chain
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.role.is_filler(), p.position.distance_to(&position)))
            .filter(|(_, _, distance)| *distance <= radius)
            .min_by(|a, b| (a.1, a.2).partial_cmp(&(b.1, b.2)).unwrap_or(Ordering::Equal));
        if let Some((index, _, _)) = nearest {
            return Some(Handle::Point(index));
        }

        if self.is_drawing() {
            return None;
        }

        let inside = match self.chain.kind() {
            ChainKind::Closed => point_in_polygon(position, &self.chain.vertex_positions()),
            ChainKind::Open => self
                .chain
                .edges()
                .iter()
                .any(|edge| distance_to_segment(position, edge) <= radius),
        };
        inside.then_some(Handle::Shape)
    }

    fn draw_click(
        &mut self,
        position: Point,
        handle: Option<Handle>,
        registry: &mut dyn LabelRegistry,
    ) -> EditOutcome {
        let vertices = self.chain.vertex_count();

        let closes =
            self.target == ChainKind::Closed && vertices >= 3 && self.near_point(0, position, handle);
        let last = self.chain.len().saturating_sub(1);
        let finishes =
            self.target == ChainKind::Open && vertices >= 2 && self.near_point(last, position, handle);
        if closes || finishes {
            return self.commit(registry);
        }

        let index = self.chain.push_vertex(position);
        if let Some(vertex) = self.chain.get(index) {
            registry.point_added_temporarily(self.label, &vertex.to_committed());
        }
        debug!("Appended vertex {} to {} at {:?}", index, self.label, position);
        EditOutcome::VertexAdded(index)
    }

    /// Whether a draw-mode click addresses the point at `index`, either through
    /// its handle or by landing inside its enlarged marker (in screen pixels).
    fn near_point(&self, index: usize, position: Point, handle: Option<Handle>) -> bool {
        self.chain.get(index).is_some_and(|point| {
            handle == Some(Handle::Point(index))
                || point.position.distance_to(&position) * self.scale
                    <= self.config.style.highlight_radius
        })
    }

    fn edit_click(
        &mut self,
        handle: Option<Handle>,
        registry: &mut dyn LabelRegistry,
    ) -> EditOutcome {
        let Some(handle) = handle else {
            return EditOutcome::Ignored;
        };

        let index = match handle {
            Handle::Shape => return self.start_drag(Handle::Shape),
            Handle::Point(index) => index,
        };

        if self.keys.is_held(&self.config.keys.delete_vertex) {
            return self.delete_vertex(index, registry);
        }
        if self.keys.is_held(&self.config.keys.toggle_curve) {
            return self.toggle_curve(index, registry);
        }

        let is_mid = self
            .chain
            .get(index)
            .is_some_and(|p| p.role == PointRole::Mid);
        let index = if is_mid {
            self.promote_midpoint(index, registry)
        } else {
            index
        };
        self.start_drag(Handle::Point(index))
    }

    fn start_drag(&mut self, handle: Handle) -> EditOutcome {
        debug!("Drag of {:?} on {} started", handle, self.label);
        self.highlight = Some(handle);
        self.state = EditorState::EditDrag {
            handle,
            snapshot: self.chain.snapshot(),
        };
        EditOutcome::DragStarted(handle)
    }

    fn delete_vertex(&mut self, index: usize, registry: &mut dyn LabelRegistry) -> EditOutcome {
        let Some(removed) = self.chain.delete_vertex(index) else {
            debug!(
                "Refused to delete point {} of {} ({} vertices)",
                index,
                self.label,
                self.chain.vertex_count()
            );
            return EditOutcome::Ignored;
        };

        for point in removed.iter().filter(|p| p.role.is_persisted()) {
            registry.unassociate(self.label, point.id());
        }
        self.highlight = None;
        info!("Deleted vertex {} of {}", index, self.label);
        self.store(registry);
        EditOutcome::VertexDeleted
    }

    fn toggle_curve(&mut self, index: usize, registry: &mut dyn LabelRegistry) -> EditOutcome {
        match self.chain.toggle_curve(index) {
            None => {
                debug!("Point {} of {} has no gap to toggle", index, self.label);
                EditOutcome::Ignored
            }
            Some(CurveToggle::ToCurve { first, .. }) => {
                for i in [first, first + 1] {
                    if let Some(point) = self.chain.get_mut(i) {
                        point.associate(self.label);
                        registry.associate(self.label, point.id());
                    }
                }
                debug!("Curved gap at {} of {}", first, self.label);
                self.store(registry);
                EditOutcome::CurveToggled
            }
            Some(CurveToggle::ToStraight { removed, mid }) => {
                for point in &removed {
                    registry.unassociate(self.label, point.id());
                }
                debug!("Straightened gap at {} of {}", mid, self.label);
                self.store(registry);
                EditOutcome::CurveToggled
            }
        }
    }

    fn promote_midpoint(&mut self, index: usize, registry: &mut dyn LabelRegistry) -> usize {
        let vertex = self.chain.promote_midpoint(index);
        if let Some(point) = self.chain.get_mut(vertex) {
            point.associate(self.label);
            registry.associate(self.label, point.id());
        }
        debug!("Promoted midpoint {} of {} to vertex {}", index, self.label, vertex);
        self.store(registry);
        vertex
    }

    fn commit(&mut self, registry: &mut dyn LabelRegistry) -> EditOutcome {
        if self.target == ChainKind::Closed && !self.chain.close() {
            return EditOutcome::Ignored;
        }

        for point in self.chain.iter_mut().filter(|p| p.role.is_persisted()) {
            point.associate(self.label);
            registry.associate(self.label, point.id());
        }
        self.state = EditorState::EditIdle;
        self.store(registry);

        let validity = self.validity();
        if validity.is_valid() {
            info!(
                "Committed {} with {} vertices",
                self.label,
                self.chain.vertex_count()
            );
        } else {
            warn!("Committed {} but shape is invalid: {}", self.label, validity);
        }
        EditOutcome::Committed(validity)
    }

    fn store(&self, registry: &mut dyn LabelRegistry) {
        registry.store_shape(self.label, self.chain.kind(), self.chain.committed());
        registry.label_updated(self.label);
    }
}
