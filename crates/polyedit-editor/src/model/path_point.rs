use polyedit_core::{LabelId, Point, PointId};
use serde::{Deserialize, Serialize};

/// Role of a point inside a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// User-placed corner of the shape
    Vertex,
    /// "Insert here" handle halfway between two vertices
    Mid,
    /// One of the two control points of a cubic gap
    Curve,
}

impl PointRole {
    /// Fillers are everything that sits between two vertices.
    pub fn is_filler(&self) -> bool {
        !matches!(self, PointRole::Vertex)
    }

    /// MID points are never part of the persisted outline.
    pub fn is_persisted(&self) -> bool {
        !matches!(self, PointRole::Mid)
    }
}

/// A point of an editable chain.
///
/// The chain owns its points while a shape is being edited; `label` is only a
/// back-reference to the shape the point has been associated with.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPoint {
    id: PointId,
    pub position: Point,
    pub role: PointRole,
    label: Option<LabelId>,
}

impl PathPoint {
    pub fn new(position: Point, role: PointRole) -> Self {
        Self {
            id: PointId::new(),
            position,
            role,
            label: None,
        }
    }

    pub fn vertex(position: Point) -> Self {
        Self::new(position, PointRole::Vertex)
    }

    pub fn mid(position: Point) -> Self {
        Self::new(position, PointRole::Mid)
    }

    pub fn curve(position: Point) -> Self {
        Self::new(position, PointRole::Curve)
    }

    /// Rebuilds a point that already has an identity (e.g. loaded from a file).
    pub fn with_id(id: PointId, position: Point, role: PointRole) -> Self {
        Self {
            id,
            position,
            role,
            label: None,
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn is_vertex(&self) -> bool {
        self.role == PointRole::Vertex
    }

    pub fn label(&self) -> Option<LabelId> {
        self.label
    }

    pub fn associate(&mut self, label: LabelId) {
        self.label = Some(label);
    }

    pub fn to_committed(&self) -> CommittedPoint {
        CommittedPoint {
            id: self.id,
            role: self.role,
            x: self.position.x,
            y: self.position.y,
        }
    }
}

/// The registry-facing projection of a persisted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommittedPoint {
    pub id: PointId,
    pub role: PointRole,
    pub x: f64,
    pub y: f64,
}

impl CommittedPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<&CommittedPoint> for PathPoint {
    fn from(point: &CommittedPoint) -> Self {
        PathPoint::with_id(point.id, point.position(), point.role)
    }
}
