//! Point chain: the ordered vertex/filler sequence behind an editable shape.
//!
//! A chain alternates VERTEX entries with exactly one filler per gap: either a
//! single MID point or a pair of CURVE control points. Closed chains index
//! circularly and carry a filler on the wrap-around gap (last vertex back to
//! the first); open chains start and end on a vertex and have no neighbour
//! past either end.
//!
//! Everything is addressed by index into the current chain. Structural edits
//! (see [`topology`]) change the length, so indices must be recomputed after
//! every edit instead of being cached across calls.

pub mod topology;

use crate::geometry::{Bounds, Segment};
use crate::model::{CommittedPoint, PathPoint, PointRole};
use polyedit_core::{ChainError, Point};
use serde::{Deserialize, Serialize};

pub use topology::{CurveToggle, DragSnapshot};

/// Minimum number of vertices a closed chain keeps when deleting.
pub const MIN_CLOSED_VERTICES: usize = 4;
/// Minimum number of vertices an open chain keeps when deleting.
pub const MIN_OPEN_VERTICES: usize = 3;

/// Whether the chain wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// Polygon: indices wrap modulo the chain length
    Closed,
    /// Polyline: no neighbour before the first or after the last point
    Open,
}

impl ChainKind {
    /// Vertex floor enforced by deletion.
    pub fn min_vertices(&self) -> usize {
        match self {
            ChainKind::Closed => MIN_CLOSED_VERTICES,
            ChainKind::Open => MIN_OPEN_VERTICES,
        }
    }
}

/// Returns a MID point halfway between two positions.
pub fn midpoint(prev: Point, next: Point) -> PathPoint {
    PathPoint::mid(prev.midpoint(&next))
}

/// Returns the two CURVE control points splitting `src -> dest` at one and
/// two thirds of the chord.
pub fn curve_control_points(src: Point, dest: Point) -> [PathPoint; 2] {
    [
        PathPoint::curve(src * (2.0 / 3.0) + dest * (1.0 / 3.0)),
        PathPoint::curve(src * (1.0 / 3.0) + dest * (2.0 / 3.0)),
    ]
}

/// Ordered, index-addressed sequence of path points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointChain {
    points: Vec<PathPoint>,
    kind: ChainKind,
}

impl PointChain {
    /// Creates an empty chain.
    pub fn new(kind: ChainKind) -> Self {
        Self {
            points: Vec::new(),
            kind,
        }
    }

    /// Builds a straight-edged chain through `vertices`, with a MID point on
    /// every gap (including the wrap-around gap when closed).
    pub fn from_vertices(vertices: &[Point], kind: ChainKind) -> Self {
        let mut points = Vec::with_capacity(vertices.len() * 2);
        for (i, v) in vertices.iter().enumerate() {
            points.push(PathPoint::vertex(*v));
            let next = match (vertices.get(i + 1), kind) {
                (Some(next), _) => Some(next),
                (None, ChainKind::Closed) if vertices.len() > 1 => vertices.first(),
                _ => None,
            };
            if let Some(next) = next {
                points.push(midpoint(*v, *next));
            }
        }
        Self { points, kind }
    }

    /// Wraps existing points, checking the filler interleaving.
    pub fn from_points(points: Vec<PathPoint>, kind: ChainKind) -> Result<Self, ChainError> {
        let chain = Self { points, kind };
        chain.check_fillers()?;
        Ok(chain)
    }

    /// Rebuilds a live chain from its persisted projection, regenerating a
    /// MID point on every gap that has no curve pair.
    pub fn from_committed(committed: &[CommittedPoint], kind: ChainKind) -> Result<Self, ChainError> {
        let min = match kind {
            ChainKind::Closed => 3,
            ChainKind::Open => 2,
        };
        let count = committed
            .iter()
            .filter(|p| p.role == PointRole::Vertex)
            .count();
        if count < min {
            return Err(ChainError::TooFewVertices { count, min });
        }
        if let Some(index) = committed.iter().position(|p| p.role == PointRole::Mid) {
            return Err(ChainError::BrokenFiller {
                index,
                reason: "MID points are not persisted".to_string(),
            });
        }

        let n = committed.len();
        let mut points = Vec::with_capacity(n * 2);
        for (i, cp) in committed.iter().enumerate() {
            points.push(PathPoint::from(cp));
            if cp.role != PointRole::Vertex {
                continue;
            }
            let next = if i + 1 < n {
                Some(i + 1)
            } else if kind == ChainKind::Closed {
                Some(0)
            } else {
                None
            };
            if let Some(next) = next.map(|j| &committed[j]) {
                if next.role == PointRole::Vertex {
                    points.push(midpoint(cp.position(), next.position()));
                }
            }
        }

        Self::from_points(points, kind)
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind == ChainKind::Closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut PathPoint> {
        self.points.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PathPoint> {
        self.points.iter_mut()
    }

    /// Index before `index`, wrapping for closed chains.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        let len = self.points.len();
        if index >= len {
            return None;
        }
        match self.kind {
            ChainKind::Closed => Some((index + len - 1) % len),
            ChainKind::Open => index.checked_sub(1),
        }
    }

    /// Index after `index`, wrapping for closed chains.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let len = self.points.len();
        if index >= len {
            return None;
        }
        match self.kind {
            ChainKind::Closed => Some((index + 1) % len),
            ChainKind::Open => (index + 1 < len).then_some(index + 1),
        }
    }

    /// Nearest VERTEX strictly before `index`, skipping fillers.
    pub fn previous_vertex(&self, index: usize) -> Option<usize> {
        let mut idx = index;
        for _ in 0..self.points.len() {
            idx = self.previous_index(idx)?;
            if self.points[idx].is_vertex() {
                return Some(idx);
            }
        }
        None
    }

    /// Nearest VERTEX strictly after `index`, skipping fillers.
    pub fn next_vertex(&self, index: usize) -> Option<usize> {
        let mut idx = index;
        for _ in 0..self.points.len() {
            idx = self.next_index(idx)?;
            if self.points[idx].is_vertex() {
                return Some(idx);
            }
        }
        None
    }

    pub fn vertex_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_vertex()).count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &PathPoint> {
        self.points.iter().filter(|p| p.is_vertex())
    }

    pub fn vertex_positions(&self) -> Vec<Point> {
        self.vertices().map(|p| p.position).collect()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// The persisted projection: every non-MID point, in chain order.
    pub fn committed(&self) -> Vec<CommittedPoint> {
        self.points
            .iter()
            .filter(|p| p.role.is_persisted())
            .map(PathPoint::to_committed)
            .collect()
    }

    /// Bounding box of all points, fillers included.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().map(|p| p.position))
    }

    /// Vertex-to-vertex edges. An edge starts only at a VERTEX, so it spans
    /// whatever fillers sit in its gap.
    pub fn edges(&self) -> Vec<Segment> {
        let mut edges = Vec::new();
        let mut first: Option<Point> = None;
        let mut start: Option<Point> = None;
        for point in self.points.iter().filter(|p| p.is_vertex()) {
            if let Some(s) = start {
                edges.push(Segment::new(s, point.position));
            } else {
                first = Some(point.position);
            }
            start = Some(point.position);
        }
        if self.is_closed() {
            if let (Some(last), Some(first)) = (start, first) {
                edges.push(Segment::new(last, first));
            }
        }
        edges
    }

    /// Checks that every gap holds exactly one MID or exactly two CURVE points.
    pub fn check_fillers(&self) -> Result<(), ChainError> {
        let n = self.points.len();
        if n == 0 {
            return Ok(());
        }
        let vertices: Vec<usize> = (0..n).filter(|&i| self.points[i].is_vertex()).collect();
        if vertices.is_empty() {
            return Err(ChainError::BrokenFiller {
                index: 0,
                reason: "chain has no vertices".to_string(),
            });
        }

        match self.kind {
            ChainKind::Open => {
                if !self.points[0].is_vertex() || !self.points[n - 1].is_vertex() {
                    return Err(ChainError::DanglingFiller);
                }
                for pair in vertices.windows(2) {
                    let gap: Vec<PointRole> =
                        self.points[pair[0] + 1..pair[1]].iter().map(|p| p.role).collect();
                    check_gap(pair[0], &gap)?;
                }
            }
            ChainKind::Closed => {
                for (k, &a) in vertices.iter().enumerate() {
                    let b = vertices[(k + 1) % vertices.len()];
                    let mut gap = Vec::new();
                    let mut idx = (a + 1) % n;
                    while idx != b {
                        gap.push(self.points[idx].role);
                        idx = (idx + 1) % n;
                    }
                    check_gap(a, &gap)?;
                }
            }
        }
        Ok(())
    }
}

fn check_gap(index: usize, gap: &[PointRole]) -> Result<(), ChainError> {
    match gap {
        [PointRole::Mid] | [PointRole::Curve, PointRole::Curve] => Ok(()),
        [] => Err(ChainError::BrokenFiller {
            index,
            reason: "no filler between vertices".to_string(),
        }),
        other => Err(ChainError::BrokenFiller {
            index,
            reason: format!("unexpected filler {:?}", other),
        }),
    }
}
