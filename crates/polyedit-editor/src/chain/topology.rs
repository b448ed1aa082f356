//! Structural edits on a [`PointChain`].
//!
//! Every edit keeps the single-filler-per-gap interleaving intact. Edits only
//! touch the chain itself; label association and registry notification are
//! left to the caller, which receives the removed points back.

use super::{curve_control_points, midpoint, ChainKind, PointChain};
use crate::model::{PathPoint, PointRole};
use polyedit_core::Point;

/// Positions captured when a drag starts.
///
/// Every drag step is replayed from these positions, so repeated steps with
/// the same cumulative delta land on the same coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragSnapshot {
    positions: Vec<Point>,
}

impl DragSnapshot {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }
}

/// Result of toggling a gap between straight and curved.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveToggle {
    /// The MID point was replaced by a control pair starting at `first`.
    ToCurve { removed: PathPoint, first: usize },
    /// The control pair was replaced by a fresh MID point at `mid`.
    ToStraight { removed: Vec<PathPoint>, mid: usize },
}

impl PointChain {
    /// Appends a vertex at the open end of the chain, with a MID point
    /// between it and the previous vertex. Returns the new vertex index.
    pub fn push_vertex(&mut self, position: Point) -> usize {
        debug_assert_eq!(self.kind, ChainKind::Open, "push_vertex on a closed chain");
        if let Some(last) = self.points.last() {
            let filler = midpoint(last.position, position);
            self.points.push(filler);
        }
        self.points.push(PathPoint::vertex(position));
        self.points.len() - 1
    }

    /// Closes an open chain by adding the wrap-around MID point between the
    /// last and first vertex. Needs at least three vertices.
    pub fn close(&mut self) -> bool {
        if self.kind == ChainKind::Closed || self.vertex_count() < 3 {
            return false;
        }
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return false;
        };
        let filler = midpoint(last.position, first.position);
        self.points.push(filler);
        self.kind = ChainKind::Closed;
        true
    }

    /// Deletes the vertex at `index`, collapsing both adjacent gaps into one
    /// straight gap with a MID point halfway between the surviving neighbours.
    ///
    /// Returns the removed points, or `None` when `index` is not a vertex or
    /// the chain would drop below its vertex floor.
    pub fn delete_vertex(&mut self, index: usize) -> Option<Vec<PathPoint>> {
        if !self.points.get(index)?.is_vertex() {
            return None;
        }
        if self.vertex_count() <= self.kind.min_vertices() {
            return None;
        }

        let n = self.points.len();
        let mut remove = vec![false; n];
        let mut filler = None;

        match (self.previous_vertex(index), self.next_vertex(index)) {
            (Some(prev), Some(next)) => {
                let mut idx = (prev + 1) % n;
                while idx != next {
                    remove[idx] = true;
                    idx = (idx + 1) % n;
                }
                filler = Some((
                    prev,
                    midpoint(self.points[prev].position, self.points[next].position),
                ));
            }
            // Open chain, first vertex: drop it and the gap after it.
            (None, Some(next)) => remove[index..next].iter_mut().for_each(|r| *r = true),
            // Open chain, last vertex: drop it and the gap before it.
            (Some(prev), None) => remove[prev + 1..=index].iter_mut().for_each(|r| *r = true),
            (None, None) => return None,
        }

        let mut kept = Vec::with_capacity(n);
        let mut removed = Vec::new();
        for (i, point) in std::mem::take(&mut self.points).into_iter().enumerate() {
            if remove[i] {
                removed.push(point);
                continue;
            }
            kept.push(point);
            if filler.as_ref().is_some_and(|(after, _)| *after == i) {
                if let Some((_, mid)) = filler.take() {
                    kept.push(mid);
                }
            }
        }
        self.points = kept;
        Some(removed)
    }

    /// Turns the MID point at `index` into a vertex and splices a new MID
    /// point into each of the two gaps it now bounds. Returns the vertex's new
    /// index (one past `index`, since a filler is inserted before it).
    ///
    /// # Panics
    ///
    /// Panics if `index` does not address a MID point. Callers gate on the
    /// point's role first, so reaching this is a broken invariant.
    pub fn promote_midpoint(&mut self, index: usize) -> usize {
        assert!(
            self.points
                .get(index)
                .is_some_and(|p| p.role == PointRole::Mid),
            "promote_midpoint: index {} does not address a MID point",
            index
        );
        let (Some(prev), Some(next)) = (self.previous_index(index), self.next_index(index)) else {
            panic!("promote_midpoint: MID point at {} has no bounding vertices", index);
        };

        self.points[index].role = PointRole::Vertex;
        let position = self.points[index].position;
        let after = midpoint(position, self.points[next].position);
        let before = midpoint(self.points[prev].position, position);
        self.points.insert(index + 1, after);
        self.points.insert(index, before);
        index + 1
    }

    /// Toggles the gap containing `index` between straight and curved.
    ///
    /// On a MID point the gap becomes a cubic with control points at the
    /// thirds of the chord. On a CURVE point the pair collapses back to a MID
    /// point placed between the vertices that bound the gap *after* the
    /// second control point is removed. Vertices are left alone (`None`).
    pub fn toggle_curve(&mut self, index: usize) -> Option<CurveToggle> {
        match self.points.get(index)?.role {
            PointRole::Vertex => None,
            PointRole::Mid => {
                let prev = self.previous_index(index)?;
                let next = self.next_index(index)?;
                let [first, second] =
                    curve_control_points(self.points[prev].position, self.points[next].position);
                let removed = std::mem::replace(&mut self.points[index], first);
                self.points.insert(index + 1, second);
                Some(CurveToggle::ToCurve {
                    removed,
                    first: index,
                })
            }
            PointRole::Curve => {
                let prev = self.previous_index(index)?;
                let (first, second) = if self.points[prev].role == PointRole::Curve {
                    (prev, index)
                } else {
                    (index, self.next_index(index)?)
                };

                let removed_second = self.points.remove(second);
                let first = if second < first { first - 1 } else { first };

                // Neighbours are looked up on the chain as it is now.
                let prev = self.previous_index(first)?;
                let next = self.next_index(first)?;
                let filler = midpoint(self.points[prev].position, self.points[next].position);
                let removed_first = std::mem::replace(&mut self.points[first], filler);

                Some(CurveToggle::ToStraight {
                    removed: vec![removed_first, removed_second],
                    mid: first,
                })
            }
        }
    }

    /// Captures every position for an upcoming drag.
    pub fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            positions: self.positions(),
        }
    }

    /// Moves the point at `index` to its snapshot position plus `delta`.
    pub fn translate_point(&mut self, index: usize, snapshot: &DragSnapshot, delta: Point) -> bool {
        let Some(origin) = snapshot.position(index) else {
            return false;
        };
        match self.points.get_mut(index) {
            Some(point) => {
                point.position = origin + delta;
                true
            }
            None => false,
        }
    }

    /// Moves every point to its snapshot position plus `delta`.
    pub fn translate_all(&mut self, snapshot: &DragSnapshot, delta: Point) {
        for (point, origin) in self.points.iter_mut().zip(&snapshot.positions) {
            point.position = *origin + delta;
        }
    }
}
