//! Shape validity checks.
//!
//! Validity is advisory: the editor commits invalid shapes too, and callers
//! consult [`check`] to decide whether to accept them.

use crate::chain::{ChainKind, PointChain, MIN_OPEN_VERTICES};
use crate::geometry::segments_intersect;
use std::fmt;

/// Outcome of a validity check.
#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    Valid,
    /// Open chain with too few vertices
    TooFewVertices { count: usize, min: usize },
    /// Bounding box of a closed chain is below the minimum area
    TooSmall { area: f64, min_area: f64 },
    /// Two non-adjacent edges cross or touch (edge indices in walk order)
    SelfIntersecting { first: usize, second: usize },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Valid => write!(f, "valid"),
            Validity::TooFewVertices { count, min } => {
                write!(f, "too few vertices: {} (minimum {})", count, min)
            }
            Validity::TooSmall { area, min_area } => {
                write!(f, "bounding area {:.2} below minimum {:.2}", area, min_area)
            }
            Validity::SelfIntersecting { first, second } => {
                write!(f, "edges {} and {} intersect", first, second)
            }
        }
    }
}

/// Checks a chain against the rules for its kind.
///
/// Closed chains must span at least `min_area` and have no intersecting pair
/// of edges that do not share an endpoint. Open chains only need
/// [`MIN_OPEN_VERTICES`] vertices; their self-intersection is not checked.
pub fn check(chain: &PointChain, min_area: f64) -> Validity {
    match chain.kind() {
        ChainKind::Open => {
            let count = chain.vertex_count();
            if count < MIN_OPEN_VERTICES {
                Validity::TooFewVertices {
                    count,
                    min: MIN_OPEN_VERTICES,
                }
            } else {
                Validity::Valid
            }
        }
        ChainKind::Closed => {
            let area = chain.bounds().map(|b| b.area()).unwrap_or(0.0);
            if area < min_area {
                return Validity::TooSmall { area, min_area };
            }

            let edges = chain.edges();
            for (i, a) in edges.iter().enumerate() {
                for (j, b) in edges.iter().enumerate().skip(i + 1) {
                    if a.shares_endpoint(b) {
                        continue;
                    }
                    if segments_intersect(a, b) {
                        return Validity::SelfIntersecting {
                            first: i,
                            second: j,
                        };
                    }
                }
            }
            Validity::Valid
        }
    }
}
