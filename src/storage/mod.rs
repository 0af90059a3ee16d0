//! # Graph Storage
//!
//! The two structures every query reads and every mutation writes:
//!
//! | Structure | Module | Holds |
//! |-----------|--------|-------|
//! | `VertexRegistry` | `registry` | index allocation, kinds, names, student attributes |
//! | `AdjacencyMatrix` | `matrix` | symmetric edge weights keyed by vertex index |
//!
//! The two must stay in lockstep: the matrix dimension always equals the
//! registry's vertex count. `SkillGraph` is the only writer of both.

pub mod matrix;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use matrix::{AdjacencyMatrix, MAX_RESERVED_CAPACITY};
pub use registry::{SkillRecord, SkillSlot, VertexRegistry};

// ============================================================================
// Graph configuration
// ============================================================================

/// Tunables for a `SkillGraph`.
///
/// Defaults reproduce the classic behaviour: unit weights on taxonomy and
/// skill edges. Student→degree edges always weigh the student's semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Weight of every category→degree edge.
    pub taxonomy_edge_weight: f64,
    /// Weight of every student→skill edge.
    pub skill_edge_weight: f64,
    /// Vertices reserved up front in the adjacency matrix. At most
    /// `MAX_RESERVED_CAPACITY`.
    pub initial_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            taxonomy_edge_weight: 1.0,
            skill_edge_weight: 1.0,
            initial_capacity: 16,
        }
    }
}

impl GraphConfig {
    /// Reject weights the matrix would refuse later and oversized reservations.
    pub fn validate(&self) -> crate::Result<()> {
        for w in [self.taxonomy_edge_weight, self.skill_edge_weight] {
            if !w.is_finite() || w < 0.0 {
                return Err(crate::Error::InvalidWeight(w));
            }
        }
        if self.initial_capacity > MAX_RESERVED_CAPACITY {
            return Err(crate::Error::InvalidConfig(format!(
                "initial_capacity {} exceeds {MAX_RESERVED_CAPACITY}",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}
