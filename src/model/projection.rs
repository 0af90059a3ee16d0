//! Read-only projections handed to rendering and request layers.
//!
//! Nothing here knows about layout, colours, or SVG. A renderer gets
//! node/edge lists with names and weights and draws them however it likes.

use serde::{Deserialize, Serialize};

use super::{VertexId, VertexKind};

// ============================================================================
// Full-graph projection
// ============================================================================

/// A vertex as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedNode {
    pub id: VertexId,
    pub kind: VertexKind,
    pub name: String,
}

/// An undirected edge, listed once with `source < target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: f64,
}

/// Every vertex and edge of the graph, in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphProjection {
    pub nodes: Vec<ProjectedNode>,
    pub edges: Vec<ProjectedEdge>,
}

impl GraphProjection {
    pub fn node(&self, id: VertexId) -> Option<&ProjectedNode> {
        self.nodes.get(id.index()).filter(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: VertexKind) -> impl Iterator<Item = &ProjectedNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}

// ============================================================================
// Shortest path result
// ============================================================================

/// Cheapest route from a student to the nearest vertex of a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPath {
    /// Vertices from source student to skill, inclusive.
    pub vertices: Vec<VertexId>,
    /// Display names, parallel to `vertices`.
    pub names: Vec<String>,
    /// Owner of the reached skill vertex.
    pub terminal_student: String,
    pub terminal_semester: u32,
    /// Sum of traversed edge weights.
    pub cost: f64,
}

impl SkillPath {
    /// Number of edges on the path.
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}

// ============================================================================
// Spanning tree result
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: VertexId,
    pub name: String,
}

/// Tree edge between two students, endpoints given in full-graph indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub source_name: String,
    pub target_name: String,
    pub weight: f64,
}

/// Minimum spanning tree (or forest) over the student correlation graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub nodes: Vec<TreeNode>,
    /// Edges in the order Prim added them.
    pub edges: Vec<TreeEdge>,
    pub total_weight: f64,
}

impl SpanningTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Endpoint pairs normalised to `(min, max)`, sorted. Handy for comparing trees.
    pub fn edge_set(&self) -> Vec<(VertexId, VertexId)> {
        let mut set: Vec<_> = self
            .edges
            .iter()
            .map(|e| (e.source.min(e.target), e.source.max(e.target)))
            .collect();
        set.sort();
        set
    }
}
