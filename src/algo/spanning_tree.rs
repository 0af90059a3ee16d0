//! Prim's minimum spanning tree over the student correlation graph.
//!
//! The correlation graph is complete and dense, so this is the O(n²)
//! array form of Prim rather than a heap-based one: each round scans the
//! candidate keys for the cheapest crossing edge, lowest index first on ties.
//! The root is index 0 of the restricted (student-only) index space.
//!
//! Zero-weight edges between distinct students never become candidates. If
//! that leaves part of the roster unreachable, the scan restarts from the
//! lowest unreached index and the result is a spanning forest.

use hashbrown::HashSet;

use crate::correlation;
use crate::model::{SpanningTree, TreeEdge, TreeNode, VertexId};
use crate::storage::{AdjacencyMatrix, VertexRegistry};

/// Tree edge in matrix-local indices: `(parent, child, weight)`.
pub type LocalEdge = (usize, usize, f64);

/// Prim over `matrix`, rooted at 0. Edges come back in insertion order.
pub fn prim(matrix: &AdjacencyMatrix) -> Vec<LocalEdge> {
    let n = matrix.dimension();
    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    if n == 0 {
        return edges;
    }
    key[0] = 0.0;

    for _ in 0..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] || !key[v].is_finite() {
                continue;
            }
            if next.is_none_or(|u| key[v] < key[u]) {
                next = Some(v);
            }
        }

        let u = match next {
            Some(u) => u,
            None => {
                // Remaining vertices are cut off; start a new component.
                let Some(root) = (0..n).find(|&v| !in_tree[v]) else { break };
                tracing::warn!(root, "correlation graph disconnected, building a spanning forest");
                key[root] = 0.0;
                root
            }
        };

        in_tree[u] = true;
        if let Some(p) = parent[u] {
            edges.push((p, u, key[u]));
        }

        for (v, w) in matrix.neighbors(u) {
            if in_tree[v] || w <= 0.0 {
                continue;
            }
            if w < key[v] {
                key[v] = w;
                parent[v] = Some(u);
            }
        }
    }

    edges
}

/// Minimum spanning tree over the given students.
///
/// Ids that are not students are skipped and repeated ids count once, at
/// their first position. Edge endpoints in the result are full-graph vertex ids.
pub fn build_mst(registry: &VertexRegistry, student_ids: &[VertexId]) -> SpanningTree {
    let mut seen = HashSet::with_capacity(student_ids.len());
    let students: Vec<_> = student_ids
        .iter()
        .filter(|&&id| seen.insert(id))
        .filter_map(|&id| registry.student(id))
        .collect();

    let matrix = correlation::build_correlation_graph(&students);
    let local = prim(&matrix);

    let nodes = students
        .iter()
        .map(|s| TreeNode { id: s.id, name: s.name.clone() })
        .collect();

    let edges: Vec<TreeEdge> = local
        .into_iter()
        .map(|(p, c, weight)| TreeEdge {
            source: students[p].id,
            target: students[c].id,
            source_name: students[p].name.clone(),
            target_name: students[c].name.clone(),
            weight,
        })
        .collect();

    let total_weight = edges.iter().map(|e| e.weight).sum();

    tracing::info!(
        students = students.len(),
        edges = edges.len(),
        total_weight,
        "built student spanning tree"
    );

    SpanningTree { nodes, edges, total_weight }
}
