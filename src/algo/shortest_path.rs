//! Dijkstra search from a student to the nearest vertex of a skill.
//!
//! Runs over the full graph: categories, degrees, students, and skills are
//! all traversable. The frontier is a binary min-heap keyed by tentative
//! distance; equal distances pop in discovery order, and a vertex keeps the
//! first predecessor that reached it at its final distance. Both rules make
//! the result independent of hash or heap internals.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::model::{SkillPath, VertexId};
use crate::storage::{AdjacencyMatrix, VertexRegistry};
use crate::{Error, Result};

/// Frontier entry. Ordered so `BinaryHeap` (a max-heap) pops the smallest
/// distance first, then the earliest discovery.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    dist: f64,
    seq: u64,
    vertex: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-heap behaviour
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A settled route: vertices from source to target and its total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub vertices: Vec<usize>,
    pub cost: f64,
}

/// Plain Dijkstra over `matrix` from `source`, stopping at the first settled
/// vertex for which `is_target` holds.
///
/// Every present cell is an edge, zero-weight cells included. Returns `None`
/// when no target is reachable.
pub fn dijkstra(
    matrix: &AdjacencyMatrix,
    source: usize,
    is_target: impl Fn(usize) -> bool,
) -> Option<Route> {
    let n = matrix.dimension();
    if source >= n {
        return None;
    }

    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;

    dist[source] = 0.0;
    frontier.push(FrontierEntry { dist: 0.0, seq, vertex: source });

    while let Some(FrontierEntry { dist: d, vertex: u, .. }) = frontier.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;

        if is_target(u) {
            let mut vertices = vec![u];
            let mut node = u;
            while let Some(p) = prev[node] {
                vertices.push(p);
                node = p;
            }
            vertices.reverse();
            return Some(Route { vertices, cost: d });
        }

        for (v, w) in matrix.neighbors(u) {
            if settled[v] {
                continue;
            }
            let candidate = d + w;
            if candidate < dist[v] {
                dist[v] = candidate;
                prev[v] = Some(u);
                seq += 1;
                frontier.push(FrontierEntry { dist: candidate, seq, vertex: v });
            }
        }
    }

    None
}

/// Cheapest path from the student `source_name` to any vertex of the skill
/// `target_skill_name`.
///
/// Since every skill vertex hangs off exactly one student, a student's own
/// skill is always reachable in one hop; another holder wins only when it is
/// strictly cheaper to reach.
pub fn shortest_path(
    registry: &VertexRegistry,
    matrix: &AdjacencyMatrix,
    source_name: &str,
    target_skill_name: &str,
) -> Result<SkillPath> {
    let source = registry
        .student_by_name(source_name)
        .ok_or_else(|| Error::StudentNotFound(source_name.to_string()))?;

    let targets = registry.skill_vertices(target_skill_name);
    if targets.is_empty() {
        return Err(Error::SkillNotFound(target_skill_name.to_string()));
    }

    let route = dijkstra(matrix, source.id.index(), |v| {
        targets.binary_search(&VertexId(v)).is_ok()
    })
    .ok_or_else(|| Error::NoPathFound {
        from: source_name.to_string(),
        to: target_skill_name.to_string(),
    })?;

    let vertices: Vec<VertexId> = route.vertices.iter().copied().map(VertexId).collect();
    let names = vertices
        .iter()
        .map(|&id| registry.name(id).unwrap_or_default().to_string())
        .collect();

    let skill = vertices[vertices.len() - 1];
    let owner = registry
        .skill_owner(skill)
        .and_then(|id| registry.student(id))
        .ok_or_else(|| Error::SkillNotFound(target_skill_name.to_string()))?;
    debug_assert_eq!(vertices[vertices.len() - 2], owner.id);

    tracing::debug!(
        from = source_name,
        skill = target_skill_name,
        hops = vertices.len() - 1,
        cost = route.cost,
        terminal = %owner.name,
        "shortest path to skill"
    );

    Ok(SkillPath {
        vertices,
        names,
        terminal_student: owner.name.clone(),
        terminal_semester: owner.semester,
        cost: route.cost,
    })
}
