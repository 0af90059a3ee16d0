//! # skill-graph: Student / Skill Affinity Graph
//!
//! A small weighted, undirected graph over four kinds of vertex (category,
//! degree, student, skill) answering two questions:
//!
//! 1. **Who nearby has this skill?** Dijkstra from a student to the closest
//!    vertex of a named skill.
//! 2. **How do students cluster?** Prim's minimum spanning tree over an
//!    all-pairs compatibility graph of the students.
//!
//! ## Design Principles
//!
//! 1. **Registry and matrix move together**: every vertex index has exactly
//!    one matrix row/column, checked after every mutation
//! 2. **Validate, then mutate**: a failed call leaves the graph untouched
//! 3. **Typed errors**: "not found" and "unreachable" are distinct variants
//! 4. **Projections, not pictures**: results are node/edge lists for a renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use skill_graph::{SkillGraph, Taxonomy};
//!
//! # fn example() -> skill_graph::Result<()> {
//! let taxonomy = Taxonomy::from_json_str(r#"{"Tecnologia": ["SIS", "ANIM"]}"#)?;
//! let mut graph = SkillGraph::new(taxonomy);
//!
//! graph.add_student("Emanuel", "SIS", 2)?;
//! graph.add_student("Karol", "ANIM", 4)?;
//! graph.add_skill("Karol", "Dibujar")?;
//!
//! let path = graph.find_best_path_to_skill("Emanuel", "Dibujar")?;
//! assert_eq!(path.terminal_student, "Karol");
//!
//! let tree = graph.get_mst();
//! assert_eq!(tree.edges.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Sharing
//!
//! `SkillGraph` is a plain owned value. Wrap it in [`SharedSkillGraph`] when
//! several request handlers need it: mutations take the write lock, queries
//! take the read lock.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod taxonomy;
pub mod storage;
pub mod correlation;
pub mod algo;
pub mod shared;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    VertexId, VertexKind, StudentRecord,
    GraphProjection, ProjectedNode, ProjectedEdge,
    SkillPath, SpanningTree, TreeNode, TreeEdge,
};
pub use taxonomy::{Taxonomy, TaxonomyEntry};
pub use storage::{AdjacencyMatrix, GraphConfig, VertexRegistry};
pub use shared::SharedSkillGraph;

// ============================================================================
// Top-level graph handle
// ============================================================================

/// The graph engine. Owns the taxonomy, the vertex registry, and the
/// adjacency matrix, and is the only thing that writes to them.
#[derive(Debug, Clone)]
pub struct SkillGraph {
    taxonomy: Taxonomy,
    config: GraphConfig,
    registry: VertexRegistry,
    matrix: AdjacencyMatrix,
}

impl SkillGraph {
    /// Build the category/degree skeleton with the default config.
    pub fn new(taxonomy: Taxonomy) -> Self {
        let config = GraphConfig::default();
        let registry = VertexRegistry::from_taxonomy(&taxonomy);
        let matrix = Self::skeleton(&taxonomy, &registry, &config);
        let graph = Self { taxonomy, config, registry, matrix };
        graph.debug_check();
        graph
    }

    /// Build with an explicit config. Fails if the config carries a weight
    /// the matrix would reject.
    pub fn with_config(taxonomy: Taxonomy, config: GraphConfig) -> Result<Self> {
        config.validate()?;
        let registry = VertexRegistry::from_taxonomy(&taxonomy);
        let matrix = Self::skeleton(&taxonomy, &registry, &config);
        let graph = Self { taxonomy, config, registry, matrix };
        graph.debug_check();
        Ok(graph)
    }

    /// Matrix with one row per category/degree and every category→degree edge.
    fn skeleton(taxonomy: &Taxonomy, registry: &VertexRegistry, config: &GraphConfig) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::with_capacity(config.initial_capacity.max(registry.len()));
        matrix.grow(registry.len());

        for entry in taxonomy.entries() {
            let Some(cat) = registry.lookup_by_name(&entry.category) else { continue };
            for degree in &entry.degrees {
                if let Some(deg) = registry.lookup_by_name(degree) {
                    let linked = matrix.set_edge(cat.index(), deg.index(), config.taxonomy_edge_weight);
                    debug_assert!(linked.is_ok(), "taxonomy edge rejected: {linked:?}");
                }
            }
        }

        tracing::debug!(
            categories = registry.category_count(),
            degrees = registry.degree_count(),
            "initialized taxonomy skeleton"
        );
        matrix
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a student linked to `degree` with weight = `semester`.
    ///
    /// Fails with `UnknownDegree`, `InvalidSemester`, `InvalidName`, or
    /// `DuplicateName` without changing anything.
    pub fn add_student(&mut self, name: &str, degree: &str, semester: u32) -> Result<VertexId> {
        let (id, degree_id) = self.registry.add_student(name, degree, semester)?;

        self.matrix.grow(1);
        self.matrix.set_edge(id.index(), degree_id.index(), f64::from(semester))?;
        self.debug_check();

        tracing::info!(student = name, degree, semester, id = id.index(), "student added");
        Ok(id)
    }

    /// Give `student_name` a new skill vertex linked with the skill edge weight.
    ///
    /// Fails with `UnknownStudent` (or a naming error) without changing
    /// anything. Re-adding a skill the student already has is a no-op that
    /// returns the existing vertex.
    pub fn add_skill(&mut self, student_name: &str, skill_name: &str) -> Result<VertexId> {
        let slot = self.registry.add_skill(student_name, skill_name)?;
        if !slot.created {
            tracing::debug!(student = student_name, skill = skill_name, "skill already held");
            return Ok(slot.skill);
        }

        self.matrix.grow(1);
        self.matrix
            .set_edge(slot.owner.index(), slot.skill.index(), self.config.skill_edge_weight)?;
        self.debug_check();

        tracing::info!(student = student_name, skill = skill_name, id = slot.skill.index(), "skill added");
        Ok(slot.skill)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Cheapest path from a student to the nearest holder of a skill.
    pub fn find_best_path_to_skill(&self, student_name: &str, skill_name: &str) -> Result<SkillPath> {
        algo::shortest_path(&self.registry, &self.matrix, student_name, skill_name)
    }

    /// Minimum spanning tree over every registered student.
    pub fn get_mst(&self) -> SpanningTree {
        algo::build_mst(&self.registry, self.registry.student_ids())
    }

    /// Minimum spanning tree over a chosen subset of students.
    pub fn build_mst(&self, student_ids: &[VertexId]) -> SpanningTree {
        algo::build_mst(&self.registry, student_ids)
    }

    /// Full-graph projection: every vertex and every edge, in index order.
    pub fn projection(&self) -> GraphProjection {
        let nodes = self
            .registry
            .ids()
            .filter_map(|id| {
                let kind = self.registry.kind(id)?;
                let name = self.registry.name(id)?.to_string();
                Some(ProjectedNode { id, kind, name })
            })
            .collect();
        let edges = self
            .matrix
            .edges()
            .map(|(i, j, weight)| ProjectedEdge {
                source: VertexId(i),
                target: VertexId(j),
                weight,
            })
            .collect();
        GraphProjection { nodes, edges }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn student(&self, name: &str) -> Option<&StudentRecord> {
        self.registry.student_by_name(name)
    }

    /// `true` when the matrix dimension matches the vertex count and the
    /// matrix is symmetric.
    pub fn is_consistent(&self) -> bool {
        self.matrix.dimension() == self.registry.len() && self.matrix.is_symmetric()
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(
            self.matrix.dimension(),
            self.registry.len(),
            "adjacency matrix out of sync with vertex registry"
        );
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown degree: {0}")]
    UnknownDegree(String),

    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("No path from '{from}' to skill '{to}'")]
    NoPathFound { from: String, to: String },

    #[error("Name '{name}' is already used by a {kind} vertex")]
    DuplicateName { name: String, kind: VertexKind },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Invalid semester {0}: must be at least 1")]
    InvalidSemester(u32),

    #[error("Invalid edge weight {0}: must be finite and non-negative")]
    InvalidWeight(f64),

    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Lookup failures a request layer reports as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UnknownDegree(_)
                | Error::UnknownStudent(_)
                | Error::StudentNotFound(_)
                | Error::SkillNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
