//! # Skill Graph Model
//!
//! Clean DTOs shared by the registry, the algorithms, and callers.
//!
//! Design rule: this module is pure data. No I/O, no state, no locking.

pub mod vertex;
pub mod student;
pub mod projection;

pub use vertex::{VertexId, VertexKind};
pub use student::StudentRecord;
pub use projection::{
    GraphProjection, ProjectedNode, ProjectedEdge,
    SkillPath, SpanningTree, TreeNode, TreeEdge,
};
