//! Vertex identity and classification.

use serde::{Deserialize, Serialize};

/// Dense, zero-based vertex index. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// The four node kinds of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    Category,
    Degree,
    Student,
    Skill,
}

impl VertexKind {
    /// Label used by exports (`:Category`, `:Degree`, ...).
    pub fn label(self) -> &'static str {
        match self {
            VertexKind::Category => "Category",
            VertexKind::Degree => "Degree",
            VertexKind::Student => "Student",
            VertexKind::Skill => "Skill",
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
