//! Per-student attributes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::VertexId;

/// A registered student.
///
/// Created by `add_student`, mutated only when a skill is acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: VertexId,
    pub name: String,
    /// Degree vertex the student is linked to.
    pub degree: VertexId,
    /// Degree display name, kept for scoring without a registry round-trip.
    pub degree_name: String,
    /// Always >= 1.
    pub semester: u32,
    /// Skill vertices owned by this student, in acquisition order.
    pub skills: SmallVec<[VertexId; 1]>,
    /// Skill names, parallel to `skills`.
    pub skill_names: SmallVec<[String; 1]>,
}

impl StudentRecord {
    pub fn new(
        id: VertexId,
        name: impl Into<String>,
        degree: VertexId,
        degree_name: impl Into<String>,
        semester: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            degree,
            degree_name: degree_name.into(),
            semester,
            skills: SmallVec::new(),
            skill_names: SmallVec::new(),
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skill_names.iter().any(|s| s == skill)
    }

    /// Vertex of the named skill, if this student holds it.
    pub fn skill_vertex(&self, skill: &str) -> Option<VertexId> {
        self.skill_names
            .iter()
            .position(|s| s == skill)
            .map(|pos| self.skills[pos])
    }

    pub(crate) fn push_skill(&mut self, id: VertexId, name: impl Into<String>) {
        self.skills.push(id);
        self.skill_names.push(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_lookup() {
        let mut s = StudentRecord::new(VertexId(7), "Daniel", VertexId(2), "SIS", 2);
        assert!(!s.has_skill("Programar"));

        s.push_skill(VertexId(9), "Programar");
        assert!(s.has_skill("Programar"));
        assert_eq!(s.skill_vertex("Programar"), Some(VertexId(9)));
        assert_eq!(s.skill_vertex("Dibujar"), None);
    }
}
