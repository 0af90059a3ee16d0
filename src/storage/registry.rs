//! Vertex registry: index allocation, kind classification, name lookup.
//!
//! Index layout follows insertion order: categories first, then degrees
//! (category by category), then students and skills interleaved as they
//! are added. A vertex's kind is derived from the table holding its index.
//!
//! Names are globally unique across kinds. The one exception is skills:
//! several students may hold a skill with the same name, and each gets its
//! own vertex, so a skill name maps to a list of indices.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{StudentRecord, VertexId, VertexKind};
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};

/// Skill vertex bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub id: VertexId,
    pub name: String,
    pub owner: VertexId,
}

/// Outcome of attaching a skill to a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillSlot {
    pub skill: VertexId,
    pub owner: VertexId,
    /// `false` when the student already held the skill and nothing changed.
    pub created: bool,
}

#[derive(Debug, Clone)]
struct NameEntry {
    kind: VertexKind,
    ids: SmallVec<[VertexId; 1]>,
}

#[derive(Debug, Clone)]
pub struct VertexRegistry {
    categories: Vec<String>,
    degrees: Vec<String>,
    students: HashMap<VertexId, StudentRecord>,
    skills: HashMap<VertexId, SkillRecord>,
    /// Students in insertion (= index) order.
    student_order: Vec<VertexId>,
    by_name: HashMap<String, NameEntry>,
    next_id: usize,
}

impl VertexRegistry {
    /// Register every category and degree of the taxonomy.
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        let mut registry = Self {
            categories: Vec::with_capacity(taxonomy.category_count()),
            degrees: Vec::with_capacity(taxonomy.degree_count()),
            students: HashMap::new(),
            skills: HashMap::new(),
            student_order: Vec::new(),
            by_name: HashMap::new(),
            next_id: 0,
        };

        for category in taxonomy.categories() {
            let id = registry.allocate();
            registry.categories.push(category.to_string());
            registry.index_name(category, VertexKind::Category, id);
        }
        for degree in taxonomy.degrees() {
            let id = registry.allocate();
            registry.degrees.push(degree.to_string());
            registry.index_name(degree, VertexKind::Degree, id);
        }

        registry
    }

    fn allocate(&mut self) -> VertexId {
        let id = VertexId(self.next_id);
        self.next_id += 1;
        id
    }

    fn index_name(&mut self, name: &str, kind: VertexKind, id: VertexId) {
        self.by_name
            .entry(name.to_string())
            .or_insert_with(|| NameEntry { kind, ids: SmallVec::new() })
            .ids
            .push(id);
    }

    /// Fail unless `name` is free, or already owned by `allowed`.
    fn claim_name(&self, name: &str, allowed: Option<VertexKind>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name.to_string()));
        }
        match self.by_name.get(name) {
            Some(entry) if Some(entry.kind) != allowed => Err(Error::DuplicateName {
                name: name.to_string(),
                kind: entry.kind,
            }),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Register a student. Validates everything before touching any table.
    ///
    /// Returns the new student index and its degree index, which the caller
    /// links in the matrix.
    pub fn add_student(
        &mut self,
        name: &str,
        degree: &str,
        semester: u32,
    ) -> Result<(VertexId, VertexId)> {
        let degree_id = match self.by_name.get(degree) {
            Some(entry) if entry.kind == VertexKind::Degree => entry.ids[0],
            _ => return Err(Error::UnknownDegree(degree.to_string())),
        };
        if semester == 0 {
            return Err(Error::InvalidSemester(semester));
        }
        self.claim_name(name, None)?;

        let id = self.allocate();
        self.students
            .insert(id, StudentRecord::new(id, name, degree_id, degree, semester));
        self.student_order.push(id);
        self.index_name(name, VertexKind::Student, id);
        Ok((id, degree_id))
    }

    /// Attach a skill to a student, allocating a fresh skill vertex.
    ///
    /// Skills are not deduplicated across students. Re-adding a skill the
    /// student already holds returns the existing vertex untouched.
    pub fn add_skill(&mut self, student_name: &str, skill_name: &str) -> Result<SkillSlot> {
        let owner = self
            .student_by_name(student_name)
            .ok_or_else(|| Error::UnknownStudent(student_name.to_string()))?;

        if let Some(existing) = owner.skill_vertex(skill_name) {
            return Ok(SkillSlot { skill: existing, owner: owner.id, created: false });
        }
        let owner_id = owner.id;
        self.claim_name(skill_name, Some(VertexKind::Skill))?;

        let id = self.allocate();
        self.skills.insert(
            id,
            SkillRecord { id, name: skill_name.to_string(), owner: owner_id },
        );
        if let Some(student) = self.students.get_mut(&owner_id) {
            student.push_skill(id, skill_name);
        }
        self.index_name(skill_name, VertexKind::Skill, id);
        Ok(SkillSlot { skill: id, owner: owner_id, created: true })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Total number of vertices.
    pub fn len(&self) -> usize {
        self.next_id
    }

    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn degree_count(&self) -> usize {
        self.degrees.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn kind(&self, id: VertexId) -> Option<VertexKind> {
        let i = id.index();
        let c = self.categories.len();
        let d = self.degrees.len();
        if i < c {
            Some(VertexKind::Category)
        } else if i < c + d {
            Some(VertexKind::Degree)
        } else if self.students.contains_key(&id) {
            Some(VertexKind::Student)
        } else if self.skills.contains_key(&id) {
            Some(VertexKind::Skill)
        } else {
            None
        }
    }

    pub fn name(&self, id: VertexId) -> Option<&str> {
        let i = id.index();
        let c = self.categories.len();
        let d = self.degrees.len();
        if i < c {
            Some(self.categories[i].as_str())
        } else if i < c + d {
            Some(self.degrees[i - c].as_str())
        } else if let Some(student) = self.students.get(&id) {
            Some(student.name.as_str())
        } else {
            self.skills.get(&id).map(|s| s.name.as_str())
        }
    }

    /// Reverse lookup across all four tables. For a skill name held by
    /// several students this is the lowest index.
    pub fn lookup_by_name(&self, name: &str) -> Option<VertexId> {
        self.by_name.get(name).map(|e| e.ids[0])
    }

    /// Kind and every index registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<(VertexKind, &[VertexId])> {
        self.by_name.get(name).map(|e| (e.kind, e.ids.as_slice()))
    }

    pub fn student(&self, id: VertexId) -> Option<&StudentRecord> {
        self.students.get(&id)
    }

    pub fn student_by_name(&self, name: &str) -> Option<&StudentRecord> {
        match self.by_name.get(name) {
            Some(entry) if entry.kind == VertexKind::Student => self.students.get(&entry.ids[0]),
            _ => None,
        }
    }

    /// Students in index order.
    pub fn students(&self) -> impl Iterator<Item = &StudentRecord> {
        self.student_order.iter().filter_map(|id| self.students.get(id))
    }

    pub fn student_ids(&self) -> &[VertexId] {
        &self.student_order
    }

    pub fn skill(&self, id: VertexId) -> Option<&SkillRecord> {
        self.skills.get(&id)
    }

    /// Every vertex carrying this skill name, ascending.
    pub fn skill_vertices(&self, name: &str) -> &[VertexId] {
        match self.by_name.get(name) {
            Some(entry) if entry.kind == VertexKind::Skill => entry.ids.as_slice(),
            _ => &[],
        }
    }

    pub fn skill_owner(&self, id: VertexId) -> Option<VertexId> {
        self.skills.get(&id).map(|s| s.owner)
    }

    /// All vertex ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.next_id).map(VertexId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> VertexRegistry {
        let taxonomy = Taxonomy::new(vec![
            ("Tecnologia", vec!["SIS", "AUTO"]),
            ("Artes", vec!["ANIM"]),
        ])
        .unwrap();
        VertexRegistry::from_taxonomy(&taxonomy)
    }

    #[test]
    fn test_taxonomy_indices() {
        let r = registry();
        assert_eq!(r.len(), 5);
        assert_eq!(r.lookup_by_name("Tecnologia"), Some(VertexId(0)));
        assert_eq!(r.lookup_by_name("Artes"), Some(VertexId(1)));
        assert_eq!(r.lookup_by_name("SIS"), Some(VertexId(2)));
        assert_eq!(r.lookup_by_name("ANIM"), Some(VertexId(4)));
        assert_eq!(r.kind(VertexId(1)), Some(VertexKind::Category));
        assert_eq!(r.kind(VertexId(3)), Some(VertexKind::Degree));
        assert_eq!(r.kind(VertexId(5)), None);
    }

    #[test]
    fn test_add_student_and_skill() {
        let mut r = registry();
        let (daniel, degree) = r.add_student("Daniel", "SIS", 2).unwrap();
        assert_eq!(daniel, VertexId(5));
        assert_eq!(degree, VertexId(2));
        assert_eq!(r.kind(daniel), Some(VertexKind::Student));
        assert_eq!(r.student(daniel).unwrap().degree, VertexId(2));

        let slot = r.add_skill("Daniel", "Programar").unwrap();
        assert!(slot.created);
        assert_eq!(slot.skill, VertexId(6));
        assert_eq!(slot.owner, daniel);
        assert_eq!(r.kind(slot.skill), Some(VertexKind::Skill));
        assert_eq!(r.name(slot.skill), Some("Programar"));
        assert!(r.student(daniel).unwrap().has_skill("Programar"));
    }

    #[test]
    fn test_skills_not_deduplicated_across_students() {
        let mut r = registry();
        r.add_student("Daniel", "SIS", 2).unwrap();
        r.add_student("Julie", "AUTO", 3).unwrap();
        let a = r.add_skill("Daniel", "Programar").unwrap();
        let b = r.add_skill("Julie", "Programar").unwrap();

        assert_ne!(a.skill, b.skill);
        assert_eq!(r.skill_vertices("Programar"), &[a.skill, b.skill]);
        assert_eq!(r.skill_owner(b.skill), Some(b.owner));
    }

    #[test]
    fn test_same_skill_twice_is_noop() {
        let mut r = registry();
        r.add_student("Daniel", "SIS", 2).unwrap();
        let first = r.add_skill("Daniel", "Programar").unwrap();
        let second = r.add_skill("Daniel", "Programar").unwrap();
        assert!(!second.created);
        assert_eq!(first.skill, second.skill);
        assert_eq!(r.len(), 7);
    }

    #[test]
    fn test_names_unique_across_kinds() {
        let mut r = registry();
        assert!(matches!(
            r.add_student("SIS", "SIS", 1),
            Err(Error::DuplicateName { kind: VertexKind::Degree, .. })
        ));
        r.add_student("Daniel", "SIS", 2).unwrap();
        assert!(matches!(
            r.add_student("Daniel", "AUTO", 1),
            Err(Error::DuplicateName { kind: VertexKind::Student, .. })
        ));
        assert!(matches!(
            r.add_skill("Daniel", "Artes"),
            Err(Error::DuplicateName { kind: VertexKind::Category, .. })
        ));
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn test_errors_leave_registry_untouched() {
        let mut r = registry();
        assert!(matches!(r.add_student("X", "NOPE", 1), Err(Error::UnknownDegree(_))));
        assert!(matches!(r.add_student("X", "SIS", 0), Err(Error::InvalidSemester(0))));
        assert!(matches!(r.add_student("", "SIS", 1), Err(Error::InvalidName(_))));
        assert!(matches!(r.add_skill("Ghost", "Skill"), Err(Error::UnknownStudent(_))));
        assert_eq!(r.len(), 5);
        assert_eq!(r.student_count(), 0);
    }
}
