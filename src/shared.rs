//! Lock-guarded handle for embedding the graph in a multi-handler service.
//!
//! Matrix growth reallocates and would invalidate any index or iterator a
//! concurrent reader holds, so every call takes the lock for its whole
//! duration: mutations exclusively, queries shared.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{GraphProjection, SkillPath, SpanningTree, VertexId};
use crate::{Result, SkillGraph, Taxonomy};

/// Cloneable handle to one shared `SkillGraph`.
#[derive(Debug, Clone)]
pub struct SharedSkillGraph {
    inner: Arc<RwLock<SkillGraph>>,
}

impl SharedSkillGraph {
    pub fn new(graph: SkillGraph) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }

    pub fn from_taxonomy(taxonomy: Taxonomy) -> Self {
        Self::new(SkillGraph::new(taxonomy))
    }

    pub fn add_student(&self, name: &str, degree: &str, semester: u32) -> Result<VertexId> {
        self.inner.write().add_student(name, degree, semester)
    }

    pub fn add_skill(&self, student_name: &str, skill_name: &str) -> Result<VertexId> {
        self.inner.write().add_skill(student_name, skill_name)
    }

    pub fn find_best_path_to_skill(&self, student_name: &str, skill_name: &str) -> Result<SkillPath> {
        self.inner.read().find_best_path_to_skill(student_name, skill_name)
    }

    pub fn get_mst(&self) -> SpanningTree {
        self.inner.read().get_mst()
    }

    pub fn projection(&self) -> GraphProjection {
        self.inner.read().projection()
    }

    /// Run `f` against the graph under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&SkillGraph) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_writers_stay_consistent() {
        let taxonomy = Taxonomy::new(vec![("Tecnologia", vec!["SIS"])]).unwrap();
        let shared = SharedSkillGraph::from_taxonomy(taxonomy);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let g = shared.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        let name = format!("student-{t}-{i}");
                        g.add_student(&name, "SIS", 1 + i).unwrap();
                        g.add_skill(&name, "Programar").unwrap();
                        let _ = g.get_mst();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        shared.read(|g| {
            assert_eq!(g.registry().student_count(), 40);
            assert_eq!(g.vertex_count(), 2 + 80);
            assert!(g.is_consistent());
        });
        assert_eq!(shared.get_mst().edges.len(), 39);
    }
}
