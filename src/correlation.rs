//! Student compatibility scoring.
//!
//! ```text
//! coincidence(a, b) = 2·|skills(a) ∩ skills(b)| + 5·[same degree] + 1·[same semester]
//! weight(a, b)      = round(1 / (coincidence + 0.1), 2)
//! ```
//!
//! Higher coincidence gives a cheaper edge, so both the spanning tree and
//! any shortest-path query over the correlation graph favour compatible pairs.
//! Skills are compared by name: two students holding "Programar" share it
//! even though each owns a separate skill vertex.

use hashbrown::HashSet;

use crate::model::StudentRecord;
use crate::storage::AdjacencyMatrix;

/// Points per shared skill.
pub const SHARED_SKILL_POINTS: u32 = 2;
/// Points for studying the same degree.
pub const SAME_DEGREE_POINTS: u32 = 5;
/// Points for being in the same semester.
pub const SAME_SEMESTER_POINTS: u32 = 1;
/// Keeps the weight finite when nothing is shared.
pub const WEIGHT_SMOOTHING: f64 = 0.1;

/// Number of distinct skill names both students hold.
pub fn shared_skills(a: &StudentRecord, b: &StudentRecord) -> usize {
    let left: HashSet<&str> = a.skill_names.iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.skill_names.iter().map(String::as_str).collect();
    left.intersection(&right).count()
}

pub fn coincidence(a: &StudentRecord, b: &StudentRecord) -> u32 {
    let mut score = SHARED_SKILL_POINTS * shared_skills(a, b) as u32;
    if a.degree == b.degree {
        score += SAME_DEGREE_POINTS;
    }
    if a.semester == b.semester {
        score += SAME_SEMESTER_POINTS;
    }
    score
}

/// Edge weight between two students, rounded to two decimals.
///
/// A student paired with itself weighs `0.0`.
pub fn weight(a: &StudentRecord, b: &StudentRecord) -> f64 {
    if a.id == b.id {
        return 0.0;
    }
    weight_for(coincidence(a, b))
}

/// `round(1 / (score + 0.1), 2)`.
pub fn weight_for(score: u32) -> f64 {
    round2(1.0 / (score as f64 + WEIGHT_SMOOTHING))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// All-pairs correlation matrix over `students`.
///
/// Row/column `k` of the result is `students[k]`; category, degree, and
/// skill vertices never appear.
pub fn build_correlation_graph(students: &[&StudentRecord]) -> AdjacencyMatrix {
    let n = students.len();
    let mut matrix = AdjacencyMatrix::with_capacity(n);
    matrix.grow(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let linked = matrix.set_edge(i, j, weight(students[i], students[j]));
            debug_assert!(linked.is_ok(), "correlation edge rejected: {linked:?}");
        }
    }
    tracing::debug!(students = n, "built correlation graph");
    matrix
}
