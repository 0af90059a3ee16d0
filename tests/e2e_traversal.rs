//! End-to-end tests for shortest-path-to-skill queries.
//!
//! Fixture layout (vertex indices in brackets):
//!
//! ```text
//! Tecnologia[0] ── SIS[2] ── Daniel[7] ── Programar[8]
//!       │             └───── Emanuel[9] ── Programar[10]
//!       ├──────── AUTO[3] ── Julie[11] ── Programar[12]
//!       └──────── ANIM[4] ── Karol[13] ── Dibujar[14]
//! Humanidades[1] ── DER[5] ── Sofia[15] ── Debatir[16]
//!       └──────── PSI[6]
//! ```

use pretty_assertions::assert_eq;
use skill_graph::{Error, SkillGraph, SkillPath, Taxonomy, VertexId};

fn setup_campus() -> SkillGraph {
    let taxonomy = Taxonomy::from_json_str(
        r#"{"Tecnologia": ["SIS", "AUTO", "ANIM"], "Humanidades": ["DER", "PSI"]}"#,
    )
    .unwrap();
    let mut graph = SkillGraph::new(taxonomy);

    for (student, degree, semester, skill) in [
        ("Daniel", "SIS", 2, "Programar"),
        ("Emanuel", "SIS", 2, "Programar"),
        ("Julie", "AUTO", 3, "Programar"),
        ("Karol", "ANIM", 4, "Dibujar"),
        ("Sofia", "DER", 1, "Debatir"),
    ] {
        graph.add_student(student, degree, semester).unwrap();
        graph.add_skill(student, skill).unwrap();
    }

    assert!(graph.is_consistent());
    graph
}

/// Sum of matrix weights along the path.
fn traversed_cost(graph: &SkillGraph, path: &SkillPath) -> f64 {
    path.vertices
        .windows(2)
        .map(|w| {
            graph
                .matrix()
                .edge(w[0].index(), w[1].index())
                .expect("consecutive path vertices must be adjacent")
        })
        .sum()
}

// ============================================================================
// 1. Own skill is always nearest
// ============================================================================

#[test]
fn test_own_skill_is_one_hop() {
    let graph = setup_campus();

    let path = graph.find_best_path_to_skill("Daniel", "Programar").unwrap();

    assert_eq!(path.names, vec!["Daniel", "Programar"]);
    assert_eq!(path.vertices, vec![VertexId(7), VertexId(8)]);
    assert_eq!(path.len(), 1);
    assert_eq!(path.terminal_student, "Daniel");
    assert_eq!(path.terminal_semester, 2);
    assert_eq!(path.cost, 1.0);
}

#[test]
fn test_every_holder_finds_own_skill() {
    let graph = setup_campus();
    for (student, skill) in [("Emanuel", "Programar"), ("Julie", "Programar"), ("Karol", "Dibujar")] {
        let path = graph.find_best_path_to_skill(student, skill).unwrap();
        assert_eq!(path.len(), 1, "{student} should reach own {skill} directly");
        assert_eq!(path.terminal_student, student);
    }
}

// ============================================================================
// 2. Crossing degree and category vertices
// ============================================================================

#[test]
fn test_path_through_category() {
    let graph = setup_campus();

    let path = graph.find_best_path_to_skill("Emanuel", "Dibujar").unwrap();

    assert_eq!(
        path.names,
        vec!["Emanuel", "SIS", "Tecnologia", "ANIM", "Karol", "Dibujar"]
    );
    assert_eq!(path.terminal_student, "Karol");
    assert_eq!(path.terminal_semester, 4);
    // 2 (semester) + 1 + 1 + 4 (semester) + 1
    assert_eq!(path.cost, 9.0);
    assert_eq!(path.cost, traversed_cost(&graph, &path));
    assert_eq!(path.source(), Some(VertexId(9)));
    assert_eq!(path.target(), Some(VertexId(14)));
}

#[test]
fn test_nearest_holder_wins_and_ties_are_stable() {
    let mut graph = setup_campus();
    graph.add_student("Pedro", "SIS", 1).unwrap();

    // Daniel and Emanuel are both 1 + 2 + 1 = 4 away; Julie is 1 + 1 + 1 + 3 + 1 = 7.
    // Daniel was discovered first from SIS, so he wins every time.
    for _ in 0..3 {
        let path = graph.find_best_path_to_skill("Pedro", "Programar").unwrap();
        assert_eq!(path.names, vec!["Pedro", "SIS", "Daniel", "Programar"]);
        assert_eq!(path.terminal_student, "Daniel");
        assert_eq!(path.cost, 4.0);
        assert_eq!(path.cost, traversed_cost(&graph, &path));
    }
}

#[test]
fn test_cheaper_semester_edge_changes_holder() {
    let mut graph = setup_campus();
    // A first-semester AUTO student makes AUTO holders cheaper than Julie.
    graph.add_student("Ana", "AUTO", 1).unwrap();
    graph.add_skill("Ana", "Soldar").unwrap();
    graph.add_student("Luis", "AUTO", 9).unwrap();
    graph.add_skill("Luis", "Soldar").unwrap();

    let path = graph.find_best_path_to_skill("Julie", "Soldar").unwrap();
    assert_eq!(path.names, vec!["Julie", "AUTO", "Ana", "Soldar"]);
    assert_eq!(path.terminal_semester, 1);
    assert_eq!(path.cost, 3.0 + 1.0 + 1.0);
}

// ============================================================================
// 3. Failures
// ============================================================================

#[test]
fn test_disconnected_component_is_no_path() {
    let graph = setup_campus();

    let err = graph.find_best_path_to_skill("Sofia", "Programar").unwrap_err();
    assert!(matches!(err, Error::NoPathFound { .. }), "got {err:?}");
    assert!(!err.is_not_found());

    let err = graph.find_best_path_to_skill("Daniel", "Debatir").unwrap_err();
    assert!(matches!(err, Error::NoPathFound { .. }), "got {err:?}");
}

#[test]
fn test_unknown_student_or_skill() {
    let graph = setup_campus();

    assert!(matches!(
        graph.find_best_path_to_skill("Ghost", "Skill"),
        Err(Error::StudentNotFound(name)) if name == "Ghost"
    ));
    assert!(matches!(
        graph.find_best_path_to_skill("Daniel", "Nonexistent"),
        Err(Error::SkillNotFound(name)) if name == "Nonexistent"
    ));
    // a degree name is not a student
    assert!(matches!(
        graph.find_best_path_to_skill("SIS", "Programar"),
        Err(Error::StudentNotFound(_))
    ));
    // a student name is not a skill
    assert!(matches!(
        graph.find_best_path_to_skill("Daniel", "Karol"),
        Err(Error::SkillNotFound(_))
    ));
}

#[test]
fn test_queries_do_not_mutate() {
    let graph = setup_campus();
    let before = graph.projection();
    let _ = graph.find_best_path_to_skill("Emanuel", "Dibujar");
    let _ = graph.find_best_path_to_skill("Sofia", "Programar");
    assert_eq!(graph.projection(), before);
}
