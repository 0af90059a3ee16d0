//! Graph export: Cypher DUMP and JSON.
//!
//! The Cypher script recreates the whole graph in any Neo4j-compatible
//! database; the JSON form is the full-graph projection for renderers.
//!
//! ```text
//! SkillGraph → export_cypher_dump() → CREATE / MATCH..CREATE statements
//! SkillGraph → export_json()        → {"nodes": [...], "edges": [...]}
//! ```

use std::io::Write;

use crate::model::{VertexId, VertexKind};
use crate::{Result, SkillGraph};

/// Export the graph as a Cypher DUMP script.
///
/// One `CREATE` per vertex (label = vertex kind, `_id` = vertex index) and
/// one `LINKED {weight}` relationship per undirected edge.
pub fn export_cypher_dump(graph: &SkillGraph, writer: &mut dyn Write) -> Result<()> {
    let projection = graph.projection();

    // Header
    writeln!(writer, "// skill-graph Cypher DUMP")?;
    writeln!(writer, "// Nodes: {}", projection.nodes.len())?;
    writeln!(writer, "// Relationships: {}", projection.edges.len())?;
    writeln!(writer)?;

    for node in &projection.nodes {
        let extra = student_properties(graph, node.id, node.kind);
        writeln!(
            writer,
            "CREATE (n:{} {{_id: {}, name: {}{}}});",
            node.kind.label(),
            node.id,
            quote(&node.name),
            extra,
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Relationships")?;

    for edge in &projection.edges {
        writeln!(
            writer,
            "MATCH (a {{_id: {}}}), (b {{_id: {}}}) CREATE (a)-[:LINKED {{weight: {}}}]->(b);",
            edge.source, edge.target, edge.weight,
        )?;
    }

    Ok(())
}

/// Export the full-graph projection as pretty-printed JSON.
pub fn export_json(graph: &SkillGraph, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &graph.projection())?;
    writeln!(writer)?;
    Ok(())
}

/// `, degree: '..', semester: n` for students, empty otherwise.
fn student_properties(graph: &SkillGraph, id: VertexId, kind: VertexKind) -> String {
    if kind != VertexKind::Student {
        return String::new();
    }
    match graph.registry().student(id) {
        Some(s) => format!(", degree: {}, semester: {}", quote(&s.degree_name), s.semester),
        None => String::new(),
    }
}

/// Single-quoted Cypher string literal.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphProjection, Taxonomy};

    fn graph() -> SkillGraph {
        let taxonomy = Taxonomy::new(vec![("Tecnologia", vec!["SIS"])]).unwrap();
        let mut g = SkillGraph::new(taxonomy);
        g.add_student("O'Neil", "SIS", 3).unwrap();
        g.add_skill("O'Neil", "Programar").unwrap();
        g
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("Ada"), "'Ada'");
        assert_eq!(quote("O'Neil"), "'O\\'Neil'");
    }

    #[test]
    fn test_cypher_dump() {
        let mut out = Vec::new();
        export_cypher_dump(&graph(), &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();

        assert!(script.contains("// Nodes: 4"));
        assert!(script.contains("// Relationships: 3"));
        assert!(script.contains("CREATE (n:Category {_id: 0, name: 'Tecnologia'});"));
        assert!(script.contains("CREATE (n:Student {_id: 2, name: 'O\\'Neil', degree: 'SIS', semester: 3});"));
        assert!(script.contains("CREATE (n:Skill {_id: 3, name: 'Programar'});"));
        assert!(script.contains("MATCH (a {_id: 1}), (b {_id: 2}) CREATE (a)-[:LINKED {weight: 3}]->(b);"));
    }

    #[test]
    fn test_json_export_parses_back() {
        let g = graph();
        let mut out = Vec::new();
        export_json(&g, &mut out).unwrap();
        let parsed: GraphProjection = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, g.projection());
    }
}
