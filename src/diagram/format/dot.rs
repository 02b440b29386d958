//! Graphviz DOT format output for entity diagrams.

use crate::config::DiagramConfig;
use crate::diagram::view::{DiagramView, LabelRow, NodeLabel, HEADER_ANCHOR};

/// Generate DOT output with one record-shaped node per entity
pub fn to_dot(view: &DiagramView, config: &DiagramConfig) -> String {
    let mut output = String::new();

    // Header
    output.push_str("digraph entities {\n");
    output.push_str(&format!(
        "  labelloc=\"t\";\n  label=\"{}\";\n  bgcolor=\"{}\";\n  fontcolor=\"{}\";\n",
        escape_quoted(&config.title),
        escape_quoted(&config.background),
        escape_quoted(&config.font_color)
    ));

    if let Some(layout) = config.layout {
        output.push_str(&format!("  rankdir={};\n", layout.rankdir()));
    }

    // Shared node styling
    output.push_str(&format!(
        "  node [shape=Mrecord, style=filled, nojustify=false, fillcolor=\"{}\"];\n\n",
        escape_quoted(&config.node_fill)
    ));

    for node in &view.nodes {
        output.push_str(&format!(
            "  {} [label=\"{}\"];\n",
            escape_dot_id(&node.table),
            record_label(node)
        ));
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    // Edges run from the referenced column to the field holding the reference
    for edge in &view.edges {
        output.push_str(&format!(
            "  {}:f{} -> {}:f{} [color=\"{}\", arrowhead=normal, dir=forward];\n",
            escape_dot_id(&edge.source_table),
            edge.source_anchor,
            escape_dot_id(&edge.target_table),
            edge.target_anchor,
            escape_quoted(&edge.color)
        ));
    }

    output.push_str("}\n");
    output
}

/// Record label: `{<f0> table| <f1> name  (type)\l| ...}`
fn record_label(node: &NodeLabel) -> String {
    let cells: Vec<String> = node.rows.iter().map(record_cell).collect();
    format!("{{{}}}", cells.join("| "))
}

fn record_cell(row: &LabelRow) -> String {
    if row.anchor == HEADER_ANCHOR {
        format!("<f{}> {}", row.anchor, escape_record(&row.name))
    } else {
        format!(
            "<f{}> {}  ({})\\l",
            row.anchor,
            escape_record(&row.name),
            escape_record(&row.type_name)
        )
    }
}

/// Escape characters that have a meaning inside record labels
fn escape_record(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a string for use inside a double-quoted DOT attribute
fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    format!("\"{}\"", escape_quoted(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::format::Layout;
    use crate::diagram::view::EdgeSpec;

    fn row(anchor: u32, name: &str, type_name: &str) -> LabelRow {
        LabelRow {
            anchor,
            name: name.to_string(),
            type_name: type_name.to_string(),
            relation: false,
        }
    }

    fn create_test_view() -> DiagramView {
        DiagramView {
            nodes: vec![
                NodeLabel {
                    entity: "App\\Entity\\Post".to_string(),
                    table: "posts".to_string(),
                    rows: vec![row(0, "posts", ""), row(1, "author", "User"), row(2, "id", "integer")],
                },
                NodeLabel {
                    entity: "App\\Entity\\User".to_string(),
                    table: "users".to_string(),
                    rows: vec![row(0, "users", ""), row(1, "id", "integer")],
                },
            ],
            edges: vec![EdgeSpec {
                source_table: "users".to_string(),
                source_anchor: 1,
                target_table: "posts".to_string(),
                target_anchor: 1,
                color: "coral4".to_string(),
            }],
        }
    }

    #[test]
    fn test_dot_header() {
        let output = to_dot(&create_test_view(), &DiagramConfig::default());

        assert!(output.starts_with("digraph entities {\n"));
        assert!(output.contains("labelloc=\"t\";"));
        assert!(output.contains("label=\"Entities\";"));
        assert!(output.contains("bgcolor=\"white\";"));
        assert!(output.contains("fontcolor=\"black\";"));
        assert!(output.contains("fillcolor=\"grey95\""));
        assert!(!output.contains("rankdir"));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_dot_layout() {
        let config = DiagramConfig {
            layout: Some(Layout::LR),
            ..DiagramConfig::default()
        };
        let output = to_dot(&create_test_view(), &config);
        assert!(output.contains("rankdir=LR;"));
    }

    #[test]
    fn test_dot_record_labels() {
        let output = to_dot(&create_test_view(), &DiagramConfig::default());

        assert!(output.contains(
            r#""posts" [label="{<f0> posts| <f1> author  (User)\l| <f2> id  (integer)\l}"];"#
        ));
        assert!(output.contains(r#""users" [label="{<f0> users| <f1> id  (integer)\l}"];"#));
    }

    #[test]
    fn test_dot_edges() {
        let output = to_dot(&create_test_view(), &DiagramConfig::default());
        assert!(output.contains(
            r#""users":f1 -> "posts":f1 [color="coral4", arrowhead=normal, dir=forward];"#
        ));
    }

    #[test]
    fn test_escape_record() {
        assert_eq!(escape_record("array<int>"), "array\\<int\\>");
        assert_eq!(escape_record("a|b{c}"), "a\\|b\\{c\\}");
        assert_eq!(escape_record("plain_name"), "plain_name");
    }

    #[test]
    fn test_title_is_quoted() {
        let config = DiagramConfig {
            title: "Shop \"v2\"".to_string(),
            ..DiagramConfig::default()
        };
        let output = to_dot(&create_test_view(), &config);
        assert!(output.contains(r#"label="Shop \"v2\"";"#));
    }
}
