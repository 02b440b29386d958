//! JSON format output for the resolved entity model.

use crate::diagram::view::DiagramView;
use crate::model::EntityGraph;
use schemars::{schema_for, JsonSchema, Schema};
use serde::Serialize;

/// JSON representation of the diagram
#[derive(Debug, Serialize, JsonSchema)]
pub struct DiagramJson {
    pub title: String,
    pub entities: Vec<EntityJson>,
    pub edges: Vec<EdgeJson>,
    pub stats: DiagramStats,
}

/// JSON representation of an entity with its numbered fields
#[derive(Debug, Serialize, JsonSchema)]
pub struct EntityJson {
    pub name: String,
    pub table: String,
    pub color: String,
    pub fields: Vec<FieldJson>,
}

/// JSON representation of a field
#[derive(Debug, Serialize, JsonSchema)]
pub struct FieldJson {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub relation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_column: Option<String>,
}

/// JSON representation of an edge between two field anchors
#[derive(Debug, Serialize, JsonSchema)]
pub struct EdgeJson {
    pub source_table: String,
    pub source_anchor: u32,
    pub target_table: String,
    pub target_anchor: u32,
    pub color: String,
}

/// Diagram statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct DiagramStats {
    pub entity_count: usize,
    pub field_count: usize,
    pub edge_count: usize,
}

/// Generate pretty-printed JSON for a graph and its view
pub fn to_json(graph: &EntityGraph, view: &DiagramView, title: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_diagram_json(graph, view, title))
}

/// Build the JSON structure
pub fn build_diagram_json(graph: &EntityGraph, view: &DiagramView, title: &str) -> DiagramJson {
    let entities: Vec<EntityJson> = graph
        .entities()
        .map(|entity| EntityJson {
            name: entity.name().to_string(),
            table: entity.table_name().to_string(),
            color: entity.color().to_string(),
            fields: entity
                .fields()
                .filter_map(|(key, field)| {
                    field.id().map(|id| FieldJson {
                        id,
                        name: key.name().to_string(),
                        type_name: field.type_name().to_string(),
                        relation: key.is_relation(),
                        related_entity: field.related_entity().map(str::to_string),
                        referenced_column: field.referenced_column().map(str::to_string),
                    })
                })
                .collect(),
        })
        .collect();

    let edges: Vec<EdgeJson> = view
        .edges
        .iter()
        .map(|e| EdgeJson {
            source_table: e.source_table.clone(),
            source_anchor: e.source_anchor,
            target_table: e.target_table.clone(),
            target_anchor: e.target_anchor,
            color: e.color.clone(),
        })
        .collect();

    let field_count = entities.iter().map(|e| e.fields.len()).sum();

    DiagramJson {
        title: title.to_string(),
        stats: DiagramStats {
            entity_count: entities.len(),
            field_count,
            edge_count: edges.len(),
        },
        entities,
        edges,
    }
}

/// JSON schema of [`DiagramJson`]
pub fn diagram_schema() -> Schema {
    schema_for!(DiagramJson)
}
