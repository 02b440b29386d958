//! Node labels and field-to-field edges derived from a resolved graph.

use crate::error::ResolveError;
use crate::model::{Entity, EntityGraph, FieldKey};

/// Anchor of the header row holding the table name
pub const HEADER_ANCHOR: u32 = 0;

/// One row of a node label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    /// Port number: 0 for the header, field id otherwise
    pub anchor: u32,
    pub name: String,
    /// Display type; empty for the header
    pub type_name: String,
    /// Whether the row comes from a relation
    pub relation: bool,
}

/// Label of one entity node, rows in anchor order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabel {
    pub entity: String,
    pub table: String,
    pub rows: Vec<LabelRow>,
}

impl NodeLabel {
    /// Build the label of an entity whose ids are assigned
    pub fn from_entity(entity: &Entity) -> Self {
        let mut rows = vec![LabelRow {
            anchor: HEADER_ANCHOR,
            name: entity.table_name().to_string(),
            type_name: String::new(),
            relation: false,
        }];

        rows.extend(entity.fields().filter_map(|(key, field)| {
            field.id().map(|anchor| LabelRow {
                anchor,
                name: key.name().to_string(),
                type_name: field.type_name().to_string(),
                relation: key.is_relation(),
            })
        }));

        Self {
            entity: entity.name().to_string(),
            table: entity.table_name().to_string(),
            rows,
        }
    }

    /// Field rows, without the header
    pub fn fields(&self) -> &[LabelRow] {
        &self.rows[1..]
    }
}

/// A directed edge from a referenced field to the field referencing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    /// Table of the related entity
    pub source_table: String,
    /// Anchor of the referenced column on the related entity
    pub source_anchor: u32,
    /// Table of the entity owning the field
    pub target_table: String,
    /// Anchor of the owning field
    pub target_anchor: u32,
    /// Color of the related entity
    pub color: String,
}

/// Everything a renderer needs: one label per entity and every edge
#[derive(Debug, Clone, Default)]
pub struct DiagramView {
    pub nodes: Vec<NodeLabel>,
    pub edges: Vec<EdgeSpec>,
}

impl DiagramView {
    /// Build labels and edges for every entity of the graph.
    ///
    /// Fails when a field names a related entity or referenced column that
    /// the graph does not contain.
    pub fn from_graph(graph: &EntityGraph) -> Result<Self, ResolveError> {
        let mut nodes = Vec::with_capacity(graph.len());
        let mut edges = Vec::new();

        for entity in graph.entities() {
            nodes.push(NodeLabel::from_entity(entity));
            edges.extend(entity_edges(graph, entity)?);
        }

        Ok(Self { nodes, edges })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of field rows across all nodes
    pub fn field_count(&self) -> usize {
        self.nodes.iter().map(|n| n.fields().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, entity: &str) -> Option<&NodeLabel> {
        self.nodes.iter().find(|n| n.entity == entity)
    }
}

/// Edges ending at fields of `entity` that carry a referenced column
pub fn entity_edges(graph: &EntityGraph, entity: &Entity) -> Result<Vec<EdgeSpec>, ResolveError> {
    let mut edges = Vec::new();

    for (key, field) in entity.fields() {
        let Some(column) = field.referenced_column() else {
            continue;
        };
        let dangling = || ResolveError::DanglingEdge {
            entity: entity.name().to_string(),
            field: key.name().to_string(),
            related: field.related_entity().unwrap_or_default().to_string(),
            column: column.to_string(),
        };

        let related = field
            .related_entity()
            .and_then(|name| graph.get(name))
            .ok_or_else(dangling)?;
        let source_anchor = related
            .field(&FieldKey::column(column))
            .and_then(|f| f.id())
            .ok_or_else(dangling)?;
        let Some(target_anchor) = field.id() else {
            continue;
        };

        edges.push(EdgeSpec {
            source_table: related.table_name().to_string(),
            source_anchor,
            target_table: entity.table_name().to_string(),
            target_anchor,
            color: related.color().to_string(),
        });
    }

    Ok(edges)
}
