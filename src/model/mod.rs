//! In-memory entity model.
//!
//! This module provides:
//! - [`Entity`]: one persistent record type with its growing field set
//! - [`Field`] and [`FieldKey`]: typed fields keyed by namespace and name
//! - [`Palette`]: per-run round-robin color assignment
//! - [`EntityGraph`]: the frozen, fully resolved set of entities

mod graph;
mod palette;

pub use graph::EntityGraph;
pub use palette::{Palette, DEFAULT_COLORS};

use log::trace;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Display type of a column that never received a `type` declaration
pub const UNKNOWN_TYPE: &str = "unknown";

/// Registry of entities keyed by fully-qualified name
pub type EntityMap = BTreeMap<String, Entity>;

/// Last `\`-separated segment of a fully-qualified class name.
pub fn short_name(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

/// Namespaced field identifier.
///
/// Relation-derived fields and plain columns live in separate namespaces so
/// that a column `user` and a relation `user` can coexist. The derived
/// ordering places every relation before every column, each group sorted
/// by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// Field created from a relation declaration or a back-reference
    Relation(String),
    /// Plain attribute or join-table column
    Column(String),
}

impl FieldKey {
    pub fn relation(name: impl Into<String>) -> Self {
        FieldKey::Relation(name.into())
    }

    pub fn column(name: impl Into<String>) -> Self {
        FieldKey::Column(name.into())
    }

    /// Field name without its namespace
    pub fn name(&self) -> &str {
        match self {
            FieldKey::Relation(name) | FieldKey::Column(name) => name,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldKey::Relation(_))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Relation(name) => write!(f, "relation '{}'", name),
            FieldKey::Column(name) => write!(f, "column '{}'", name),
        }
    }
}

/// A typed attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    type_name: String,
    related_entity: Option<String>,
    referenced_column: Option<String>,
    id: Option<u32>,
}

impl Field {
    /// Plain column of the given display type
    pub fn column(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            related_entity: None,
            referenced_column: None,
            id: None,
        }
    }

    /// Field pointing at another entity
    pub fn relation(type_name: impl Into<String>, related_entity: impl Into<String>) -> Self {
        Self {
            related_entity: Some(related_entity.into()),
            ..Self::column(type_name)
        }
    }

    /// Attach the column on the related entity this field's edge ends at
    pub fn with_referenced_column(mut self, column: impl Into<String>) -> Self {
        self.referenced_column = Some(column.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn related_entity(&self) -> Option<&str> {
        self.related_entity.as_deref()
    }

    pub fn referenced_column(&self) -> Option<&str> {
        self.referenced_column.as_deref()
    }

    /// Anchor id, available once ids have been assigned
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn set_referenced_column(&mut self, column: impl Into<String>) {
        self.referenced_column = Some(column.into());
    }
}

/// One persistent record type.
///
/// Entities reference each other by name only; the [`EntityMap`] that
/// holds them owns every entity.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    table_name: String,
    fields: BTreeMap<FieldKey, Field>,
    color: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>, color: String) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            fields: BTreeMap::new(),
            color,
        }
    }

    /// Fully-qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name without namespace, used as the display type of relations
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
    }

    /// Fields in canonical key order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldKey, &Field)> {
        self.fields.iter()
    }

    pub fn field(&self, key: &FieldKey) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn field_mut(&mut self, key: &FieldKey) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    /// Type of a plain column, if declared
    pub fn column_type(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&FieldKey::column(name))
            .map(Field::type_name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Declare a plain column.
    ///
    /// The column is created as [`UNKNOWN_TYPE`] when absent; an explicit
    /// type overwrites whatever was recorded before.
    pub fn declare_column(&mut self, name: &str, type_name: Option<&str>) {
        let field = self
            .fields
            .entry(FieldKey::column(name))
            .or_insert_with(|| Field::column(UNKNOWN_TYPE));
        if let Some(type_name) = type_name {
            field.type_name = type_name.to_string();
        }
    }

    /// Insert or replace a column wholesale.
    pub fn insert_column(&mut self, name: &str, field: Field) {
        self.fields.insert(FieldKey::column(name), field);
    }

    /// Add or merge a relation field.
    ///
    /// Type and related entity are replaced. A referenced column already
    /// recorded on the field survives unless `field` carries its own.
    pub fn merge_relation(&mut self, name: &str, field: Field) {
        match self.fields.entry(FieldKey::relation(name)) {
            Entry::Vacant(slot) => {
                trace!("{}: new relation field '{}'", self.name, name);
                slot.insert(field);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.type_name = field.type_name;
                existing.related_entity = field.related_entity;
                if field.referenced_column.is_some() {
                    existing.referenced_column = field.referenced_column;
                }
            }
        }
    }

    /// Insert a field only when its key is unused. First writer wins.
    ///
    /// Returns whether the field was inserted.
    pub fn insert_if_absent(&mut self, key: FieldKey, field: Field) -> bool {
        match self.fields.entry(key) {
            Entry::Vacant(slot) => {
                trace!("{}: new back-reference {}", self.name, slot.key());
                slot.insert(field);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Number the fields 1..N in key order.
    pub fn assign_ids(&mut self) {
        for (field, id) in self.fields.values_mut().zip(1u32..) {
            field.id = Some(id);
        }
    }
}
