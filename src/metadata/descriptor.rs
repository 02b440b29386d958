//! Typed shape of one Doctrine YAML mapping descriptor.
//!
//! Only the keys that relationship resolution reads are modelled; every
//! other key (`repositoryClass`, `indexes`, `lifecycleCallbacks`, ...) is
//! ignored by serde.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Referenced column assumed when a join column does not name one
pub const DEFAULT_REFERENCED_COLUMN: &str = "id";

/// Mapping descriptor of a single entity
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    /// Table name shown as the node header
    pub table: Option<String>,
    /// Identifier columns
    pub id: Option<BTreeMap<String, Option<ColumnDescriptor>>>,
    /// Regular columns
    pub fields: Option<BTreeMap<String, Option<ColumnDescriptor>>>,
    #[serde(default)]
    pub one_to_one: BTreeMap<String, RelationDescriptor>,
    #[serde(default)]
    pub one_to_many: BTreeMap<String, RelationDescriptor>,
    #[serde(default)]
    pub many_to_one: BTreeMap<String, RelationDescriptor>,
    #[serde(default)]
    pub many_to_many: BTreeMap<String, RelationDescriptor>,
}

impl EntityDescriptor {
    /// Declared relations of one kind
    pub fn relations(&self, kind: RelationKind) -> &BTreeMap<String, RelationDescriptor> {
        match kind {
            RelationKind::OneToOne => &self.one_to_one,
            RelationKind::OneToMany => &self.one_to_many,
            RelationKind::ManyToOne => &self.many_to_one,
            RelationKind::ManyToMany => &self.many_to_many,
        }
    }
}

/// A plain column declaration (`id` or `fields` entry)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnDescriptor {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

/// The four supported association kinds, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::OneToOne,
        RelationKind::OneToMany,
        RelationKind::ManyToOne,
        RelationKind::ManyToMany,
    ];

    /// Mapping key used in the YAML descriptor
    pub fn as_key(self) -> &'static str {
        match self {
            RelationKind::OneToOne => "oneToOne",
            RelationKind::OneToMany => "oneToMany",
            RelationKind::ManyToOne => "manyToOne",
            RelationKind::ManyToMany => "manyToMany",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One association declaration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDescriptor {
    pub target_entity: String,
    pub mapped_by: Option<String>,
    pub inversed_by: Option<String>,
    pub join_columns: Option<JoinColumns>,
    pub join_table: Option<JoinTable>,
}

impl RelationDescriptor {
    /// Owned-side marker, ignoring empty values
    pub fn mapped_by(&self) -> Option<&str> {
        self.mapped_by.as_deref().filter(|s| !s.is_empty())
    }

    /// Owning-side marker, ignoring empty values
    pub fn inversed_by(&self) -> Option<&str> {
        self.inversed_by.as_deref().filter(|s| !s.is_empty())
    }

    /// Referenced column of the last declared join column.
    pub fn referenced_column(&self) -> Option<&str> {
        self.join_columns
            .as_ref()
            .and_then(|columns| columns.entries().last().map(|c| c.referenced_column))
    }
}

/// Join columns, either as a list of `{name, referencedColumnName}` or as
/// a map of name to `{referencedColumnName}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JoinColumns {
    List(Vec<JoinColumn>),
    Map(BTreeMap<String, Option<JoinColumnTarget>>),
}

/// List form of a join column
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinColumn {
    pub name: String,
    pub referenced_column_name: Option<String>,
}

/// Map form value of a join column
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinColumnTarget {
    pub referenced_column_name: Option<String>,
}

/// Normalized view of a join column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinColumnRef<'a> {
    pub name: &'a str,
    pub referenced_column: &'a str,
}

impl JoinColumns {
    /// Join columns in declaration order (map form: name order)
    pub fn entries(&self) -> Vec<JoinColumnRef<'_>> {
        match self {
            JoinColumns::List(columns) => columns
                .iter()
                .map(|column| JoinColumnRef {
                    name: &column.name,
                    referenced_column: column
                        .referenced_column_name
                        .as_deref()
                        .unwrap_or(DEFAULT_REFERENCED_COLUMN),
                })
                .collect(),
            JoinColumns::Map(columns) => columns
                .iter()
                .map(|(name, target)| JoinColumnRef {
                    name,
                    referenced_column: target
                        .as_ref()
                        .and_then(|t| t.referenced_column_name.as_deref())
                        .unwrap_or(DEFAULT_REFERENCED_COLUMN),
                })
                .collect(),
        }
    }
}

/// Join table of a many-to-many association
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTable {
    pub name: Option<String>,
    pub join_columns: Option<JoinColumns>,
    pub inverse_join_columns: Option<JoinColumns>,
}

impl JoinTable {
    /// Join table name, ignoring empty values
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn join_columns(&self) -> Vec<JoinColumnRef<'_>> {
        self.join_columns
            .as_ref()
            .map(JoinColumns::entries)
            .unwrap_or_default()
    }

    pub fn inverse_join_columns(&self) -> Vec<JoinColumnRef<'_>> {
        self.inverse_join_columns
            .as_ref()
            .map(JoinColumns::entries)
            .unwrap_or_default()
    }
}
