//! Error types for metadata loading, relationship resolution and
//! configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::RelationKind;

/// Failure while reading or decoding mapping documents
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid mapping for entity '{entity}' in {}: {source}", .path.display())]
    Descriptor {
        path: PathBuf,
        entity: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Failure while resolving relations or building the diagram view.
///
/// All variants are fatal: the resolved graph would be structurally
/// incomplete.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("entity '{entity}' declares {kind} relation '{field}' to unknown entity '{target}'")]
    UnknownEntity {
        entity: String,
        field: String,
        kind: RelationKind,
        target: String,
    },

    #[error("join table '{table}' references unknown column '{column}' on entity '{entity}'")]
    UnknownColumn {
        table: String,
        entity: String,
        column: String,
    },

    #[error("join table '{table}' has the same name or table as a declared entity")]
    JoinTableCollision { table: String },

    #[error(
        "field '{field}' of entity '{entity}' references column '{column}' of '{related}', which does not exist"
    )]
    DanglingEdge {
        entity: String,
        field: String,
        related: String,
        column: String,
    },
}

/// Failure while loading a style configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Any failure of the load-and-resolve pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
