//! Loading of Doctrine YAML mapping documents.
//!
//! Each document maps entity fully-qualified names to descriptors. Only
//! descriptors whose `type` is `entity` are kept; mapped superclasses,
//! embeddables and anything else in the same document are ignored.

mod descriptor;

pub use descriptor::*;

use crate::error::LoadError;
use log::{debug, warn};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Value of the `type` key that marks an entity descriptor
pub const ENTITY_KIND: &str = "entity";

/// Entity descriptors collected from one or more documents
#[derive(Debug, Clone, Default)]
pub struct MetadataSet {
    entities: BTreeMap<String, EntityDescriptor>,
}

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. A later descriptor for the same name replaces the
    /// earlier one.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: EntityDescriptor) {
        let name = name.into();
        if self.entities.contains_key(&name) {
            warn!("entity '{}' is declared more than once, keeping the last declaration", name);
        }
        self.entities.insert(name, descriptor);
    }

    /// Merge every descriptor of another set into this one
    pub fn extend(&mut self, other: MetadataSet) {
        for (name, descriptor) in other.entities {
            self.insert(name, descriptor);
        }
    }

    pub fn get(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.get(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl IntoIterator for MetadataSet {
    type Item = (String, EntityDescriptor);
    type IntoIter = std::collections::btree_map::IntoIter<String, EntityDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

/// Parse one YAML document.
///
/// `path` is only used for error reporting.
pub fn parse_document(source: &str, path: &Path) -> Result<MetadataSet, LoadError> {
    let document: Option<BTreeMap<String, Value>> =
        serde_yaml_ng::from_str(source).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

    let mut set = MetadataSet::new();
    for (name, value) in document.unwrap_or_default() {
        let kind = value.get("type").and_then(Value::as_str);
        if kind != Some(ENTITY_KIND) {
            debug!("skipping '{}' in {}: not an entity ({:?})", name, path.display(), kind);
            continue;
        }

        let descriptor: EntityDescriptor =
            serde_yaml_ng::from_value(value).map_err(|source| LoadError::Descriptor {
                path: path.to_path_buf(),
                entity: name.clone(),
                source,
            })?;
        set.insert(name, descriptor);
    }

    Ok(set)
}

/// Parse a document held in memory
pub fn parse_str(source: &str) -> Result<MetadataSet, LoadError> {
    parse_document(source, Path::new("<string>"))
}

/// Read and parse a single mapping file
pub fn load_file(path: &Path) -> Result<MetadataSet, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_document(&source, path)?;
    debug!("{}: {} entities", path.display(), set.len());
    Ok(set)
}

/// Read every file and merge their entities, in the given file order
pub fn load_files(paths: &[PathBuf]) -> Result<MetadataSet, LoadError> {
    let mut set = MetadataSet::new();
    for path in paths {
        set.extend(load_file(path)?);
    }
    Ok(set)
}
