//! Frozen entity graph produced by relationship resolution.

use super::{Entity, EntityMap};

/// The fully resolved set of entities.
///
/// Every back-reference and join entity has been added and every field
/// carries its anchor id. The graph is read-only from here on.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    entities: EntityMap,
}

impl EntityGraph {
    pub(crate) fn from_resolved(entities: EntityMap) -> Self {
        Self { entities }
    }

    /// Entities ordered by fully-qualified name
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of fields across all entities
    pub fn field_count(&self) -> usize {
        self.entities.values().map(Entity::field_count).sum()
    }
}
