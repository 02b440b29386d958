//! Relationship resolution.
//!
//! Turns independently authored entity descriptors into a consistent
//! graph in two strictly sequential passes:
//!
//! 1. **Populate**: plain columns of every entity, then every declared
//!    relation. Relations add their local field, the missing back-reference
//!    on the target, and intersection entities for many-to-many
//!    associations. Intersection entities are staged and merged into the
//!    registry only after the walk over declared entities has finished.
//! 2. **Assign ids**: each entity's fields are ordered by key and numbered
//!    1..N. This reads a field set that pass 1 must have completed for
//!    every entity, otherwise ids would shift as back-references arrive.

mod relation;

use crate::error::ResolveError;
use crate::metadata::{EntityDescriptor, MetadataSet, RelationKind};
use crate::model::{short_name, Entity, EntityGraph, EntityMap, Palette};
use log::{debug, warn};
use relation::Declaration;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Run-scoped builder owning the entity registry and the color palette.
///
/// ```
/// use doctrine_erd::metadata::parse_str;
/// use doctrine_erd::model::Palette;
/// use doctrine_erd::resolve::GraphBuilder;
///
/// let metadata = parse_str("App\\User:\n  type: entity\n  table: users\n").unwrap();
/// let mut builder = GraphBuilder::new(Palette::default());
/// builder.add_metadata(metadata);
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    palette: Palette,
    entities: EntityMap,
    descriptors: BTreeMap<String, EntityDescriptor>,
}

impl GraphBuilder {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            entities: EntityMap::new(),
            descriptors: BTreeMap::new(),
        }
    }

    /// Construct the entity for one descriptor and register it.
    ///
    /// The entity takes the next palette color. A missing `table` falls
    /// back to the short class name.
    pub fn add_entity(&mut self, name: &str, descriptor: EntityDescriptor) {
        let table = match descriptor.table.as_deref() {
            Some(table) => table.to_string(),
            None => {
                warn!("no table found in {}, using '{}'", name, short_name(name));
                short_name(name).to_string()
            }
        };

        let entity = Entity::new(name, table, self.palette.next_color());
        if self.entities.insert(name.to_string(), entity).is_some() {
            warn!("entity '{}' registered twice, replacing it", name);
        }
        self.descriptors.insert(name.to_string(), descriptor);
    }

    /// Register every entity of a metadata set
    pub fn add_metadata(&mut self, metadata: MetadataSet) {
        for (name, descriptor) in metadata {
            self.add_entity(&name, descriptor);
        }
    }

    /// Resolve every relation and freeze the result.
    pub fn build(mut self) -> Result<EntityGraph, ResolveError> {
        resolve(&mut self.entities, &self.descriptors, &mut self.palette)?;
        Ok(EntityGraph::from_resolved(self.entities))
    }
}

/// Resolve relations in place.
///
/// `entities` must already hold one entity per descriptor. Join entities
/// take their colors from `palette` as they enter the registry.
pub fn resolve(
    entities: &mut EntityMap,
    descriptors: &BTreeMap<String, EntityDescriptor>,
    palette: &mut Palette,
) -> Result<(), ResolveError> {
    populate_fields(entities, descriptors, palette)?;
    assign_ids(entities);
    Ok(())
}

/// Pass 1: columns, relations, join entities.
pub fn populate_fields(
    entities: &mut EntityMap,
    descriptors: &BTreeMap<String, EntityDescriptor>,
    palette: &mut Palette,
) -> Result<(), ResolveError> {
    for (name, descriptor) in descriptors {
        if let Some(entity) = entities.get_mut(name) {
            populate_columns(entity, descriptor);
        }
    }
    debug!("populated columns of {} entities", descriptors.len());

    let mut staged = Vec::new();
    for (name, descriptor) in descriptors {
        for kind in RelationKind::ALL {
            for (field, relation) in descriptor.relations(kind) {
                let decl = Declaration {
                    owner: name,
                    field,
                    kind,
                    relation,
                };
                match kind {
                    RelationKind::OneToOne => relation::one_to_one(entities, &decl)?,
                    RelationKind::OneToMany => relation::one_to_many(entities, &decl)?,
                    RelationKind::ManyToOne => relation::many_to_one(entities, &decl)?,
                    RelationKind::ManyToMany => {
                        if let Some(intersect) = relation::many_to_many(entities, &decl)? {
                            staged.push(intersect);
                        }
                    }
                }
            }
        }
    }

    merge_staged(entities, descriptors, palette, staged)
}

/// Plain `id` and `fields` columns of one entity
fn populate_columns(entity: &mut Entity, descriptor: &EntityDescriptor) {
    for (block, columns) in [("id", &descriptor.id), ("fields", &descriptor.fields)] {
        let Some(columns) = columns else {
            warn!("no {} found in {}", block, entity.name());
            continue;
        };
        for (column, spec) in columns {
            let type_name = spec.as_ref().and_then(|s| s.type_name.as_deref());
            entity.declare_column(column, type_name);
        }
    }
}

/// Move staged intersection entities into the registry.
///
/// A join table may share neither the name nor the table of a declared
/// entity: both would end up as the same diagram node.
fn merge_staged(
    entities: &mut EntityMap,
    descriptors: &BTreeMap<String, EntityDescriptor>,
    palette: &mut Palette,
    staged: Vec<Entity>,
) -> Result<(), ResolveError> {
    let declared_tables: BTreeSet<String> = entities
        .values()
        .filter(|entity| descriptors.contains_key(entity.name()))
        .map(|entity| entity.table_name().to_string())
        .collect();

    for mut intersect in staged {
        let table = intersect.name().to_string();
        if descriptors.contains_key(&table) || declared_tables.contains(&table) {
            return Err(ResolveError::JoinTableCollision { table });
        }

        match entities.entry(table) {
            Entry::Vacant(slot) => {
                intersect.set_color(palette.next_color());
                slot.insert(intersect);
            }
            Entry::Occupied(slot) => {
                warn!(
                    "join table '{}' is declared by more than one relation, keeping the first",
                    slot.key()
                );
            }
        }
    }
    Ok(())
}

/// Pass 2: number every entity's fields 1..N in key order.
pub fn assign_ids(entities: &mut EntityMap) {
    for entity in entities.values_mut() {
        entity.assign_ids();
    }
    debug!("assigned field ids for {} entities", entities.len());
}
