//! Per-kind relation resolution.
//!
//! Each function adds the local field for one declared association and,
//! depending on the `mappedBy`/`inversedBy` markers, the back-reference on
//! the target entity. Back-references are only inserted when absent.

use crate::error::ResolveError;
use crate::metadata::{JoinColumnRef, RelationDescriptor, RelationKind};
use crate::model::{short_name, Entity, EntityMap, Field, FieldKey};
use log::{debug, trace};

/// Identifies the association being resolved
pub(super) struct Declaration<'a> {
    pub owner: &'a str,
    pub field: &'a str,
    pub kind: RelationKind,
    pub relation: &'a RelationDescriptor,
}

impl Declaration<'_> {
    fn target(&self) -> &str {
        &self.relation.target_entity
    }

    fn unknown_target(&self) -> ResolveError {
        ResolveError::UnknownEntity {
            entity: self.owner.to_string(),
            field: self.field.to_string(),
            kind: self.kind,
            target: self.target().to_string(),
        }
    }

    /// Make sure the target exists before touching either side
    fn check_target(&self, entities: &EntityMap) -> Result<(), ResolveError> {
        if entities.contains_key(self.target()) {
            Ok(())
        } else {
            Err(self.unknown_target())
        }
    }

    /// Local relation field, typed by the target's short name
    fn link_local(&self, entities: &mut EntityMap, referenced_column: Option<&str>) {
        let mut field = Field::relation(short_name(self.target()), self.target());
        if let Some(column) = referenced_column {
            field = field.with_referenced_column(column);
        }
        if let Some(owner) = entities.get_mut(self.owner) {
            owner.merge_relation(self.field, field);
        }
    }

    /// Back-reference on the target, typed by the owner's short name.
    ///
    /// Returns the target entity so callers can decorate the field.
    fn link_back<'m>(&self, entities: &'m mut EntityMap, back_field: &str) -> Option<&'m mut Entity> {
        let target = entities.get_mut(self.target())?;
        let inserted = target.insert_if_absent(
            FieldKey::relation(back_field),
            Field::relation(short_name(self.owner), self.owner),
        );
        if !inserted {
            trace!(
                "{}: back-reference '{}' already present, keeping the first one",
                self.target(),
                back_field
            );
        }
        Some(target)
    }
}

pub(super) fn one_to_one(entities: &mut EntityMap, decl: &Declaration) -> Result<(), ResolveError> {
    decl.check_target(entities)?;
    decl.link_local(entities, None);

    let relation = decl.relation;
    if let Some(mapped_by) = relation.mapped_by() {
        decl.link_back(entities, mapped_by);
        return Ok(());
    }

    if let Some(inversed_by) = relation.inversed_by() {
        let referenced_column = relation.referenced_column();
        if let Some(target) = decl.link_back(entities, inversed_by) {
            if let Some(column) = referenced_column {
                if let Some(field) = target.field_mut(&FieldKey::relation(inversed_by)) {
                    field.set_referenced_column(column);
                }
            }
        }
    }
    Ok(())
}

pub(super) fn one_to_many(entities: &mut EntityMap, decl: &Declaration) -> Result<(), ResolveError> {
    decl.check_target(entities)?;
    decl.link_local(entities, None);

    if let Some(mapped_by) = decl.relation.mapped_by() {
        decl.link_back(entities, mapped_by);
    }
    Ok(())
}

pub(super) fn many_to_one(entities: &mut EntityMap, decl: &Declaration) -> Result<(), ResolveError> {
    decl.check_target(entities)?;

    // The owning side of the foreign key carries the referenced column
    let inversed_by = decl.relation.inversed_by();
    let referenced_column = inversed_by.and(decl.relation.referenced_column());
    decl.link_local(entities, referenced_column);

    if let Some(inversed_by) = inversed_by {
        decl.link_back(entities, inversed_by);
    }
    Ok(())
}

/// Synthesize the intersection entity of a many-to-many association.
///
/// Returns `None` when the association has no join table name; such
/// declarations are placeholders and produce neither entity nor edge.
/// The entity is colored once it is merged into the registry.
pub(super) fn many_to_many(
    entities: &EntityMap,
    decl: &Declaration,
) -> Result<Option<Entity>, ResolveError> {
    let Some(join_table) = decl.relation.join_table.as_ref() else {
        debug!(
            "{}: manyToMany '{}' has no join table, skipping",
            decl.owner, decl.field
        );
        return Ok(None);
    };
    let Some(table) = join_table.name() else {
        debug!(
            "{}: manyToMany '{}' has an unnamed join table, skipping",
            decl.owner, decl.field
        );
        return Ok(None);
    };

    let target = entities
        .get(decl.target())
        .ok_or_else(|| decl.unknown_target())?;
    let Some(owner) = entities.get(decl.owner) else {
        return Ok(None);
    };

    let mut intersect = Entity::new(table, table, String::new());
    add_join_columns(&mut intersect, owner, &join_table.join_columns())?;
    add_join_columns(&mut intersect, target, &join_table.inverse_join_columns())?;

    debug!(
        "{}: manyToMany '{}' through join table '{}' ({} columns)",
        decl.owner,
        decl.field,
        table,
        intersect.field_count()
    );
    Ok(Some(intersect))
}

/// One column per join column, typed like the column it references
fn add_join_columns(
    intersect: &mut Entity,
    side: &Entity,
    columns: &[JoinColumnRef<'_>],
) -> Result<(), ResolveError> {
    for column in columns {
        let type_name =
            side.column_type(column.referenced_column)
                .ok_or_else(|| ResolveError::UnknownColumn {
                    table: intersect.name().to_string(),
                    entity: side.name().to_string(),
                    column: column.referenced_column.to_string(),
                })?;

        intersect.insert_column(
            column.name,
            Field::relation(type_name, side.name()).with_referenced_column(column.referenced_column),
        );
    }
    Ok(())
}
