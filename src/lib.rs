//! Entity relationship diagrams from Doctrine YAML mapping metadata.
//!
//! The pipeline is: load descriptors ([`metadata`]), resolve them into an
//! [`EntityGraph`] ([`resolve`]), then render ([`diagram`]).
//!
//! ```
//! use doctrine_erd::diagram::DiagramView;
//! use doctrine_erd::metadata::parse_str;
//! use doctrine_erd::model::Palette;
//!
//! let yaml = r#"
//! App\Post:
//!   type: entity
//!   table: posts
//!   id: {id: {type: integer}}
//!   manyToOne:
//!     author:
//!       targetEntity: App\User
//!       inversedBy: posts
//!       joinColumns: {author_id: {referencedColumnName: id}}
//! App\User:
//!   type: entity
//!   table: users
//!   id: {id: {type: integer}}
//! "#;
//!
//! let graph = doctrine_erd::resolve_metadata(parse_str(yaml).unwrap(), Palette::default()).unwrap();
//! let view = DiagramView::from_graph(&graph).unwrap();
//! assert_eq!(view.edge_count(), 1);
//! ```

pub mod config;
pub mod diagram;
pub mod error;
pub mod metadata;
pub mod model;
pub mod resolve;

pub use error::Error;
pub use model::EntityGraph;

use metadata::MetadataSet;
use model::Palette;
use resolve::GraphBuilder;
use std::path::PathBuf;

/// Resolve an already loaded metadata set
pub fn resolve_metadata(metadata: MetadataSet, palette: Palette) -> Result<EntityGraph, Error> {
    let mut builder = GraphBuilder::new(palette);
    builder.add_metadata(metadata);
    Ok(builder.build()?)
}

/// Load every mapping file and resolve the entities they declare
pub fn load_entities(files: &[PathBuf], palette: Palette) -> Result<EntityGraph, Error> {
    let metadata = metadata::load_files(files)?;
    resolve_metadata(metadata, palette)
}
