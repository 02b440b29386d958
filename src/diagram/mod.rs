//! Diagram generation from a resolved entity graph.
//!
//! [`view`] turns the graph into node labels and edges; [`format`] renders
//! them as Graphviz DOT or JSON.

pub mod format;
pub mod view;

pub use format::{diagram_schema, to_dot, to_json, Layout, OutputFormat};
pub use view::{DiagramView, EdgeSpec, LabelRow, NodeLabel};
