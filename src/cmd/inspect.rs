//! Inspect command: dump the resolved entity model as JSON.

use super::glob_util::expand_patterns;
use anyhow::Result;
use doctrine_erd::config::DiagramConfig;
use doctrine_erd::diagram::{to_json, DiagramView};
use doctrine_erd::load_entities;
use log::info;
use std::path::PathBuf;

pub fn run(input: Vec<String>, config: Option<PathBuf>) -> Result<()> {
    let config = DiagramConfig::discover(config.as_deref())?;
    let files = expand_patterns(&input)?;

    let graph = load_entities(&files, config.palette())?;
    let view = DiagramView::from_graph(&graph)?;
    info!(
        "resolved {} entities from {} files",
        graph.len(),
        files.len()
    );

    println!("{}", to_json(&graph, &view, &config.title)?);
    Ok(())
}
