//! Render command implementation.

use super::glob_util::expand_patterns;
use anyhow::{bail, Result};
use doctrine_erd::config::DiagramConfig;
use doctrine_erd::diagram::{to_dot, to_json, DiagramView, Layout, OutputFormat};
use doctrine_erd::load_entities;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Output path meaning "write to stdout"
const STDOUT: &str = "-";

pub struct RenderArgs {
    pub input: Vec<String>,
    pub output: PathBuf,
    pub title: Option<String>,
    pub format: Option<String>,
    pub layout: Option<String>,
    pub config: Option<PathBuf>,
}

/// Run the render command
pub fn run(args: RenderArgs) -> Result<()> {
    let to_stdout = args.output.as_os_str() == STDOUT;
    let format = resolve_format(args.format.as_deref(), &args.output, to_stdout)?;

    let mut config = DiagramConfig::discover(args.config.as_deref())?;
    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(layout) = args.layout {
        let layout: Layout = layout.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
        config.layout = Some(layout);
    }

    let files = expand_patterns(&args.input)?;
    if format != OutputFormat::Json {
        eprintln!("Loading {} mapping file(s)", files.len());
    }
    debug!("input files: {:?}", files);

    let graph = load_entities(&files, config.palette())?;
    if graph.is_empty() {
        eprintln!("No entities found in the mapping files.");
        return Ok(());
    }

    let view = DiagramView::from_graph(&graph)?;
    let content = match format {
        OutputFormat::Json => to_json(&graph, &view, &config.title)?,
        _ => to_dot(&view, &config),
    };

    let destination = (!to_stdout).then_some(args.output.as_path());
    if format.needs_graphviz() {
        render_with_graphviz(&content, format, destination)?;
    } else {
        write_output(&content, destination)?;
    }

    if format != OutputFormat::Json {
        eprintln!(
            "\nERD: {} entities, {} fields, {} relationships",
            view.node_count(),
            view.field_count(),
            view.edge_count()
        );
    }

    Ok(())
}

/// Explicit `--format` wins, then the output extension.
///
/// Stdout defaults to DOT; an unknown extension defaults to SVG.
fn resolve_format(explicit: Option<&str>, output: &Path, to_stdout: bool) -> Result<OutputFormat> {
    if let Some(format) = explicit {
        return format.parse().map_err(|e| anyhow::anyhow!("{}", e));
    }
    if to_stdout {
        return Ok(OutputFormat::Dot);
    }
    Ok(output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or_default())
}

fn write_output(content: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                file.write_all(b"\n")?;
            }
            eprintln!("Diagram written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Render DOT to SVG/PNG/PDF using Graphviz
fn render_with_graphviz(dot_source: &str, format: OutputFormat, destination: Option<&Path>) -> Result<()> {
    let format_arg = format!("-T{}", format.extension());

    let mut command = Command::new("dot");
    command.arg(&format_arg).stdin(Stdio::piped());
    if let Some(path) = destination {
        command.arg("-o").arg(path);
    }

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            anyhow::anyhow!(
                "Graphviz 'dot' command not found. Install Graphviz or use --format dot instead."
            )
        } else {
            anyhow::anyhow!("Failed to run dot: {}", e)
        }
    })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot_source.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("Graphviz dot command failed with status: {}", status);
    }

    if let Some(path) = destination {
        eprintln!("Rendered to: {}", path.display());
    }
    Ok(())
}
