//! Output format implementations for entity diagrams.

mod dot;
mod json;

pub use dot::to_dot;
pub use json::{build_diagram_json, diagram_schema, to_json};
pub use json::{DiagramJson, DiagramStats, EdgeJson, EntityJson, FieldJson};

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Output format for diagram export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// SVG image rendered by Graphviz
    #[default]
    Svg,
    /// PNG image rendered by Graphviz
    Png,
    /// PDF document rendered by Graphviz
    Pdf,
    /// Graphviz DOT source
    Dot,
    /// JSON model for programmatic use
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            "dot" | "gv" | "graphviz" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Valid options: svg, png, pdf, dot, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "pdf" => Some(OutputFormat::Pdf),
            "dot" | "gv" => Some(OutputFormat::Dot),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Whether the DOT source has to go through the `dot` executable
    pub fn needs_graphviz(&self) -> bool {
        matches!(
            self,
            OutputFormat::Svg | OutputFormat::Png | OutputFormat::Pdf
        )
    }
}

/// Layout direction for diagram
///
/// Config files accept the same spellings as `--layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Layout {
    /// Left to right
    LR,
    /// Top to bottom
    TB,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-right" | "horizontal" => Ok(Layout::LR),
            "tb" | "td" | "top-bottom" | "top-down" | "vertical" => Ok(Layout::TB),
            _ => Err(format!("Unknown layout: {}. Valid options: lr, tb", s)),
        }
    }
}

impl TryFrom<String> for Layout {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::LR => write!(f, "lr"),
            Layout::TB => write!(f, "tb"),
        }
    }
}

impl Layout {
    /// Value of the graphviz `rankdir` attribute
    pub fn rankdir(&self) -> &'static str {
        match self {
            Layout::LR => "LR",
            Layout::TB => "TB",
        }
    }
}
