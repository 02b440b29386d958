//! Schema command: print the JSON schema of the JSON export.

use anyhow::Result;
use doctrine_erd::diagram::diagram_schema;
use std::fs;
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let schema = serde_json::to_string_pretty(&diagram_schema())?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{schema}\n"))?;
            eprintln!("Schema written to: {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}
