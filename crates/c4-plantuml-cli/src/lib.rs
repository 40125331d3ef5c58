//! CLI logic for the C4-PlantUML diagram tool.
//!
//! Reads a workspace description, renders its views and writes one
//! `<view key>.puml` file per view into the output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use c4_plantuml::{C4Error, DiagramWriter, RenderedView};

/// Run the C4-PlantUML CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `C4Error` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed workspace descriptions
/// - Unknown view keys
/// - Rendering errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, C4Error> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Processing workspace"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args)?;
    app_config.validate()?;

    let source = fs::read_to_string(&args.input)?;

    let writer = DiagramWriter::new(app_config);
    let workspace = writer.parse(&source)?;

    // Render everything before writing anything.
    let rendered = match &args.view {
        Some(key) => vec![RenderedView::new(key, writer.render_view(&workspace, key)?)],
        None => writer.render_workspace(&workspace)?,
    };

    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(rendered.len());
    for view in &rendered {
        let path = output_dir.join(format!("{}.puml", file_stem(view.key())));
        fs::write(&path, view.source())?;
        debug!(view_key = view.key(), path = path.display().to_string(); "View written");
        written.push(path);
    }

    info!(views = written.len(); "Diagrams exported successfully");

    Ok(written)
}

/// File name for a view key; path separators and other characters file
/// systems reject are replaced with `_`.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.trim().is_empty() || stem == "." || stem == ".." {
        "view".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("SystemContext"), "SystemContext");
        assert_eq!(file_stem("deploy/live"), "deploy_live");
        assert_eq!(file_stem("a:b*c"), "a_b_c");
        assert_eq!(file_stem(".."), "view");
        assert_eq!(file_stem(""), "view");
    }
}
