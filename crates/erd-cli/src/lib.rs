//! ERD CLI library
//!
//! This module contains the core CLI logic for the ERD renderer: it loads a
//! datamodel, lays it out and writes the SVG.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod input;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;
pub use input::parse_datamodel;

use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use erd::DiagramBuilder;

/// Environment variable that turns the whole run into a no-op.
pub const DISABLE_ENV: &str = "DISABLE_ERD";

/// Environment variable that enables debug dumps without `--debug-dir`.
pub const DEBUG_ENV: &str = "ERD_DEBUG";

/// Directory used for debug dumps when only [`DEBUG_ENV`] is set.
const DEFAULT_DEBUG_DIR: &str = "erd-debug";

/// Run the ERD CLI application
///
/// This function reads the datamodel, renders it through the ERD pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed datamodel input
/// - Layering and layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    if is_disabled(env::var(DISABLE_ENV).ok().as_deref()) {
        info!(env = DISABLE_ENV; "Rendering disabled by environment");
        return Ok(());
    }

    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing datamodel"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let models = input::parse_datamodel(&source)?;

    let debug_dir = debug_dir(args, is_debug_requested(env::var_os(DEBUG_ENV).as_deref()));
    if let Some(dir) = &debug_dir {
        fs::create_dir_all(dir)?;
        let dump = serde_json::to_string_pretty(&models).map_err(std::io::Error::other)?;
        write_dump(dir, "1-datamodel.json", &dump)?;
    }

    let builder = DiagramBuilder::new(app_config);
    let svg = builder.render_svg(&models)?;

    if let Some(dir) = &debug_dir {
        write_dump(dir, "3-svg.svg", &svg)?;
    }

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Whether the value of [`DISABLE_ENV`] asks to skip rendering.
///
/// Only the exact value `true` does.
fn is_disabled(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Whether the value of [`DEBUG_ENV`] asks for debug dumps: any non-empty
/// value does.
fn is_debug_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

/// Where debug dumps go, if anywhere.
///
/// An explicit `--debug-dir` wins; otherwise [`DEBUG_ENV`] selects a
/// directory next to the output file.
fn debug_dir(args: &Args, debug_env: bool) -> Option<PathBuf> {
    if let Some(dir) = &args.debug_dir {
        return Some(PathBuf::from(dir));
    }

    debug_env.then(|| {
        Path::new(&args.output)
            .parent()
            .unwrap_or(Path::new(""))
            .join(DEFAULT_DEBUG_DIR)
    })
}

fn write_dump(dir: &Path, name: &str, contents: &str) -> Result<(), CliError> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    debug!(path = path.display().to_string(); "Debug dump written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: &str, debug_dir: Option<&str>) -> Args {
        Args {
            input: "schema.json".to_string(),
            output: output.to_string(),
            config: None,
            log_level: "off".to_string(),
            debug_dir: debug_dir.map(str::to_string),
        }
    }

    #[test]
    fn test_is_disabled() {
        assert!(is_disabled(Some("true")));
        assert!(!is_disabled(Some("TRUE")));
        assert!(!is_disabled(Some(" true")));
        assert!(!is_disabled(Some("false")));
        assert!(!is_disabled(Some("1")));
        assert!(!is_disabled(None));
    }

    #[test]
    fn test_is_debug_requested() {
        assert!(is_debug_requested(Some(OsStr::new("1"))));
        assert!(is_debug_requested(Some(OsStr::new("false"))));
        assert!(!is_debug_requested(Some(OsStr::new(""))));
        assert!(!is_debug_requested(None));
    }

    #[test]
    fn test_explicit_debug_dir_wins() {
        let args = args("out/ERD.svg", Some("dumps"));
        assert_eq!(debug_dir(&args, true), Some(PathBuf::from("dumps")));
        assert_eq!(debug_dir(&args, false), Some(PathBuf::from("dumps")));
    }

    #[test]
    fn test_debug_env_uses_output_directory() {
        assert_eq!(
            debug_dir(&args("out/ERD.svg", None), true),
            Some(PathBuf::from("out/erd-debug"))
        );
        assert_eq!(
            debug_dir(&args("ERD.svg", None), true),
            Some(PathBuf::from("erd-debug"))
        );
    }

    #[test]
    fn test_no_debug_dir_by_default() {
        assert_eq!(debug_dir(&args("ERD.svg", None), false), None);
    }
}
