//! # uniform-rs-cli
//!
//! The `uniform-rs` management utility.
//!
//! - **check** - Reports unusable option values and drift between a
//!   localization file and the English message table
//! - **validate** - Runs the built-in validators against a standalone value
//! - **message** - Renders a message template with arguments
//!
//! ## Quick Start
//!
//! ```rust
//! use uniform_rs_cli::command::CommandRegistry;
//! use uniform_rs_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! assert_eq!(registry.list_commands(), vec!["check", "message", "validate"]);
//! ```

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};

use std::io::Write;
use std::path::Path;

use uniform_rs_core::{settings_loader, Settings, UniformError};

/// Loads the settings the CLI runs with: the given file (TOML or JSON) with
/// environment overrides applied, or the environment alone.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, UniformError> {
    match path {
        Some(path) => {
            let mut settings = settings_loader::from_file(path)?;
            settings_loader::apply_env_overrides(&mut settings);
            Ok(settings)
        }
        None => Ok(settings_loader::from_env()),
    }
}

/// Parses `args`, loads settings and runs the selected command.
///
/// Argument errors (including `--help`) are returned as clap errors so the
/// caller can print them with clap's formatting and exit code.
pub fn run<I, T>(args: I, out: &mut dyn Write) -> Result<Result<(), UniformError>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);

    let matches = registry.build_cli().try_get_matches_from(args)?;
    let settings_path = matches.get_one::<String>("settings").map(Path::new);

    Ok(load_settings(settings_path).and_then(|settings| {
        uniform_rs_core::logging::setup_logging(&settings);
        registry.execute(&matches, &settings, out)
    }))
}
