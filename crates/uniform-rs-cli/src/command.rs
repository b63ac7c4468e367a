//! Management command framework for uniform-rs.
//!
//! [`ManagementCommand`] defines one subcommand of the `uniform-rs` binary
//! and [`CommandRegistry`] collects them, builds the clap interface and
//! dispatches parsed arguments.
//!
//! ## Defining a Custom Command
//!
//! ```rust
//! use uniform_rs_cli::command::{CommandRegistry, ManagementCommand};
//! use uniform_rs_core::{Settings, UniformError};
//!
//! struct LanguageCommand;
//!
//! impl ManagementCommand for LanguageCommand {
//!     fn name(&self) -> &str { "language" }
//!     fn help(&self) -> &str { "Print the active language code" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &Settings,
//!         out: &mut dyn std::io::Write,
//!     ) -> Result<(), UniformError> {
//!         writeln!(out, "{}", settings.language_code)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(Box::new(LanguageCommand));
//! assert_eq!(registry.list_commands(), vec!["language"]);
//! ```

use std::collections::HashMap;
use std::io::Write;

use uniform_rs_core::{Settings, UniformError};

/// A command that can be registered and invoked through the CLI.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &str;

    /// Returns a short help description for this command.
    fn help(&self) -> &str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command, writing its report to `out`.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), UniformError>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command of the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with one subcommand per
    /// registered command, plus the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("uniform-rs")
            .about("uniform-rs management utility")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .help("TOML or JSON settings file"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap wants `&'static str` names; commands are registered once at
            // startup, so leaking them is bounded.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches the subcommand selected in `matches`.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), UniformError> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            UniformError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            UniformError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "running management command");
        cmd.handle(sub_matches, settings, out)
    }
}
