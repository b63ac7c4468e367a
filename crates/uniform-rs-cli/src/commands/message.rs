//! The `message` management command.

use std::io::Write;

use uniform_rs_core::{MessageArg, MessageTable, Settings, UniformError};

use crate::command::ManagementCommand;

/// Renders a message template from the active table.
pub struct MessageCommand;

/// Formats `key` with `args` using the table `settings` select.
pub fn render_message(
    settings: &Settings,
    key: &str,
    args: &[String],
) -> Result<String, UniformError> {
    let table = MessageTable::from_settings(settings)?;
    let args: Vec<MessageArg> = args.iter().map(MessageArg::from).collect();
    table.format(key, &args)
}

impl ManagementCommand for MessageCommand {
    fn name(&self) -> &'static str {
        "message"
    }

    fn help(&self) -> &'static str {
        "Render a message template"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("key")
                .required(true)
                .help("Template key, e.g. minlength"),
        )
        .arg(
            clap::Arg::new("args")
                .num_args(0..)
                .allow_hyphen_values(true)
                .help("Positional arguments for %s and %d"),
        )
        .arg(
            clap::Arg::new("list")
                .long("list")
                .action(clap::ArgAction::SetTrue)
                .help("Print the template instead of rendering it"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), UniformError> {
        let key = matches.get_one::<String>("key").map_or("", String::as_str);

        if matches.get_flag("list") {
            let table = MessageTable::from_settings(settings)?;
            let template = table
                .get(key)
                .ok_or_else(|| UniformError::UnknownMessageKey(key.to_string()))?;
            writeln!(out, "{template}")?;
            return Ok(());
        }

        let args: Vec<String> = matches
            .get_many::<String>("args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        writeln!(out, "{}", render_message(settings, key, &args)?)?;
        Ok(())
    }
}
