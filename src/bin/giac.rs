// src/bin/giac.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;
use giac::{
    cli::{self, BuiltinRequest, Cli, handlers},
    models::Language,
    t,
};

// --- Command Definition and Registry ---

/// Defines a command, its aliases, and its handler function.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "build",
        aliases: &["prompt"],
        handler: handlers::build::handle,
    },
    CommandDefinition {
        name: "spec",
        aliases: &["show"],
        handler: handlers::spec::handle,
    },
];

/// The command run when the first argument is a flag, or when there is no argument at all.
const DEFAULT_COMMAND: &str = "build";

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `giac` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let lang = cli::current_language(&cli.args);

    if let Err(e) = run_cli(cli, lang) {
        eprintln!("\n{}: {:#}", t!("error.label", lang).red().bold(), e);
        std::process::exit(1);
    }
}

/// Answers help and version requests, otherwise splits the arguments into a command and its
/// own arguments, then runs it.
fn run_cli(cli: Cli, lang: Language) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    match cli::builtin_request(&cli.args, || handlers::commons::claimed_flag_keys(&cli.args)) {
        Some(BuiltinRequest::Help) => return handlers::commons::print_output(&cli::render_help()),
        Some(BuiltinRequest::Version) => return handlers::commons::print_output(&cli::render_version()),
        None => {}
    }

    let (name, args) = match cli.args.split_first() {
        Some((first, rest)) if !first.starts_with('-') => (first.as_str(), rest.to_vec()),
        _ => (DEFAULT_COMMAND, cli.args.clone()),
    };

    let Some(command) = find_command(name) else {
        return Err(anyhow!(
            "{}: {}\n\n{}\n{}\n{}",
            t!("error.unknown_command", lang),
            name,
            t!("help.usage", lang),
            t!("help.command_spec", lang),
            t!("help.command_build", lang)
        ));
    };

    (command.handler)(args)
}
