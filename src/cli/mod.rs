use crate::{
    core::{
        arg_parser::ParsedFlags,
        input_merger::{self, ProcessEnv},
    },
    models::Language,
};
use clap::Parser;
use std::collections::HashSet;

/// One handler per command.
pub mod handlers;

/// The output language for messages printed before (or without) a specification: the same
/// `GIAC_LANG` / `--lang` / `--fr` / `--en` rules as the prompt itself.
pub fn current_language(args: &[String]) -> Language {
    input_merger::resolve_language(&ParsedFlags::parse(args), &ProcessEnv)
}

/// A request answered by the CLI itself rather than by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinRequest {
    /// `-h` / `--help`.
    Help,
    /// `-V` / `--version`.
    Version,
}

const HELP_KEYS: &[&str] = &["h", "help"];
const VERSION_KEYS: &[&str] = &["V", "version"];

/// Finds a help or version flag in `args` that no axis claims as its own key.
///
/// Axis initials are flag keys too (`-h 3` may set an axis with initial `H`), so `claimed`
/// lists the keys the specification uses. It is only called when a help or version flag is
/// actually present.
pub fn builtin_request(args: &[String], claimed: impl FnOnce() -> HashSet<String>) -> Option<BuiltinRequest> {
    let requested: Vec<(&str, BuiltinRequest)> = args
        .iter()
        .filter_map(|token| {
            let body = token.strip_prefix("--").or_else(|| token.strip_prefix('-'))?;
            let key = body.split_once('=').map_or(body, |(key, _)| key);
            if HELP_KEYS.contains(&key) {
                Some((key, BuiltinRequest::Help))
            } else if VERSION_KEYS.contains(&key) {
                Some((key, BuiltinRequest::Version))
            } else {
                None
            }
        })
        .collect();
    if requested.is_empty() {
        return None;
    }

    let claimed = claimed();
    let unclaimed: Vec<BuiltinRequest> = requested
        .into_iter()
        .filter(|(key, _)| !claimed.contains(*key))
        .map(|(_, request)| request)
        .collect();
    if unclaimed.contains(&BuiltinRequest::Help) {
        Some(BuiltinRequest::Help)
    } else {
        unclaimed.first().copied()
    }
}

/// The rendered help page.
pub fn render_help() -> String {
    use clap::CommandFactory;
    Cli::command().render_help().to_string()
}

/// `giac <version>`.
pub fn render_version() -> String {
    use clap::CommandFactory;
    Cli::command().render_version().trim_end().to_string()
}

/// Semantic tags of the help template and the ANSI style each one stands for.
const HELP_TAGS: &[(&str, &str)] = &[
    ("title", "\x1b[1;33m"), // Bold Yellow
    ("hl", "\x1b[1;36m"),    // Bold Cyan
    ("cmd", "\x1b[36m"),     // Cyan
    ("group", "\x1b[1;32m"), // Bold Green
    ("dim", "\x1b[2m"),
];

const RESET: &str = "\x1b[0m";

/// Replaces `<tag>` / `</tag>` pairs with their ANSI codes, or strips them when `use_colors`
/// is off.
fn render_help_tags(template: &str, use_colors: bool) -> String {
    HELP_TAGS.iter().fold(template.to_string(), |text, (tag, style)| {
        let (open, close) = if use_colors { (*style, RESET) } else { ("", "") };
        text.replace(&format!("<{}>", tag), open)
            .replace(&format!("</{}>", tag), close)
    })
}

/// Builds the localized, color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let template = t!("cli.help.template", current_language(&args));

    Box::leak(render_help_tags(template, use_colors).into_boxed_str())
}

/// giac: builds a behavioral instruction prompt from a bilingual axis specification.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    // Use `help_template` to take full control of the output.
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
// We disable clap's default help subcommand (`help`) as we provide a complete template.
// `-h` and `-V` may be axis initials, so `builtin_request` handles help and version instead.
#[command(disable_help_subcommand = true, disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// The command (optional) followed by its flags, e.g. `build --telisme=5 -c 3 --en`.
    /// Flags are not known ahead of time: they depend on the axes of the loaded specification.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
