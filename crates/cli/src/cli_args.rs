//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate, and turns the parsed flags into the engine configuration.

use askr_core::config::{PrompterConfig, DEFAULT_MAX_DISPLAY_LINES};
use clap::Parser;

use crate::arguments::OutputFormat;

/// Command-line arguments for the askr CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use askr_cli::cli_args::Args;
///
/// let args = Args::parse_from(["askr", "-q", "questions.yml", "-a", "name=Ada"]);
/// assert_eq!(args.arguments, vec!["name=Ada".to_string()]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Print version
    #[arg(long, short = 'v', action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Path to the question definition YAML.
    ///
    /// If not provided, defaults to `~/.askr/questions.yml`.
    #[arg(long, short = 'q')]
    pub questions_path: Option<String>,

    /// Pre-supplied answers in the format key=value.
    ///
    /// Questions answered here are never prompted for. Multiple answers can be
    /// provided with repeated `-a` flags; checkbox answers are comma separated.
    ///
    /// # Examples
    /// ```bash
    /// askr -a project=demo -a features=cli,tests
    /// ```
    #[arg(long = "arg", short = 'a', action = clap::ArgAction::Append)]
    pub arguments: Vec<String>,

    /// Never prompt: answer from arguments and defaults only.
    ///
    /// Also implied when stdin is not a terminal.
    #[arg(long, action)]
    pub no_tty: bool,

    /// Accept every default without prompting for it.
    #[arg(long, short = 'y', action)]
    pub use_defaults: bool,

    /// Maximum number of options visible at once in select prompts.
    #[arg(long, short = 'm')]
    pub max_lines: Option<usize>,

    /// Format the resolved answers are printed in.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl Args {
    /// Engine configuration for these flags. `stdin_is_terminal` is the caller's
    /// probe of the input stream.
    #[must_use]
    pub fn prompter_config(&self, stdin_is_terminal: bool) -> PrompterConfig {
        PrompterConfig {
            no_tty: self.no_tty || !stdin_is_terminal,
            use_defaults: self.use_defaults,
            global_max_lines: self.max_lines.unwrap_or(DEFAULT_MAX_DISPLAY_LINES).max(1),
        }
    }
}
