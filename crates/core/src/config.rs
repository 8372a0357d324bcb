//! Configuration for the prompt engine.
//!
//! This module provides the default locations and limits used by askr, plus the
//! two configuration records callers hand to the engine: [`PrompterConfig`]
//! (fixed for the lifetime of a [`crate::prompts::Prompter`]) and
//! [`PromptOptions`] (per `prompt` call).

use crate::usage::ManPageInfo;

/// Default path for the question definition file
const DEFAULT_QUESTIONS_PATH: &str = "~/.askr/questions.yml";

/// Default number of options visible at once in list, checkbox and autocomplete prompts
pub const DEFAULT_MAX_DISPLAY_LINES: usize = 10;

/// Engine-wide settings.
///
/// Whether a terminal is attached is an explicit input here: the engine never
/// probes for a TTY itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrompterConfig {
    /// No terminal is attached; answers come only from arguments and defaults.
    pub no_tty: bool,
    /// Accept a question's default without prompting whenever it has one.
    pub use_defaults: bool,
    /// Upper bound on the visible window when a question sets no `max_display_lines`.
    pub global_max_lines: usize,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            no_tty: false,
            use_defaults: false,
            global_max_lines: DEFAULT_MAX_DISPLAY_LINES,
        }
    }
}

impl PrompterConfig {
    #[must_use]
    pub fn non_interactive() -> Self {
        Self {
            no_tty: true,
            ..Self::default()
        }
    }
}

/// Options for a single `prompt` call.
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// Shown before prompting when a terminal is present and a required answer is missing.
    /// Also carried by the missing-argument error in non-interactive mode.
    pub usage_text: Option<String>,
    /// Used to render a reference page when non-interactive mode is missing required answers
    /// and no `usage_text` was given.
    pub man_page: Option<ManPageInfo>,
    /// Write the resolved answers back into the caller's argument object.
    pub mutate_args: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            usage_text: None,
            man_page: None,
            mutate_args: true,
        }
    }
}

/// Resolves the question definition file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// question path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use askr_core::config::get_questions_path;
///
/// let custom_path = get_questions_path(&Some("/path/to/questions.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/questions.yml");
/// ```
pub fn get_questions_path(questions_path_arg: &Option<String>) -> String {
    let questions_path = match questions_path_arg {
        Some(questions_path) => questions_path.as_str(),
        None => DEFAULT_QUESTIONS_PATH,
    };

    shellexpand::tilde(questions_path).to_string()
}
