//! Argument processing and output for the askr CLI.
//!
//! This module turns `-a key=value` flags into pre-supplied answers, typed
//! according to the question they answer, and renders the final answers.

// Export public items from submodules
pub mod output;
pub mod processing;

// Re-exports for convenience
pub use output::{render_answers, OutputFormat};
pub use processing::process_named_arguments;
