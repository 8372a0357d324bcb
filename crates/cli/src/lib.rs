//! Askr CLI Library
//!
//! This crate provides the command-line interface for askr: it loads question
//! definitions from YAML, takes pre-supplied answers from the command line,
//! prompts for the rest and prints the resolved answers.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`arguments`]: Typing `key=value` answers and rendering the output
//!
//! # Examples
//!
//! ```bash
//! # Prompt for every question in ~/.askr/questions.yml
//! askr
//!
//! # Pre-answer some questions and print JSON
//! askr -q scaffold.yml -a project=demo -a features=cli,tests -o json
//!
//! # Never prompt, fail if a required answer is missing
//! askr --no-tty -a project=demo
//! ```

pub mod arguments;
pub mod cli_args;
