//! Askr Core Library
//!
//! This crate provides the prompt engine behind askr: it takes the answers a
//! caller already has plus a list of questions, and fills in the rest from
//! the terminal, in dependency order, with validation and retries.
//!
//! # Key Features
//!
//! - **Question Types**: confirm, text, number, list, checkbox and autocomplete
//! - **Overrides**: pre-supplied answers are matched against the options and never prompted for
//! - **Dependency Ordering**: questions are asked after the questions they depend on
//! - **Validation**: required, pattern and custom validators, retried interactively
//! - **Non-Interactive Mode**: defaults only, failing fast on missing or invalid answers
//! - **Fuzzy Filtering**: checkbox and autocomplete narrow their options as you type
//!
//! # Examples
//!
//! Answering from defaults without a terminal:
//!
//! ```
//! use askr_core::config::PrompterConfig;
//! use askr_core::prompts::Prompter;
//! use askr_core::question::{Answers, Question};
//! use askr_core::terminal::ScriptedBackend;
//!
//! let questions = vec![
//!     Question::text("project").with_default("demo"),
//!     Question::list("license", ["MIT", "Apache-2.0"]).with_default("MIT"),
//! ];
//!
//! let mut prompter = Prompter::new(ScriptedBackend::new(), PrompterConfig::non_interactive());
//! let answers = prompter.prompt(&mut Answers::new(), &questions)?;
//! assert_eq!(answers["license"], "MIT");
//! # Ok::<(), askr_core::error::Error>(())
//! ```

pub mod config;
pub mod dependencies;
pub mod error;
pub mod file_handling;
pub mod keys;
pub mod options;
pub mod overrides;
pub mod prompts;
pub mod question;
pub mod terminal;
pub mod usage;
pub mod validation;
