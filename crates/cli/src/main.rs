use std::io::{stdin, IsTerminal};
use std::process::ExitCode;

use askr_cli::arguments::{process_named_arguments, render_answers};
use askr_cli::cli_args::Args;
use askr_core::config::PromptOptions;
use askr_core::error::{Error, Result};
use askr_core::prompts::Prompter;
use askr_core::terminal::CrosstermBackend;
use askr_core::usage::ManPageInfo;
use askr_core::{config, file_handling};
use clap::Parser;
use log::{debug, info};

/// Exit status for a prompt cancelled with Ctrl-C
const INTERRUPTED_EXIT_CODE: u8 = 130;

fn man_page() -> ManPageInfo {
    ManPageInfo {
        command_name: env!("CARGO_BIN_NAME").to_string(),
        description: Some("Fill in answers from arguments, defaults and prompts".to_string()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        author: None,
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let questions_path = config::get_questions_path(&args.questions_path);
    debug!("Questions path: `{}`", questions_path);

    let questions = file_handling::get_question_definitions(&questions_path)?;
    let mut answers = process_named_arguments(&args.arguments, &questions)?;

    let prompter_config = args.prompter_config(stdin().is_terminal());
    if prompter_config.no_tty {
        info!("No terminal attached, answering from arguments and defaults");
    }

    let options = PromptOptions {
        man_page: Some(man_page()),
        ..PromptOptions::default()
    };

    let mut prompter = Prompter::new(CrosstermBackend::new(), prompter_config);
    let result = prompter.prompt_with(&mut answers, &questions, &options);
    prompter.close()?;
    result?;

    println!("{}", render_answers(&answers, args.output)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Interrupted) => ExitCode::from(INTERRUPTED_EXIT_CODE),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
