//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{ReplArgs, ReplMode};
use crate::commands::{execute_connect, extract::run_extraction};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use bondscribe_domain::traits::LlmProvider;
use bondscribe_extractor::{BondExtractor, ExtractorConfig, InstructionSet, IntentClassifier};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::debug;

/// What a single REPL line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    /// Leave the loop
    Exit,
    /// Nothing to do
    Skip,
    /// Process this message
    Message(String),
}

/// Interpret one line of input.
pub fn parse_repl_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        ReplInput::Skip
    } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        ReplInput::Exit
    } else {
        ReplInput::Message(line.to_string())
    }
}

/// The component each REPL line is handed to.
pub enum ReplSession<L> {
    /// Extract bond records from each line
    Extract(BondExtractor<L>),
    /// Classify each line by intent
    Classify(IntentClassifier<L>),
}

impl<L> ReplSession<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Build the session for a mode.
    pub fn new(
        mode: ReplMode,
        llm: L,
        config: &ExtractorConfig,
        instruction_set: InstructionSet,
    ) -> Self {
        match mode {
            ReplMode::Extract => ReplSession::Extract(BondExtractor::new(llm, config.clone())),
            ReplMode::Classify => ReplSession::Classify(IntentClassifier::new(
                llm,
                instruction_set,
                config.model.as_str(),
                config.temperature,
            )),
        }
    }

    /// Prompt shown before each line.
    pub fn prompt(&self) -> &'static str {
        match self {
            ReplSession::Extract(_) => "bond> ",
            ReplSession::Classify(_) => "query> ",
        }
    }

    /// Process one message and render the result.
    pub fn handle(&self, message: &str, formatter: &Formatter) -> Result<String> {
        match self {
            ReplSession::Extract(extractor) => run_extraction(extractor, message, formatter),
            ReplSession::Classify(classifier) => {
                Ok(formatter.classification(classifier.classify(message).as_deref()))
            }
        }
    }
}

/// Run the interactive REPL.
pub fn run_repl(
    args: ReplArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let provider = execute_connect(config, api_key)?;
    let instruction_set = args
        .instructions
        .map(Into::into)
        .unwrap_or(config.extractor.instruction_set);
    let session = ReplSession::new(args.mode, provider, &config.extractor, instruction_set);

    let intro = match args.mode {
        ReplMode::Extract => "Bondscribe REPL - Enter bond details, 'exit' to quit",
        ReplMode::Classify => "Bondscribe REPL - Enter your query, 'exit' to quit",
    };
    println!("{}", formatter.info(intro));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline(session.prompt()) {
            Ok(line) => match parse_repl_line(&line) {
                ReplInput::Exit => break,
                ReplInput::Skip => continue,
                ReplInput::Message(message) => {
                    editor.add_history_entry(message.as_str()).ok();
                    match session.handle(&message, formatter) {
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    }
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Err(e) = editor.save_history(&history_path) {
        debug!("Could not save history: {}", e);
    }

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".bondscribe");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}
