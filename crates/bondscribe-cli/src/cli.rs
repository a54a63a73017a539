//! CLI command definitions and argument parsing.

use bondscribe_extractor::InstructionSet;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bondscribe CLI - Extract bond details and classify trading chat messages.
#[derive(Debug, Parser)]
#[command(name = "bondscribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (defaults to the environment variable named in the config)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Log pipeline diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Field/value table
    Table,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract bond details from text or a file
    Extract(ExtractArgs),

    /// Classify a message by intent
    Classify(ClassifyArgs),

    /// Enter interactive REPL mode
    Repl(ReplArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Message text (read from stdin when neither text nor --file is given)
    pub text: Vec<String>,

    /// Read the message from a file
    #[arg(short = 'i', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Skip the LLM and run the regex extractor only
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Message text
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Instruction set (defaults to the configured one)
    #[arg(short = 's', long, value_enum)]
    pub instructions: Option<InstructionArg>,
}

/// Arguments for the repl command.
#[derive(Debug, Default, Parser)]
pub struct ReplArgs {
    /// What each input line is used for
    #[arg(long, value_enum, default_value = "extract")]
    pub mode: ReplMode,

    /// Instruction set for classify mode (defaults to the configured one)
    #[arg(short = 's', long, value_enum)]
    pub instructions: Option<InstructionArg>,
}

/// REPL modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReplMode {
    /// Extract bond details from each line
    #[default]
    Extract,
    /// Classify each line by intent
    Classify,
}

/// Instruction set argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum InstructionArg {
    /// BidRequest / OfferRequest / General
    BidOffer,
    /// QuoteRequest / General
    Quote,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}

impl From<InstructionArg> for InstructionSet {
    fn from(arg: InstructionArg) -> Self {
        match arg {
            InstructionArg::BidOffer => InstructionSet::BidOffer,
            InstructionArg::Quote => InstructionSet::Quote,
        }
    }
}
