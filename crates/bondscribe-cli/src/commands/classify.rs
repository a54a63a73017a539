//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::commands::connect::execute_connect;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use bondscribe_extractor::{InstructionSet, IntentClassifier};

/// Execute the classify command.
pub fn execute_classify(
    args: ClassifyArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let instruction_set: InstructionSet = args
        .instructions
        .map(Into::into)
        .unwrap_or(config.extractor.instruction_set);

    let provider = execute_connect(config, api_key)?;
    let classifier = IntentClassifier::new(
        provider,
        instruction_set,
        config.extractor.model.as_str(),
        config.extractor.temperature,
    );

    let label = classifier.classify(&args.text.join(" "));
    println!("{}", formatter.classification(label.as_deref()));
    Ok(())
}
