//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::connect::execute_connect;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use bondscribe_domain::traits::LlmProvider;
use bondscribe_extractor::{BondExtractor, ExtractionReport, RegexExtractor};
use std::fmt::Display;
use std::fs;
use std::io::{self, Read};

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let offline = args.offline;
    let message = read_message(args)?;

    if offline {
        let records = RegexExtractor::new()
            .with_quantam_unit(config.extractor.fallback_quantam_unit)
            .extract(&message);
        println!("{}", formatter.format_records(&records)?);
        return Ok(());
    }

    let provider = execute_connect(config, api_key)?;
    let extractor = BondExtractor::try_new(provider, config.extractor.clone())
        .map_err(|e| CliError::Config(e.to_string()))?;
    println!("{}", run_extraction(&extractor, &message, formatter)?);
    Ok(())
}

/// Extract from one message and render the records.
///
/// A fallback is reported on stderr so stdout stays parseable.
pub fn run_extraction<L>(
    extractor: &BondExtractor<L>,
    message: &str,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider,
    L::Error: Display,
{
    let report = extractor.extract_with_report(message);
    report_fallback(&report, formatter);
    formatter.format_records(&report.records)
}

fn report_fallback(report: &ExtractionReport, formatter: &Formatter) {
    if let Some(reason) = report.fallback_reason() {
        eprintln!(
            "{}",
            formatter.warning(&format!("LLM extraction failed ({}); used regex fallback", reason))
        );
    }
}

/// Read the message from the file, the positional words, or stdin.
pub fn read_message(args: ExtractArgs) -> Result<String> {
    if let Some(path) = args.file {
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        return Ok(fs::read_to_string(path)?.trim().to_string());
    }

    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use bondscribe_extractor::ExtractorConfig;
    use bondscribe_llm::MockProvider;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(text: &[&str], file: Option<PathBuf>) -> ExtractArgs {
        ExtractArgs {
            text: text.iter().map(|s| s.to_string()).collect(),
            file,
            offline: false,
        }
    }

    #[test]
    fn test_read_message_joins_words() {
        let message = read_message(args(&["ECL", "9.5%", "NCD"], None)).unwrap();
        assert_eq!(message, "ECL 9.5% NCD");
    }

    #[test]
    fn test_read_message_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("message.txt");
        fs::write(&path, "\nISIN: INE0ABC12345\n9.10% NCD\n\n").unwrap();
        let message = read_message(args(&[], Some(path))).unwrap();
        assert_eq!(message, "ISIN: INE0ABC12345\n9.10% NCD");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        let result = read_message(args(&[], Some(path.clone())));
        assert!(matches!(result, Err(CliError::FileNotFound(p)) if p == path));
    }

    #[test]
    fn test_run_extraction_with_fallback() {
        let extractor = BondExtractor::new(MockProvider::failing(), ExtractorConfig::default());
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = run_extraction(&extractor, "ECL FINANCE 9.5% NCD", &formatter).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["coupon"], 9.5);
        assert_eq!(parsed[0]["issuerName"], "ECL FINANCE");
    }
}
