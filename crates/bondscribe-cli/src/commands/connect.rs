//! Provider construction from configuration.

use crate::config::Config;
use crate::error::Result;
use bondscribe_llm::GroqProvider;
use std::time::Duration;
use tracing::debug;

/// Build the provider described by the config.
///
/// Fails with an authentication error when no API key can be resolved,
/// before any request is made.
pub fn execute_connect(config: &Config, api_key: Option<&str>) -> Result<GroqProvider> {
    let key = config.resolve_api_key(api_key);
    let provider = GroqProvider::initialize(key.as_deref())?
        .with_endpoint(config.llm.endpoint.as_str())
        .with_max_retries(config.llm.max_retries)
        .with_timeout(Duration::from_secs(config.llm.timeout_secs));

    debug!("Using provider at {}", provider.endpoint());
    Ok(provider)
}
