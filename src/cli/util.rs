//! Command helpers

use crate::ai::{AdvisoryClient, EnvCredentials, create_provider};
use crate::config::Config;
use crate::types::Result;

/// Build an advisory client from loaded configuration.
///
/// The credential stays environment-resolved per call; an unset key shows
/// up as fallback advice at run time, not as an error here.
pub fn build_client(config: &Config) -> Result<AdvisoryClient> {
    let provider = create_provider(&config.provider_config(), EnvCredentials::shared())?;
    Ok(AdvisoryClient::new(provider)
        .with_timeout(config.timeout_config())
        .with_retry(config.retry_policy()))
}
