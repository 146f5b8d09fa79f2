//! Ask Command
//!
//! One question to the grounded assistant. The CLI sequences calls (one at
//! a time), so callers never race two assistant requests.

use crate::cli::ui::Output;
use crate::cli::util::build_client;
use crate::config::ConfigLoader;
use crate::types::Result;

pub async fn run(query: &str, usage_liters: f64) -> Result<()> {
    let config = ConfigLoader::load()?;
    let client = build_client(&config)?;
    let output = Output::new();

    let advice = client.ask_assistant(query, usage_liters).await;

    output.section("Assistant");
    output.advice(&advice);

    Ok(())
}
