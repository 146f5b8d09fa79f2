//! Tip Command
//!
//! One short conservation tip from a plain-language usage summary.

use crate::cli::ui::Output;
use crate::cli::util::build_client;
use crate::config::ConfigLoader;
use crate::types::Result;

pub async fn run(history: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let client = build_client(&config)?;
    let output = Output::new();

    let advice = client.generate_usage_tip(history).await;

    output.section("Today's tip");
    output.advice(&advice);

    Ok(())
}
