//! Content Command
//!
//! Listing-copy improvement advice for a published project (the LUMINA
//! editor surface).

use crate::cli::ui::Output;
use crate::cli::util::build_client;
use crate::config::ConfigLoader;
use crate::types::Result;

pub async fn run(title: &str, description: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let client = build_client(&config)?;
    let output = Output::new();

    let advice = client.generate_content_advice(title, description).await;

    output.section("Listing advice");
    output.advice(&advice);

    Ok(())
}
