//! Prompt Templates
//!
//! Fixed prompt construction for the three advisory operations. Caller
//! input is embedded verbatim; no escaping or validation happens here.

/// Usage tip prompt: conservation-assistant persona, one short tip
pub fn usage_tip(usage_history_summary: &str) -> String {
    format!(
        "You are AQUANET AI, a smart water conservation assistant. \
         Based on this user's recent water usage activity: \"{}\", \
         provide 1 short, actionable tip to save water today. \
         Keep it friendly and encouraging.",
        usage_history_summary
    )
}

/// Assistant prompt: raw user query plus current usage, concise answer
pub fn assistant(user_query: &str, current_usage_liters: f64) -> String {
    format!(
        "User asks: \"{}\". Their current daily usage is {} Liters. \
         Answer their question about water usage or saving tips concisely.",
        user_query, current_usage_liters
    )
}

/// Content advice prompt: listing improvement with three focus points
pub fn content_advice(title: &str, description: &str) -> String {
    format!(
        "Improve the following app listing for engagement and clarity:\n\
         Title: {}\n\
         Description: {}\n\n\
         Suggest a professional tone and identify 3 key improvement points.",
        title, description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_tip_embeds_summary() {
        let prompt = usage_tip("Daily usage is 15L, spiked on Thursday");
        assert!(prompt.contains("\"Daily usage is 15L, spiked on Thursday\""));
        assert!(prompt.contains("AQUANET AI"));
        assert!(prompt.contains("1 short, actionable tip"));
    }

    #[test]
    fn test_assistant_embeds_query_and_usage() {
        let prompt = assistant("Why did my usage spike?", 142.5);
        assert!(prompt.contains("\"Why did my usage spike?\""));
        assert!(prompt.contains("142.5 Liters"));
    }

    #[test]
    fn test_content_advice_embeds_fields() {
        let prompt = content_advice("Lumina Vision", "A photo editor");
        assert!(prompt.contains("Title: Lumina Vision"));
        assert!(prompt.contains("Description: A photo editor"));
        assert!(prompt.contains("3 key improvement points"));
    }
}
