//! Provider fallback chain for complaint analysis and replies.
//!
//! Analysis asks OpenRouter for a JSON classification and falls back to the
//! keyword rules. Replies try Watsonx, then OpenRouter, then a canned
//! category reply. Provider failures are logged and never reach the caller.

use crate::AppState;
use samadhan_analysis::{
    analysis_prompt, category_reply, clean_model_output, parse_model_analysis, response_prompt,
};
use samadhan_types::ComplaintAnalysis;

/// Classifies a complaint, preferring the hosted model when configured.
pub async fn analyze(state: &AppState, complaint: &str, language: &str) -> ComplaintAnalysis {
    if let Some(client) = &state.openrouter {
        match client.complete(&analysis_prompt(complaint, language)).await {
            Ok(reply) => match parse_model_analysis(&reply) {
                Some(analysis) => return analysis,
                None => tracing::warn!("openrouter analysis reply had no JSON object"),
            },
            Err(e) => tracing::warn!(error = %e, "openrouter analysis failed"),
        }
    }

    samadhan_analysis::analyze(complaint)
}

/// Produces the citizen-facing reply for an analysed complaint.
pub async fn respond(
    state: &AppState,
    complaint: &str,
    analysis: &ComplaintAnalysis,
    language: &str,
) -> String {
    let prompt = response_prompt(complaint, analysis, language);

    if let Some(client) = &state.watsonx {
        match client.complete_prompt(&prompt).await {
            Ok(reply) => {
                let reply = clean_model_output(&reply);
                if !reply.is_empty() {
                    tracing::info!(provider = "watsonx", "response generated");
                    return reply;
                }
                tracing::warn!("watsonx returned an empty response");
            }
            Err(e) => tracing::warn!(error = %e, "watsonx failed, trying next provider"),
        }
    }

    if let Some(client) = &state.openrouter {
        match client.complete(&prompt).await {
            Ok(reply) => {
                let reply = clean_model_output(&reply);
                if !reply.is_empty() {
                    tracing::info!(provider = "openrouter", "response generated");
                    return reply;
                }
                tracing::warn!("openrouter returned an empty response");
            }
            Err(e) => tracing::warn!(error = %e, "openrouter failed"),
        }
    }

    category_reply(analysis.category, analysis.priority, language)
}
