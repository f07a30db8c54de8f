//! Tolerant decoder for the model's free-form reply. The text protocol is
//! fragile by nature, so the parser is total: malformed input degrades to
//! fewer (or zero) suggestions, never to an error.

use uuid::Uuid;

use crate::coach::types::{AiSuggestion, SuggestionPriority, SuggestionType};
use crate::constants::MAX_SUGGESTIONS;

/// Segment delimiter the prompt instructs the model to emit.
const DELIMITER: &str = "SUGGESTION_";

/// Decode a reply into at most [`MAX_SUGGESTIONS`] suggestions, preserving
/// source order. Blocks missing a title, description, or action are dropped
/// rather than defaulted.
pub fn parse(response: &str) -> Vec<AiSuggestion> {
    response
        .split(DELIMITER)
        .skip(1)
        .filter_map(parse_block)
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn parse_block(block: &str) -> Option<AiSuggestion> {
    let mut suggestion_type = SuggestionType::Practice;
    let mut priority = SuggestionPriority::Medium;
    let mut title = "";
    let mut description = "";
    let mut action = "";
    let mut url: Option<&str> = None;

    // Field lines may appear in any order; a later duplicate overwrites.
    for line in block.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("Type:") {
            suggestion_type = SuggestionType::parse_loose(value);
        } else if let Some(value) = line.strip_prefix("Priority:") {
            priority = SuggestionPriority::parse_loose(value);
        } else if let Some(value) = line.strip_prefix("Title:") {
            title = value.trim();
        } else if let Some(value) = line.strip_prefix("Description:") {
            description = value.trim();
        } else if let Some(value) = line.strip_prefix("Action:") {
            action = value.trim();
        } else if let Some(value) = line.strip_prefix("URL:") {
            let value = value.trim();
            url = if value == "none" { None } else { Some(value) };
        }
    }

    if title.is_empty() || description.is_empty() || action.is_empty() {
        return None;
    }

    Some(AiSuggestion {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        suggestion_type,
        priority,
        action: action.to_string(),
        url: url.map(str::to_string),
    })
}
