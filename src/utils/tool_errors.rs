use crate::errors::AdviceError;
use crate::services::matcher::{top_against_pool, MatcherConfig};
use serde_json::Value;

pub fn unknown_action_error(
    tool: &str,
    action: Option<&Value>,
    known_actions: &[&str],
) -> AdviceError {
    let action_value = action
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_default();
    let known: Vec<String> = known_actions.iter().map(|s| s.to_string()).collect();
    let suggestions: Vec<String> = if action_value.is_empty() {
        Vec::new()
    } else {
        top_against_pool(&action_value, &known, &MatcherConfig::default())
            .into_iter()
            .map(|candidate| candidate.name)
            .collect()
    };

    let did_you_mean = if suggestions.is_empty() {
        String::new()
    } else {
        format!("Did you mean: {}?", suggestions.join(", "))
    };
    let list_hint = if known.is_empty() {
        String::new()
    } else {
        format!("Use one of: {}.", known.join(", "))
    };
    let hint = [did_you_mean, list_hint]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut err = AdviceError::invalid_input(format!("Unknown {} action: {}", tool, action_value));
    if !hint.is_empty() {
        err = err.with_hint(hint);
    }
    if !known.is_empty() {
        err = err.with_details(serde_json::json!({
            "known_actions": known,
            "did_you_mean": suggestions,
        }));
    }
    err
}
