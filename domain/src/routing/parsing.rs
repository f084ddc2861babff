//! Classifier output parsing.
//!
//! The classification collaborator is asked to answer with a JSON object:
//!
//! ```json
//! {"decision": "SEARCH", "query": "card testing", "original_query": "..."}
//! ```
//!
//! Models routinely wrap that object in code fences or prose, so the parser
//! looks for the outermost `{ ... }` span before deserializing.

use super::decision::{NO_SUB_QUERY, RouteDecision};
use crate::core::error::DomainError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawDecision {
    #[serde(alias = "Decision")]
    decision: Option<String>,
    #[serde(alias = "sub_query", alias = "subQuery")]
    query: Option<String>,
    #[serde(alias = "originalQuery")]
    original_query: Option<String>,
}

/// Parse raw classifier text into a [`RouteDecision`].
///
/// `decision` and `original_query` are required; a missing or empty `query`
/// becomes the `"N/A"` sentinel.
///
/// # Examples
///
/// ```
/// use vault_domain::routing::parsing::parse_route_decision;
///
/// let raw = r#"Routing: {"decision": "CHAT", "original_query": "hello"}"#;
/// let decision = parse_route_decision(raw).unwrap();
/// assert_eq!(decision.sub_query, "N/A");
/// ```
pub fn parse_route_decision(raw: &str) -> Result<RouteDecision, DomainError> {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return Err(DomainError::MalformedClassification(
            "no JSON object in classifier output".to_string(),
        ));
    };
    if end < start {
        return Err(DomainError::MalformedClassification(
            "no JSON object in classifier output".to_string(),
        ));
    }

    let parsed: RawDecision = serde_json::from_str(&raw[start..=end])
        .map_err(|e| DomainError::MalformedClassification(e.to_string()))?;

    let decision = parsed
        .decision
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| missing("decision"))?;
    let original_query = parsed
        .original_query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| missing("original_query"))?;
    let sub_query = parsed
        .query
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| NO_SUB_QUERY.to_string());

    Ok(RouteDecision::new(decision, sub_query, original_query))
}

fn missing(field: &str) -> DomainError {
    DomainError::MalformedClassification(format!("missing field `{}`", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::decision::Route;

    #[test]
    fn test_parse_plain_json() {
        let raw = r#"{"decision": "SEARCH", "query": "structuring deposits", "original_query": "Is splitting deposits under 10k suspicious?"}"#;
        let decision = parse_route_decision(raw).unwrap();
        assert_eq!(decision.route(), Route::Search);
        assert_eq!(decision.sub_query, "structuring deposits");
        assert_eq!(
            decision.original_query,
            "Is splitting deposits under 10k suspicious?"
        );
    }

    #[test]
    fn test_parse_with_fences_and_prose() {
        let raw = "Here is my routing:\n```json\n{\"Decision\": \"CHAT\", \"query\": \"N/A\", \"original_query\": \"thanks!\"}\n```\nDone.";
        let decision = parse_route_decision(raw).unwrap();
        assert_eq!(decision.route(), Route::Chat);
        assert_eq!(decision.original_query, "thanks!");
    }

    #[test]
    fn test_missing_query_defaults_to_sentinel() {
        let decision =
            parse_route_decision(r#"{"decision": "CHAT", "original_query": "hey"}"#).unwrap();
        assert_eq!(decision.sub_query, NO_SUB_QUERY);
    }

    #[test]
    fn test_missing_decision_is_error() {
        let err = parse_route_decision(r#"{"query": "x", "original_query": "y"}"#).unwrap_err();
        assert!(err.is_classification());
        assert!(err.to_string().contains("decision"));
    }

    #[test]
    fn test_missing_original_query_is_error() {
        let err = parse_route_decision(r#"{"decision": "SEARCH", "query": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("original_query"));
    }

    #[test]
    fn test_no_json_is_error() {
        assert!(parse_route_decision("SEARCH please").is_err());
        assert!(parse_route_decision("} backwards {").is_err());
    }

    #[test]
    fn test_unknown_decision_label_is_kept_raw() {
        let decision =
            parse_route_decision(r#"{"decision": "ESCALATE", "original_query": "q"}"#).unwrap();
        assert_eq!(decision.decision, "ESCALATE");
        assert_eq!(decision.route(), Route::Chat);
    }
}
