//! Route decisions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel sub-query used when no retrieval is needed
pub const NO_SUB_QUERY: &str = "N/A";

/// Branch taken by the router for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Retrieve context from the primary backend before replying
    Search,
    /// Reply from conversation history alone
    Chat,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Search => "SEARCH",
            Route::Chat => "CHAT",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the classification collaborator for one query
///
/// `decision` keeps the raw label the classifier produced so that values
/// outside SEARCH / CHAT can still be observed; [`RouteDecision::route`]
/// maps it onto a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub decision: String,
    pub sub_query: String,
    pub original_query: String,
}

impl RouteDecision {
    pub fn new(
        decision: impl Into<String>,
        sub_query: impl Into<String>,
        original_query: impl Into<String>,
    ) -> Self {
        Self {
            decision: decision.into(),
            sub_query: sub_query.into(),
            original_query: original_query.into(),
        }
    }

    pub fn search(sub_query: impl Into<String>, original_query: impl Into<String>) -> Self {
        Self::new(Route::Search.as_str(), sub_query, original_query)
    }

    pub fn chat(original_query: impl Into<String>) -> Self {
        Self::new(Route::Chat.as_str(), NO_SUB_QUERY, original_query)
    }

    /// Map the raw decision label onto a route.
    ///
    /// Unrecognized labels fall through to [`Route::Chat`].
    pub fn route(&self) -> Route {
        match self.decision.trim().to_ascii_uppercase().as_str() {
            "SEARCH" => Route::Search,
            "CHAT" => Route::Chat,
            _ => Route::Chat,
        }
    }

    /// Whether the raw label was one of SEARCH / CHAT
    pub fn is_recognized(&self) -> bool {
        matches!(
            self.decision.trim().to_ascii_uppercase().as_str(),
            "SEARCH" | "CHAT"
        )
    }

    /// Text to send to the backends on the search path.
    ///
    /// Falls back to the original query when the classifier left the
    /// sub-query empty or as the sentinel.
    pub fn search_text(&self) -> &str {
        let sub = self.sub_query.trim();
        if sub.is_empty() || sub.eq_ignore_ascii_case(NO_SUB_QUERY) {
            &self.original_query
        } else {
            &self.sub_query
        }
    }
}

/// States of the router/dispatcher flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    AwaitingClassification,
    SearchPath,
    ChatPath,
    AwaitingReply,
    Done,
}

impl RoutePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePhase::AwaitingClassification => "awaiting_classification",
            RoutePhase::SearchPath => "search_path",
            RoutePhase::ChatPath => "chat_path",
            RoutePhase::AwaitingReply => "awaiting_reply",
            RoutePhase::Done => "done",
        }
    }
}

impl From<Route> for RoutePhase {
    fn from(route: Route) -> Self {
        match route {
            Route::Search => RoutePhase::SearchPath,
            Route::Chat => RoutePhase::ChatPath,
        }
    }
}

impl fmt::Display for RoutePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_search_and_chat() {
        assert_eq!(RouteDecision::search("skimming", "q").route(), Route::Search);
        assert_eq!(RouteDecision::chat("hi").route(), Route::Chat);
    }

    #[test]
    fn test_route_is_case_insensitive() {
        assert_eq!(RouteDecision::new(" search ", "x", "q").route(), Route::Search);
        assert_eq!(RouteDecision::new("Chat", "N/A", "q").route(), Route::Chat);
    }

    #[test]
    fn test_unrecognized_label_routes_to_chat() {
        let decision = RouteDecision::new("LOOKUP", "x", "q");
        assert_eq!(decision.route(), Route::Chat);
        assert!(!decision.is_recognized());
    }

    #[test]
    fn test_search_text_falls_back_to_original() {
        assert_eq!(RouteDecision::search("N/A", "orig").search_text(), "orig");
        assert_eq!(RouteDecision::search("  ", "orig").search_text(), "orig");
        assert_eq!(
            RouteDecision::search("wire fraud", "orig").search_text(),
            "wire fraud"
        );
    }

    #[test]
    fn test_phase_from_route() {
        assert_eq!(RoutePhase::from(Route::Search), RoutePhase::SearchPath);
        assert_eq!(RoutePhase::from(Route::Chat), RoutePhase::ChatPath);
    }
}
