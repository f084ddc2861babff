//! Conversation domain.
//!
//! - [`turn::ConversationTurn`]: a single System / Human / Assistant turn
//! - [`state::ConversationState`]: the ordered turn log of one chat session

pub mod state;
pub mod turn;
