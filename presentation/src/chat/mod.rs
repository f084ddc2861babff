//! Interactive chat module
//!
//! Provides a readline-based interactive chat over the fraud-analyst
//! chat service.

mod repl;

pub use repl::ChatRepl;
