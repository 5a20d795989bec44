//! Provider implementations of the completion contract.

pub mod anthropic;
