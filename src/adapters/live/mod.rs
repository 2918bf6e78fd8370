//! Live adapters for real external interactions.

pub mod clock;
pub mod fetch;
pub mod llm;
pub mod notify;
