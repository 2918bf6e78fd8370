//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the verification engine and an
//! external system (time, language model, target page fetching, notification
//! transports). Implementations live in `src/adapters/`.

pub mod clock;
pub mod fetch;
pub mod llm;
pub mod notify;

pub use clock::Clock;
pub use fetch::{FetchError, FetchFuture, FetchedPage, PageFetcher};
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
pub use notify::{Notifier, NotifyFuture};
