//! CompletionClient trait definition.
//!
//! This is the abstraction over the hosted generative-model API. Uses RPITIT
//! for `complete`, so implementations are plain `async fn`s.

use lionbot_types::chat::Turn;
use lionbot_types::llm::{CompletionOutcome, LlmError};

/// Trait for remote completion backends (Gemini, test doubles).
///
/// Implementations live in lionbot-infra (e.g., `GeminiClient`).
pub trait CompletionClient: Send + Sync {
    /// Provider name used in logs and span attributes (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Send `history` followed by `new_turn`, with `persona` as the
    /// system-level instruction, and return the first candidate.
    ///
    /// The returned model turn carries the provider's parts verbatim.
    fn complete(
        &self,
        history: &[Turn],
        new_turn: &Turn,
        persona: &str,
    ) -> impl std::future::Future<Output = Result<CompletionOutcome, LlmError>> + Send;
}
