//! Chat service running one request/response round.
//!
//! ChatService wires the attachment normalizer, the part builder, the
//! conversation store, and the remote client together:
//! normalize -> build user turn -> lock history -> remote call ->
//! append user + model turns -> trim -> reply.
//!
//! History is only mutated after a successful response; empty requests,
//! remote failures, and candidate-less answers leave it untouched.
//!
//! Attachment extraction is CPU-bound and runs on the blocking pool.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use lionbot_types::chat::{AttachmentDescriptor, ChatReply, ChatRequestBody, MessagePart, Turn};
use lionbot_types::error::ChatError;
use lionbot_types::llm::{CompletionOutcome, LlmError};

use crate::attachment::extract::DocumentParser;
use crate::attachment::normalize::normalize_attachments;
use crate::chat::parts::build_user_parts;
use crate::chat::reply::{map_error, no_candidates_reply};
use crate::conversation::store::ConversationStore;
use crate::llm::client::CompletionClient;

/// Orchestrates a chat round against a shared conversation store.
///
/// Generic over `CompletionClient` and `DocumentParser` so lionbot-core never
/// depends on lionbot-infra.
pub struct ChatService<C: CompletionClient, P: DocumentParser> {
    client: C,
    parser: Arc<P>,
    store: Arc<ConversationStore>,
    persona: String,
}

impl<C: CompletionClient, P: DocumentParser + 'static> ChatService<C, P> {
    pub fn new(client: C, parser: P, store: Arc<ConversationStore>, persona: String) -> Self {
        Self {
            client,
            parser: Arc::new(parser),
            store,
            persona,
        }
    }

    /// The shared conversation store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Handle one inbound request and produce the reply to send back.
    ///
    /// Never fails: every error is logged here and mapped to a sanitized
    /// reply with an appropriate status.
    pub async fn handle(&self, body: ChatRequestBody) -> ChatReply {
        match self.run_round(body).await {
            Ok(reply) => reply,
            Err(err) => {
                log_failure(&err);
                map_error(&err)
            }
        }
    }

    async fn run_round(&self, body: ChatRequestBody) -> Result<ChatReply, ChatError> {
        let attachments = normalize_attachments(&body);
        let attachment_count = attachments.len();
        let parts = self.build_parts(attachments, body.message).await?;
        let user_turn = Turn::user(parts);

        // Held until the round completes so concurrent rounds cannot interleave.
        let mut history = self.store.lock().await;
        let snapshot = history.snapshot_for_request();

        debug!(
            provider = self.client.name(),
            model = self.client.model(),
            attachments = attachment_count,
            history_len = snapshot.len(),
            "sending chat round to remote model"
        );

        let outcome = self
            .client
            .complete(&snapshot, &user_turn, &self.persona)
            .await?;

        match outcome {
            CompletionOutcome::Reply { text, turn } => {
                history.append(user_turn);
                history.append(turn);
                history.trim_to_capacity();
                info!(
                    history_len = history.len(),
                    reply_chars = text.chars().count(),
                    "chat round completed"
                );
                Ok(ChatReply::ok(text))
            }
            CompletionOutcome::NoCandidates => {
                warn!(
                    provider = self.client.name(),
                    model = self.client.model(),
                    "remote model returned no candidates"
                );
                Ok(no_candidates_reply())
            }
        }
    }

    async fn build_parts(
        &self,
        attachments: Vec<AttachmentDescriptor>,
        message: Option<String>,
    ) -> Result<Vec<MessagePart>, ChatError> {
        if attachments.is_empty() {
            return build_user_parts(self.parser.as_ref(), &attachments, message.as_deref());
        }

        let parser = Arc::clone(&self.parser);
        tokio::task::spawn_blocking(move || {
            build_user_parts(parser.as_ref(), &attachments, message.as_deref())
        })
        .await
        .map_err(|e| ChatError::Internal(format!("attachment extraction task failed: {e}")))?
    }
}

fn log_failure(err: &ChatError) {
    match err {
        ChatError::EmptyRequest => debug!("rejected empty chat request"),
        ChatError::Remote(LlmError::Remote {
            status,
            message,
            reason,
        }) => warn!(status, reason = ?reason, message = %message, "remote API error"),
        ChatError::Remote(LlmError::Timeout) => warn!("remote API call timed out"),
        other => error!(error = %other, "chat round failed"),
    }
}
