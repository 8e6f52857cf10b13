//! Application state wiring the chat service together.
//!
//! ChatService is generic over the completion client and document parser;
//! AppState pins it to the concrete infra implementations.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use lionbot_core::chat::service::ChatService;
use lionbot_core::conversation::store::ConversationStore;
use lionbot_infra::document::OfficeDocumentParser;
use lionbot_infra::llm::gemini::GeminiClient;
use lionbot_types::config::ServerConfig;

pub type ConcreteChatService = ChatService<GeminiClient, OfficeDocumentParser>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build the Gemini client and the process-wide conversation store.
    pub fn init(
        config: ServerConfig,
        api_key: SecretString,
        persona: String,
    ) -> anyhow::Result<Self> {
        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_base_url(config.api_base_url.as_str());

        let store = Arc::new(ConversationStore::new(config.history_limit));
        let chat_service = ChatService::new(client, OfficeDocumentParser::new(), store, persona);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        })
    }
}
