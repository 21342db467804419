//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the HTTP API. Core services are generic over ports; AppState pins them to
//! the infra implementations.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use schoolcatch_core::chat::store::InMemorySessionStore;
use schoolcatch_core::notice::service::NoticeService;
use schoolcatch_core::rag::chain::ConversationalRagChain;
use schoolcatch_core::rag::composer::{AnswerComposer, ComposerSettings};
use schoolcatch_core::rag::retriever::HistoryAwareRetriever;
use schoolcatch_core::rag::rewriter::QueryRewriter;
use schoolcatch_core::retrieval::box_embedder::BoxEmbedder;
use schoolcatch_core::retrieval::index::BoxDocumentIndex;
use schoolcatch_infra::config::ApiKeys;
use schoolcatch_infra::embedding::openai::OpenAiEmbedder;
use schoolcatch_infra::llm::create_provider;
use schoolcatch_infra::sql::notice::SqlNoticeRepository;
use schoolcatch_infra::vector::pinecone::PineconeIndex;
use schoolcatch_types::config::AppConfig;
use schoolcatch_types::error::{ConfigError, RepositoryError};
use schoolcatch_types::notice::RecommendedNotices;

pub type ConcreteNoticeService = NoticeService<SqlNoticeRepository>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chain: Arc<ConversationalRagChain>,
    /// `None` when no notices database is configured.
    pub notice_service: Option<Arc<ConcreteNoticeService>>,
}

impl AppState {
    /// Validate the configuration, read API keys, and wire the RAG chain.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let keys = ApiKeys::from_env()?;
        if config.index.host.trim().is_empty() {
            return Err(ConfigError::Missing("index.host".to_string()).into());
        }

        let provider = create_provider(&config.llm, rewrap(&keys.openai));
        let embedder = OpenAiEmbedder::new(&config.embedding, keys.openai);
        let index = PineconeIndex::new(&config.index, keys.pinecone);

        let rewriter = QueryRewriter::from_config(&config.rewriter, provider.clone(), &config.llm.model)?;
        let retriever = HistoryAwareRetriever::new(
            provider.clone(),
            BoxEmbedder::new(embedder),
            BoxDocumentIndex::new(index),
            config.llm.model.clone(),
        );
        let composer = AnswerComposer::new(
            provider,
            ComposerSettings {
                model: config.llm.model.clone(),
                max_tokens: config.llm.max_tokens,
                temperature: config.llm.temperature,
                term: config.academic,
            },
        );
        let chain = ConversationalRagChain::new(
            rewriter,
            retriever,
            composer,
            Arc::new(InMemorySessionStore::new()),
        );

        let notice_service = match config.database.url.as_deref() {
            Some(url) => {
                let repo = SqlNoticeRepository::new(url, config.database.notices_table.clone())?;
                Some(Arc::new(NoticeService::new(repo)))
            }
            None => {
                tracing::warn!("No notices database configured; recommended notices are disabled");
                None
            }
        };

        tracing::info!(
            model = %config.llm.model,
            embedding_model = %config.embedding.model,
            term = %config.academic.korean_label(),
            rewriter = ?config.rewriter.mode,
            "Application state initialized"
        );

        Ok(Self::from_parts(config, chain, notice_service))
    }

    pub fn from_parts(
        config: AppConfig,
        chain: ConversationalRagChain,
        notice_service: Option<Arc<ConcreteNoticeService>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
            notice_service,
        }
    }

    /// Recommended notices for `department`, or an error entry when the
    /// notices database is not configured.
    pub async fn recommend_notices(&self, department: &str) -> RecommendedNotices {
        match &self.notice_service {
            Some(service) => service.recommend(department).await,
            None => RecommendedNotices {
                notices: Vec::new(),
                error: Some(
                    RepositoryError::NotConfigured("SCHOOLCATCH_DATABASE_URL".to_string()).to_string(),
                ),
            },
        }
    }
}

/// The same key handed to a second client.
fn rewrap(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_string())
}
