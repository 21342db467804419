//! Fakes for exercising the HTTP layer without network services.

use std::sync::Arc;

use futures_util::stream;

use schoolcatch_core::chat::store::InMemorySessionStore;
use schoolcatch_core::llm::box_provider::BoxLlmProvider;
use schoolcatch_core::llm::provider::{LlmEventStream, LlmProvider};
use schoolcatch_core::notice::service::NoticeService;
use schoolcatch_core::rag::chain::ConversationalRagChain;
use schoolcatch_core::rag::composer::{AnswerComposer, ComposerSettings};
use schoolcatch_core::rag::retriever::HistoryAwareRetriever;
use schoolcatch_core::rag::rewriter::{QueryRewriter, SynonymRewriter};
use schoolcatch_core::retrieval::box_embedder::BoxEmbedder;
use schoolcatch_core::retrieval::embedder::Embedder;
use schoolcatch_core::retrieval::index::{BoxDocumentIndex, DocumentIndex};
use schoolcatch_infra::sql::notice::SqlNoticeRepository;
use schoolcatch_types::config::{AppConfig, default_rewrite_rules};
use schoolcatch_types::error::RetrievalError;
use schoolcatch_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason,
    StreamEvent, Usage,
};
use schoolcatch_types::notice::NoticeDocument;

use crate::state::AppState;

/// Streams fixed fragments; `complete` echoes the last message.
pub struct FixedProvider {
    capabilities: ProviderCapabilities,
    fragments: Vec<String>,
    fail_stream: bool,
}

impl FixedProvider {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            capabilities: ProviderCapabilities {
                streaming: true,
                max_context_tokens: 128_000,
                max_output_tokens: 16_384,
            },
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            fail_stream: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_stream: true,
            ..Self::new(&[])
        }
    }
}

impl LlmProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let content = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(CompletionResponse {
            id: "fixed-1".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(&self, _request: CompletionRequest) -> LlmEventStream {
        if self.fail_stream {
            return Box::pin(stream::iter(vec![Err(LlmError::Overloaded(
                "upstream overloaded".to_string(),
            ))]));
        }
        let mut events: Vec<Result<StreamEvent, LlmError>> = vec![Ok(StreamEvent::Connected)];
        events.extend(
            self.fragments
                .iter()
                .map(|text| Ok(StreamEvent::TextDelta { text: text.clone() })),
        );
        events.push(Ok(StreamEvent::Done));
        Box::pin(stream::iter(events))
    }
}

pub struct FixedEmbedder;

impl Embedder for FixedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
    }

    fn model_name(&self) -> &str {
        "fixed-embedding"
    }
}

pub struct FixedIndex;

impl DocumentIndex for FixedIndex {
    async fn search(
        &self,
        _query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<NoticeDocument>, RetrievalError> {
        let mut docs = vec![NoticeDocument {
            content: "2024학년도 2학기 등록금 납부 기간은 8월 23일부터 8월 30일까지입니다.".to_string(),
            source: Some("https://www.hansung.ac.kr/hansung/8385/subview.do".to_string()),
            title: Some("2024학년도 2학기 등록금 납부 안내".to_string()),
            date: Some("2024-08-16".to_string()),
            score: 0.9,
        }];
        docs.truncate(top_k);
        Ok(docs)
    }
}

/// App state over fakes, optionally with a notices repository.
pub fn fake_state(provider: FixedProvider, notices: Option<SqlNoticeRepository>) -> AppState {
    let config = AppConfig::default();
    let provider = BoxLlmProvider::new(provider);
    let chain = ConversationalRagChain::new(
        QueryRewriter::Synonym(SynonymRewriter::new(&default_rewrite_rules()).unwrap()),
        HistoryAwareRetriever::new(
            provider.clone(),
            BoxEmbedder::new(FixedEmbedder),
            BoxDocumentIndex::new(FixedIndex),
            "gpt-4o-mini",
        ),
        AnswerComposer::new(
            provider,
            ComposerSettings {
                model: "gpt-4o-mini".to_string(),
                max_tokens: 1024,
                temperature: None,
                term: config.academic,
            },
        ),
        Arc::new(InMemorySessionStore::new()),
    );
    AppState::from_parts(config, chain, notices.map(|repo| Arc::new(NoticeService::new(repo))))
}
