//! History-aware retrieval.
//!
//! A follow-up question ("그럼 신청 기간은?") only makes sense together with
//! the earlier turns. When the session already has history, the LLM first
//! reformulates the question into a standalone one; that standalone question
//! is what gets embedded and searched.

use tracing::{debug, info};

use schoolcatch_types::chat::SessionHistory;
use schoolcatch_types::error::RetrievalError;
use schoolcatch_types::llm::{CompletionRequest, Message};
use schoolcatch_types::notice::NoticeDocument;

use crate::llm::box_provider::BoxLlmProvider;
use crate::retrieval::box_embedder::BoxEmbedder;
use crate::retrieval::index::BoxDocumentIndex;

/// Documents fetched per question.
pub const RETRIEVAL_TOP_K: usize = 3;

/// Instruction for turning a follow-up into a standalone question.
pub const CONTEXTUALIZE_SYSTEM_PROMPT: &str = "Given a chat history and the latest user question \
which might reference context in the chat history, formulate a standalone question which can be \
understood without the chat history. Do NOT answer the question, just reformulate it if needed \
and otherwise return it as is.";

/// Result of one retrieval: the query actually searched and what it found.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub query: String,
    pub documents: Vec<NoticeDocument>,
}

pub struct HistoryAwareRetriever {
    provider: BoxLlmProvider,
    embedder: BoxEmbedder,
    index: BoxDocumentIndex,
    model: String,
}

impl HistoryAwareRetriever {
    pub fn new(
        provider: BoxLlmProvider,
        embedder: BoxEmbedder,
        index: BoxDocumentIndex,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            embedder,
            index,
            model: model.into(),
        }
    }

    /// Reformulate `question` against `history`.
    ///
    /// With an empty history the question is already standalone and no LLM
    /// call is made. A blank reformulation falls back to the question.
    pub async fn standalone_question(
        &self,
        question: &str,
        history: &SessionHistory,
    ) -> Result<String, RetrievalError> {
        if history.is_empty() {
            return Ok(question.to_string());
        }

        let mut messages = history.to_messages();
        messages.push(Message::user(question));
        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(CONTEXTUALIZE_SYSTEM_PROMPT.to_string()),
            max_tokens: 256,
            temperature: Some(0.0),
            stream: false,
        };

        let response = self.provider.complete(&request).await?;
        let standalone = response.content.trim();
        if standalone.is_empty() {
            return Ok(question.to_string());
        }
        debug!(question, standalone, "Reformulated follow-up question");
        Ok(standalone.to_string())
    }

    /// Fetch at most [`RETRIEVAL_TOP_K`] documents for `question`.
    ///
    /// Zero documents is a valid result, not an error.
    pub async fn retrieve(
        &self,
        question: &str,
        history: &SessionHistory,
    ) -> Result<Retrieval, RetrievalError> {
        let query = self.standalone_question(question, history).await?;
        let embedding = self.embedder.embed_query(&query).await?;
        let mut documents = self.index.search(&embedding, RETRIEVAL_TOP_K).await?;
        documents.truncate(RETRIEVAL_TOP_K);

        info!(
            query = %query,
            documents = documents.len(),
            embedding_model = self.embedder.model_name(),
            "Retrieved notice documents"
        );
        Ok(Retrieval { query, documents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingEmbedder, RecordingIndex, ScriptedProvider, notice, tuition_notice};
    use schoolcatch_types::llm::MessageRole;

    fn retriever(
        provider: ScriptedProvider,
        embedder: RecordingEmbedder,
        index: RecordingIndex,
    ) -> HistoryAwareRetriever {
        HistoryAwareRetriever::new(
            BoxLlmProvider::new(provider),
            BoxEmbedder::new(embedder),
            BoxDocumentIndex::new(index),
            "gpt-4o-mini",
        )
    }

    #[tokio::test]
    async fn test_empty_history_searches_question_directly() {
        let provider = ScriptedProvider::new(&[]);
        let requests = provider.requests();
        let embedder = RecordingEmbedder::default();
        let texts = embedder.texts();
        let index = RecordingIndex::with_documents(vec![tuition_notice()]);
        let top_ks = index.top_ks();

        let retrieval = retriever(provider, embedder, index)
            .retrieve("2학기 등록금 납부 기간이 언제야?", &SessionHistory::new())
            .await
            .unwrap();

        assert_eq!(retrieval.query, "2학기 등록금 납부 기간이 언제야?");
        assert_eq!(retrieval.documents.len(), 1);
        assert!(requests.lock().unwrap().is_empty());
        assert_eq!(*texts.lock().unwrap(), vec!["2학기 등록금 납부 기간이 언제야?".to_string()]);
        assert_eq!(*top_ks.lock().unwrap(), vec![RETRIEVAL_TOP_K]);
    }

    #[tokio::test]
    async fn test_follow_up_is_reformulated_with_history() {
        let provider = ScriptedProvider::new(&[]).with_completion("장학금 신청 기간은 언제인가요?");
        let requests = provider.requests();
        let embedder = RecordingEmbedder::default();
        let texts = embedder.texts();

        let mut history = SessionHistory::new();
        history.push_exchange("장학금 종류 알려줘", "성적우수 장학금과 다자녀 장학금이 있습니다.");

        let retrieval = retriever(provider, embedder, RecordingIndex::default())
            .retrieve("그럼 신청 기간은?", &history)
            .await
            .unwrap();

        assert!(retrieval.query.contains("장학금"));
        assert!(texts.lock().unwrap()[0].contains("장학금"));

        let requests = requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.system.as_deref(), Some(CONTEXTUALIZE_SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[2].role, MessageRole::User);
        assert_eq!(request.messages[2].content, "그럼 신청 기간은?");
    }

    #[tokio::test]
    async fn test_zero_documents_is_not_an_error() {
        let retrieval = retriever(
            ScriptedProvider::new(&[]),
            RecordingEmbedder::default(),
            RecordingIndex::default(),
        )
        .retrieve("학식 메뉴", &SessionHistory::new())
        .await
        .unwrap();
        assert!(retrieval.documents.is_empty());
    }

    #[tokio::test]
    async fn test_never_returns_more_than_top_k() {
        let documents = (1..=5)
            .map(|day| notice("공지", &format!("2024-09-0{day}")))
            .collect();
        let retrieval = retriever(
            ScriptedProvider::new(&[]),
            RecordingEmbedder::default(),
            RecordingIndex::with_documents(documents),
        )
        .retrieve("공지", &SessionHistory::new())
        .await
        .unwrap();
        assert_eq!(retrieval.documents.len(), RETRIEVAL_TOP_K);
    }

    #[tokio::test]
    async fn test_index_failure_propagates() {
        let err = retriever(
            ScriptedProvider::new(&[]),
            RecordingEmbedder::default(),
            RecordingIndex::failing(),
        )
        .retrieve("공지", &SessionHistory::new())
        .await
        .unwrap_err();
        assert!(matches!(err, RetrievalError::Index(_)));
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let err = retriever(
            ScriptedProvider::new(&[]),
            RecordingEmbedder::failing(),
            RecordingIndex::default(),
        )
        .retrieve("공지", &SessionHistory::new())
        .await
        .unwrap_err();
        assert!(matches!(err, RetrievalError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_reformulation_failure_propagates() {
        let mut history = SessionHistory::new();
        history.push_exchange("q", "a");
        let err = retriever(
            ScriptedProvider::new(&[]).with_failed_completion(),
            RecordingEmbedder::default(),
            RecordingIndex::default(),
        )
        .retrieve("그럼?", &history)
        .await
        .unwrap_err();
        assert!(matches!(err, RetrievalError::Reformulation(_)));
    }
}
