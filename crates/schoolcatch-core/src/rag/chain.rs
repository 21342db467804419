//! Conversational RAG chain: rewrite -> retrieve -> compose -> record.
//!
//! One interaction holds its session's lock from start to finish, so turns of
//! a session are appended by one writer at a time and in arrival order. The
//! (rewritten question, full answer) exchange is appended only after the
//! answer stream completes; a failed or abandoned interaction leaves the
//! history untouched.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tracing::{info, warn};

use schoolcatch_types::chat::{SessionHistory, SessionId};
use schoolcatch_types::error::ChainError;

use crate::chat::store::SessionStore;

use super::composer::AnswerComposer;
use super::retriever::HistoryAwareRetriever;
use super::rewriter::QueryRewriter;

/// Answer fragments of one interaction.
pub type ChainStream = Pin<Box<dyn Stream<Item = Result<String, ChainError>> + Send + 'static>>;

pub struct ConversationalRagChain {
    rewriter: QueryRewriter,
    retriever: HistoryAwareRetriever,
    composer: AnswerComposer,
    sessions: Arc<dyn SessionStore>,
}

impl ConversationalRagChain {
    pub fn new(
        rewriter: QueryRewriter,
        retriever: HistoryAwareRetriever,
        composer: AnswerComposer,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            rewriter,
            retriever,
            composer,
            sessions,
        }
    }

    /// Answer `question` within `session_id`, streaming the answer text.
    ///
    /// Dropping the stream before it ends abandons the interaction without
    /// recording it.
    pub fn stream_answer(self: Arc<Self>, session_id: SessionId, question: String) -> ChainStream {
        Box::pin(async_stream::try_stream! {
            let question = question.trim().to_string();
            if question.is_empty() {
                Err::<(), _>(ChainError::EmptyQuestion)?;
            }

            let handle = self.sessions.get_or_create(&session_id);
            let mut history = handle.lock_owned().await;

            let rewritten = self.rewriter.rewrite(&question).await;
            let retrieval = self
                .retriever
                .retrieve(&rewritten, &history)
                .await
                .map_err(|e| {
                    warn!(session_id = %session_id, error = %e, "Retrieval failed");
                    ChainError::Retrieval(e)
                })?;

            let mut fragments = self.composer.compose(&rewritten, &history, &retrieval.documents);
            let mut answer = String::new();
            while let Some(fragment) = fragments.next().await {
                let fragment = fragment.map_err(|e| {
                    warn!(session_id = %session_id, error = %e, "Answer generation failed");
                    ChainError::Generation(e)
                })?;
                answer.push_str(&fragment);
                yield fragment;
            }

            history.push_exchange(rewritten, answer);
            info!(
                session_id = %session_id,
                documents = retrieval.documents.len(),
                turns = history.len(),
                "Recorded chat exchange"
            );
        })
    }

    /// Answer and collect the full text.
    pub async fn answer(
        self: Arc<Self>,
        session_id: SessionId,
        question: String,
    ) -> Result<String, ChainError> {
        let mut stream = self.stream_answer(session_id, question);
        let mut answer = String::new();
        while let Some(fragment) = stream.next().await {
            answer.push_str(&fragment?);
        }
        Ok(answer)
    }

    /// Snapshot of a session's history; empty for an unseen id.
    pub async fn history(&self, session_id: &SessionId) -> SessionHistory {
        match self.sessions.get(session_id) {
            Some(handle) => handle.lock().await.clone(),
            None => SessionHistory::new(),
        }
    }

    /// Start the session over with an empty history. Unseen ids are left
    /// alone.
    pub async fn clear(&self, session_id: &SessionId) {
        if let Some(handle) = self.sessions.get(session_id) {
            handle.lock().await.clear();
            info!(session_id = %session_id, "Cleared chat session");
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::store::InMemorySessionStore;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::rag::composer::ComposerSettings;
    use crate::rag::rewriter::SynonymRewriter;
    use crate::retrieval::box_embedder::BoxEmbedder;
    use crate::retrieval::index::BoxDocumentIndex;
    use crate::testing::{RecordingEmbedder, RecordingIndex, ScriptedProvider, tuition_notice};
    use schoolcatch_types::chat::TurnRole;
    use schoolcatch_types::config::default_rewrite_rules;
    use schoolcatch_types::term::AcademicTerm;

    const TUITION_ANSWER: [&str; 3] = [
        "2학기 등록금 납부 기간은 ",
        "2024년 8월 23일 ~ 8월 30일입니다. ",
        "[원문](https://www.hansung.ac.kr/hansung/8385/subview.do?notice=262698)",
    ];

    fn chain_with(provider: ScriptedProvider, index: RecordingIndex) -> Arc<ConversationalRagChain> {
        chain_with_embedder(provider, RecordingEmbedder::default(), index)
    }

    fn chain_with_embedder(
        provider: ScriptedProvider,
        embedder: RecordingEmbedder,
        index: RecordingIndex,
    ) -> Arc<ConversationalRagChain> {
        let provider = BoxLlmProvider::new(provider);
        let rewriter = QueryRewriter::Synonym(SynonymRewriter::new(&default_rewrite_rules()).unwrap());
        let retriever = HistoryAwareRetriever::new(
            provider.clone(),
            BoxEmbedder::new(embedder),
            BoxDocumentIndex::new(index),
            "gpt-4o-mini",
        );
        let composer = AnswerComposer::new(
            provider,
            ComposerSettings {
                model: "gpt-4o-mini".to_string(),
                max_tokens: 1024,
                temperature: None,
                term: AcademicTerm::default(),
            },
        );
        Arc::new(ConversationalRagChain::new(
            rewriter,
            retriever,
            composer,
            Arc::new(InMemorySessionStore::new()),
        ))
    }

    #[tokio::test]
    async fn test_first_question_streams_answer_and_records_exchange() {
        let chain = chain_with(
            ScriptedProvider::new(&TUITION_ANSWER),
            RecordingIndex::with_documents(vec![tuition_notice()]),
        );
        let session = SessionId::new("s1");

        let fragments: Vec<String> = Arc::clone(&chain)
            .stream_answer(session.clone(), "2학기 등록금 납부 기간이 언제야?".to_string())
            .map(|f| f.unwrap())
            .collect()
            .await;

        let answer = fragments.concat();
        assert!(answer.contains("8월 23일 ~ 8월 30일"));
        assert!(answer.contains("https://www.hansung.ac.kr/"));

        let history = chain.history(&session).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, TurnRole::User);
        assert_eq!(history.turns()[1].content, answer);
    }

    #[tokio::test]
    async fn test_follow_up_searches_with_earlier_topic() {
        let provider = ScriptedProvider::new(&["9월 2일부터 13일까지입니다."])
            .with_completion("장학금 신청 기간은 언제인가요?");
        let embedder = RecordingEmbedder::default();
        let texts = embedder.texts();
        let chain = chain_with_embedder(provider, embedder, RecordingIndex::default());
        let session = SessionId::new("s1");

        // Seed with a completed exchange so the follow-up is reformulated.
        chain
            .sessions
            .get_or_create(&session)
            .lock()
            .await
            .push_exchange("장학금 종류 알려줘", "성적우수 장학금이 있습니다.");

        Arc::clone(&chain)
            .answer(session.clone(), "그럼 신청 기간은?".to_string())
            .await
            .unwrap();

        let texts = texts.lock().unwrap();
        assert!(texts.last().unwrap().contains("장학금"));
    }

    #[tokio::test]
    async fn test_history_has_two_turns_per_interaction() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let session = SessionId::new("s1");
        for question in ["첫 질문", "두번째 질문", "세번째 질문"] {
            Arc::clone(&chain)
                .answer(session.clone(), question.to_string())
                .await
                .unwrap();
        }
        let history = chain.history(&session).await;
        assert_eq!(history.len(), 6);
        assert_eq!(history.turns()[4].content, "세번째 질문");
    }

    #[tokio::test]
    async fn test_recorded_question_is_rewritten() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let session = SessionId::new("s1");
        Arc::clone(&chain)
            .answer(session.clone(), "재학생 장학금".to_string())
            .await
            .unwrap();
        assert_eq!(chain.history(&session).await.turns()[0].content, "학생 장학금");
    }

    #[tokio::test]
    async fn test_zero_documents_still_answers() {
        let provider = ScriptedProvider::new(&["관련 공지를 찾을 수 없습니다."]);
        let requests = provider.requests();
        let chain = chain_with(provider, RecordingIndex::default());

        let answer = Arc::clone(&chain)
            .answer(SessionId::new("s1"), "학식 메뉴 알려줘".to_string())
            .await
            .unwrap();

        assert!(!answer.is_empty());
        let requests = requests.lock().unwrap();
        let system = requests[0].system.as_deref().unwrap();
        assert!(system.contains(crate::rag::prompt::NO_DOCUMENTS_MARKER));
    }

    #[tokio::test]
    async fn test_retrieval_failure_is_reported_and_not_recorded() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::failing());
        let session = SessionId::new("s1");

        let err = Arc::clone(&chain)
            .answer(session.clone(), "공지".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::Retrieval(_)));
        assert!(chain.history(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_mid_stream_is_not_recorded() {
        let chain = chain_with(
            ScriptedProvider::new(&["부분 ", "응답"]).failing_stream_after(1),
            RecordingIndex::default(),
        );
        let session = SessionId::new("s1");

        let items: Vec<Result<String, ChainError>> = Arc::clone(&chain)
            .stream_answer(session.clone(), "질문".to_string())
            .collect()
            .await;

        assert_eq!(items[0].as_ref().unwrap(), "부분 ");
        assert!(matches!(items.last(), Some(Err(ChainError::Generation(_)))));
        assert!(chain.history(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_stream_is_not_recorded() {
        let chain = chain_with(ScriptedProvider::new(&["하나 ", "둘 ", "셋"]), RecordingIndex::default());
        let session = SessionId::new("s1");

        let mut stream = Arc::clone(&chain).stream_answer(session.clone(), "질문".to_string());
        assert_eq!(stream.next().await.unwrap().unwrap(), "하나 ");
        drop(stream);

        assert!(chain.history(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let err = Arc::clone(&chain)
            .answer(SessionId::new("s1"), "   ".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::EmptyQuestion));
        assert_eq!(chain.session_count(), 0);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let a = SessionId::new("a");
        let b = SessionId::new("b");
        Arc::clone(&chain).answer(a.clone(), "질문".to_string()).await.unwrap();

        assert_eq!(chain.history(&a).await.len(), 2);
        assert!(chain.history(&b).await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_interactions_keep_pairs_intact() {
        let chain = chain_with(ScriptedProvider::new(&["답", "변"]), RecordingIndex::default());
        let session = SessionId::new("shared");

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let chain = Arc::clone(&chain);
                let session = session.clone();
                tokio::spawn(async move { chain.answer(session, format!("질문 {i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let history = chain.history(&session).await;
        assert_eq!(history.len(), 16);
        for pair in history.turns().chunks(2) {
            assert_eq!(pair[0].role, TurnRole::User);
            assert_eq!(pair[1].role, TurnRole::Assistant);
            assert_eq!(pair[1].content, "답변");
        }
    }

    #[tokio::test]
    async fn test_clear_resets_history() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let session = SessionId::new("s1");
        Arc::clone(&chain).answer(session.clone(), "질문".to_string()).await.unwrap();
        chain.clear(&session).await;
        assert!(chain.history(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_reading_unseen_session_does_not_create_it() {
        let chain = chain_with(ScriptedProvider::new(&["답변"]), RecordingIndex::default());
        let session = SessionId::new("never-asked");
        assert!(chain.history(&session).await.is_empty());
        chain.clear(&session).await;
        assert_eq!(chain.session_count(), 0);

        Arc::clone(&chain).answer(session.clone(), "질문".to_string()).await.unwrap();
        assert_eq!(chain.session_count(), 1);
    }
}
