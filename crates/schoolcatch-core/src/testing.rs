//! Hand-written fakes for the core ports, shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use schoolcatch_types::error::RetrievalError;
use schoolcatch_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities,
    StopReason, StreamEvent, Usage,
};
use schoolcatch_types::notice::NoticeDocument;

use crate::llm::provider::{LlmEventStream, LlmProvider};
use crate::retrieval::embedder::Embedder;
use crate::retrieval::index::DocumentIndex;

/// LLM provider that replays scripted completions and streams fixed fragments.
///
/// `complete` pops the next scripted reply; with none left it echoes the last
/// user message, i.e. "return the question as is".
pub struct ScriptedProvider {
    capabilities: ProviderCapabilities,
    completions: Mutex<VecDeque<Result<String, LlmError>>>,
    fragments: Vec<String>,
    fail_stream_after: Option<usize>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            capabilities: ProviderCapabilities {
                streaming: true,
                max_context_tokens: 128_000,
                max_output_tokens: 16_384,
            },
            completions: Mutex::new(VecDeque::new()),
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            fail_stream_after: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_completion(self, reply: &str) -> Self {
        self.completions
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
        self
    }

    pub fn with_failed_completion(self) -> Self {
        self.completions
            .lock()
            .unwrap()
            .push_back(Err(LlmError::Provider {
                message: "completion unavailable".to_string(),
            }));
        self
    }

    /// Emit `n` fragments, then fail the stream.
    pub fn failing_stream_after(mut self, n: usize) -> Self {
        self.fail_stream_after = Some(n);
        self
    }

    /// Every request this provider has received, in order.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.completions.lock().unwrap().pop_front();
        let content = match scripted {
            Some(reply) => reply?,
            None => request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::User)
                .map(|m| m.content.clone())
                .unwrap_or_default(),
        };
        Ok(CompletionResponse {
            id: "scripted-1".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(&self, request: CompletionRequest) -> LlmEventStream {
        self.requests.lock().unwrap().push(request);
        let fragments = self.fragments.clone();
        let fail_after = self.fail_stream_after;
        Box::pin(async_stream::stream! {
            yield Ok(StreamEvent::Connected);
            for (i, text) in fragments.into_iter().enumerate() {
                if fail_after == Some(i) {
                    yield Err(LlmError::Stream("connection reset".to_string()));
                    return;
                }
                yield Ok(StreamEvent::TextDelta { text });
            }
            if fail_after.is_some() {
                yield Err(LlmError::Stream("connection reset".to_string()));
                return;
            }
            yield Ok(StreamEvent::MessageDelta { stop_reason: StopReason::EndTurn });
            yield Ok(StreamEvent::Usage(Usage { input_tokens: 10, output_tokens: 5 }));
            yield Ok(StreamEvent::Done);
        })
    }
}

/// Embedder returning a constant vector and recording every text it embeds.
#[derive(Default)]
pub struct RecordingEmbedder {
    texts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingEmbedder {
    pub fn failing() -> Self {
        Self {
            texts: Arc::default(),
            fail: true,
        }
    }

    pub fn texts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.texts)
    }
}

impl Embedder for RecordingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if self.fail {
            return Err(RetrievalError::Embedding("embedding service down".to_string()));
        }
        self.texts.lock().unwrap().extend(texts.iter().cloned());
        Ok(texts.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

/// Index returning a fixed document list and recording requested `top_k`s.
#[derive(Default)]
pub struct RecordingIndex {
    documents: Vec<NoticeDocument>,
    top_ks: Arc<Mutex<Vec<usize>>>,
    fail: bool,
}

impl RecordingIndex {
    pub fn with_documents(documents: Vec<NoticeDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn top_ks(&self) -> Arc<Mutex<Vec<usize>>> {
        Arc::clone(&self.top_ks)
    }
}

impl DocumentIndex for RecordingIndex {
    async fn search(
        &self,
        _query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<NoticeDocument>, RetrievalError> {
        if self.fail {
            return Err(RetrievalError::Index("index unavailable".to_string()));
        }
        self.top_ks.lock().unwrap().push(top_k);
        Ok(self.documents.clone())
    }
}

/// A tuition notice document.
pub fn tuition_notice() -> NoticeDocument {
    NoticeDocument {
        content: "Title: 2024학년도 2학기 등록금 납부 안내 date: 2024-08-16 \
                  일반 등록 기간은 2024년 8월 23일(금) ~ 8월 30일(금)입니다."
            .to_string(),
        source: Some("https://www.hansung.ac.kr/hansung/8385/subview.do?notice=262698".to_string()),
        title: Some("2024학년도 2학기 등록금 납부 안내".to_string()),
        date: Some("2024-08-16".to_string()),
        score: 0.91,
    }
}

pub fn notice(title: &str, date: &str) -> NoticeDocument {
    NoticeDocument {
        content: format!("{title} 관련 안내입니다."),
        source: Some(format!("https://www.hansung.ac.kr/notice/{date}")),
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        score: 0.5,
    }
}
