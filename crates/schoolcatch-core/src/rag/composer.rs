//! Streaming answer composition.
//!
//! Message order sent to the provider: system prompt (instructions, term
//! facts, retrieved notices), few-shot examples as user/assistant pairs, the
//! session history, then the question.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use schoolcatch_types::chat::SessionHistory;
use schoolcatch_types::llm::{CompletionRequest, LlmError, Message, StreamEvent};
use schoolcatch_types::notice::{FewShotExample, NoticeDocument};
use schoolcatch_types::term::AcademicTerm;

use crate::llm::box_provider::BoxLlmProvider;

use super::examples::answer_examples;
use super::prompt::SystemPromptBuilder;

/// Answer text fragments in generation order.
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Model parameters and term anchor for answer generation.
#[derive(Debug, Clone)]
pub struct ComposerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub term: AcademicTerm,
}

pub struct AnswerComposer {
    provider: BoxLlmProvider,
    settings: ComposerSettings,
    examples: &'static [FewShotExample],
}

impl AnswerComposer {
    pub fn new(provider: BoxLlmProvider, settings: ComposerSettings) -> Self {
        Self {
            provider,
            settings,
            examples: answer_examples(),
        }
    }

    pub fn build_request(
        &self,
        question: &str,
        history: &SessionHistory,
        documents: &[NoticeDocument],
    ) -> CompletionRequest {
        let mut messages = Vec::with_capacity(self.examples.len() * 2 + history.len() + 1);
        for example in self.examples {
            messages.push(Message::user(example.input.clone()));
            messages.push(Message::assistant(example.answer.clone()));
        }
        messages.extend(history.to_messages());
        messages.push(Message::user(question));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(SystemPromptBuilder::build(self.settings.term, documents)),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            stream: true,
        }
    }

    /// Stream the answer. Only non-empty text deltas are surfaced; the stream
    /// ends at the provider's `Done` event or at the first error.
    pub fn compose(
        &self,
        question: &str,
        history: &SessionHistory,
        documents: &[NoticeDocument],
    ) -> AnswerStream {
        let mut events = self.provider.stream(self.build_request(question, history, documents));
        Box::pin(async_stream::stream! {
            while let Some(event) = events.next().await {
                match event {
                    Ok(StreamEvent::TextDelta { text }) if !text.is_empty() => yield Ok(text),
                    Ok(StreamEvent::Done) => break,
                    Ok(_) => {}
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        })
    }
}
