//! Query rewriting: normalize colloquial terms before retrieval.
//!
//! The synonym table maps expressions that refer to a person ("사람", "학우",
//! ...) to the canonical term used in notices ("학생"). Two rewriters exist:
//! a deterministic table lookup, and an LLM-driven variant that is given the
//! same table as a dictionary and falls back to the table lookup on failure.

use tracing::{debug, warn};

use schoolcatch_types::config::{RewriteRule, RewriterConfig, RewriterMode};
use schoolcatch_types::error::RewriteRuleError;
use schoolcatch_types::llm::{CompletionRequest, Message};

use crate::llm::box_provider::BoxLlmProvider;

/// Deterministic synonym-table rewriter.
#[derive(Debug, Clone)]
pub struct SynonymRewriter {
    /// (pattern, replacement), longest pattern first.
    pairs: Vec<(String, String)>,
}

impl SynonymRewriter {
    /// Compile a rule table.
    ///
    /// Rejects empty patterns, and replacements that contain any pattern of
    /// the table (they would be rewritten again forever).
    pub fn new(rules: &[RewriteRule]) -> Result<Self, RewriteRuleError> {
        let mut pairs = Vec::new();
        for rule in rules {
            for pattern in &rule.patterns {
                if pattern.is_empty() {
                    return Err(RewriteRuleError::EmptyPattern);
                }
                pairs.push((pattern.clone(), rule.replacement.clone()));
            }
        }

        for (_, replacement) in &pairs {
            if let Some((pattern, _)) = pairs.iter().find(|(p, _)| replacement.contains(p.as_str())) {
                return Err(RewriteRuleError::SelfReferential {
                    replacement: replacement.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        // Longest first so "재학생" is not half-eaten by a shorter pattern.
        pairs.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        pairs.dedup_by(|a, b| a.0 == b.0);

        Ok(Self { pairs })
    }

    /// Rewrite a question. Text without any pattern is returned unchanged.
    ///
    /// A replacement can be glued to surrounding text into a new pattern
    /// occurrence ("대재학생" -> "대학생"), so passes repeat until nothing
    /// changes. Each glued occurrence consumes at least one character of the
    /// input, which bounds the passes by its length.
    pub fn rewrite(&self, question: &str) -> String {
        let mut rewritten = question.to_string();
        for _ in 0..=question.chars().count() {
            let mut changed = false;
            for (pattern, replacement) in &self.pairs {
                if rewritten.contains(pattern.as_str()) {
                    rewritten = rewritten.replace(pattern.as_str(), replacement);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        rewritten
    }

    /// The table in dictionary form, e.g. `["사람, 학우 -> 학생"]`.
    pub fn dictionary(&self) -> Vec<String> {
        let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
        for (pattern, replacement) in &self.pairs {
            match grouped.iter_mut().find(|(r, _)| *r == replacement.as_str()) {
                Some((_, patterns)) => patterns.push(pattern.as_str()),
                None => grouped.push((replacement.as_str(), vec![pattern.as_str()])),
            }
        }
        grouped
            .into_iter()
            .map(|(replacement, patterns)| format!("{} -> {replacement}", patterns.join(", ")))
            .collect()
    }
}

/// LLM-driven rewriter that applies the synonym table as a dictionary.
///
/// The LLM output is passed through the table once more, so table terms never
/// survive even when the model ignores the dictionary. Provider failures fall
/// back to the table alone.
pub struct LlmDictionaryRewriter {
    provider: BoxLlmProvider,
    table: SynonymRewriter,
    model: String,
}

impl LlmDictionaryRewriter {
    pub fn new(provider: BoxLlmProvider, table: SynonymRewriter, model: impl Into<String>) -> Self {
        Self {
            provider,
            table,
            model: model.into(),
        }
    }

    fn build_request(&self, question: &str) -> CompletionRequest {
        let prompt = format!(
            "사용자의 질문을 보고, 우리의 사전을 참고해서 사용자의 질문을 변경해주세요.\n\
             변경할 필요가 없다고 판단되면 질문을 그대로 두고, 질문만 리턴해주세요.\n\
             사전: {}\n\
             질문: {question}",
            self.table.dictionary().join("; ")
        );
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            system: None,
            max_tokens: 256,
            temperature: Some(0.0),
            stream: false,
        }
    }

    pub async fn rewrite(&self, question: &str) -> String {
        let request = self.build_request(question);
        match self.provider.complete(&request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                self.table.rewrite(response.content.trim())
            }
            Ok(_) => {
                warn!("Dictionary rewrite returned empty text, using synonym table");
                self.table.rewrite(question)
            }
            Err(e) => {
                warn!(error = %e, "Dictionary rewrite failed, using synonym table");
                self.table.rewrite(question)
            }
        }
    }
}

/// The rewriter selected by configuration.
pub enum QueryRewriter {
    Synonym(SynonymRewriter),
    Llm(LlmDictionaryRewriter),
}

impl QueryRewriter {
    /// Build the configured rewriter. `provider` and `model` are only used in
    /// LLM mode.
    pub fn from_config(
        config: &RewriterConfig,
        provider: BoxLlmProvider,
        model: &str,
    ) -> Result<Self, RewriteRuleError> {
        let table = SynonymRewriter::new(&config.rules)?;
        Ok(match config.mode {
            RewriterMode::Synonym => QueryRewriter::Synonym(table),
            RewriterMode::Llm => QueryRewriter::Llm(LlmDictionaryRewriter::new(provider, table, model)),
        })
    }

    /// Rewrite a question. Never fails.
    pub async fn rewrite(&self, question: &str) -> String {
        let rewritten = match self {
            QueryRewriter::Synonym(table) => table.rewrite(question),
            QueryRewriter::Llm(llm) => llm.rewrite(question).await,
        };
        if rewritten != question {
            debug!(original = question, rewritten = %rewritten, "Rewrote question");
        }
        rewritten
    }
}
