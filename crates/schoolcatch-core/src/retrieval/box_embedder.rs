//! BoxEmbedder -- object-safe dynamic dispatch wrapper for Embedder.
//!
//! Same blanket-impl pattern as `BoxLlmProvider`.

use std::future::Future;
use std::pin::Pin;

use schoolcatch_types::error::RetrievalError;

use super::embedder::Embedder;

/// Object-safe version of [`Embedder`] with boxed futures.
pub trait EmbedderDyn: Send + Sync {
    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RetrievalError>> + Send + 'a>>;

    fn model_name_dyn(&self) -> &str;
}

impl<T: Embedder> EmbedderDyn for T {
    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RetrievalError>> + Send + 'a>> {
        Box::pin(self.embed(texts))
    }

    fn model_name_dyn(&self) -> &str {
        self.model_name()
    }
}

/// Type-erased embedder for runtime selection.
pub struct BoxEmbedder {
    inner: Box<dyn EmbedderDyn + Send + Sync>,
}

impl BoxEmbedder {
    pub fn new<T: Embedder + 'static>(embedder: T) -> Self {
        Self {
            inner: Box::new(embedder),
        }
    }

    /// Embed one or more texts into vectors.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        self.inner.embed_boxed(texts).await
    }

    /// Embed a single query text.
    ///
    /// An empty response from the service is reported as an embedding error.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Embedding("empty embedding response".to_string()))
    }

    pub fn model_name(&self) -> &str {
        self.inner.model_name_dyn()
    }
}
