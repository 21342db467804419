//! Similarity search over the externally owned notice index.

use std::future::Future;
use std::pin::Pin;

use schoolcatch_types::error::RetrievalError;
use schoolcatch_types::notice::NoticeDocument;

/// Read-only similarity search over stored notice documents.
pub trait DocumentIndex: Send + Sync {
    /// Return at most `top_k` documents ranked by similarity, closest first.
    fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> impl Future<Output = Result<Vec<NoticeDocument>, RetrievalError>> + Send;
}

/// Object-safe version of [`DocumentIndex`].
pub trait DocumentIndexDyn: Send + Sync {
    fn search_boxed<'a>(
        &'a self,
        query_embedding: &'a [f32],
        top_k: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<NoticeDocument>, RetrievalError>> + Send + 'a>>;
}

impl<T: DocumentIndex> DocumentIndexDyn for T {
    fn search_boxed<'a>(
        &'a self,
        query_embedding: &'a [f32],
        top_k: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<NoticeDocument>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(self.search(query_embedding, top_k))
    }
}

/// Type-erased document index.
pub struct BoxDocumentIndex {
    inner: Box<dyn DocumentIndexDyn + Send + Sync>,
}

impl BoxDocumentIndex {
    pub fn new<T: DocumentIndex + 'static>(index: T) -> Self {
        Self {
            inner: Box::new(index),
        }
    }

    pub async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<NoticeDocument>, RetrievalError> {
        self.inner.search_boxed(query_embedding, top_k).await
    }
}
