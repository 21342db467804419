//! Pinecone similarity search (`POST {index_host}/query`).
//!
//! The index is populated by an external crawler; this client only queries
//! it. Each match's metadata carries the document text under the configured
//! text key plus `source`, `title` and `date`.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use schoolcatch_core::retrieval::index::DocumentIndex;
use schoolcatch_types::config::IndexConfig;
use schoolcatch_types::error::RetrievalError;
use schoolcatch_types::notice::NoticeDocument;

const API_VERSION: &str = "2024-07";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// Read-only client for one Pinecone index.
///
/// Does NOT derive Debug: it holds the API key.
pub struct PineconeIndex {
    client: Client,
    host: String,
    api_key: SecretString,
    namespace: Option<String>,
    text_key: String,
}

impl PineconeIndex {
    pub fn new(config: &IndexConfig, api_key: SecretString) -> Self {
        let host = config.host.trim_end_matches('/');
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        Self {
            client: Client::new(),
            host,
            api_key,
            namespace: config.namespace.clone().filter(|ns| !ns.is_empty()),
            text_key: config.text_key.clone(),
        }
    }

    fn to_document(&self, m: QueryMatch) -> Option<NoticeDocument> {
        let metadata = m.metadata?;
        let content = metadata.get(&self.text_key)?.as_str()?.to_string();
        Some(NoticeDocument {
            content,
            source: metadata_string(&metadata, "source"),
            title: metadata_string(&metadata, "title"),
            date: metadata_string(&metadata, "date"),
            score: m.score,
        })
    }
}

/// Metadata values may be strings or numbers (e.g. a date stored as 20240816).
fn metadata_string(metadata: &Map<String, Value>, key: &str) -> Option<String> {
    match metadata.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl DocumentIndex for PineconeIndex {
    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<NoticeDocument>, RetrievalError> {
        let body = QueryRequest {
            vector: query_embedding,
            top_k,
            include_metadata: true,
            namespace: self.namespace.as_deref(),
        };

        let resp = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", self.api_key.expose_secret())
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::Index(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %text, "Pinecone query error response");
            return Err(RetrievalError::Index(format!("HTTP {status}: {text}")));
        }

        let response: QueryResponse = resp
            .json()
            .await
            .map_err(|e| RetrievalError::Index(format!("failed to parse response: {e}")))?;

        let total = response.matches.len();
        let documents: Vec<NoticeDocument> = response
            .matches
            .into_iter()
            .filter_map(|m| self.to_document(m))
            .take(top_k)
            .collect();
        if documents.len() < total {
            tracing::debug!(
                skipped = total - documents.len(),
                text_key = %self.text_key,
                "Skipped matches without document text"
            );
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_stub;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn index(host: String, namespace: Option<&str>) -> PineconeIndex {
        PineconeIndex::new(
            &IndexConfig {
                host,
                namespace: namespace.map(String::from),
                text_key: "text".to_string(),
            },
            SecretString::from("pc-test".to_string()),
        )
    }

    #[test]
    fn test_host_without_scheme_gets_https() {
        let index = index("crawled-db-ver2-abc.svc.pinecone.io/".to_string(), None);
        assert_eq!(index.host, "https://crawled-db-ver2-abc.svc.pinecone.io");
    }

    #[tokio::test]
    async fn test_search_sends_query_and_maps_metadata() {
        let router = Router::new().route(
            "/query",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["api-key"], "pc-test");
                assert_eq!(body["topK"], 3);
                assert_eq!(body["includeMetadata"], true);
                assert_eq!(body["namespace"], "notices");
                Json(json!({
                    "matches": [
                        {
                            "id": "a",
                            "score": 0.92,
                            "metadata": {
                                "text": "일반 등록 기간은 8월 23일 ~ 8월 30일입니다.",
                                "source": "https://www.hansung.ac.kr/notice/1",
                                "title": "2학기 등록금 납부 안내",
                                "date": "2024-08-16"
                            }
                        },
                        {
                            "id": "b",
                            "score": 0.81,
                            "metadata": {"text": "학위수여식 안내", "date": 20240820}
                        },
                        {"id": "c", "score": 0.5, "metadata": {"title": "no text"}}
                    ]
                }))
            }),
        );
        let host = serve_stub(router).await;

        let documents = index(host, Some("notices")).search(&[0.1, 0.2], 3).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].title.as_deref(), Some("2학기 등록금 납부 안내"));
        assert_eq!(documents[0].source.as_deref(), Some("https://www.hansung.ac.kr/notice/1"));
        assert!((documents[0].score - 0.92).abs() < 1e-6);
        assert_eq!(documents[1].date.as_deref(), Some("20240820"));
        assert!(documents[1].source.is_none());
    }

    #[tokio::test]
    async fn test_search_omits_empty_namespace() {
        let router = Router::new().route(
            "/query",
            post(|Json(body): Json<Value>| async move {
                assert!(body.get("namespace").is_none());
                Json(json!({"matches": []}))
            }),
        );
        let host = serve_stub(router).await;

        let documents = index(host, Some("")).search(&[0.1], 3).await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_search_http_error_is_index_error() {
        let router = Router::new().route(
            "/query",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "index unavailable") }),
        );
        let host = serve_stub(router).await;

        let err = index(host, None).search(&[0.1], 3).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Index(ref msg) if msg.contains("503")));
    }
}
