//! `/query`: free-text clinical question, HTML reply tagged with its source.

use serde::{Deserialize, Serialize};

use crate::error::{RequestError, RequestResult};
use crate::net::client::ServiceClient;

pub const QUERY_ROUTE: &str = "query";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub message: String,
    /// Base64 image payload, serialised as `null` when absent
    pub image: Option<String>,
}

impl QueryRequest {
    pub fn new(message: impl Into<String>) -> RequestResult<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(RequestError::EmptyMessage);
        }
        Ok(Self {
            message,
            image: None,
        })
    }
}

/// Where the service drew its answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DataSource {
    #[serde(rename = "LOCAL_DB")]
    LocalDb,
    #[serde(rename = "HYBRID_SCAN")]
    HybridScan,
    #[serde(rename = "LIVE_WEB")]
    LiveWeb,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(other)]
    Unknown,
}

impl DataSource {
    pub fn label(self) -> &'static str {
        match self {
            DataSource::LocalDb => "Local DB",
            DataSource::HybridScan => "Hybrid scan",
            DataSource::LiveWeb => "Live web",
            DataSource::Error => "Error",
            DataSource::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    /// HTML fragment
    pub reply: String,
    pub source: DataSource,
}

#[derive(Clone)]
pub struct QueryClient {
    client: ServiceClient,
}

impl QueryClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn ask(&self, request: &QueryRequest) -> RequestResult<QueryResponse> {
        let response: QueryResponse = self.client.post_json(QUERY_ROUTE, request)?;
        log::info!(
            "Query answered from {} ({} bytes)",
            response.source.label(),
            response.reply.len()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::TestServer;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn empty_message_rejected() {
        assert!(matches!(
            QueryRequest::new("   "),
            Err(RequestError::EmptyMessage)
        ));
    }

    #[test]
    fn request_serializes_null_image() {
        let req = QueryRequest::new("what is psoriasis").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"message": "what is psoriasis", "image": null})
        );
    }

    #[test]
    fn source_tags_decode() {
        let cases = [
            ("LOCAL_DB", DataSource::LocalDb),
            ("HYBRID_SCAN", DataSource::HybridScan),
            ("LIVE_WEB", DataSource::LiveWeb),
            ("ERROR", DataSource::Error),
            ("SOMETHING_NEW", DataSource::Unknown),
        ];
        for (tag, expected) in cases {
            let r: QueryResponse =
                serde_json::from_value(json!({"reply": "", "source": tag})).unwrap();
            assert_eq!(r.source, expected, "tag {}", tag);
        }
    }

    #[test]
    fn ask_round_trip() {
        let server = TestServer::once(
            200,
            r#"{"reply":"Neural link active. Provide English clinical query.","source":"LOCAL_DB"}"#,
        );
        let client = QueryClient::new(ServiceClient::new(&server.base, Duration::from_secs(5)).unwrap());
        let reply = client.ask(&QueryRequest::new("hello").unwrap()).unwrap();
        assert_eq!(reply.source, DataSource::LocalDb);
        assert!(reply.reply.starts_with("Neural link active"));

        let request = server.next_request();
        assert!(request.head.starts_with("POST /query "));
        assert_eq!(request.json()["message"], "hello");
    }
}
