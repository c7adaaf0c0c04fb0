//! `/analyze`: biometric payload in, diagnosis and tips out.

use serde::{Deserialize, Serialize};

use crate::error::RequestResult;
use crate::net::client::ServiceClient;

pub const ANALYZE_ROUTE: &str = "analyze";

/// Patient metrics sent to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientMetrics {
    #[serde(default = "default_scalp_health")]
    pub scalp_health: String,
    #[serde(default = "default_vision_clarity")]
    pub vision_clarity: String,
}

fn default_scalp_health() -> String {
    "dry".to_string()
}

fn default_vision_clarity() -> String {
    "blurred".to_string()
}

impl Default for PatientMetrics {
    fn default() -> Self {
        Self {
            scalp_health: default_scalp_health(),
            vision_clarity: default_vision_clarity(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub patient_metrics: PatientMetrics,
}

impl AnalyzeRequest {
    pub fn new(patient_metrics: PatientMetrics) -> Self {
        Self { patient_metrics }
    }
}

/// Analyzer reply. Only the shape is checked; the values are shown as-is.
///
/// `tips` may be absent. The diagnosis is still shown and the previous tips
/// stay on screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyzeResponse {
    pub diagnosis: String,
    #[serde(default)]
    pub tips: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct DiagnosisClient {
    client: ServiceClient,
}

impl DiagnosisClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn analyze(&self, request: &AnalyzeRequest) -> RequestResult<AnalyzeResponse> {
        let started = std::time::Instant::now();
        let response: AnalyzeResponse = self.client.post_json(ANALYZE_ROUTE, request)?;
        log::info!(
            "Analysis complete in {:.0} ms: {} tip(s)",
            started.elapsed().as_secs_f64() * 1000.0,
            response.tips.as_ref().map_or(0, Vec::len)
        );
        Ok(response)
    }
}
