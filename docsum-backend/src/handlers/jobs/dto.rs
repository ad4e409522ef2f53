use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /summarize`. Omitted fields fall back to the configured defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub summary_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResponse {
    pub job_id: Uuid,
    pub status: &'static str,
}
