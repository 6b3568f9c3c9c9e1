//! REST API types.
//!
//! `POST /api/ern` answers with the raw document; the preview endpoint wraps
//! the same result in [`GenerateResponse`] so a UI can show the summary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::DealProfile;
use crate::pipeline::{GenerateOptions, GenerationResult};

/// Query string accepted by the generation endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQuery {
    /// `full` or `reduced`; falls back to the server configuration.
    pub profile: Option<DealProfile>,
}

impl From<GenerateQuery> for GenerateOptions {
    fn from(query: GenerateQuery) -> Self {
        GenerateOptions { profile: query.profile }
    }
}

/// Response sent to the frontend by the preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Always "ready" on success
    pub status: String,

    pub message_id: String,
    pub release_reference: String,
    pub track_count: usize,
    pub deal_count: usize,
    pub has_image: bool,

    /// Serialized ERN document
    pub xml: String,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        GenerateResponse {
            job_id: Uuid::new_v4().to_string(),
            status: "ready".to_string(),
            message_id: result.message_id,
            release_reference: result.release_reference,
            track_count: result.track_count,
            deal_count: result.deal_count,
            has_image: result.has_image,
            xml: result.xml,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "xml": null
    })
}
