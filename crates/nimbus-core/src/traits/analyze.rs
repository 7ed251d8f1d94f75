//! Opaque content-analysis collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A request to analyze one file's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The content to analyze: decoded text, or the raw base64 payload
    /// when `is_image` is set.
    pub input: String,
    /// The analysis task (e.g. "summarize", "describe", "keywords").
    pub task: String,
    /// Whether `input` is an image payload.
    pub is_image: bool,
    /// MIME type of the payload.
    pub mime_type: String,
}

/// The analyzer's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// The analysis result text.
    pub result: String,
}

/// An LLM-backed content analysis capability.
///
/// Nimbus treats this as opaque: it forwards content and a task string,
/// and renders whatever comes back. Failures never reach view state.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync + 'static {
    /// Analyze content according to the given task.
    async fn analyze(&self, request: AnalyzeRequest) -> AppResult<AnalyzeResponse>;
}
