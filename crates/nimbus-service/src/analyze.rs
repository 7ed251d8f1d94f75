//! Content-analysis pass-through.

use std::sync::Arc;

use tracing::warn;

use nimbus_core::traits::analyze::{AnalyzeRequest, ContentAnalyzer};
use nimbus_entity::{File, FileKind};

/// The analyzer's answer as shown to the user.
///
/// Analysis is fire-and-forget relative to view state: a failure is
/// folded into a displayable outcome and never propagates.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Whether the analyzer produced a result.
    pub success: bool,
    /// The result text, or a display-safe error message.
    pub result: String,
}

/// Bridges files to the opaque [`ContentAnalyzer`] collaborator.
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: Arc<dyn ContentAnalyzer>,
}

impl AnalysisService {
    /// Creates a new analysis service.
    pub fn new(analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Runs `task` (e.g. "summarize", "describe", "keywords") over one
    /// file's content.
    ///
    /// Images are forwarded as their raw base64 payload with the file's
    /// MIME type; everything else is decoded to text first.
    pub async fn analyze_file(&self, file: &File, task: &str) -> AnalysisOutcome {
        let is_image = file.kind() == FileKind::Image;
        let input = if is_image {
            file.content.clone()
        } else {
            match file.decode_content() {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, name = %file.name, "Failed to decode file for analysis");
                    return AnalysisOutcome {
                        success: false,
                        result: "Error decoding content.".to_string(),
                    };
                }
            }
        };

        let request = AnalyzeRequest {
            input,
            task: task.to_string(),
            is_image,
            mime_type: file.mime_type().to_string(),
        };

        match self.analyzer.analyze(request).await {
            Ok(response) if response.result.is_empty() => AnalysisOutcome {
                success: true,
                result: "No result returned.".to_string(),
            },
            Ok(response) => AnalysisOutcome {
                success: true,
                result: response.result,
            },
            Err(err) => {
                warn!(error = %err, name = %file.name, "AI analysis failed");
                AnalysisOutcome {
                    success: false,
                    result: "Error processing content with AI.".to_string(),
                }
            }
        }
    }
}
