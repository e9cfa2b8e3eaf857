//! # MindMirror Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field validation is expressed via `validator` derive macros

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::analytics::{
    Baseline, BurnoutAssessment, ForecastOutcome, Simulation, TemporalPatterns,
};
use crate::models::entry::Entry;

// ============================================================================
// Entries
// ============================================================================

/// POST /api/entries
///
/// Emotion labels and confidences come from the upstream classifiers.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(length(max = 10000, message = "Journal text must be under 10000 characters"))]
    pub journal_text: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Emotion label must be 1-64 characters"))]
    pub text_emotion: Option<String>,

    #[validate(range(min = 0.0, max = 1.0, message = "Confidence must be within 0-1"))]
    pub text_confidence: Option<f64>,

    #[validate(length(min = 1, max = 64, message = "Emotion label must be 1-64 characters"))]
    pub audio_emotion: Option<String>,

    #[validate(range(min = 0.0, max = 1.0, message = "Confidence must be within 0-1"))]
    pub audio_confidence: Option<f64>,

    /// Already-resolved label. Derived from the two modalities when absent.
    #[validate(length(min = 1, max = 64, message = "Emotion label must be 1-64 characters"))]
    pub final_emotion: Option<String>,

    /// `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`. Default: now.
    pub timestamp: Option<String>,
}

/// GET /api/entries query params
#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    /// Number of newest entries to return. Default: 5, 0 = all
    pub limit: Option<usize>,
}

/// GET /api/entries response
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<Entry>,
    pub total_count: usize,
}

/// POST /api/entries/backfill response
#[derive(Debug, Serialize)]
pub struct BackfillResponse {
    pub updated: usize,
}

// ============================================================================
// Analytics
// ============================================================================

/// GET /api/analytics
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub baseline: Option<Baseline>,
    pub patterns: Option<TemporalPatterns>,
    pub insights: Vec<String>,
}

/// GET /api/burnout
#[derive(Debug, Serialize)]
pub struct BurnoutResponse {
    pub assessment: BurnoutAssessment,
}

/// GET /api/forecast
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub forecast: ForecastOutcome,
}

/// POST /api/simulate
#[derive(Debug, Deserialize, Validate)]
pub struct SimulateRequest {
    /// Free-text what-if, e.g. "exercise more" or "sleep less"
    #[validate(length(min = 1, max = 500, message = "Scenario must be 1-500 characters"))]
    pub scenario: String,
}

/// POST /api/simulate response
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub simulation: Simulation,
}

// ============================================================================
// Validation helpers
// ============================================================================

impl CreateEntryRequest {
    /// The entry must end up with some emotion label
    pub fn validate_has_emotion(&self) -> Result<(), String> {
        if self.final_emotion.is_none() && self.text_emotion.is_none() && self.audio_emotion.is_none()
        {
            return Err("One of final_emotion, text_emotion or audio_emotion is required".into());
        }
        Ok(())
    }

    /// Explicit label wins; otherwise the higher-confidence modality, with
    /// audio taking ties.
    pub fn resolve_final_emotion(&self) -> Option<String> {
        if let Some(label) = &self.final_emotion {
            return Some(label.clone());
        }

        let text_conf = self.text_confidence.unwrap_or(0.0);
        let audio_conf = self.audio_confidence.unwrap_or(0.0);
        match (&self.text_emotion, &self.audio_emotion) {
            (Some(text), Some(audio)) => {
                Some(if audio_conf >= text_conf { audio } else { text }.clone())
            }
            (Some(text), None) => Some(text.clone()),
            (None, Some(audio)) => Some(audio.clone()),
            (None, None) => None,
        }
    }
}

impl EntryQuery {
    pub fn limit(&self) -> Option<usize> {
        match self.limit {
            None => Some(5),
            Some(0) => None,
            Some(n) => Some(n),
        }
    }
}
