use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Analysis Report ============

/// One slice of the recommended investment allocation.
///
/// Percentages come straight from the backend and are not guaranteed to sum
/// to 100, or even to be positive. Renderers skip non-positive slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Investment instrument label (e.g. "Public Provident Fund (PPF)").
    pub instrument: String,
    /// Recommended share of the portfolio, in percent.
    pub percentage: f64,
}

/// A backend-computed analysis of a user's tax situation.
///
/// Shaped as returned by the FinSight backend; the client treats it as
/// read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Opaque identifier assigned by the backend.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Tax currently owed, in rupees.
    pub current_tax: f64,
    /// Savings the recommendations would unlock, in rupees.
    pub potential_savings: f64,
    /// Recommended investment allocation, in backend order.
    #[serde(default)]
    pub investment_allocation: Vec<Allocation>,
    /// Original uploaded filename.
    #[serde(default)]
    pub document_name: String,
    /// Creation timestamp as sent on the wire. The backend promises ISO-8601
    /// but does not always deliver, so the raw string is kept and parsed on
    /// demand via [`AnalysisReport::created_date`].
    #[serde(default)]
    pub created_at: Option<String>,
    /// Free-text analysis, opaque to the client. Older backend versions
    /// called this field `summary`.
    #[serde(alias = "summary", default)]
    pub ai_analysis: Option<String>,
}

impl AnalysisReport {
    /// Creation timestamp, if the wire value parses as ISO-8601.
    pub fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Potential savings as a share of the current tax, in percent.
    /// `None` when the current tax is zero or negative.
    pub fn savings_share(&self) -> Option<f64> {
        if self.current_tax > 0.0 {
            Some(self.potential_savings / self.current_tax * 100.0)
        } else {
            None
        }
    }

    /// The documented demo report.
    ///
    /// Only ever shown when explicitly requested (`finsight latest --sample`);
    /// a failed fetch surfaces its error instead of this object.
    pub fn sample() -> Self {
        let slice = |instrument: &str| Allocation {
            instrument: instrument.to_string(),
            percentage: 20.0,
        };
        Self {
            id: "6888470fff417cef8ae33324".to_string(),
            current_tax: 1_080_000.0,
            potential_savings: 46_878.0,
            investment_allocation: vec![
                slice("Fixed Deposits (FD)"),
                slice("Debt Mutual Funds"),
                slice("Public Provident Fund (PPF)"),
                slice("Equity Linked Savings Scheme (ELSS)"),
                slice("National Savings Certificate (NSC)"),
            ],
            document_name: "income_sources_sample_fixed.pdf".to_string(),
            created_at: Some("2025-07-29T03:59:11.772Z".to_string()),
            ai_analysis: Some("Sample analysis data...".to_string()),
        }
    }
}

// ============ Upload Response Normalization ============

/// Legacy upload response carrying only a free-text suggestion.
#[derive(Debug, Deserialize)]
struct SuggestionBody {
    suggestion: String,
}

/// Normalized result of a document upload.
///
/// The backend has shipped two response shapes over time: a full analysis
/// report, and a bare `{ "suggestion": "..." }` object. Both are reconciled
/// here, at the network boundary, so nothing downstream destructures raw
/// JSON.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// Full analysis report.
    Report(AnalysisReport),
    /// Free-text suggestion only (legacy backend).
    Suggestion(String),
}

impl UploadOutcome {
    /// Normalizes a raw upload response body.
    ///
    /// A body matching neither known shape is an [`AppError::ApiError`],
    /// never a panic.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AppError> {
        if let Ok(report) = serde_json::from_value::<AnalysisReport>(value.clone()) {
            return Ok(UploadOutcome::Report(report));
        }
        if let Ok(body) = serde_json::from_value::<SuggestionBody>(value.clone()) {
            return Ok(UploadOutcome::Suggestion(body.suggestion));
        }
        tracing::warn!("Unexpected upload response shape: {}", value);
        Err(AppError::ApiError(
            "upload response matches no known shape".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_value() -> serde_json::Value {
        json!({
            "_id": "abc123",
            "currentTax": 240000,
            "potentialSavings": 78000,
            "investmentAllocation": [
                {"instrument": "PPF", "percentage": 60},
                {"instrument": "ELSS", "percentage": 40}
            ],
            "documentName": "form16.pdf",
            "createdAt": "2025-07-29T03:59:11.772Z",
            "aiAnalysis": "Invest more in 80C instruments."
        })
    }

    #[test]
    fn report_shape_normalizes_to_report() {
        let outcome = UploadOutcome::from_value(report_value()).unwrap();
        match outcome {
            UploadOutcome::Report(report) => {
                assert_eq!(report.id, "abc123");
                assert_eq!(report.current_tax, 240000.0);
                assert_eq!(report.investment_allocation.len(), 2);
            }
            other => panic!("expected report, got {:?}", other),
        }
    }

    #[test]
    fn suggestion_shape_normalizes_to_suggestion() {
        let outcome =
            UploadOutcome::from_value(json!({"suggestion": "Max out your PPF"})).unwrap();
        match outcome {
            UploadOutcome::Suggestion(text) => assert_eq!(text, "Max out your PPF"),
            other => panic!("expected suggestion, got {:?}", other),
        }
    }

    #[test]
    fn alien_shape_is_an_api_error_not_a_panic() {
        let result = UploadOutcome::from_value(json!({"status": "processing"}));
        assert!(matches!(result, Err(AppError::ApiError(_))));
    }

    #[test]
    fn summary_field_is_accepted_as_analysis_text() {
        let mut value = report_value();
        let obj = value.as_object_mut().unwrap();
        obj.remove("aiAnalysis");
        obj.insert("summary".to_string(), json!("Condensed strategy."));
        let report: AnalysisReport = serde_json::from_value(value).unwrap();
        assert_eq!(report.ai_analysis.as_deref(), Some("Condensed strategy."));
    }

    #[test]
    fn malformed_created_at_does_not_fail_the_report() {
        let mut value = report_value();
        value["createdAt"] = json!("yesterday-ish");
        let report: AnalysisReport = serde_json::from_value(value).unwrap();
        assert_eq!(report.created_at.as_deref(), Some("yesterday-ish"));
        assert!(report.created_date().is_none());
    }

    #[test]
    fn savings_share_guards_division_by_zero() {
        let mut report = AnalysisReport::sample();
        assert!(report.savings_share().is_some());
        report.current_tax = 0.0;
        assert!(report.savings_share().is_none());
    }

    #[test]
    fn sample_report_matches_the_documented_object() {
        let sample = AnalysisReport::sample();
        assert_eq!(sample.current_tax, 1_080_000.0);
        assert_eq!(sample.potential_savings, 46_878.0);
        assert_eq!(sample.investment_allocation.len(), 5);
        assert!(sample
            .investment_allocation
            .iter()
            .all(|a| a.percentage == 20.0));
        assert!(sample.created_date().is_some());
    }
}
