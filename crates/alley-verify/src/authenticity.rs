//! Simulated image authenticity analysis.
//!
//! The current analyzer does not call an external vision service: it produces
//! a plausible pre-score and canned analysis text. The trait seam exists so
//! the server can swap in a real vision backend (or a pinned score in tests)
//! without touching the verification workflow.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ids::mint_verification_id;

/// What the analyzer is asked to look at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityRequest {
    pub image_urls: Vec<String>,
    pub product_title: String,
    pub medium: String,
    pub artist_name: String,
}

/// Free-text findings supporting the pre-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityAnalysis {
    pub handcrafted_indicators: Vec<String>,
    pub material_analysis: String,
    pub tool_marks: String,
    pub overall_assessment: String,
}

/// Analyzer output, returned verbatim to the submitting artist alongside the
/// composite score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityReport {
    /// Raw pre-score in [85.0, 99.0), one decimal place.
    pub authenticity_score: f64,
    pub verification_id: String,
    pub analysis: AuthenticityAnalysis,
    /// Confidence in [0.80, 0.99), two decimal places.
    pub confidence: f64,
}

/// Produces an authenticity pre-score for a set of product images.
///
/// Implementations must be stateless request/response transformers; the
/// workflow calls `analyze` exactly once per submission.
pub trait AuthenticityAnalyzer: Send + Sync {
    fn analyze(&self, request: &AuthenticityRequest) -> AuthenticityReport;
}

/// The default analyzer: synthetic scores biased toward the handcrafted
/// range, with analysis text referencing the request's medium and artist.
pub struct SimulatedVision;

impl AuthenticityAnalyzer for SimulatedVision {
    fn analyze(&self, request: &AuthenticityRequest) -> AuthenticityReport {
        let mut rng = rand::thread_rng();

        // 85-99 range for handcrafted items
        let base_score: f64 = 85.0 + rng.gen::<f64>() * 14.0;
        let confidence: f64 = 0.80 + rng.gen::<f64>() * 0.19;

        AuthenticityReport {
            authenticity_score: (base_score * 10.0).round() / 10.0,
            verification_id: mint_verification_id(),
            analysis: canned_analysis(&request.medium, &request.artist_name),
            confidence: (confidence * 100.0).round() / 100.0,
        }
    }
}

fn canned_analysis(medium: &str, artist_name: &str) -> AuthenticityAnalysis {
    AuthenticityAnalysis {
        handcrafted_indicators: vec![
            "Visible tool marks consistent with handcrafting".to_string(),
            "Natural material variations".to_string(),
            "Unique artistic fingerprint detected".to_string(),
            "Absence of mass production patterns".to_string(),
        ],
        material_analysis: format!(
            "Analysis confirms genuine {} materials with properties consistent with handcrafted artwork.",
            medium
        ),
        tool_marks: "Distinctive tool marks and surface textures indicate manual creation process."
            .to_string(),
        overall_assessment: format!(
            "This {} piece shows strong indicators of authentic handcrafted creation by {}.",
            medium, artist_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AuthenticityRequest {
        AuthenticityRequest {
            image_urls: vec!["https://img.example/1.jpg".to_string()],
            product_title: "Warli Village Life".to_string(),
            medium: "Natural Pigments on Handmade Paper".to_string(),
            artist_name: "Sarthak Jadhav".to_string(),
        }
    }

    #[test]
    fn test_score_and_confidence_ranges() {
        let analyzer = SimulatedVision;
        for _ in 0..200 {
            let report = analyzer.analyze(&request());
            // Raw draws live in [85, 99) and [0.80, 0.99); rounding to one
            // and two decimal places can land exactly on the open bound.
            assert!(
                (85.0..=99.0).contains(&report.authenticity_score),
                "score out of range: {}",
                report.authenticity_score
            );
            assert!(
                (0.80..=0.99).contains(&report.confidence),
                "confidence out of range: {}",
                report.confidence
            );
        }
    }

    #[test]
    fn test_score_has_one_decimal_place() {
        let report = SimulatedVision.analyze(&request());
        let scaled = report.authenticity_score * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn test_analysis_references_medium_and_artist() {
        let report = SimulatedVision.analyze(&request());
        assert!(report
            .analysis
            .material_analysis
            .contains("Natural Pigments on Handmade Paper"));
        assert!(report.analysis.overall_assessment.contains("Sarthak Jadhav"));
        assert_eq!(report.analysis.handcrafted_indicators.len(), 4);
    }

    #[test]
    fn test_verification_id_attached() {
        let report = SimulatedVision.analyze(&request());
        assert!(report.verification_id.starts_with("AUTH-"));
    }
}
