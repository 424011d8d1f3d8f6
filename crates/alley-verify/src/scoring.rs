//! Composite authenticity scoring.
//!
//! Combines the simulated vision score with the artist's self-declared
//! experience and craft details into a single 0-100 score, then classifies
//! it into a trust tier.

use serde::{Deserialize, Serialize};

/// Weight of the AI image analysis in the composite score.
const WEIGHT_AI: f64 = 0.70;
/// Weight of the artist's experience band.
const WEIGHT_EXPERIENCE: f64 = 0.15;
/// Weight of the declaration completeness.
const WEIGHT_DETAILS: f64 = 0.15;

/// Trust tier a product settles into after scoring.
///
/// `Pending` is a settled middle tier: products stay under review until the
/// artist re-submits, there is no automatic re-review loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustTier {
    Verified,
    Pending,
    Rejected,
}

impl TrustTier {
    /// Fixed per-tier message returned to the submitting artist.
    pub fn message(&self) -> &'static str {
        match self {
            TrustTier::Verified => "Product verified as authentic handmade artwork",
            TrustTier::Pending => {
                "Product under review - additional verification may be required"
            }
            TrustTier::Rejected => {
                "Product needs improvement - please ensure all details are accurate"
            }
        }
    }
}

/// Result of the composite scoring pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composite {
    pub final_score: u8,
    pub status: TrustTier,
    pub message: &'static str,
}

/// Maps the self-declared experience band to a score.
///
/// Unrecognized or empty bands score the same as "1-2": the artist gets no
/// benefit of the doubt for an unreadable declaration.
pub fn experience_score(experience_years: &str) -> f64 {
    match experience_years {
        "10+" => 100.0,
        "6-10" => 85.0,
        "3-5" => 70.0,
        _ => 50.0,
    }
}

/// Scores declaration completeness: all three craft details present or not.
/// Fields are presence-checked only, content is never validated.
pub fn details_score(tools_used: &str, specialization: &str, creation_time: &str) -> f64 {
    if !tools_used.is_empty() && !specialization.is_empty() && !creation_time.is_empty() {
        90.0
    } else {
        60.0
    }
}

/// Classifies a composite score into a trust tier.
///
/// Boundaries are strict: exactly 85 is not verified, exactly 65 is rejected.
pub fn classify(final_score: u8) -> TrustTier {
    if final_score > 85 {
        TrustTier::Verified
    } else if final_score > 65 {
        TrustTier::Pending
    } else {
        TrustTier::Rejected
    }
}

/// Runs the full scoring pass over a verification submission.
///
/// `ai_score` comes from the authenticity analyzer; the remaining fields are
/// the artist's declaration. The weighted sum is rounded half-away-from-zero
/// and clamped to [0, 100] before classification.
pub fn score_submission(
    ai_score: f64,
    experience_years: &str,
    specialization: &str,
    tools_used: &str,
    creation_time: &str,
) -> Composite {
    let experience = experience_score(experience_years);
    let details = details_score(tools_used, specialization, creation_time);

    let weighted =
        ai_score * WEIGHT_AI + experience * WEIGHT_EXPERIENCE + details * WEIGHT_DETAILS;
    let final_score = weighted.round().clamp(0.0, 100.0) as u8;

    let status = classify(final_score);
    Composite {
        final_score,
        status,
        message: status.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_bands() {
        assert_eq!(experience_score("10+"), 100.0);
        assert_eq!(experience_score("6-10"), 85.0);
        assert_eq!(experience_score("3-5"), 70.0);
        assert_eq!(experience_score("1-2"), 50.0);
        assert_eq!(experience_score(""), 50.0);
        assert_eq!(experience_score("garbage"), 50.0);
    }

    #[test]
    fn test_details_score_requires_all_three() {
        assert_eq!(details_score("chisel", "sculpture", "3 weeks"), 90.0);
        assert_eq!(details_score("", "sculpture", "3 weeks"), 60.0);
        assert_eq!(details_score("chisel", "", "3 weeks"), 60.0);
        assert_eq!(details_score("chisel", "sculpture", ""), 60.0);
        assert_eq!(details_score("", "", ""), 60.0);
    }

    #[test]
    fn test_weighted_formula() {
        // 90*0.7 + 100*0.15 + 90*0.15 = 63 + 15 + 13.5 = 91.5 -> 92
        let composite = score_submission(90.0, "10+", "painting", "brush", "3 weeks");
        assert_eq!(composite.final_score, 92);
        assert_eq!(composite.status, TrustTier::Verified);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 90*0.7 + 50*0.15 + 60*0.15 = 63 + 7.5 + 9 = 79.5 -> 80
        let composite = score_submission(90.0, "1-2", "", "brush", "3 weeks");
        assert_eq!(composite.final_score, 80);
        assert_eq!(composite.status, TrustTier::Pending);
    }

    #[test]
    fn test_classification_boundaries_are_strict() {
        assert_eq!(classify(86), TrustTier::Verified);
        assert_eq!(classify(85), TrustTier::Pending);
        assert_eq!(classify(66), TrustTier::Pending);
        assert_eq!(classify(65), TrustTier::Rejected);
        assert_eq!(classify(0), TrustTier::Rejected);
        assert_eq!(classify(100), TrustTier::Verified);
    }

    #[test]
    fn test_score_is_clamped() {
        // Inputs are naturally bounded, so the clamp only matters if a caller
        // ever feeds an out-of-range AI score.
        let composite = score_submission(150.0, "10+", "a", "b", "c");
        assert_eq!(composite.final_score, 100);

        let composite = score_submission(-50.0, "", "", "", "");
        assert_eq!(composite.final_score, 0);
        assert_eq!(composite.status, TrustTier::Rejected);
    }

    #[test]
    fn test_rejected_scenario() {
        // 60*0.7 + 50*0.15 + 60*0.15 = 42 + 7.5 + 9 = 58.5 -> 59
        let composite = score_submission(60.0, "", "", "", "");
        assert_eq!(composite.final_score, 59);
        assert_eq!(composite.status, TrustTier::Rejected);
        assert_eq!(
            composite.message,
            "Product needs improvement - please ensure all details are accurate"
        );
    }

    #[test]
    fn test_tier_messages() {
        assert_eq!(
            TrustTier::Verified.message(),
            "Product verified as authentic handmade artwork"
        );
        assert_eq!(
            TrustTier::Pending.message(),
            "Product under review - additional verification may be required"
        );
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TrustTier::Verified).unwrap(),
            "\"verified\""
        );
        assert_eq!(
            serde_json::to_string(&TrustTier::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&TrustTier::Rejected).unwrap(),
            "\"rejected\""
        );
    }
}
