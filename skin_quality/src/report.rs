//! Verdicts and user-facing feedback derived from a `ValidationResult`.

use crate::metrics::ValidationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall decision the upload flow acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityVerdict {
    /// No issues, no warnings.
    Accepted,
    /// Usable, but with non-blocking notices.
    Warning,
    /// At least one hard issue; the upload should be retaken.
    Rejected,
}

impl fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityVerdict::Accepted => write!(f, "accepted"),
            QualityVerdict::Warning => write!(f, "warning"),
            QualityVerdict::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            QualityGrade::Excellent
        } else if score >= 70.0 {
            QualityGrade::Good
        } else if score >= 50.0 {
            QualityGrade::Fair
        } else {
            QualityGrade::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QualityGrade::Excellent => "Excellent - ready for analysis",
            QualityGrade::Good => "Good - suitable for analysis",
            QualityGrade::Fair => "Fair - results may be less accurate",
            QualityGrade::Poor => "Poor - please retake the photo",
        }
    }
}

impl ValidationResult {
    pub fn verdict(&self) -> QualityVerdict {
        if !self.issues.is_empty() {
            QualityVerdict::Rejected
        } else if !self.warnings.is_empty() {
            QualityVerdict::Warning
        } else {
            QualityVerdict::Accepted
        }
    }

    pub fn grade(&self) -> QualityGrade {
        QualityGrade::from_score(self.score)
    }
}

/// Message shown to the person uploading: blocking problems first, or the
/// notices when nothing blocks, or a confirmation.
pub fn quality_feedback(result: &ValidationResult) -> String {
    match result.verdict() {
        QualityVerdict::Rejected => {
            let mut msg = String::from("Please retake the photo:");
            for issue in &result.issues {
                msg.push_str("\n- ");
                msg.push_str(issue);
            }
            msg
        }
        QualityVerdict::Warning => {
            let mut msg = String::from("Photo accepted with notes:");
            for warning in &result.warnings {
                msg.push_str("\n- ");
                msg.push_str(warning);
            }
            msg
        }
        QualityVerdict::Accepted => format!(
            "Photo quality is {} (score {:.0}/100)",
            result.grade().description().to_lowercase(),
            result.score
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{
        AspectRatioMetrics, LightingMetrics, QualityMetrics, ResolutionMetrics, SharpnessMetrics,
    };

    fn result(issues: &[&str], warnings: &[&str], score: f64) -> ValidationResult {
        ValidationResult {
            is_valid: issues.is_empty(),
            score,
            issues: issues.iter().map(|s| s.to_string()).collect(),
            warnings: warnings.iter().map(|s| s.to_string()).collect(),
            metrics: QualityMetrics {
                resolution: ResolutionMetrics {
                    width: 1000,
                    height: 1000,
                    megapixels: 1.0,
                },
                aspect_ratio: AspectRatioMetrics { ratio: 1.0 },
                lighting: LightingMetrics {
                    brightness: 128.0,
                    is_well_lit: true,
                },
                sharpness: SharpnessMetrics {
                    laplacian_variance: 500.0,
                    is_sharp: true,
                },
                face_detection: None,
            },
        }
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(result(&[], &[], 100.0).verdict(), QualityVerdict::Accepted);
        assert_eq!(
            result(&[], &["Unusual aspect ratio"], 100.0).verdict(),
            QualityVerdict::Warning
        );
        assert_eq!(
            result(&["Image too dark"], &["Unusual aspect ratio"], 40.0).verdict(),
            QualityVerdict::Rejected
        );
    }

    #[test]
    fn test_feedback_lists_issues_in_order() {
        let feedback = quality_feedback(&result(
            &["Resolution too low", "Image is blurry"],
            &[],
            20.0,
        ));
        let low = feedback.find("Resolution too low").unwrap();
        let blurry = feedback.find("Image is blurry").unwrap();
        assert!(feedback.starts_with("Please retake"));
        assert!(low < blurry);
    }

    #[test]
    fn test_feedback_for_clean_result() {
        let feedback = quality_feedback(&result(&[], &[], 92.0));
        assert!(feedback.contains("excellent"));
        assert!(feedback.contains("92/100"));
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(QualityGrade::from_score(85.0), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_score(84.9), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(50.0), QualityGrade::Fair);
        assert_eq!(QualityGrade::from_score(49.9), QualityGrade::Poor);
    }

    #[test]
    fn test_verdict_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QualityVerdict::Rejected).unwrap(),
            "\"rejected\""
        );
    }
}
