use crate::models::{HealthMetrics, PredictionOutcome, RiskAssessment, RiskThresholds};
use crate::core::{
    recommendations::generate_recommendations,
    rules::evaluate_risk_factors,
};

/// Risk assessment engine - combines a classifier outcome with rule-based
/// risk factors and recommendations
///
/// # Pipeline Stages
/// 1. Threshold rules produce risk factors
/// 2. Risk factors (and the diabetic flag) map to recommendations
/// 3. The outcome is passed through unchanged
///
/// Holds only its thresholds; the classifier stays with the caller.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    thresholds: RiskThresholds,
}

impl RiskEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_default_thresholds() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
        }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Score validated metrics against an externally computed outcome
    ///
    /// # Arguments
    /// * `metrics` - Health metrics, already checked at the input boundary
    /// * `outcome` - Result from the classifier
    ///
    /// # Returns
    /// RiskAssessment with the outcome, ordered risk factors and
    /// deduplicated recommendations
    pub fn score(&self, metrics: &HealthMetrics, outcome: PredictionOutcome) -> RiskAssessment {
        let risk_factors = evaluate_risk_factors(metrics, &self.thresholds);
        let recommendations = generate_recommendations(metrics, &risk_factors);

        tracing::debug!(
            "Scored assessment: risk factors [{}], {} recommendations, outcome={}",
            risk_factors
                .iter()
                .map(|f| format!("{} ({:?})", f.name, f.level))
                .collect::<Vec<_>>()
                .join(", "),
            recommendations.len(),
            outcome.has_heart_disease
        );

        RiskAssessment {
            prediction: outcome,
            risk_factors,
            recommendations,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}
