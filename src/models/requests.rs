use serde::{Deserialize, Serialize};
use crate::models::domain::{HealthMetrics, PredictionOutcome};

/// Request to score metrics against an outcome the caller already holds
///
/// Metrics fields sit at the top level next to `prediction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRiskRequest {
    #[serde(flatten)]
    pub metrics: HealthMetrics,
    pub prediction: PredictionOutcome,
}
