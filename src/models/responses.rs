use serde::{Deserialize, Serialize};
use crate::models::domain::{PredictionOutcome, RiskAssessment, RiskFactor};

/// Prediction summary returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub has_heart_disease: bool,
    pub probability: Option<f64>,
    pub risk_level: String,
}

impl From<PredictionOutcome> for PredictionSummary {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            has_heart_disease: outcome.has_heart_disease,
            probability: outcome.probability,
            risk_level: outcome.risk_label().to_string(),
        }
    }
}

/// Response for the predict and evaluate endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub prediction: PredictionSummary,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

impl From<RiskAssessment> for PredictionResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now(),
            prediction: assessment.prediction.into(),
            risk_factors: assessment.risk_factors,
            recommendations: assessment.recommendations,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_ready: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
