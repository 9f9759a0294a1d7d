// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{HealthMetrics, MetricsError, RiskLevel, RiskFactorKind, RiskValue, RiskFactor, PredictionOutcome, RiskAssessment, RiskThresholds};
pub use requests::EvaluateRiskRequest;
pub use responses::{PredictionSummary, PredictionResponse, HealthResponse, ErrorResponse};
