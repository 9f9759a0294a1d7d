//! HeartGuard Risk - heart disease risk assessment service
//!
//! This library provides the rule-based risk engine used by HeartGuard.
//! A classifier outcome is combined with threshold rules over a patient's
//! health metrics to produce risk factors and personalized recommendations.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{RiskEngine, FeatureVector, evaluate_risk_factors, generate_recommendations};
pub use models::{HealthMetrics, RiskFactor, RiskFactorKind, RiskLevel, RiskValue, PredictionOutcome, RiskAssessment, RiskThresholds};
