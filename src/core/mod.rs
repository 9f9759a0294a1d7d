// Core engine exports
pub mod engine;
pub mod features;
pub mod recommendations;
pub mod rules;

pub use engine::RiskEngine;
pub use features::{FeatureVector, FeatureValue, FEATURE_NAMES};
pub use recommendations::{generate_recommendations, recommendation_block, DEFAULT_RECOMMENDATIONS, DIABETES_MANAGEMENT};
pub use rules::evaluate_risk_factors;
