use std::collections::HashSet;

use crate::models::{HealthMetrics, RiskFactor, RiskFactorKind, RiskLevel};

const WEIGHT_MANAGEMENT: &[&str] = &[
    "Consider a structured weight management program",
    "Consult with a nutritionist for a personalized diet plan",
    "Aim for 150 minutes of moderate aerobic activity weekly",
];

const SMOKING_CESSATION: &[&str] = &[
    "Quit smoking - consider nicotine replacement therapy",
    "Join a smoking cessation program",
    "Schedule regular check-ups to monitor progress",
];

const ALCOHOL_REDUCTION: &[&str] = &[
    "Limit alcohol consumption and consider joining a support group if needed",
];

const ACTIVITY: &[&str] = &[
    "Start with short daily walks and gradually increase activity",
    "Consider joining a guided exercise program",
    "Find physical activities you enjoy to make it sustainable",
];

const SLEEP_HYGIENE: &[&str] = &[
    "Establish a regular sleep schedule",
    "Create a relaxing bedtime routine",
    "Avoid screens before bedtime",
];

/// Added for every diabetic patient, whether or not a factor fired
pub const DIABETES_MANAGEMENT: &[&str] = &[
    "Monitor blood sugar levels regularly",
    "Follow your diabetes management plan strictly",
    "Schedule regular check-ups with your endocrinologist",
];

/// Returned when nothing else applies
pub const DEFAULT_RECOMMENDATIONS: &[&str] = &[
    "Maintain current healthy lifestyle habits",
    "Schedule regular check-ups with your healthcare provider",
    "Stay active and maintain a balanced diet",
];

/// Recommendation block for a single risk factor
///
/// Stroke history and diabetes have no factor-specific advice; diabetes is
/// covered by the unconditional management block instead.
pub fn recommendation_block(factor: &RiskFactor) -> &'static [&'static str] {
    match factor.name {
        RiskFactorKind::Bmi if matches!(factor.level, RiskLevel::Medium | RiskLevel::High) => {
            WEIGHT_MANAGEMENT
        }
        RiskFactorKind::Smoking => SMOKING_CESSATION,
        RiskFactorKind::Alcohol => ALCOHOL_REDUCTION,
        RiskFactorKind::PhysicalInactivity => ACTIVITY,
        RiskFactorKind::SleepPattern => SLEEP_HYGIENE,
        _ => &[],
    }
}

/// Build the deduplicated recommendation list for a set of risk factors
///
/// Blocks are taken in risk-factor order, followed by the diabetes
/// management block when `metrics.diabetic` is set. Repeated strings keep
/// their first position. Never returns an empty list.
pub fn generate_recommendations(metrics: &HealthMetrics, risk_factors: &[RiskFactor]) -> Vec<String> {
    let diabetes_block: &[&str] = if metrics.diabetic { DIABETES_MANAGEMENT } else { &[] };

    let mut seen = HashSet::new();
    let recommendations: Vec<String> = risk_factors
        .iter()
        .flat_map(|factor| recommendation_block(factor).iter())
        .chain(diabetes_block.iter())
        .filter(|rec| seen.insert(**rec))
        .map(|rec| rec.to_string())
        .collect();

    if recommendations.is_empty() {
        return DEFAULT_RECOMMENDATIONS.iter().map(|rec| rec.to_string()).collect();
    }

    recommendations
}
