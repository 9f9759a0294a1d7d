use crate::models::{HealthMetrics, RiskFactor, RiskFactorKind, RiskLevel, RiskThresholds, RiskValue};

/// Derive risk factors from health metrics
///
/// Rules run in a fixed order and each contributes at most one factor:
/// 1. BMI (high at or above the obese threshold, otherwise medium at or
///    above the overweight threshold)
/// 2. Smoking
/// 3. Alcohol
/// 4. Stroke history
/// 5. Diabetes
/// 6. Physical inactivity
/// 7. Sleep outside the healthy window
///
/// An empty result means every metric is within the safe range.
pub fn evaluate_risk_factors(metrics: &HealthMetrics, thresholds: &RiskThresholds) -> Vec<RiskFactor> {
    [
        bmi_rule(metrics.bmi, thresholds),
        flag_rule(
            metrics.smoking,
            RiskFactorKind::Smoking,
            RiskLevel::High,
            "Active smoking significantly increases heart disease risk",
        ),
        flag_rule(
            metrics.alcohol_drinking,
            RiskFactorKind::Alcohol,
            RiskLevel::Medium,
            "Regular alcohol consumption may increase health risks",
        ),
        flag_rule(
            metrics.stroke,
            RiskFactorKind::StrokeHistory,
            RiskLevel::High,
            "Previous stroke indicates high cardiovascular risk",
        ),
        flag_rule(
            metrics.diabetic,
            RiskFactorKind::Diabetes,
            RiskLevel::High,
            "Diabetes increases heart disease risk",
        ),
        flag_rule(
            !metrics.physical_activity,
            RiskFactorKind::PhysicalInactivity,
            RiskLevel::Medium,
            "Lack of physical activity increases health risks",
        ),
        sleep_rule(metrics.sleep_time, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// BMI band: obese wins over overweight, never both
#[inline]
fn bmi_rule(bmi: f64, thresholds: &RiskThresholds) -> Option<RiskFactor> {
    let (level, description) = if bmi >= thresholds.bmi_obese {
        (RiskLevel::High, "BMI indicates obesity")
    } else if bmi >= thresholds.bmi_overweight {
        (RiskLevel::Medium, "BMI indicates overweight")
    } else {
        return None;
    };

    Some(RiskFactor {
        name: RiskFactorKind::Bmi,
        level,
        value: RiskValue::Measure(bmi),
        description: description.to_string(),
    })
}

#[inline]
fn sleep_rule(sleep_time: f64, thresholds: &RiskThresholds) -> Option<RiskFactor> {
    if sleep_time >= thresholds.sleep_min_hours && sleep_time <= thresholds.sleep_max_hours {
        return None;
    }

    Some(RiskFactor {
        name: RiskFactorKind::SleepPattern,
        level: RiskLevel::Medium,
        value: RiskValue::Measure(sleep_time),
        description: "Irregular sleep pattern may affect heart health".to_string(),
    })
}

#[inline]
fn flag_rule(
    triggered: bool,
    name: RiskFactorKind,
    level: RiskLevel,
    description: &str,
) -> Option<RiskFactor> {
    triggered.then(|| RiskFactor {
        name,
        level,
        value: RiskValue::Flag(true),
        description: description.to_string(),
    })
}
