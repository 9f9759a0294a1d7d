use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Health metrics submitted for a single risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HealthMetrics {
    #[validate(range(min = 0.0))]
    pub bmi: f64,
    pub smoking: bool,
    #[serde(alias = "alcoholDrinking")]
    pub alcohol_drinking: bool,
    pub stroke: bool,
    /// Days of poor physical health in the last 30
    #[validate(range(max = 30))]
    #[serde(alias = "physicalHealth")]
    pub physical_health: u8,
    /// Days of poor mental health in the last 30
    #[validate(range(max = 30))]
    #[serde(alias = "mentalHealth")]
    pub mental_health: u8,
    #[serde(alias = "diffWalking")]
    pub diff_walking: bool,
    #[validate(length(min = 1))]
    pub sex: String,
    #[validate(length(min = 1))]
    #[serde(alias = "ageCategory")]
    pub age_category: String,
    #[validate(length(min = 1))]
    pub race: String,
    pub diabetic: bool,
    #[serde(alias = "physicalActivity")]
    pub physical_activity: bool,
    #[validate(length(min = 1))]
    #[serde(alias = "genHealth")]
    pub gen_health: String,
    /// Average sleep per night in hours
    #[validate(range(min = 0.0, max = 24.0))]
    #[serde(alias = "sleepTime")]
    pub sleep_time: f64,
    pub asthma: bool,
    #[serde(alias = "kidneyDisease")]
    pub kidney_disease: bool,
    #[serde(alias = "skinCancer")]
    pub skin_cancer: bool,
}

/// Errors raised at the input boundary before metrics reach the engine
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Field {0} must be a finite number")]
    NonFinite(&'static str),
}

impl HealthMetrics {
    /// Check ranges and reject NaN or infinite floats
    ///
    /// Range checks alone let NaN through, so the float fields are
    /// tested separately.
    pub fn check(&self) -> Result<(), MetricsError> {
        if !self.bmi.is_finite() {
            return Err(MetricsError::NonFinite("bmi"));
        }
        if !self.sleep_time.is_finite() {
            return Err(MetricsError::NonFinite("sleep_time"));
        }
        self.validate()?;
        Ok(())
    }
}

/// Severity attached to a risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Closed set of risk factor identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactorKind {
    #[serde(rename = "BMI")]
    Bmi,
    Smoking,
    Alcohol,
    #[serde(rename = "Stroke History")]
    StrokeHistory,
    Diabetes,
    #[serde(rename = "Physical Inactivity")]
    PhysicalInactivity,
    #[serde(rename = "Sleep Pattern")]
    SleepPattern,
}

impl RiskFactorKind {
    pub fn name(&self) -> &'static str {
        match self {
            RiskFactorKind::Bmi => "BMI",
            RiskFactorKind::Smoking => "Smoking",
            RiskFactorKind::Alcohol => "Alcohol",
            RiskFactorKind::StrokeHistory => "Stroke History",
            RiskFactorKind::Diabetes => "Diabetes",
            RiskFactorKind::PhysicalInactivity => "Physical Inactivity",
            RiskFactorKind::SleepPattern => "Sleep Pattern",
        }
    }
}

impl std::fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw value that triggered a rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RiskValue {
    Flag(bool),
    Measure(f64),
}

/// A severity-tagged condition flagged by a threshold rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: RiskFactorKind,
    pub level: RiskLevel,
    pub value: RiskValue,
    pub description: String,
}

/// Outcome produced by the external classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    #[serde(alias = "hasHeartDisease")]
    pub has_heart_disease: bool,
    #[serde(default)]
    pub probability: Option<f64>,
}

impl PredictionOutcome {
    pub fn new(has_heart_disease: bool) -> Self {
        Self {
            has_heart_disease,
            probability: None,
        }
    }

    pub fn with_probability(has_heart_disease: bool, probability: f64) -> Self {
        Self {
            has_heart_disease,
            probability: Some(probability),
        }
    }

    /// Coarse label stored alongside an assessment: HIGH above 0.5
    pub fn risk_label(&self) -> &'static str {
        let high = match self.probability {
            Some(p) => p > 0.5,
            None => self.has_heart_disease,
        };
        if high { "HIGH" } else { "LOW" }
    }
}

/// Composite result of one scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub prediction: PredictionOutcome,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

/// Rule boundaries for the threshold checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub bmi_overweight: f64,
    pub bmi_obese: f64,
    pub sleep_min_hours: f64,
    pub sleep_max_hours: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            bmi_overweight: 25.0,
            bmi_obese: 30.0,
            sleep_min_hours: 6.0,
            sleep_max_hours: 9.0,
        }
    }
}
