use serde::{Deserialize, Serialize};

use crate::models::HealthMetrics;

/// Column order expected by the trained classifier
pub const FEATURE_NAMES: [&str; 17] = [
    "BMI",
    "Smoking",
    "AlcoholDrinking",
    "Stroke",
    "PhysicalHealth",
    "MentalHealth",
    "DiffWalking",
    "Sex",
    "AgeCategory",
    "Race",
    "Diabetic",
    "PhysicalActivity",
    "GenHealth",
    "SleepTime",
    "Asthma",
    "KidneyDisease",
    "SkinCancer",
];

/// Single cell of the feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

/// One named feature row, serialized as a JSON object keyed by column name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "Smoking")]
    pub smoking: String,
    #[serde(rename = "AlcoholDrinking")]
    pub alcohol_drinking: String,
    #[serde(rename = "Stroke")]
    pub stroke: String,
    #[serde(rename = "PhysicalHealth")]
    pub physical_health: f64,
    #[serde(rename = "MentalHealth")]
    pub mental_health: f64,
    #[serde(rename = "DiffWalking")]
    pub diff_walking: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "AgeCategory")]
    pub age_category: String,
    #[serde(rename = "Race")]
    pub race: String,
    #[serde(rename = "Diabetic")]
    pub diabetic: String,
    #[serde(rename = "PhysicalActivity")]
    pub physical_activity: String,
    #[serde(rename = "GenHealth")]
    pub gen_health: String,
    #[serde(rename = "SleepTime")]
    pub sleep_time: f64,
    #[serde(rename = "Asthma")]
    pub asthma: String,
    #[serde(rename = "KidneyDisease")]
    pub kidney_disease: String,
    #[serde(rename = "SkinCancer")]
    pub skin_cancer: String,
}

#[inline]
fn yes_no(flag: bool) -> String {
    (if flag { "Yes" } else { "No" }).to_string()
}

impl FeatureVector {
    /// Encode metrics the way the classifier was trained: flags as Yes/No,
    /// categorical strings unchanged.
    pub fn from_metrics(metrics: &HealthMetrics) -> Self {
        Self {
            bmi: metrics.bmi,
            smoking: yes_no(metrics.smoking),
            alcohol_drinking: yes_no(metrics.alcohol_drinking),
            stroke: yes_no(metrics.stroke),
            physical_health: metrics.physical_health as f64,
            mental_health: metrics.mental_health as f64,
            diff_walking: yes_no(metrics.diff_walking),
            sex: metrics.sex.clone(),
            age_category: metrics.age_category.clone(),
            race: metrics.race.clone(),
            diabetic: yes_no(metrics.diabetic),
            physical_activity: yes_no(metrics.physical_activity),
            gen_health: metrics.gen_health.clone(),
            sleep_time: metrics.sleep_time,
            asthma: yes_no(metrics.asthma),
            kidney_disease: yes_no(metrics.kidney_disease),
            skin_cancer: yes_no(metrics.skin_cancer),
        }
    }

    /// Values in `FEATURE_NAMES` order
    pub fn values(&self) -> Vec<FeatureValue> {
        use FeatureValue::{Category, Number};

        vec![
            Number(self.bmi),
            Category(self.smoking.clone()),
            Category(self.alcohol_drinking.clone()),
            Category(self.stroke.clone()),
            Number(self.physical_health),
            Number(self.mental_health),
            Category(self.diff_walking.clone()),
            Category(self.sex.clone()),
            Category(self.age_category.clone()),
            Category(self.race.clone()),
            Category(self.diabetic.clone()),
            Category(self.physical_activity.clone()),
            Category(self.gen_health.clone()),
            Number(self.sleep_time),
            Category(self.asthma.clone()),
            Category(self.kidney_disease.clone()),
            Category(self.skin_cancer.clone()),
        ]
    }
}

impl From<&HealthMetrics> for FeatureVector {
    fn from(metrics: &HealthMetrics) -> Self {
        Self::from_metrics(metrics)
    }
}
