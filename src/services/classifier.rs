use crate::core::features::{FeatureVector, FEATURE_NAMES};
use crate::models::PredictionOutcome;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the classification model
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("ML model is not available")]
    Unavailable,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Model API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only handle to a trained heart disease classifier
///
/// Held by the web layer and shared across workers. The risk engine never
/// sees it, only the outcome it produces.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Whether the model can serve predictions right now
    fn is_ready(&self) -> bool;

    async fn predict(&self, features: &FeatureVector) -> Result<PredictionOutcome, ClassifierError>;
}

/// Raw body returned by the inference service
#[derive(Debug, Deserialize)]
struct ModelResponse {
    prediction: Value,
    #[serde(default)]
    probability: Option<f64>,
}

/// Classifier backed by a remote inference endpoint
///
/// Sends one feature row per request in split-dataframe layout
/// (`columns` + `data`) and expects `{"prediction": 0|1|bool, "probability": f64?}`.
/// Without an endpoint the classifier reports itself as not ready.
pub struct HttpClassifier {
    endpoint: Option<String>,
    api_key: Option<String>,
    client: Client,
}

impl HttpClassifier {
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(timeout).build()?;

        // Blank endpoints from env overrides count as unset
        let endpoint = endpoint.filter(|url| !url.trim().is_empty());

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    fn request_body(features: &FeatureVector) -> Value {
        json!({
            "dataframe_split": {
                "columns": FEATURE_NAMES,
                "data": [features.values()],
            }
        })
    }

    fn parse_outcome(response: ModelResponse) -> Result<PredictionOutcome, ClassifierError> {
        let has_heart_disease = match &response.prediction {
            Value::Bool(flag) => *flag,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0).ok_or_else(|| {
                ClassifierError::InvalidResponse(format!("unsupported prediction value {}", n))
            })?,
            // Some model servers wrap a single prediction in a list
            Value::Array(items) => match items.first() {
                Some(Value::Bool(flag)) => *flag,
                Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).ok_or_else(|| {
                    ClassifierError::InvalidResponse(format!("unsupported prediction value {}", n))
                })?,
                Some(other) => {
                    return Err(ClassifierError::InvalidResponse(format!(
                        "unsupported prediction value {}",
                        other
                    )))
                }
                None => {
                    return Err(ClassifierError::InvalidResponse(
                        "empty prediction list".to_string(),
                    ))
                }
            },
            other => {
                return Err(ClassifierError::InvalidResponse(format!(
                    "unsupported prediction value {}",
                    other
                )))
            }
        };

        if let Some(p) = response.probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ClassifierError::InvalidResponse(format!(
                    "probability {} outside [0, 1]",
                    p
                )));
            }
        }

        Ok(PredictionOutcome {
            has_heart_disease,
            probability: response.probability,
        })
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    fn is_ready(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn predict(&self, features: &FeatureVector) -> Result<PredictionOutcome, ClassifierError> {
        let endpoint = self.endpoint.as_ref().ok_or(ClassifierError::Unavailable)?;

        let mut request = self.client.post(endpoint).json(&Self::request_body(features));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Model API returned {}: {}", status, message);
            return Err(ClassifierError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ModelResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        Self::parse_outcome(body)
    }
}
