use actix_web::{web, HttpResponse, Responder};
use crate::models::{HealthMetrics, EvaluateRiskRequest, PredictionResponse, HealthResponse, ErrorResponse};
use crate::services::{Classifier, ClassifierError};
use crate::core::{FeatureVector, RiskEngine};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub engine: RiskEngine,
}

/// Configure all prediction-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predictions/predict", web::post().to(predict))
        .route("/risk/evaluate", web::post().to(evaluate_risk));
}

fn validation_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let model_ready = state.classifier.is_ready();

    let status = if model_ready { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_ready,
        timestamp: chrono::Utc::now(),
    })
}

/// Heart disease prediction endpoint
///
/// POST /api/v1/predictions/predict
///
/// Request body:
/// ```json
/// {
///   "bmi": 31.5, "smoking": true, "alcohol_drinking": false, "stroke": false,
///   "physical_health": 3, "mental_health": 0, "diff_walking": false,
///   "sex": "Male", "age_category": "55-59", "race": "White",
///   "diabetic": false, "physical_activity": true, "gen_health": "Good",
///   "sleep_time": 7, "asthma": false, "kidney_disease": false, "skin_cancer": false
/// }
/// ```
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<HealthMetrics>,
) -> impl Responder {
    let metrics = req.into_inner();

    if let Err(e) = metrics.check() {
        tracing::info!("Rejected prediction request: {}", e);
        return validation_error(e.to_string());
    }

    if !state.classifier.is_ready() {
        return HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Model unavailable".to_string(),
            message: "ML model is not available".to_string(),
            status_code: 503,
        });
    }

    let features = FeatureVector::from(&metrics);

    let outcome = match state.classifier.predict(&features).await {
        Ok(outcome) => outcome,
        Err(ClassifierError::Unavailable) => {
            return HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Model unavailable".to_string(),
                message: "ML model is not available".to_string(),
                status_code: 503,
            });
        }
        Err(e) => {
            tracing::error!("Classifier failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Prediction failed".to_string(),
                message: format!("Error making prediction: {}", e),
                status_code: 500,
            });
        }
    };

    let assessment = state.engine.score(&metrics, outcome);

    tracing::info!(
        "Prediction complete: risk_level={}, {} risk factors",
        outcome.risk_label(),
        assessment.risk_factors.len()
    );

    HttpResponse::Ok().json(PredictionResponse::from(assessment))
}

/// Rule-based evaluation for an outcome the caller already has
///
/// POST /api/v1/risk/evaluate
///
/// Same body as the predict endpoint plus
/// `"prediction": {"has_heart_disease": true, "probability": 0.7}`.
async fn evaluate_risk(
    state: web::Data<AppState>,
    req: web::Json<EvaluateRiskRequest>,
) -> impl Responder {
    let EvaluateRiskRequest { metrics, prediction } = req.into_inner();

    if let Err(e) = metrics.check() {
        tracing::info!("Rejected evaluation request: {}", e);
        return validation_error(e.to_string());
    }

    if let Some(p) = prediction.probability {
        if !(0.0..=1.0).contains(&p) {
            return validation_error(format!("probability {} outside [0, 1]", p));
        }
    }

    let assessment = state.engine.score(&metrics, prediction);

    tracing::debug!("Evaluated {} risk factors", assessment.risk_factors.len());

    HttpResponse::Ok().json(PredictionResponse::from(assessment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionOutcome;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedClassifier {
        ready: bool,
        outcome: PredictionOutcome,
    }

    #[async_trait]
    impl Classifier for FixedClassifier {
        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn predict(&self, _features: &FeatureVector) -> Result<PredictionOutcome, ClassifierError> {
            Ok(self.outcome)
        }
    }

    fn state(ready: bool) -> AppState {
        AppState {
            classifier: Arc::new(FixedClassifier {
                ready,
                outcome: PredictionOutcome::with_probability(true, 0.72),
            }),
            engine: RiskEngine::default(),
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        fn is_ready(&self) -> bool {
            true
        }

        async fn predict(&self, _features: &FeatureVector) -> Result<PredictionOutcome, ClassifierError> {
            Err(ClassifierError::ApiError {
                status: 502,
                message: "model crashed".to_string(),
            })
        }
    }

    fn metrics_json() -> serde_json::Value {
        json!({
            "bmi": 32.0,
            "smoking": true,
            "alcohol_drinking": false,
            "stroke": false,
            "physical_health": 0,
            "mental_health": 0,
            "diff_walking": false,
            "sex": "Male",
            "age_category": "60-64",
            "race": "White",
            "diabetic": false,
            "physical_activity": true,
            "gen_health": "Fair",
            "sleep_time": 7,
            "asthma": false,
            "kidney_disease": false,
            "skin_cancer": false
        })
    }

    #[actix_web::test]
    async fn test_predict_returns_assessment() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(true)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predictions/predict")
            .set_json(metrics_json())
            .to_request();
        let resp: PredictionResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.prediction.has_heart_disease);
        assert_eq!(resp.prediction.risk_level, "HIGH");
        assert_eq!(resp.risk_factors.len(), 2);
        assert_eq!(resp.recommendations.len(), 6);
    }

    #[actix_web::test]
    async fn test_predict_unavailable_model() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predictions/predict")
            .set_json(metrics_json())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 503);
    }

    #[actix_web::test]
    async fn test_predict_rejects_out_of_range_days() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(true)))
                .configure(configure),
        )
        .await;

        let mut body = metrics_json();
        body["mental_health"] = json!(31);

        let req = test::TestRequest::post()
            .uri("/predictions/predict")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_evaluate_without_model() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let mut body = metrics_json();
        body["bmi"] = json!(22.0);
        body["smoking"] = json!(false);
        body["prediction"] = json!({"has_heart_disease": false});

        let req = test::TestRequest::post()
            .uri("/risk/evaluate")
            .set_json(body)
            .to_request();
        let resp: PredictionResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.risk_factors.is_empty());
        assert_eq!(resp.prediction.risk_level, "LOW");
        assert_eq!(resp.recommendations.len(), 3);
    }

    #[actix_web::test]
    async fn test_predict_reports_classifier_failure() {
        let failing = AppState {
            classifier: Arc::new(FailingClassifier),
            engine: RiskEngine::default(),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(failing))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predictions/predict")
            .set_json(metrics_json())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 500);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Prediction failed");
        assert_eq!(body.status_code, 500);
        assert!(body.message.starts_with("Error making prediction"));
        assert!(body.message.contains("model crashed"));
    }

    #[actix_web::test]
    async fn test_evaluate_rejects_out_of_range_probability() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let mut body = metrics_json();
        body["prediction"] = json!({"has_heart_disease": true, "probability": 1.5});

        let req = test::TestRequest::post()
            .uri("/risk/evaluate")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Validation failed");
    }

    #[actix_web::test]
    async fn test_health_reports_degraded_without_model() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "degraded");
        assert!(!resp.model_ready);
    }
}
