//! Resilience tests for the remote model client.
//!
//! Drives the retry loop, the retry-eligibility filter and the fallback
//! branch against a mock model service.

use scoring_engine::{Error, FeatureVector, ModelClient, ModelConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn test_config(base_url: String, fallback_enabled: bool) -> ModelConfig {
    ModelConfig {
        base_url,
        predict_path: "/predict".to_string(),
        timeout_seconds: 2,
        max_retries: 3,
        retry_delay_ms: 10,
        fallback_enabled,
    }
}

// Healthy profile from the product demo data set.
fn features() -> FeatureVector {
    FeatureVector {
        age: 28,
        annual_income: 50000.0,
        monthly_inhand_salary: 4167.0,
        monthly_balance: 2500.0,
        num_bank_accounts: 3,
        num_credit_card: 2,
        interest_rate: 5.5,
        num_of_loan: 2,
        delay_from_due_date: 0,
        num_of_delayed_payment: 0,
        num_credit_inquiries: 4,
        credit_utilization_ratio: 20.0,
        credit_history_age_months: 60,
        total_emi_per_month: 500.0,
        amount_invested_monthly: 200.0,
        outstanding_debt: 5000.0,
    }
}

fn model_response() -> serde_json::Value {
    json!({
        "predictedScore": 710,
        "scoreCategory": "Very Good",
        "paymentConsistency": 88.0,
        "incomeReliability": 72.0,
        "transactionPatterns": 64.0,
        "savingsStability": 79.0,
        "alphaWeight": 0.35,
        "betaWeight": 0.25,
        "gammaWeight": 0.20,
        "deltaWeight": 0.20,
        "modelVersion": "rf-v2.1",
        "confidenceLevel": 91.0
    })
}

// Base URL nothing is listening on.
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_remote_prediction_is_returned() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), true)).unwrap();
    let prediction = client.predict(&features()).await.unwrap();

    assert_eq!(prediction.predicted_score, 710);
    assert_eq!(prediction.score_category, "Very Good");
    assert_eq!(prediction.model_version, "rf-v2.1");
    assert_eq!(prediction.components.payment_consistency, 88.0);
}

#[tokio::test]
async fn test_bad_request_is_never_retried() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing field: age"))
        .expect(1)
        .mount(&server)
        .await;

    // Fallback enabled, but a client rejection must never be masked.
    let client = ModelClient::new(test_config(server.uri(), true)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();

    match err {
        Error::MalformedRequest {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 400);
            assert!(message.contains("missing field"));
        }
        other => panic!("expected MalformedRequest, got {:?}", other),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_other_client_errors_are_not_retried_either() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), true)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedRequest {
            status_code: 422,
            ..
        }
    ));
}

#[tokio::test]
async fn test_server_errors_exhaust_retries_then_model_unavailable() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), false)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();

    match err {
        Error::ModelUnavailable {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 4);
            assert!(last_error.contains("503"));
        }
        other => panic!("expected ModelUnavailable, got {:?}", other),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_timeouts_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(model_response())
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = ModelConfig {
        timeout_seconds: 1,
        max_retries: 1,
        ..test_config(server.uri(), false)
    };
    let client = ModelClient::new(config).unwrap();
    let err = client.predict(&features()).await.unwrap_err();

    assert!(matches!(err, Error::ModelUnavailable { attempts: 2, .. }));
}

#[tokio::test]
async fn test_server_errors_exhaust_retries_then_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), true)).unwrap();
    let prediction = client.predict(&features()).await.unwrap();

    assert!(prediction.model_version.ends_with("-fallback"));
    assert_eq!(prediction.confidence_level, 60.0);
    assert!((300..=850).contains(&prediction.predicted_score));
}

#[tokio::test]
async fn test_transient_failure_recovers_before_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), false)).unwrap();
    let prediction = client.predict(&features()).await.unwrap();

    assert_eq!(prediction.predicted_score, 710);
    assert_eq!(prediction.model_version, "rf-v2.1");
}

#[tokio::test]
async fn test_garbled_body_falls_back_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), true)).unwrap();
    let prediction = client.predict(&features()).await.unwrap();

    assert!(prediction.model_version.ends_with("-fallback"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_garbled_body_is_model_error_when_fallback_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), false)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();
    assert!(matches!(err, Error::ModelError(_)));
}

#[tokio::test]
async fn test_out_of_range_payload_is_treated_as_garbled() {
    let mut body = model_response();
    body["predictedScore"] = json!(9000);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = ModelClient::new(test_config(server.uri(), false)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();

    match err {
        Error::ModelError(reason) => assert!(reason.contains("outside [300, 850]")),
        other => panic!("expected ModelError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_model_falls_back() {
    init_tracing();
    let client = ModelClient::new(test_config(unreachable_url(), true)).unwrap();
    let prediction = client.predict(&features()).await.unwrap();

    // Healthy demo profile lands at Very Good under the fallback weights.
    assert_eq!(prediction.predicted_score, 744);
    assert_eq!(prediction.score_category, "Very Good");
    assert!(prediction.model_version.ends_with("-fallback"));
}

#[tokio::test]
async fn test_unreachable_model_without_fallback_is_unavailable() {
    let client = ModelClient::new(test_config(unreachable_url(), false)).unwrap();
    let err = client.predict(&features()).await.unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable { attempts: 4, .. }));
}

#[tokio::test]
async fn test_fallback_prediction_is_idempotent() {
    let client = ModelClient::new(test_config(unreachable_url(), true)).unwrap();
    let first = client.predict(&features()).await.unwrap();
    let second = client.predict(&features()).await.unwrap();
    assert_eq!(first, second);
}
