//! Real HTTP probing and webhook delivery against mock backends.
//!
//! Run with: cargo test --test probe_http

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use dr_failover::notify::{Notifier, NotifyError, SlackWebhook};
use dr_failover::probe::{EndpointProbe, EndpointSpec, HttpProber, ReqwestProber, USER_AGENT};

fn probe() -> EndpointProbe {
    EndpointProbe::new(Arc::new(ReqwestProber::new().unwrap()))
}

#[tokio::test]
async fn test_healthy_backend() {
    let (addr, requests) = start_recording_backend(200).await;
    let endpoint = EndpointSpec::new(format!("http://{}/health", addr), Duration::from_secs(2));

    assert!(probe().poll(&endpoint, &endpoint.single_attempt()).await);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /health HTTP/1.1"));
    assert!(requests[0].contains(USER_AGENT));
}

#[tokio::test]
async fn test_only_200_is_healthy() {
    for status in [204, 404, 503] {
        let (addr, _) = start_recording_backend(status).await;
        let endpoint = EndpointSpec::new(format!("http://{}/", addr), Duration::from_secs(2));

        assert!(
            !probe().poll(&endpoint, &endpoint.single_attempt()).await,
            "status {} must not count as healthy",
            status
        );
    }
}

#[tokio::test]
async fn test_retries_until_ceiling() {
    let (addr, requests) = start_recording_backend(503).await;
    let endpoint = EndpointSpec::new(format!("http://{}/", addr), Duration::from_secs(2));
    let policy = endpoint.with_retries(Duration::from_millis(20), 3);

    assert!(!probe().poll(&endpoint, &policy).await);
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unhealthy() {
    let addr = closed_port().await;
    let prober = ReqwestProber::new().unwrap();

    let err = prober
        .get(&format!("http://{}/", addr), Duration::from_secs(2))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("connection error"), "got: {}", err);

    let endpoint = EndpointSpec::new(format!("http://{}/", addr), Duration::from_secs(2));
    assert!(!probe().poll(&endpoint, &endpoint.single_attempt()).await);
}

#[tokio::test]
async fn test_webhook_posts_text_payload() {
    let (addr, requests) = start_recording_backend(200).await;
    let webhook = SlackWebhook::new(format!("http://{}/services/T0/B0/X", addr), Duration::from_secs(2)).unwrap();

    webhook
        .send("Application failed over to DR", "Application failed over to DR at 2024-05-01 12:00:00 UTC")
        .await
        .unwrap();

    let requests = requests.lock().unwrap();
    assert!(requests[0].starts_with("POST /services/T0/B0/X HTTP/1.1"));
    assert!(requests[0].ends_with(
        r#"{"text":"Application failed over to DR at 2024-05-01 12:00:00 UTC"}"#
    ));
}

#[tokio::test]
async fn test_webhook_rejection() {
    let (addr, _) = start_recording_backend(500).await;
    let webhook = SlackWebhook::new(format!("http://{}/", addr), Duration::from_secs(2)).unwrap();

    let err = webhook.send("subject", "message").await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected(500)));
}

#[tokio::test]
async fn test_webhook_that_never_answers_times_out() {
    let addr = start_silent_backend().await;
    let webhook = SlackWebhook::new(format!("http://{}/", addr), Duration::from_millis(300)).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), webhook.send("subject", "message"))
        .await
        .expect("webhook delivery must be bounded by its own timeout");

    assert!(matches!(result, Err(NotifyError::Webhook(_))), "got: {:?}", result);
}
