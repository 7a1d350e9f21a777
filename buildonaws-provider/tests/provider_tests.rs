//! Provider bootstrap.

mod common;

use buildonaws_provider::prelude::*;
use buildonaws_provider::{ProviderInfo, ProviderMetadata};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_configure_pings_backend() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provider = common::configure(&server).await;
    assert_eq!(provider.client().config().url, server.uri());
}

#[tokio::test]
async fn test_configure_with_tls_bypass() {
    let (server, _fake) = common::FakeOpenSearch::start().await;

    let config = ProviderConfig::new()
        .with_backend_address(server.uri())
        .with_skip_tls_validation(true);

    let provider = BuildOnAwsProvider::default().configure(&config).await.unwrap();
    assert!(provider.client().config().tls.danger_accept_invalid_certs);
}

#[tokio::test]
async fn test_configure_rejects_invalid_address() {
    let config = ProviderConfig::new().with_backend_address("this-cannot-be-anything-you-want");

    let err = BuildOnAwsProvider::default()
        .configure(&config)
        .await
        .unwrap_err();

    let diags = err.to_diagnostics();
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.summary, "Invalid URL for the backend address");
    assert_eq!(
        diag.detail,
        "Cannot connect with the backend using the URL: 'this-cannot-be-anything-you-want'."
    );
    assert_eq!(diag.attribute.as_deref(), Some("backend_address"));
}

#[tokio::test]
async fn test_configure_fails_when_backend_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = ProviderConfig::new().with_backend_address(address);
    let err = BuildOnAwsProvider::default()
        .configure(&config)
        .await
        .unwrap_err();

    assert_eq!(err.summary(), "Failure connecting with the backend");
    let diags = err.to_diagnostics();
    assert!(diags.iter().next().unwrap().detail.starts_with("Reason: "));
}

#[tokio::test]
async fn test_configure_fails_when_ping_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = ProviderConfig::new().with_backend_address(server.uri());
    let err = BuildOnAwsProvider::default()
        .configure(&config)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Connectivity(_)));
}

#[tokio::test]
async fn test_configure_from_provider_block() {
    let (server, _fake) = common::FakeOpenSearch::start().await;
    let provider = BuildOnAwsProvider::new(ProviderInfo::new(Some("v1.0.0"), None));

    let config = provider
        .parse_config(&json!({
            "backend_address": server.uri(),
            "skip_tls_validation": false
        }))
        .unwrap();

    assert!(provider.configure(&config).await.is_ok());
    assert_eq!(
        provider.metadata(),
        ProviderMetadata {
            type_name: "buildonaws",
            version: "v1.0.0".to_string(),
            commit: "devel".to_string(),
        }
    );
}

#[test]
fn test_provider_block_rejects_unknown_argument() {
    let err = BuildOnAwsProvider::default()
        .parse_config(&json!({ "endpoint": "http://localhost:9200" }))
        .unwrap_err();

    let diags = err.to_diagnostics();
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.summary, "Unsupported argument");
    assert_eq!(diag.attribute.as_deref(), Some("endpoint"));
}
