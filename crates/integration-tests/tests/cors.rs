mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;
use waifu_config::{AnyOrArray, CorsConfig};

fn cors(origins: AnyOrArray) -> CorsConfig {
    CorsConfig {
        origins,
        methods: AnyOrArray::Any,
        headers: AnyOrArray::Any,
        expose_headers: vec!["content-disposition".to_owned()],
        max_age: Some(600),
    }
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let config = ConfigBuilder::new()
        .with_cors(cors(AnyOrArray::List(vec!["http://example.com".to_owned()])))
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/voices"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://example.com")
    );
    assert_eq!(
        resp.headers()
            .get("access-control-expose-headers")
            .and_then(|v| v.to_str().ok()),
        Some("content-disposition")
    );
}

#[tokio::test]
async fn cors_rejects_other_origin() {
    let config = ConfigBuilder::new()
        .with_cors(cors(AnyOrArray::List(vec!["http://example.com".to_owned()])))
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/voices"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn cors_preflight_for_synthesize() {
    let config = ConfigBuilder::new().with_cors(cors(AnyOrArray::Any)).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/synthesize"))
        .header("Origin", "http://anywhere.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        resp.headers()
            .get("access-control-max-age")
            .and_then(|v| v.to_str().ok()),
        Some("600")
    );
}

#[tokio::test]
async fn no_cors_headers_without_config() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .get(server.url("/health"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
