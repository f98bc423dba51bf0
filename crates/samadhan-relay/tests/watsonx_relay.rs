use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use samadhan_relay::{OpenRouterClient, OpenRouterConfig, RelayError, WatsonxClient, WatsonxConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Upstream {
    token_body: Value,
    stream_status: StatusCode,
    first_stream_status: Option<StatusCode>,
    chunks: Vec<&'static str>,
    token_calls: Arc<AtomicUsize>,
    stream_calls: Arc<AtomicUsize>,
    seen_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    seen_payloads: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl Upstream {
    fn new(chunks: Vec<&'static str>) -> Self {
        Self {
            token_body: json!({ "access_token": "tok-123", "expires_in": 3600 }),
            stream_status: StatusCode::OK,
            first_stream_status: None,
            chunks,
            token_calls: Arc::new(AtomicUsize::new(0)),
            stream_calls: Arc::new(AtomicUsize::new(0)),
            seen_forms: Arc::new(Mutex::new(Vec::new())),
            seen_payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn token_handler(
    State(upstream): State<Upstream>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    upstream.token_calls.fetch_add(1, Ordering::SeqCst);
    upstream.seen_forms.lock().unwrap().push(form);
    Json(upstream.token_body.clone())
}

async fn stream_handler(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let previous_calls = upstream.stream_calls.fetch_add(1, Ordering::SeqCst);
    upstream.seen_payloads.lock().unwrap().push((headers, payload));
    if let Some(status) = upstream.first_stream_status.filter(|_| previous_calls == 0) {
        return (status, "rejected").into_response();
    }
    if upstream.stream_status != StatusCode::OK {
        return (upstream.stream_status, "unavailable").into_response();
    }
    let chunks = upstream
        .chunks
        .clone()
        .into_iter()
        .map(Ok::<_, Infallible>);
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(futures_util::stream::iter(chunks)),
    )
        .into_response()
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/identity/token", post(token_handler))
        .route("/stream", post(stream_handler))
        .with_state(upstream);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base: &str) -> WatsonxClient {
    let config = WatsonxConfig::new(
        "test-api-key",
        format!("{}/identity/token", base),
        format!("{}/stream", base),
    );
    WatsonxClient::new(&config).unwrap()
}

#[tokio::test]
async fn relays_split_frames_into_one_response() {
    let upstream = Upstream::new(vec![
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"con",
        "tent\":\"lo\"}}]}\ndata: not-json\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" world\"}}]}",
    ]);
    let payloads = upstream.seen_payloads.clone();
    let forms = upstream.seen_forms.clone();
    let base = spawn_upstream(upstream).await;

    let payload = json!({ "messages": [{ "role": "user", "content": "hi" }] });
    let text = client_for(&base).complete(&payload).await.unwrap();
    assert_eq!(text, "Hello world");

    let forms = forms.lock().unwrap();
    assert_eq!(forms[0]["apikey"], "test-api-key");
    assert_eq!(
        forms[0]["grant_type"],
        "urn:ibm:params:oauth:grant-type:apikey"
    );

    let payloads = payloads.lock().unwrap();
    let (headers, forwarded) = &payloads[0];
    assert_eq!(forwarded, &payload);
    assert_eq!(headers[header::AUTHORIZATION], "Bearer tok-123");
    assert_eq!(headers[header::ACCEPT], "text/event-stream");
}

#[tokio::test]
async fn missing_access_token_never_reaches_stream_endpoint() {
    let mut upstream = Upstream::new(vec!["data: {}\n"]);
    upstream.token_body = json!({ "errorMessage": "bad key" });
    let stream_calls = upstream.stream_calls.clone();
    let base = spawn_upstream(upstream).await;

    let err = client_for(&base).complete(&json!({})).await.unwrap_err();
    assert!(matches!(err, RelayError::TokenMissing), "got {err:?}");
    assert_eq!(stream_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_200_stream_status_is_an_upstream_error() {
    let mut upstream = Upstream::new(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n"]);
    upstream.stream_status = StatusCode::SERVICE_UNAVAILABLE;
    let base = spawn_upstream(upstream).await;

    let err = client_for(&base).complete(&json!({})).await.unwrap_err();
    assert!(matches!(err, RelayError::UpstreamStatus(503)), "got {err:?}");
    assert!(!err.is_stream_error());
}

#[tokio::test]
async fn token_is_cached_between_requests() {
    let upstream = Upstream::new(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n"]);
    let token_calls = upstream.token_calls.clone();
    let stream_calls = upstream.stream_calls.clone();
    let base = spawn_upstream(upstream).await;

    let client = client_for(&base);
    assert_eq!(client.complete(&json!({})).await.unwrap(), "ok");
    assert_eq!(client.complete_prompt("again").await.unwrap(), "ok");

    assert_eq!(token_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stream_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn short_lived_token_is_not_cached() {
    let mut upstream = Upstream::new(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n"]);
    upstream.token_body = json!({ "access_token": "brief", "expires_in": 60 });
    let token_calls = upstream.token_calls.clone();
    let base = spawn_upstream(upstream).await;

    let client = client_for(&base);
    client.complete(&json!({})).await.unwrap();
    client.complete(&json!({})).await.unwrap();
    assert_eq!(token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn oversized_token_lifetime_is_capped() {
    let mut upstream = Upstream::new(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n"]);
    upstream.token_body = json!({ "access_token": "tok", "expires_in": u64::MAX });
    let token_calls = upstream.token_calls.clone();
    let base = spawn_upstream(upstream).await;

    let client = client_for(&base);
    assert_eq!(client.complete(&json!({})).await.unwrap(), "ok");
    assert_eq!(client.complete(&json!({})).await.unwrap(), "ok");
    assert_eq!(token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthorized_stream_drops_cached_token() {
    let mut upstream = Upstream::new(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n"]);
    upstream.first_stream_status = Some(StatusCode::UNAUTHORIZED);
    let token_calls = upstream.token_calls.clone();
    let stream_calls = upstream.stream_calls.clone();
    let base = spawn_upstream(upstream).await;

    let client = client_for(&base);
    let err = client.complete(&json!({})).await.unwrap_err();
    assert!(matches!(err, RelayError::UpstreamStatus(401)), "got {err:?}");
    assert_eq!(client.complete(&json!({})).await.unwrap(), "ok");

    assert_eq!(token_calls.load(Ordering::SeqCst), 2);
    assert_eq!(stream_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unconfigured_client_is_rejected() {
    let err = WatsonxClient::new(&WatsonxConfig::default()).unwrap_err();
    assert!(matches!(err, RelayError::NotConfigured("watsonx")));
    let err = OpenRouterClient::new(&OpenRouterConfig::default()).unwrap_err();
    assert!(matches!(err, RelayError::NotConfigured("openrouter")));
}

#[tokio::test]
async fn openrouter_returns_first_choice_content() {
    async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(headers["x-title"], "Samadhan AI");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer or-key");
        assert_eq!(body["model"], "deepseek/deepseek-chat");
        assert_eq!(body["messages"][0]["content"], "classify this");
        Json(json!({ "choices": [{ "message": { "content": "{\"category\":\"Traffic\"}" } }] }))
    }

    let app = Router::new().route("/api/v1/chat/completions", post(completions));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = OpenRouterConfig {
        api_key: "or-key".to_string(),
        base_url: format!("http://{}/api/v1/", addr),
        ..OpenRouterConfig::default()
    };
    let client = OpenRouterClient::new(&config).unwrap();
    let reply = client.complete("classify this").await.unwrap();
    assert_eq!(reply, "{\"category\":\"Traffic\"}");
}
