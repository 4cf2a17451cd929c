use super::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ProviderState {
    requests: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
    reject: bool,
}

async fn handle_email(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push((auth, body));
    if state.reject {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "message": "invalid reply_to" })),
        )
    } else {
        (StatusCode::OK, Json(serde_json::json!({ "id": "email-1" })))
    }
}

async fn spawn_provider(state: ProviderState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/emails", post(handle_email))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn email() -> OutboundEmail {
    OutboundEmail {
        from: "IV Strategies <onboarding@resend.dev>".into(),
        to: "operator@example.com".into(),
        reply_to: "jane@acme.com".into(),
        subject: "New Website Briefing: Acme - Website Redesign".into(),
        html: "<p>hi</p>".into(),
    }
}

#[tokio::test]
async fn resend_mailer_posts_message_with_bearer_key() {
    let state = ProviderState::default();
    let url = spawn_provider(state.clone()).await;
    let mailer = ResendMailer::new(format!("{url}/"), "re_test");

    mailer.send(&email()).await.expect("send");

    let requests = state.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer re_test"));
    assert_eq!(body["to"], serde_json::json!(["operator@example.com"]));
    assert_eq!(body["reply_to"], "jane@acme.com");
    assert_eq!(body["subject"], "New Website Briefing: Acme - Website Redesign");
}

#[tokio::test]
async fn resend_rejection_surfaces_as_provider_error() {
    let state = ProviderState {
        reject: true,
        ..ProviderState::default()
    };
    let url = spawn_provider(state).await;
    let mailer = ResendMailer::new(url, "re_test");

    let err = mailer.send(&email()).await.expect_err("should fail");
    assert!(matches!(err, MailError::Provider { status: 422, .. }));
}

#[tokio::test]
async fn unreachable_provider_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mailer = ResendMailer::new(format!("http://{addr}"), "re_test");
    let err = mailer.send(&email()).await.expect_err("should fail");
    assert!(matches!(err, MailError::Http(_)));
}

#[test]
fn smtp_message_carries_reply_to_and_html_body() {
    let message = build_message(&email()).expect("message");
    let raw = String::from_utf8(message.formatted()).expect("utf8");
    assert!(raw.contains("Reply-To: jane@acme.com"));
    assert!(raw.contains("Content-Type: text/html"));
}

#[test]
fn malformed_reply_to_fails_to_build() {
    let mut email = email();
    email.reply_to = "not-an-email".into();
    assert!(matches!(build_message(&email), Err(MailError::Address(_))));
}
