use std::{
    sync::{Arc, Mutex as StdMutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use client_core::{
    CheckboxState, Collaborators, MessageClass, NotificationsError, NotificationsPanel,
    NotificationsView, ReqwestJsonClient, StatusMessage, SubmitOutcome,
};
use serde_json::{json, Value};
use shared::domain::{Catalog, MailingListKey};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct SettingsServer {
    mailing_lists: Value,
    reject_with: Option<(StatusCode, Value)>,
    posted: Arc<Mutex<Vec<Value>>>,
}

async fn get_settings(State(state): State<SettingsServer>) -> Json<Value> {
    Json(json!({ "mailing_lists": state.mailing_lists }))
}

async fn post_settings(
    State(state): State<SettingsServer>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.posted.lock().await.push(payload);
    match state.reject_with {
        Some((status, body)) => (status, Json(body)),
        None => (StatusCode::OK, Json(json!({}))),
    }
}

async fn spawn_server(state: SettingsServer) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/v1/settings/notifications", get(get_settings))
        .route("/api/v1/settings/notifications/", post(post_settings))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[derive(Default)]
struct LastRender {
    checkboxes: StdMutex<Vec<CheckboxState>>,
    status: StdMutex<StatusMessage>,
}

impl NotificationsView for LastRender {
    fn render_checkboxes(&self, checkboxes: &[CheckboxState]) {
        *self.checkboxes.lock().expect("lock") = checkboxes.to_vec();
    }

    fn render_status(&self, status: &StatusMessage) {
        *self.status.lock().expect("lock") = status.clone();
    }
}

async fn mount_against(server: SettingsServer) -> (NotificationsPanel, Arc<LastRender>) {
    let server_url = spawn_server(server).await.expect("spawn server");
    let http = ReqwestJsonClient::new(&server_url).expect("client");
    let view = Arc::new(LastRender::default());
    let catalog = Catalog::new(["news", "digest"]).expect("catalog");
    let panel = NotificationsPanel::mount(
        Arc::clone(&view),
        catalog,
        Collaborators::new(Arc::new(http)),
    );
    (panel, view)
}

async fn eventually(mut check: impl FnMut() -> bool) {
    for _ in 0..100 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn load_toggle_and_submit_against_live_server() {
    let posted = Arc::new(Mutex::new(Vec::new()));
    let (mut panel, view) = mount_against(SettingsServer {
        mailing_lists: json!({"news": true, "digest": false}),
        reject_with: None,
        posted: Arc::clone(&posted),
    })
    .await;

    panel.loaded().await.expect("load");
    let vm = Arc::clone(panel.view_model());
    assert_eq!(vm.subscribed(), vec![MailingListKey::from("news")]);
    eventually(|| {
        view.checkboxes
            .lock()
            .expect("lock")
            .iter()
            .any(|c| c.key.as_str() == "news" && c.checked)
    })
    .await;

    assert_eq!(vm.submit().await.expect("submit"), SubmitOutcome::Updated);
    vm.set_subscribed("digest", true).expect("known key");
    vm.set_subscribed("news", false).expect("known key");
    assert_eq!(vm.submit().await.expect("submit"), SubmitOutcome::Updated);

    assert_eq!(
        *posted.lock().await,
        vec![
            json!({"news": true, "digest": false}),
            json!({"news": false, "digest": true}),
        ]
    );
    eventually(|| {
        *view.status.lock().expect("lock")
            == StatusMessage::new("Settings updated.", MessageClass::Success)
    })
    .await;
}

#[tokio::test]
async fn not_subscribed_rejection_is_silent() {
    let (mut panel, view) = mount_against(SettingsServer {
        mailing_lists: json!({}),
        reject_with: Some((
            StatusCode::BAD_REQUEST,
            json!({"error_type": "not_subscribed"}),
        )),
        posted: Arc::new(Mutex::new(Vec::new())),
    })
    .await;
    panel.loaded().await.expect("load");

    let outcome = panel.view_model().submit().await.expect("silent outcome");
    assert_eq!(outcome, SubmitOutcome::NotSubscribed);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(view.status.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn server_error_mentions_support() {
    let (mut panel, view) = mount_against(SettingsServer {
        mailing_lists: json!({}),
        reject_with: Some((
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error_type": "server_error"}),
        )),
        posted: Arc::new(Mutex::new(Vec::new())),
    })
    .await;
    panel.loaded().await.expect("load");

    let err = panel.view_model().submit().await.expect_err("must fail");
    assert!(matches!(err, NotificationsError::SubmitFailed { .. }));
    eventually(|| {
        let status = view.status.lock().expect("lock");
        status.class == MessageClass::Danger && status.text.contains("mailto:support@osf.io")
    })
    .await;
}
