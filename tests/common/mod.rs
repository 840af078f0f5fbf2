#![allow(dead_code)]

use async_trait::async_trait;
use authswitch::application::gateway::PaymentGateway;
use authswitch::domain::lookup::MsisdnLookup;
use authswitch::domain::ports::{AuthResponseStore, AuthResponseStoreRef, PersistenceObserver};
use authswitch::domain::transaction::AuthTransactionResponse;
use authswitch::error::{Result as StoreResult, StoreError};
use authswitch::infrastructure::http_remote::HttpRemoteApi;
use authswitch::infrastructure::in_memory::InMemoryAuthResponseStore;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "pass";
/// base64("user:pass")
const EXPECTED_AUTH: &str = "Basic dXNlcjpwYXNz";
pub const CLIENT_ID: &str = "client-1";
pub const MSISDN: &str = "27821234567";
pub const USER_ID: &str = "U100";

/// What the fake verification service answers and what it saw.
#[derive(Default)]
pub struct RemoteState {
    pub is_alive_reply: Mutex<Value>,
    pub auth_reply: Mutex<Value>,
    pub query_reply: Mutex<Value>,
    pub ping_calls: AtomicUsize,
    pub auth_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub rejected_credentials: AtomicUsize,
    pub auth_bodies: Mutex<Vec<Value>>,
    pub seen_query_ids: Mutex<Vec<String>>,
    pub content_types: Mutex<Vec<Option<String>>>,
}

impl RemoteState {
    pub fn set_is_alive(&self, reply: Value) {
        *self.is_alive_reply.lock().unwrap() = reply;
    }

    pub fn set_auth(&self, reply: Value) {
        *self.auth_reply.lock().unwrap() = reply;
    }

    pub fn set_query(&self, reply: Value) {
        *self.query_reply.lock().unwrap() = reply;
    }

    pub fn total_calls(&self) -> usize {
        self.ping_calls.load(Ordering::SeqCst)
            + self.auth_calls.load(Ordering::SeqCst)
            + self.query_calls.load(Ordering::SeqCst)
    }
}

fn check_credentials(state: &RemoteState, headers: &HeaderMap) -> Option<Response> {
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(EXPECTED_AUTH);
    if ok {
        None
    } else {
        state.rejected_credentials.fetch_add(1, Ordering::SeqCst);
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "resultText": "unauthorized"})),
            )
                .into_response(),
        )
    }
}

async fn is_alive(State(state): State<Arc<RemoteState>>, headers: HeaderMap) -> Response {
    state.ping_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(rejected) = check_credentials(&state, &headers) {
        return rejected;
    }
    let reply = state.is_alive_reply.lock().unwrap().clone();
    Json(reply).into_response()
}

async fn auth(
    State(state): State<Arc<RemoteState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.auth_calls.fetch_add(1, Ordering::SeqCst);
    state.content_types.lock().unwrap().push(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    if let Some(rejected) = check_credentials(&state, &headers) {
        return rejected;
    }
    state.auth_bodies.lock().unwrap().push(body);
    let reply = state.auth_reply.lock().unwrap().clone();
    Json(reply).into_response()
}

async fn query(
    State(state): State<Arc<RemoteState>>,
    headers: HeaderMap,
    Path(tran_id): Path<String>,
) -> Response {
    state.query_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(rejected) = check_credentials(&state, &headers) {
        return rejected;
    }
    state.seen_query_ids.lock().unwrap().push(tran_id.clone());
    let mut reply = state.query_reply.lock().unwrap().clone();
    reply["tranid"] = Value::String(tran_id);
    Json(reply).into_response()
}

/// Fake remote verification service bound to an ephemeral local port.
pub struct MockRemote {
    pub addr: SocketAddr,
    pub state: Arc<RemoteState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockRemote {
    pub async fn start() -> Self {
        let state = Arc::new(RemoteState::default());
        state.set_is_alive(json!({"success": true, "resultText": "OK"}));
        state.set_auth(approved_reply("DEV1-001"));
        state.set_query(approved_reply("DEV1-001"));

        let app = Router::new()
            .route("/api/isAlive", get(is_alive))
            .route("/api/auth", post(auth))
            .route("/api/auth/{tranid}", get(query))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = spawn_with_shutdown(listener, app);

        Self {
            addr,
            state,
            shutdown: Some(shutdown),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn client(&self) -> HttpRemoteApi {
        remote_api(&self.base_url(), USERNAME, PASSWORD)
    }
}

impl Drop for MockRemote {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Remote client that ignores proxy environment variables.
pub fn remote_api(base_url: &str, username: &str, password: &str) -> HttpRemoteApi {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .no_proxy()
        .build()
        .unwrap();
    HttpRemoteApi::with_client(base_url, username, password, client)
}

pub fn spawn_with_shutdown(listener: TcpListener, router: Router) -> oneshot::Sender<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });
    shutdown_tx
}

pub fn approved_reply(tran_id: &str) -> Value {
    json!({
        "success": true,
        "resultText": "OK",
        "amount_in_cents": 500,
        "tranid": tran_id,
        "userid": USER_ID,
        "authorized": true,
    })
}

pub fn payment_body(device_id: &str, tsn: &str, msisdn: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "amount": 500,
        "deviceID": device_id,
        "msisdn": msisdn,
        "tsn": tsn,
    }))
    .unwrap()
}

pub fn lookup() -> Arc<MsisdnLookup> {
    Arc::new(MsisdnLookup::parse(&format!("{MSISDN}={USER_ID}\n")))
}

/// Store wrapper counting calls on the way through.
#[derive(Clone)]
pub struct CountingStore {
    pub inner: InMemoryAuthResponseStore,
    pub puts: Arc<AtomicUsize>,
    pub gets: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryAuthResponseStore::new("auth_responses"),
            puts: Arc::default(),
            gets: Arc::default(),
        }
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthResponseStore for CountingStore {
    async fn put(&self, tran_id: &str, rsp: &AuthTransactionResponse) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(tran_id, rsp).await
    }

    async fn get(&self, tran_id: &str) -> StoreResult<AuthTransactionResponse> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(tran_id).await
    }
}

#[derive(Default, Clone)]
pub struct RecordingObserver {
    pub failures: Arc<Mutex<Vec<String>>>,
}

impl PersistenceObserver for RecordingObserver {
    fn persistence_failed(&self, tran_id: &str, err: &StoreError) {
        self.failures
            .lock()
            .unwrap()
            .push(format!("{tran_id}: {err}"));
    }
}

pub fn gateway_with(remote: &MockRemote, store: AuthResponseStoreRef) -> PaymentGateway {
    PaymentGateway::new(
        CLIENT_ID,
        lookup(),
        store,
        Box::new(remote.client()),
        Box::new(RecordingObserver::default()),
    )
}
