//! Shared test fixtures for the body composition SDK integration tests.
//!
//! Provides sample records and `FakeApi`, an in-process axum server that
//! speaks the `/bodyComposition` and `/user/firebase/login` envelopes so the
//! blocking client can be exercised end to end.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use body_composition_sdk::{BodyCompositionSdk, MeasurementRecord};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Sample records
// ---------------------------------------------------------------------------

/// JSON for a record with the given identity, date and weight and a
/// plausible set of other metrics.
pub fn record_json(id: &str, date: i64, weight: f64) -> Value {
    json!({
        "userId": "user-1",
        "id": id,
        "createdAt": date,
        "updatedAt": date,
        "date": date,
        "weight": weight,
        "bodyFatPercentage": 20.0,
        "muscleMassPercentage": 40.0,
        "muscleMass": 32.0,
        "subcutaneousFat": 15.0,
        "visceralFat": 8.0,
        "bodyHydration": 55.0,
        "skeletalMuscle": 45.0,
        "boneMass": 3.2,
        "protein": 18.0,
        "bmi": 24.5,
        "bmr": 1700.0,
        "metabolicAge": 30.0
    })
}

pub fn record(id: &str, date: i64, weight: f64) -> MeasurementRecord {
    serde_json::from_value(record_json(id, date, weight)).unwrap()
}

/// `n` records one day apart starting at 2025-01-01, ids `rec-0..`,
/// weight dropping 0.5 kg per entry.
pub fn daily_records(n: usize) -> Vec<MeasurementRecord> {
    (0..n)
        .map(|i| record(&format!("rec-{}", i), 1_735_689_600 + i as i64 * 86_400, 80.0 - i as f64 * 0.5))
        .collect()
}

// ---------------------------------------------------------------------------
// FakeApi
// ---------------------------------------------------------------------------

pub const GOOD_ID_TOKEN: &str = "good-id-token";
pub const APP_TOKEN: &str = "app-token";

#[derive(Default)]
pub struct FakeState {
    pub records: Vec<Value>,
    pub next_id: usize,
    /// When set, requests without this `token` header get a 401.
    pub required_token: Option<String>,
    /// Returned (once) instead of handling the next request.
    pub fail_next: Option<(u16, Value)>,
    /// `(method, path, token header)` for every request received.
    pub requests: Vec<(String, String, Option<String>)>,
}

type Shared = Arc<Mutex<FakeState>>;
type Reply = (StatusCode, Json<Value>);

pub struct FakeApi {
    pub base_url: String,
    pub state: Shared,
}

impl FakeApi {
    /// Start a server on an ephemeral port. It lives until the test process exits.
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
        let app = router(state.clone());
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = rx.recv().unwrap();
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn with_records(records: &[Value]) -> Self {
        let api = Self::start();
        api.state.lock().unwrap().records = records.to_vec();
        api
    }

    pub fn require_token(&self, token: &str) {
        self.state.lock().unwrap().required_token = Some(token.to_string());
    }

    pub fn fail_next(&self, status: u16, body: Value) {
        self.state.lock().unwrap().fail_next = Some((status, body));
    }

    pub fn requests(&self) -> Vec<(String, String, Option<String>)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    /// SDK pointed at this server with an in-memory session.
    pub fn sdk(&self) -> BodyCompositionSdk {
        BodyCompositionSdk::builder()
            .base_url(&self.base_url)
            .memory_store()
            .build()
            .unwrap()
    }

    /// SDK with `APP_TOKEN` already stored.
    pub fn signed_in_sdk(&self) -> BodyCompositionSdk {
        let sdk = self.sdk();
        sdk.session().store().set("token", APP_TOKEN).unwrap();
        sdk
    }
}

fn ok(data: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "status": "0", "message": "Success", "error": null, "data": data })),
    )
}

fn rejected(http: StatusCode, message: &str) -> Reply {
    (
        http,
        Json(json!({ "status": "1", "message": message, "error": message, "data": null })),
    )
}

/// Log the request and apply forced failures and the token check.
fn gate(state: &Shared, method: &str, path: &str, headers: &HeaderMap) -> Option<Reply> {
    let mut st = state.lock().unwrap();
    let token = headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    st.requests.push((method.to_string(), path.to_string(), token.clone()));

    if let Some((status, body)) = st.fail_next.take() {
        return Some((StatusCode::from_u16(status).unwrap(), Json(body)));
    }
    if let Some(required) = &st.required_token {
        if token.as_deref() != Some(required.as_str()) {
            return Some(rejected(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }
    None
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/bodyComposition", get(list_records).post(create_record))
        .route("/bodyComposition/{id}", put(update_record).delete(delete_record))
        .route("/user/firebase/login", post(login))
        .with_state(state)
}

async fn list_records(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if let Some(reply) = gate(&state, "GET", "/bodyComposition", &headers) {
        return reply;
    }
    let st = state.lock().unwrap();
    ok(Value::Array(st.records.clone()))
}

async fn create_record(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if let Some(reply) = gate(&state, "POST", "/bodyComposition", &headers) {
        return reply;
    }
    let mut st = state.lock().unwrap();
    st.next_id += 1;
    let mut created = body;
    let obj = created.as_object_mut().unwrap();
    obj.insert("id".into(), json!(format!("new-{}", st.next_id)));
    obj.insert("userId".into(), json!("user-1"));
    obj.insert("createdAt".into(), json!(1_750_000_000));
    obj.insert("updatedAt".into(), json!(1_750_000_000));
    st.records.push(created.clone());
    ok(created)
}

async fn update_record(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let path = format!("/bodyComposition/{}", id);
    if let Some(reply) = gate(&state, "PUT", &path, &headers) {
        return reply;
    }
    let mut st = state.lock().unwrap();
    let Some(existing) = st.records.iter_mut().find(|r| r["id"] == json!(id)) else {
        return rejected(StatusCode::NOT_FOUND, "Record not found");
    };
    for (k, v) in body.as_object().unwrap() {
        existing[k] = v.clone();
    }
    existing["updatedAt"] = json!(1_760_000_000);
    let updated = existing.clone();
    ok(updated)
}

async fn delete_record(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let path = format!("/bodyComposition/{}", id);
    if let Some(reply) = gate(&state, "DELETE", &path, &headers) {
        return reply;
    }
    let mut st = state.lock().unwrap();
    let before = st.records.len();
    st.records.retain(|r| r["id"] != json!(id));
    if st.records.len() == before {
        return rejected(StatusCode::OK, "Record not found");
    }
    ok(Value::Null)
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    if let Some(reply) = gate(&state, "POST", "/user/firebase/login", &headers) {
        return reply;
    }
    if body["idToken"] != json!(GOOD_ID_TOKEN) {
        return rejected(StatusCode::OK, "Invalid ID token");
    }
    ok(json!({
        "user": {
            "userId": null,
            "id": "user-1",
            "createdAt": 1_700_000_000,
            "updatedAt": 1_700_000_000,
            "name": "Test User",
            "email": "test@example.com",
            "imageUrl": "https://example.com/a.png",
            "appleUserId": null,
            "lastActiveDate": "2025-01-01"
        },
        "token": APP_TOKEN
    }))
}
