//! Fixtures shared by unit and router tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::jwt::create_access_token;
use crate::config::Config;
use crate::db::memory::MemoryStore;
use crate::db::store::EntryStore;
use crate::models::entry::{Entry, Timestamp};
use crate::AppState;

pub fn at(raw: &str) -> NaiveDateTime {
    Timestamp::parse(raw)
        .ok()
        .and_then(|ts| ts.instant())
        .expect("fixture timestamp must parse")
}

/// Entry with only a timestamp and an optional mood score.
pub fn entry(user_id: &str, timestamp: &str, mood_score: Option<i32>) -> Entry {
    Entry {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        timestamp: Timestamp::from_stored(timestamp.to_string()),
        journal_text: None,
        text_emotion: None,
        text_confidence: None,
        audio_emotion: None,
        audio_confidence: None,
        final_emotion: None,
        mood_score,
    }
}

pub fn entry_with(user_id: &str, timestamp: &str, f: impl FnOnce(&mut Entry)) -> Entry {
    let mut e = entry(user_id, timestamp, None);
    f(&mut e);
    e
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        db_max_connections: 1,
        db_acquire_timeout_secs: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "test-secret".into(),
        forecast_seed: Some(11),
        burnout_window_days: 30,
    }
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        store: store as Arc<dyn EntryStore>,
        config: Arc::new(test_config()),
    }
}

pub fn bearer(user_id: &str) -> String {
    let token = create_access_token(user_id, &test_config()).expect("token");
    format!("Bearer {token}")
}

pub fn get(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(user_id))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, user_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Drive one request through the router and decode the JSON body.
pub async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
