// Common test utilities and helpers

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::create_app;
use crate::services::{Orchestrator, TextGenerator};
use crate::utils::{ApiError, ApiResult};

/// Generator stub that answers every call with the same reply and records
/// how often (and with what) it was called.
pub struct FixedGenerator {
    reply: String,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FixedGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
    }
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        self.record(prompt);
        Ok(self.reply.clone())
    }

    async fn generate_structured(&self, prompt: &str) -> ApiResult<Value> {
        self.record(prompt);
        serde_json::from_str(&self.reply).map_err(Into::into)
    }
}

/// Scripted reply sequence for multi-stage pipelines.
pub enum ScriptedReply {
    Text(&'static str),
    Json(Value),
    Fail(&'static str),
}

pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<ScriptedReply>) -> Arc<Self> {
        Arc::new(Self { replies: Mutex::new(replies.into()), calls: AtomicUsize::new(0) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> ScriptedReply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies.lock().unwrap().pop_front().expect("no scripted reply left")
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> ApiResult<String> {
        match self.next() {
            ScriptedReply::Text(text) => Ok(text.to_string()),
            ScriptedReply::Json(value) => Ok(value.to_string()),
            ScriptedReply::Fail(message) => Err(ApiError::upstream(message)),
        }
    }

    async fn generate_structured(&self, _prompt: &str) -> ApiResult<Value> {
        match self.next() {
            ScriptedReply::Json(value) => Ok(value),
            ScriptedReply::Text(text) => Ok(serde_json::from_str(text)?),
            ScriptedReply::Fail(message) => Err(ApiError::upstream(message)),
        }
    }
}

/// Router wired to a stub generator
pub fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
    create_app(Arc::new(Orchestrator::new(generator)))
}

/// Router for the missing-credential case
pub fn app_without_key() -> Router {
    create_app(Arc::new(Orchestrator::without_generator()))
}

/// POST a JSON body to /api/generate and return status plus parsed body
/// (Value::Null when the body is not JSON).
pub async fn post_generate(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// POST a raw body, optionally without the JSON content-type, and return
/// status plus parsed body.
pub async fn post_raw(
    app: Router,
    body: &'static str,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/api/generate");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Send a bodyless request with an arbitrary method, returning the raw body.
pub async fn send_method(app: Router, method: &str) -> (StatusCode, String) {
    let request =
        Request::builder().method(method).uri("/api/generate").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
