#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use configs::BackendConfig;
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as the mock backend received it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

type Responder = dyn Fn(&Seen) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
    respond: Arc<Responder>,
    delay: Duration,
}

pub struct MockBackend {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockBackend {
    pub async fn start<F>(respond: F) -> anyhow::Result<Self>
    where
        F: Fn(&Seen) -> (StatusCode, String) + Send + Sync + 'static,
    {
        Self::start_with_delay(Duration::ZERO, respond).await
    }

    pub async fn start_with_delay<F>(delay: Duration, respond: F) -> anyhow::Result<Self>
    where
        F: Fn(&Seen) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = Backend { seen: Arc::clone(&seen), respond: Arc::new(respond), delay };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr: SocketAddr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock backend error: {}", e);
            }
        });

        Ok(Self { base_url: format!("http://{}:{}/api", addr.ip(), addr.port()), seen })
    }

    pub fn config(&self) -> BackendConfig {
        BackendConfig { base_url: self.base_url.clone(), timeout_ms: 2_000 }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

async fn record(State(backend): State<Backend>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let seen = Seen {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    if let Ok(mut log) = backend.seen.lock() {
        log.push(seen.clone());
    }
    if !backend.delay.is_zero() {
        tokio::time::sleep(backend.delay).await;
    }
    (backend.respond)(&seen).into_response()
}

pub fn reply(status: StatusCode, body: Value) -> (StatusCode, String) {
    (status, body.to_string())
}

/// An address nothing listens on.
pub async fn closed_address() -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}:{}/api", addr.ip(), addr.port()))
}
