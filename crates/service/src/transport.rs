//! Session-aware HTTP transport.
//!
//! Attaches the current bearer token to every outbound call and applies one
//! policy to 401 responses: a rejected read means the session is over, a
//! rejected write is reported to the caller and the session is kept.

use std::sync::Arc;
use std::time::{Duration, Instant};

use configs::BackendConfig;
use reqwest::{header, Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::endpoints::ApiPath;
use crate::errors::TransportError;
use crate::observability::{FAILURES_TOTAL, REQUESTS_TOTAL, REQUEST_DURATION, SESSION_EXPIRED_TOTAL};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Write,
}

impl RequestKind {
    /// GET, HEAD and OPTIONS read; every other verb writes.
    pub fn of(method: &Method) -> Self {
        if *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS {
            RequestKind::Read
        } else {
            RequestKind::Write
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedAction {
    /// Clear the session and tell the caller to re-authenticate.
    ExpireSession,
    /// Keep the session and hand the 401 back as an ordinary HTTP failure.
    Report,
}

/// A failed edit must not sign the operator out of an otherwise valid session.
pub fn unauthorized_action(kind: RequestKind) -> UnauthorizedAction {
    match kind {
        RequestKind::Read => UnauthorizedAction::ExpireSession,
        RequestKind::Write => UnauthorizedAction::Report,
    }
}

#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: Arc<Url>,
    session: Arc<Session>,
    timeout: Duration,
}

impl Transport {
    pub fn new(cfg: &BackendConfig, session: Arc<Session>) -> Result<Self, TransportError> {
        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| TransportError::Setup(format!("invalid base address {:?}: {e}", cfg.base_url)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::Setup(format!("base address must be an http(s) URL, got {:?}", cfg.base_url)));
        }
        if cfg.timeout_ms == 0 {
            return Err(TransportError::Setup("request timeout must be greater than zero".to_string()));
        }
        let timeout = Duration::from_millis(cfg.timeout_ms);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self { client, base_url: Arc::new(base_url), session, timeout })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url_for(&self, path: &ApiPath) -> Url {
        let mut url = (*self.base_url).clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url
    }

    /// Send one request and return the decoded body of a 2xx response.
    ///
    /// Bodies that are empty decode to `null`; bodies that are not JSON come
    /// back as a JSON string. No retries are made.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request(&self, method: Method, path: &ApiPath, body: Option<&Value>) -> Result<Value, TransportError> {
        let started = Instant::now();
        REQUESTS_TOTAL.inc();
        let result = self.dispatch(method, path, body).await;
        let elapsed = started.elapsed();
        REQUEST_DURATION.observe(elapsed.as_secs_f64());
        match &result {
            Ok(_) => debug!(elapsed_ms = elapsed.as_millis() as u64, "request succeeded"),
            Err(e) => {
                FAILURES_TOTAL.inc();
                debug!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "request failed");
            }
        }
        result
    }

    async fn dispatch(&self, method: Method, path: &ApiPath, body: Option<&Value>) -> Result<Value, TransportError> {
        let kind = RequestKind::of(&method);
        // Kept so a 401 only clears the principal this request actually used.
        let principal = self.session.snapshot();

        let mut req = self.client.request(method, self.url_for(path));
        if let Some(principal) = &principal {
            req = req.bearer_auth(principal.token());
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = decode_body(&text);

        if status.is_success() {
            return Ok(body);
        }
        if status == StatusCode::UNAUTHORIZED {
            match unauthorized_action(kind) {
                UnauthorizedAction::ExpireSession => {
                    let cleared = self.session.expire(&principal);
                    SESSION_EXPIRED_TOTAL.inc();
                    warn!(cleared, "read rejected as unauthorized; session expired");
                    return Err(TransportError::SessionExpired);
                }
                UnauthorizedAction::Report => {
                    warn!("write rejected as unauthorized; session kept");
                }
            }
        }
        Err(TransportError::Http { status: status.as_u16(), body })
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport(base_url: &str) -> Result<Transport, TransportError> {
        let cfg = BackendConfig { base_url: base_url.to_string(), timeout_ms: 1_000 };
        Transport::new(&cfg, Arc::new(Session::new()))
    }

    #[test]
    fn verbs_classify_into_reads_and_writes() {
        assert_eq!(RequestKind::of(&Method::GET), RequestKind::Read);
        assert_eq!(RequestKind::of(&Method::HEAD), RequestKind::Read);
        assert_eq!(RequestKind::of(&Method::OPTIONS), RequestKind::Read);
        for method in [Method::PUT, Method::POST, Method::PATCH, Method::DELETE] {
            assert_eq!(RequestKind::of(&method), RequestKind::Write);
        }
    }

    #[test]
    fn unauthorized_policy_is_asymmetric() {
        assert_eq!(unauthorized_action(RequestKind::Read), UnauthorizedAction::ExpireSession);
        assert_eq!(unauthorized_action(RequestKind::Write), UnauthorizedAction::Report);
    }

    #[test]
    fn urls_append_to_the_base_path() -> Result<(), TransportError> {
        let t = transport("http://localhost:3000/api")?;
        assert_eq!(t.url_for(&ApiPath::from("loans/all/list")).as_str(), "http://localhost:3000/api/loans/all/list");

        let t = transport("http://localhost:3000/api/")?;
        assert_eq!(t.url_for(&ApiPath::from("auth/users")).as_str(), "http://localhost:3000/api/auth/users");

        let t = transport("http://localhost:3000")?;
        assert_eq!(t.url_for(&ApiPath::new(["loans", "a b/c"])).as_str(), "http://localhost:3000/loans/a%20b%2Fc");
        Ok(())
    }

    #[test]
    fn setup_rejects_unusable_base_addresses() {
        assert!(matches!(transport("not a url"), Err(TransportError::Setup(_))));
        assert!(matches!(transport("mailto:ops@loan.com"), Err(TransportError::Setup(_))));
        assert!(matches!(transport("ftp://files.example.com"), Err(TransportError::Setup(_))));
    }

    #[test]
    fn setup_rejects_a_zero_timeout() {
        let cfg = BackendConfig { base_url: "http://localhost:3000/api".to_string(), timeout_ms: 0 };
        assert!(matches!(Transport::new(&cfg, Arc::new(Session::new())), Err(TransportError::Setup(_))));
    }

    #[test]
    fn bodies_decode_leniently() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("  \n"), Value::Null);
        assert_eq!(decode_body(r#"{"loans":[]}"#), json!({ "loans": [] }));
        assert_eq!(decode_body("Unauthorized"), json!("Unauthorized"));
    }
}
