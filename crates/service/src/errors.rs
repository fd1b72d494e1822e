use models::ModelError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// What the transport reports. It classifies failures and never recovers them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    /// A response arrived with a non-2xx status. Includes 401 on writes.
    #[error("backend responded with status {status}")]
    Http { status: u16, body: Value },
    /// 401 on a read. The session has been cleared.
    #[error("session expired")]
    SessionExpired,
    #[error("transport setup failed: {0}")]
    Setup(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `message` (or `error`) from a JSON error body, when the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        let TransportError::Http { body, .. } = self else {
            return None;
        };
        ["message", "error"]
            .into_iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// The collaborator operations, used to pick fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListLoans,
    ListUsers,
    UpdateLoan,
    UpdateLoanStatus,
    UpdateUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Server(u16),
    /// The transport could not be built from its configuration.
    Configuration,
}

pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "The server took too long to respond. Please try again.";

/// What callers of the collaborator operations see.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The only failure that should send the operator back to sign-in.
    #[error("session expired; sign in again")]
    ReauthenticationRequired,
    #[error("{message}")]
    Failed { kind: FailureKind, message: String },
    #[error(transparent)]
    Invalid(#[from] ModelError),
}

impl ConsoleError {
    pub fn from_transport(op: Operation, err: TransportError) -> Self {
        let message = err.server_message().map(str::to_string);
        let (kind, fallback) = match &err {
            TransportError::SessionExpired => return ConsoleError::ReauthenticationRequired,
            TransportError::Network(_) => (FailureKind::Network, NETWORK_MESSAGE.to_string()),
            TransportError::Setup(detail) => (FailureKind::Configuration, format!("Console is misconfigured: {detail}")),
            TransportError::Timeout => (FailureKind::Timeout, TIMEOUT_MESSAGE.to_string()),
            TransportError::Http { status, .. } => (FailureKind::Server(*status), server_fallback(op, *status)),
        };
        ConsoleError::Failed { kind, message: message.unwrap_or(fallback) }
    }

    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ConsoleError::ReauthenticationRequired)
    }
}

fn server_fallback(op: Operation, status: u16) -> String {
    match op {
        Operation::ListLoans | Operation::ListUsers => {
            let reason = StatusCode::from_u16(status).ok().and_then(|s| s.canonical_reason()).unwrap_or("");
            format!("Error: {status} {reason}").trim_end().to_string()
        }
        Operation::UpdateLoan | Operation::UpdateLoanStatus => "Failed to update loan. Please try again.".to_string(),
        Operation::UpdateUser => "Failed to update user. Please try again.".to_string(),
    }
}
