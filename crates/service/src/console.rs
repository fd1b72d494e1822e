//! The operations the console screens call: list and edit loans and users.

use std::sync::Arc;

use async_trait::async_trait;
use configs::BackendConfig;
use models::{
    extract_list, to_loan_record, to_user_record, LoanRecord, LoanStatus, LoanUpdate, ModelError, RecordKind,
    UserRecord, UserUpdate, UNKNOWN,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::endpoints::{self, ApiPath};
use crate::errors::{ConsoleError, Operation, TransportError};
use crate::session::Session;
use crate::transport::Transport;

/// Collaborator contract between the data layer and whatever presents it.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn list_loans(&self) -> Result<Vec<LoanRecord>, ConsoleError>;
    async fn list_users(&self) -> Result<Vec<UserRecord>, ConsoleError>;
    async fn update_loan(&self, id: &str, update: &LoanUpdate) -> Result<(), ConsoleError>;
    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<(), ConsoleError>;
    async fn update_loan_status(&self, id: &str, status: LoanStatus) -> Result<(), ConsoleError>;
}

/// [`ConsoleApi`] over the session-aware transport.
#[derive(Clone)]
pub struct AdminClient {
    transport: Transport,
}

impl AdminClient {
    pub fn new(cfg: &BackendConfig, session: Arc<Session>) -> Result<Self, TransportError> {
        Ok(Self::from_transport(Transport::new(cfg, session)?))
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.transport.session()
    }

    async fn fetch(&self, op: Operation, path: ApiPath) -> Result<Value, ConsoleError> {
        self.transport
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| classify(op, e))
    }

    async fn put<B: Serialize + ?Sized>(&self, op: Operation, path: ApiPath, body: &B) -> Result<(), ConsoleError> {
        let body = serde_json::to_value(body).map_err(|e| ModelError::validation("body", e.to_string()))?;
        self.transport
            .request(Method::PUT, &path, Some(&body))
            .await
            .map(|_| ())
            .map_err(|e| classify(op, e))
    }
}

#[async_trait]
impl ConsoleApi for AdminClient {
    async fn list_loans(&self) -> Result<Vec<LoanRecord>, ConsoleError> {
        let envelope = self.fetch(Operation::ListLoans, endpoints::list_loans()).await?;
        let loans = keep_addressable(
            extract_list(&envelope, RecordKind::Loan).iter().map(to_loan_record),
            LoanRecord::has_identity,
            "loan",
        );
        info!(count = loans.len(), "loans listed");
        Ok(loans)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, ConsoleError> {
        let envelope = self.fetch(Operation::ListUsers, endpoints::list_users()).await?;
        let users = keep_addressable(
            extract_list(&envelope, RecordKind::User).iter().map(to_user_record),
            UserRecord::has_identity,
            "user",
        );
        info!(count = users.len(), "users listed");
        Ok(users)
    }

    async fn update_loan(&self, id: &str, update: &LoanUpdate) -> Result<(), ConsoleError> {
        let id = addressable(id)?;
        if update.is_empty() {
            return Err(ModelError::validation("update", "nothing to change").into());
        }
        update.validate()?;
        self.put(Operation::UpdateLoan, endpoints::update_loan(id), update).await?;
        info!(id, "loan updated");
        Ok(())
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<(), ConsoleError> {
        let id = addressable(id)?;
        if update.is_empty() {
            return Err(ModelError::validation("update", "nothing to change").into());
        }
        self.put(Operation::UpdateUser, endpoints::update_user(id), update).await?;
        info!(id, "user updated");
        Ok(())
    }

    async fn update_loan_status(&self, id: &str, status: LoanStatus) -> Result<(), ConsoleError> {
        let id = addressable(id)?;
        let body = json!({ "status": status });
        self.put(Operation::UpdateLoanStatus, endpoints::update_loan_status(id), &body).await?;
        info!(id, %status, "loan status updated");
        Ok(())
    }
}

fn classify(op: Operation, err: TransportError) -> ConsoleError {
    let classified = ConsoleError::from_transport(op, err);
    if classified.requires_reauthentication() {
        warn!(?op, "session expired; re-authentication required");
    } else {
        warn!(?op, error = %classified, "backend operation failed");
    }
    classified
}

/// Ids are trimmed; blanks and the missing-id sentinel cannot be edited.
/// `.` and `..` are dropped by URL path normalization and would address the
/// collection instead of a record.
fn addressable(id: &str) -> Result<&str, ModelError> {
    let id = id.trim();
    if id.is_empty() || id == UNKNOWN {
        return Err(ModelError::validation("id", "record has no usable id"));
    }
    if id == "." || id == ".." {
        return Err(ModelError::validation("id", format!("{id:?} is not a record id")));
    }
    Ok(id)
}

fn keep_addressable<T>(records: impl Iterator<Item = T>, has_identity: fn(&T) -> bool, kind: &str) -> Vec<T> {
    let mut dropped = 0usize;
    let kept = records
        .filter(|record| {
            let keep = has_identity(record);
            dropped += usize::from(!keep);
            keep
        })
        .collect();
    if dropped > 0 {
        warn!(kind, dropped, "records without an id were skipped");
    }
    kept
}
