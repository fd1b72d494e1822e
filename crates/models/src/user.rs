use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::loan::UNKNOWN;

/// Canonical console user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub registered_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn has_identity(&self) -> bool {
        self.id != UNKNOWN
    }
}
