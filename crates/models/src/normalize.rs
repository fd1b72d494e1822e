//! Single choke point between backend payloads and canonical records.
//!
//! The backend shape is not fixed: lists may arrive bare or wrapped, ids may be
//! `_id` or `id`, applicant details may live on the loan or on a nested `user`
//! object, numbers may be strings. Everything here is total: a missing or
//! malformed field resolves to its default instead of failing.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::loan::{LoanRecord, LoanStatus, DEFAULT_DURATION_MONTHS, UNKNOWN};
use crate::user::UserRecord;

/// Display text for empty classification fields.
pub const NOT_AVAILABLE: &str = "N/A";

const DATA_KEY: &str = "data";
const NESTED_USER_KEY: &str = "user";
const ID_KEYS: [&str; 2] = ["_id", "id"];
const REGISTERED_AT_KEYS: [&str; 2] = ["createdAt", "registeredAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Loan,
    User,
}

impl RecordKind {
    /// Key the backend uses to wrap a list of this kind.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            RecordKind::Loan => "loans",
            RecordKind::User => "users",
        }
    }
}

/// Unwrap a list response.
///
/// A bare array is returned as is. For an object, the first non-null entry
/// among the record-kind key and `data` wins; if that entry is not an array,
/// or nothing matched, the result is empty.
pub fn extract_list(envelope: &Value, kind: RecordKind) -> Vec<Value> {
    let matched = match envelope {
        Value::Array(_) => Some(envelope),
        Value::Object(map) => [kind.envelope_key(), DATA_KEY]
            .into_iter()
            .find_map(|key| map.get(key).filter(|value| !value.is_null())),
        _ => None,
    };
    match matched {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

pub fn to_loan_record(raw: &Value) -> LoanRecord {
    LoanRecord {
        id: id_of(raw),
        full_name: applicant_text(raw, "fullName"),
        email: applicant_text(raw, "email"),
        mobile_number: applicant_text(raw, "mobileNumber"),
        loan_amount: non_negative(raw.get("loanAmount")),
        loan_duration_months: months(raw.get("loanDurationMonths")),
        monthly_income: non_negative(raw.get("monthlyIncome")),
        loan_purpose: text(raw.get("loanPurpose")).unwrap_or_else(unknown),
        employment_type: text(raw.get("employmentType")).unwrap_or_else(unknown),
        status: to_canonical_status(raw.get("status").and_then(Value::as_str)),
    }
}

pub fn to_user_record(raw: &Value) -> UserRecord {
    UserRecord {
        id: id_of(raw),
        full_name: text(raw.get("fullName")).unwrap_or_else(unknown),
        email: text(raw.get("email")).unwrap_or_else(unknown),
        mobile_number: text(raw.get("mobileNumber")).unwrap_or_else(unknown),
        registered_at: REGISTERED_AT_KEYS.into_iter().find_map(|key| timestamp(raw.get(key))),
    }
}

/// Case-insensitive match on the three status tokens; anything else is `PENDING`.
pub fn to_canonical_status(raw: Option<&str>) -> LoanStatus {
    let Some(raw) = raw.map(str::trim) else {
        return LoanStatus::Pending;
    };
    LoanStatus::ALL
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(raw))
        .unwrap_or(LoanStatus::Pending)
}

/// `"self-EMPLOYED"` becomes `"Self-employed"`; empty or absent becomes `"N/A"`.
pub fn to_display_text(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn id_of(raw: &Value) -> String {
    ID_KEYS.into_iter().find_map(|key| text(raw.get(key))).unwrap_or_else(unknown)
}

/// Top-level field first, then the nested associated user.
fn applicant_text(raw: &Value, key: &str) -> String {
    text(raw.get(key))
        .or_else(|| text(raw.get(NESTED_USER_KEY).and_then(|user| user.get(key))))
        .unwrap_or_else(unknown)
}

/// Strings and numbers only; blank strings count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JSON numbers and numeric strings; non-finite values are rejected.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn non_negative(value: Option<&Value>) -> f64 {
    number(value).filter(|n| *n >= 0.0).unwrap_or(0.0)
}

fn months(value: Option<&Value>) -> u32 {
    number(value)
        .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_DURATION_MONTHS)
}

/// RFC 3339, bare `YYYY-MM-DD` (midnight UTC), or epoch milliseconds.
fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}
