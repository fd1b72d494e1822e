use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ModelError;

/// Placeholder for text fields the backend did not supply in any known shape.
pub const UNKNOWN: &str = "unknown";

/// Duration used when the backend omits or garbles `loanDurationMonths`.
pub const DEFAULT_DURATION_MONTHS: u32 = 1;

/// Purposes the intake form offers. Other values pass through untouched.
pub const LOAN_PURPOSES: [&str; 6] = ["home", "education", "business", "personal", "vehicle", "medical"];

/// Employment types the intake form offers. Other values pass through untouched.
pub const EMPLOYMENT_TYPES: [&str; 4] = ["salaried", "self-employed", "business", "freelancer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 3] = [LoanStatus::Pending, LoanStatus::Approved, LoanStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for operator input. Backend payloads go through
/// [`crate::normalize::to_canonical_status`] instead, which never fails.
impl FromStr for LoanStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LoanStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::validation("status", format!("expected one of PENDING, APPROVED, REJECTED, got {wanted:?}")))
    }
}

/// Canonical loan application.
///
/// Applicant fields are already resolved from either the top level or the
/// nested `user` object; the nested shape never survives normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub loan_amount: f64,
    pub loan_duration_months: u32,
    pub monthly_income: f64,
    pub loan_purpose: String,
    pub employment_type: String,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// False when neither `_id` nor `id` resolved; such a record cannot be edited.
    pub fn has_identity(&self) -> bool {
        self.id != UNKNOWN
    }
}

/// Dashboard figures over a set of loans.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    pub total_amount: f64,
}

impl LoanSummary {
    pub fn from_records(loans: &[LoanRecord]) -> Self {
        loans.iter().fold(LoanSummary::default(), |mut acc, loan| {
            acc.total += 1;
            acc.total_amount += loan.loan_amount;
            match loan.status {
                LoanStatus::Approved => acc.approved += 1,
                LoanStatus::Pending => acc.pending += 1,
                LoanStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
    }
}
