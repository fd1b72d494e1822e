//! Canonical loan and user records, and the normalizer that produces them
//! from whatever shape the backend returns.

pub mod errors;
pub mod loan;
pub mod normalize;
pub mod update;
pub mod user;

pub use errors::ModelError;
pub use loan::{LoanRecord, LoanStatus, LoanSummary, UNKNOWN};
pub use normalize::{extract_list, to_canonical_status, to_display_text, to_loan_record, to_user_record, RecordKind};
pub use update::{LoanForm, LoanUpdate, UserUpdate};
pub use user::UserRecord;

#[cfg(test)]
mod tests;
