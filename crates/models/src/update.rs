//! Partial records sent back to the backend by edit operations.

use serde::Serialize;

use crate::errors::ModelError;
use crate::loan::{LoanRecord, LoanStatus, UNKNOWN};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_duration_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanStatus>,
}

impl LoanUpdate {
    pub fn is_empty(&self) -> bool {
        *self == LoanUpdate::default()
    }

    /// Same numeric rules as [`LoanForm::into_update`], for updates built by hand.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_amount("loanAmount", self.loan_amount)?;
        check_amount("monthlyIncome", self.monthly_income)?;
        if self.loan_duration_months == Some(0) {
            return Err(ModelError::validation("loanDurationMonths", "must be at least 1"));
        }
        Ok(())
    }
}

fn check_amount(field: &'static str, amount: Option<f64>) -> Result<(), ModelError> {
    match amount {
        Some(value) if !value.is_finite() => Err(ModelError::validation(field, "must be a finite number")),
        Some(value) if value < 0.0 => Err(ModelError::validation(field, "must not be negative")),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

impl UserUpdate {
    /// Blank inputs are dropped so they never overwrite stored values.
    pub fn from_inputs(full_name: &str, email: &str, mobile_number: &str) -> Self {
        Self {
            full_name: filled(full_name),
            email: filled(email),
            mobile_number: filled(mobile_number),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UserUpdate::default()
    }
}

/// Raw text inputs of the loan edit form.
///
/// Blank inputs are left out of the resulting [`LoanUpdate`]. Numeric inputs
/// must parse as finite, non-negative numbers and the duration as a whole
/// number of months; anything else is rejected before a request is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanForm {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub loan_amount: String,
    pub loan_duration_months: String,
    pub loan_purpose: String,
    pub employment_type: String,
    pub monthly_income: String,
    pub status: String,
}

impl LoanForm {
    /// Pre-fill from a canonical record; placeholders and zero amounts start blank.
    pub fn from_record(loan: &LoanRecord) -> Self {
        Self {
            full_name: known(&loan.full_name),
            email: known(&loan.email),
            mobile_number: known(&loan.mobile_number),
            loan_amount: amount_input(loan.loan_amount),
            loan_duration_months: loan.loan_duration_months.to_string(),
            loan_purpose: known(&loan.loan_purpose),
            employment_type: known(&loan.employment_type),
            monthly_income: amount_input(loan.monthly_income),
            status: loan.status.as_str().to_string(),
        }
    }

    pub fn into_update(self) -> Result<LoanUpdate, ModelError> {
        Ok(LoanUpdate {
            full_name: filled(&self.full_name),
            email: filled(&self.email),
            mobile_number: filled(&self.mobile_number),
            loan_amount: parse_amount("loanAmount", &self.loan_amount)?,
            loan_duration_months: parse_months("loanDurationMonths", &self.loan_duration_months)?,
            loan_purpose: filled(&self.loan_purpose),
            employment_type: filled(&self.employment_type),
            monthly_income: parse_amount("monthlyIncome", &self.monthly_income)?,
            status: match filled(&self.status) {
                Some(raw) => Some(raw.parse::<LoanStatus>()?),
                None => None,
            },
        })
    }
}

fn filled(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn known(value: &str) -> String {
    if value == UNKNOWN {
        String::new()
    } else {
        value.to_string()
    }
}

fn amount_input(amount: f64) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        amount.to_string()
    }
}

fn parse_amount(field: &'static str, input: &str) -> Result<Option<f64>, ModelError> {
    let Some(raw) = filled(input) else {
        return Ok(None);
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| ModelError::validation(field, format!("{raw:?} is not a number")))?;
    check_amount(field, Some(value))?;
    Ok(Some(value))
}

fn parse_months(field: &'static str, input: &str) -> Result<Option<u32>, ModelError> {
    let Some(raw) = filled(input) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(ModelError::validation(field, format!("{raw:?} is not a whole number of months (>= 1)"))),
        Ok(months) => Ok(Some(months)),
    }
}
