use serde_json::json;

use crate::errors::ModelError;
use crate::loan::LoanStatus;
use crate::normalize::to_loan_record;
use crate::update::{LoanForm, LoanUpdate, UserUpdate};

#[test]
fn blank_form_produces_empty_update() -> anyhow::Result<()> {
    let update = LoanForm::default().into_update()?;
    assert!(update.is_empty());
    assert_eq!(serde_json::to_value(&update)?, json!({}));
    Ok(())
}

#[test]
fn form_coerces_numbers_and_uppercases_status() -> anyhow::Result<()> {
    let form = LoanForm {
        full_name: "  Asha Verma ".into(),
        loan_amount: "150000".into(),
        loan_duration_months: "12".into(),
        monthly_income: "42000.50".into(),
        status: "approved".into(),
        ..LoanForm::default()
    };
    let update = form.into_update()?;
    assert_eq!(update.full_name.as_deref(), Some("Asha Verma"));
    assert_eq!(update.loan_amount, Some(150000.0));
    assert_eq!(update.loan_duration_months, Some(12));
    assert_eq!(update.monthly_income, Some(42000.5));
    assert_eq!(update.status, Some(LoanStatus::Approved));

    let body = serde_json::to_value(&update)?;
    assert_eq!(
        body,
        json!({
            "fullName": "Asha Verma",
            "loanAmount": 150000.0,
            "loanDurationMonths": 12,
            "monthlyIncome": 42000.5,
            "status": "APPROVED"
        })
    );
    Ok(())
}

#[test]
fn non_numeric_amount_is_rejected_not_sent() {
    let form = LoanForm { loan_amount: "abc".into(), ..LoanForm::default() };
    let err = form.into_update().unwrap_err();
    assert_eq!(err.field(), "loanAmount");
}

#[test]
fn negative_and_non_finite_amounts_are_rejected() {
    for input in ["-1", "NaN", "inf"] {
        let form = LoanForm { monthly_income: input.into(), ..LoanForm::default() };
        assert!(
            matches!(form.into_update(), Err(ModelError::Validation { field: "monthlyIncome", .. })),
            "{input} should be rejected"
        );
    }
}

#[test]
fn duration_must_be_a_positive_whole_number() {
    for input in ["0", "1.5", "-2", "twelve"] {
        let form = LoanForm { loan_duration_months: input.into(), ..LoanForm::default() };
        assert!(form.into_update().is_err(), "{input} should be rejected");
    }
}

#[test]
fn unknown_status_is_rejected() {
    let form = LoanForm { status: "closed".into(), ..LoanForm::default() };
    assert_eq!(form.into_update().unwrap_err().field(), "status");
}

#[test]
fn prefilled_form_round_trips_to_full_update() -> anyhow::Result<()> {
    let loan = to_loan_record(&json!({
        "id": "L-9",
        "user": { "fullName": "Nested Name", "email": "n@example.com" },
        "loanAmount": 5000,
        "loanDurationMonths": 6,
        "loanPurpose": "vehicle",
        "status": "rejected"
    }));
    let form = LoanForm::from_record(&loan);
    assert_eq!(form.full_name, "Nested Name");
    assert_eq!(form.mobile_number, "");
    assert_eq!(form.monthly_income, "");
    assert_eq!(form.employment_type, "");
    assert_eq!(form.status, "REJECTED");

    let update = form.into_update()?;
    assert_eq!(
        update,
        LoanUpdate {
            full_name: Some("Nested Name".into()),
            email: Some("n@example.com".into()),
            loan_amount: Some(5000.0),
            loan_duration_months: Some(6),
            loan_purpose: Some("vehicle".into()),
            status: Some(LoanStatus::Rejected),
            ..LoanUpdate::default()
        }
    );
    Ok(())
}

#[test]
fn user_update_drops_blank_inputs() -> anyhow::Result<()> {
    let update = UserUpdate::from_inputs("Meera", " ", "9000000001");
    assert_eq!(serde_json::to_value(&update)?, json!({ "fullName": "Meera", "mobileNumber": "9000000001" }));
    assert!(UserUpdate::from_inputs("", "", "").is_empty());
    Ok(())
}

#[test]
fn status_parse_is_strict_but_case_insensitive() {
    assert_eq!("Pending".parse::<LoanStatus>(), Ok(LoanStatus::Pending));
    assert_eq!("REJECTED".parse::<LoanStatus>(), Ok(LoanStatus::Rejected));
    assert!("approve".parse::<LoanStatus>().is_err());
}

#[test]
fn hand_built_update_is_validated() {
    let nan = LoanUpdate { loan_amount: Some(f64::NAN), ..LoanUpdate::default() };
    assert_eq!(nan.validate().unwrap_err().field(), "loanAmount");

    let zero_months = LoanUpdate { loan_duration_months: Some(0), ..LoanUpdate::default() };
    assert!(zero_months.validate().is_err());

    let fine = LoanUpdate { monthly_income: Some(0.0), status: Some(LoanStatus::Pending), ..LoanUpdate::default() };
    assert!(fine.validate().is_ok());
}
