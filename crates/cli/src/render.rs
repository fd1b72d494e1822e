//! Plain-text rendering of canonical records for the terminal.

use chrono::{DateTime, Utc};
use models::normalize::NOT_AVAILABLE;
use models::{to_display_text, LoanRecord, LoanSummary, UserRecord, UNKNOWN};

/// Last six characters, uppercased, as shown in record headers.
pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
    format!("#{}", tail.to_uppercase())
}

/// Whole rupees with Indian digit grouping, e.g. `₹12,50,000`.
pub fn inr(amount: f64) -> String {
    let rupees = amount.round();
    let sign = if rupees < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rupees.abs());
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Display text for a classification field; the missing-value sentinel shows as `N/A`.
pub fn classification(value: &str) -> String {
    to_display_text(Some(value).filter(|v| *v != UNKNOWN))
}

/// Contact fields keep their spelling; the missing-value sentinel shows as `N/A`.
fn contact(value: &str) -> &str {
    if value == UNKNOWN {
        NOT_AVAILABLE
    } else {
        value
    }
}

pub fn date(at: Option<&DateTime<Utc>>) -> String {
    at.map(|at| at.format("%-d %b %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn summary(summary: &LoanSummary) -> String {
    format!(
        "{} loans: {} approved, {} pending, {} rejected; {} requested in total",
        summary.total,
        summary.approved,
        summary.pending,
        summary.rejected,
        inr(summary.total_amount)
    )
}

pub fn loan_line(loan: &LoanRecord) -> String {
    format!(
        "{}  {:<9} {:<24} {:>12} {:>3} mo  {:<10} {:<13} {}",
        short_id(&loan.id),
        to_display_text(Some(loan.status.as_str())),
        loan.full_name,
        inr(loan.loan_amount),
        loan.loan_duration_months,
        classification(&loan.loan_purpose),
        classification(&loan.employment_type),
        loan.email,
    )
}

/// Every canonical field of one loan, one per line.
pub fn loan_detail(loan: &LoanRecord) -> String {
    let rows = [
        ("Status", to_display_text(Some(loan.status.as_str()))),
        ("Applicant", contact(&loan.full_name).to_string()),
        ("Email", contact(&loan.email).to_string()),
        ("Mobile", contact(&loan.mobile_number).to_string()),
        ("Amount", inr(loan.loan_amount)),
        ("Duration", format!("{} months", loan.loan_duration_months)),
        ("Purpose", classification(&loan.loan_purpose)),
        ("Employment", classification(&loan.employment_type)),
        ("Monthly income", inr(loan.monthly_income)),
    ];
    detail(&format!("Loan {}", short_id(&loan.id)), &rows)
}

pub fn loans(loans: &[LoanRecord]) -> String {
    let mut out = summary(&LoanSummary::from_records(loans));
    out.push('\n');
    for loan in loans {
        out.push_str(&loan_line(loan));
        out.push('\n');
    }
    out
}

pub fn user_line(user: &UserRecord) -> String {
    format!(
        "{}  {:<24} {:<28} {:<14} {}",
        short_id(&user.id),
        user.full_name,
        user.email,
        user.mobile_number,
        date(user.registered_at.as_ref()),
    )
}

pub fn user_detail(user: &UserRecord) -> String {
    let rows = [
        ("Name", contact(&user.full_name).to_string()),
        ("Email", contact(&user.email).to_string()),
        ("Mobile", contact(&user.mobile_number).to_string()),
        ("Registered", date(user.registered_at.as_ref())),
    ];
    detail(&format!("User {}", short_id(&user.id)), &rows)
}

fn detail(title: &str, rows: &[(&str, String)]) -> String {
    let mut out = format!("{title}\n");
    for (label, value) in rows {
        out.push_str(&format!("{:<16}{}\n", format!("{label}:"), value));
    }
    out
}

pub fn users(users: &[UserRecord]) -> String {
    let mut out = format!("{} users\n", users.len());
    for user in users {
        out.push_str(&user_line(user));
        out.push('\n');
    }
    out
}
