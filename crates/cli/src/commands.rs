use models::{LoanForm, LoanRecord, LoanStatus, ModelError, UserRecord, UserUpdate};
use service::{ConsoleApi, ConsoleError};
use tracing::info;

use crate::args::{Command, LoanEdit, LoansCommand, UsersCommand};
use crate::render;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 2;
pub const EXIT_REAUTHENTICATE: u8 = 3;

pub fn exit_code(err: &ConsoleError) -> u8 {
    match err {
        ConsoleError::ReauthenticationRequired => EXIT_REAUTHENTICATE,
        ConsoleError::Invalid(_) => EXIT_INVALID_INPUT,
        ConsoleError::Failed { .. } => EXIT_FAILURE,
    }
}

/// Run one command and return what should be printed.
pub async fn execute(api: &dyn ConsoleApi, command: Command) -> Result<String, ConsoleError> {
    match command {
        Command::Loans(LoansCommand::List) => list_loans(api).await,
        Command::Loans(LoansCommand::Show { id }) => {
            let loans = api.list_loans().await?;
            let loan = find_record(&loans, |l: &LoanRecord| l.id.as_str(), &id, "loan")?;
            Ok(render::loan_detail(loan))
        }
        Command::Loans(LoansCommand::Update { id, edit }) => {
            let update = loan_form(edit).into_update()?;
            api.update_loan(&id, &update).await?;
            info!(%id, "loan edit saved");
            Ok(format!("Loan {} updated.\n{}", render::short_id(&id), list_loans(api).await?))
        }
        Command::Loans(LoansCommand::Status { id, status }) => {
            let status: LoanStatus = status.parse()?;
            api.update_loan_status(&id, status).await?;
            Ok(format!(
                "Loan {} marked {}.\n{}",
                render::short_id(&id),
                models::to_display_text(Some(status.as_str())),
                list_loans(api).await?
            ))
        }
        Command::Users(UsersCommand::List) => list_users(api).await,
        Command::Users(UsersCommand::Show { id }) => {
            let users = api.list_users().await?;
            let user = find_record(&users, |u: &UserRecord| u.id.as_str(), &id, "user")?;
            Ok(render::user_detail(user))
        }
        Command::Users(UsersCommand::Update { id, full_name, email, mobile }) => {
            let update = UserUpdate::from_inputs(
                full_name.as_deref().unwrap_or_default(),
                email.as_deref().unwrap_or_default(),
                mobile.as_deref().unwrap_or_default(),
            );
            api.update_user(&id, &update).await?;
            info!(%id, "user edit saved");
            Ok(format!("User {} updated.\n{}", render::short_id(&id), list_users(api).await?))
        }
    }
}

async fn list_loans(api: &dyn ConsoleApi) -> Result<String, ConsoleError> {
    Ok(render::loans(&api.list_loans().await?))
}

async fn list_users(api: &dyn ConsoleApi) -> Result<String, ConsoleError> {
    Ok(render::users(&api.list_users().await?))
}

/// Exact id first, then a unique match on the short id shown in listings.
fn find_record<'a, T>(records: &'a [T], id_of: fn(&T) -> &str, wanted: &str, kind: &str) -> Result<&'a T, ModelError> {
    let wanted = wanted.trim();
    if let Some(record) = records.iter().find(|r| id_of(r) == wanted) {
        return Ok(record);
    }
    let short = format!("#{}", wanted.trim_start_matches('#').to_uppercase());
    let mut matches = records.iter().filter(|r| render::short_id(id_of(r)) == short);
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record),
        (Some(_), Some(_)) => Err(ModelError::validation("id", format!("{wanted:?} matches more than one {kind}; use the full id"))),
        (None, _) => Err(ModelError::validation("id", format!("no {kind} with id {wanted:?}"))),
    }
}

fn loan_form(edit: LoanEdit) -> LoanForm {
    LoanForm {
        full_name: edit.full_name.unwrap_or_default(),
        email: edit.email.unwrap_or_default(),
        mobile_number: edit.mobile.unwrap_or_default(),
        loan_amount: edit.amount.unwrap_or_default(),
        loan_duration_months: edit.duration.unwrap_or_default(),
        loan_purpose: edit.purpose.unwrap_or_default(),
        employment_type: edit.employment.unwrap_or_default(),
        monthly_income: edit.income.unwrap_or_default(),
        status: edit.status.unwrap_or_default(),
    }
}
