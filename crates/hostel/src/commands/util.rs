//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::NaiveDate;
use hostel_core::{AdminCommand, BookingStatus, CommandResult, PaymentType};

use crate::cli::{GlobalOpts, PaymentTypeArg, StatusArg};
use crate::error::CliError;
use crate::output;

use super::Context;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, a destructive command fails instead of
/// silently proceeding.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

pub fn parse_opt_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|r| parse_date(field, r)).transpose()
}

pub fn booking_status(arg: StatusArg) -> BookingStatus {
    match arg {
        StatusArg::Booked => BookingStatus::Booked,
        StatusArg::Cancelled => BookingStatus::Cancelled,
        StatusArg::Completed => BookingStatus::Completed,
    }
}

pub fn payment_type(arg: PaymentTypeArg) -> PaymentType {
    match arg {
        PaymentTypeArg::CreditCard => PaymentType::CreditCard,
        PaymentTypeArg::Cash => PaymentType::Cash,
        PaymentTypeArg::Paypal => PaymentType::Paypal,
    }
}

/// Run an admin mutation, confirming destructive ones first.
///
/// Returns `None` when the user declined.
pub async fn run_admin(
    ctx: &Context,
    command: AdminCommand,
    global: &GlobalOpts,
) -> Result<Option<CommandResult>, CliError> {
    let admin = ctx.admin()?;
    let description = command.describe();
    if command.is_destructive()
        && !confirm(
            &format!("Really {description}? This cannot be undone."),
            &description,
            global.yes,
        )?
    {
        return Ok(None);
    }
    let result = admin.execute(command).await?;
    output::success(format!("Done: {description}"), ctx.color, global.quiet);
    Ok(Some(result))
}
