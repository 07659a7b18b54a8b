//! `hostel book`: the public booking flow end to end.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use hostel_core::{Availability, BookingConfirmation, DraftField, RoomCategory, SearchCriteria};

use crate::cli::{BookArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

fn confirmation_detail(c: &BookingConfirmation, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", output::label("Booking:", color), c.booking_id);
    let _ = writeln!(out, "{}  {}", output::label("Guest:", color), c.customer_full_name);
    let _ = writeln!(out, "{}  {}", output::label("Room:", color), c.room_number);
    let _ = writeln!(
        out,
        "{}  {} → {}",
        output::label("Stay:", color),
        c.check_in_date,
        c.check_out_date
    );
    let _ = write!(out, "{}  {}", output::label("Total:", color), output::euros(c.total_price));
    if let Some(ref payment) = c.payment_id {
        let _ = write!(out, "\n{}  {payment}", output::label("Payment:", color));
    }
    out
}

/// Ask for a secret on the terminal when it wasn't passed as a flag.
fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    if let Some(v) = value {
        return Ok(v);
    }
    if !std::io::stdin().is_terminal() {
        return Ok(String::new());
    }
    rpassword::prompt_password(prompt).map_err(CliError::Io)
}

fn spinner(enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Submitting booking…");
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}

pub async fn handle(ctx: &Context, args: BookArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = ctx.hostel.booking();

    // 1. Explicit room choice wins over the first available category
    if let Some(ref code) = args.room {
        let category = RoomCategory::from_code(code).ok_or_else(|| CliError::Validation {
            field: "room".into(),
            reason: format!("unknown room category '{code}' (expected RN1, RN2 or RN3)"),
        })?;
        ctx.hostel.selection().offer(category);
    }

    // 2. Search criteria seed the draft and query availability
    let criteria = SearchCriteria {
        check_in: Some(util::parse_date("check-in", &args.stay.check_in)?),
        check_out: Some(util::parse_date("check-out", &args.stay.check_out)?),
        guests: args.stay.guests,
    };
    let outcome = session.apply_search(criteria).await;
    debug!(?outcome, "availability checked");

    match session.availability() {
        Availability::Loaded(rooms) if rooms.is_empty() => {
            return Err(CliError::Rejected {
                message: "No rooms available for those dates".into(),
                status: 409,
            });
        }
        Availability::Loaded(rooms) => {
            if let Some(chosen) = session.draft().room_category() {
                if !rooms.contains(&chosen) {
                    output::warning(
                        format!("{} does not appear available for those dates", chosen.label()),
                        ctx.color,
                    );
                }
            }
        }
        Availability::Failed(reason) => {
            output::warning(format!("Could not check availability: {reason}"), ctx.color);
        }
        Availability::Idle | Availability::Loading => {}
    }

    // 3. Guest details and payment
    let card_number = secret_or_prompt(args.card_number, "Card number: ")?;
    let cvv = secret_or_prompt(args.cvv, "CVV: ")?;
    let cardholder = args
        .cardholder
        .unwrap_or_else(|| format!("{} {}", args.first_name, args.last_name));

    session.edit(|draft| -> Result<(), CliError> {
        draft.set_first_name(&args.first_name);
        draft.set_last_name(&args.last_name);
        draft.set_date_of_birth(&args.date_of_birth);
        draft.set_email(&args.email);
        draft.set_phone(&args.phone);
        draft.apply_input(DraftField::PaymentMethod, &args.payment)?;
        draft.set_cardholder(&cardholder);
        draft.set_card_number(&card_number);
        draft.set_expiry(args.expiry.as_deref().unwrap_or_default());
        draft.set_cvv(&cvv);
        Ok(())
    })?;

    // 4. Price shown before submitting
    if let Some(summary) = session.quote().summary() {
        if !global.quiet {
            eprintln!("{summary}");
        }
    }

    // 5. Submit
    let bar = spinner(!global.quiet && std::io::stderr().is_terminal());
    let result = session.submit().await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let confirmation = result?;

    // 6. Deliver the front-desk notification before exiting
    match ctx.hostel.outbox().flush().await {
        Ok(report) if report.failed > 0 || report.dropped > 0 => output::warning(
            "Front desk notification not delivered yet; retry with: hostel outbox flush",
            ctx.color,
        ),
        Ok(_) => {}
        Err(e) => output::warning(format!("Front desk notification: {e}"), ctx.color),
    }

    output::success("Booking confirmed", ctx.color, global.quiet);
    let out = output::render_single(
        &global.output,
        &confirmation,
        |c| confirmation_detail(c, ctx.color),
        |c| c.booking_id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
