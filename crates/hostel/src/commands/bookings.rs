//! Booking command handlers (admin).

use std::fmt::Write as _;

use tabled::Tabled;

use hostel_core::{
    AdminCommand, Booking, BookingStatus, Collection, CommandResult, CreateBookingRequest,
};

use crate::cli::{
    BookingsArgs, BookingsCommand, CreateBookingArgs, FindBookingsArgs, GlobalOpts,
    UpdateBookingArgs,
};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Guest")]
    guest: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Bed")]
    bed: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.booking_id,
            guest: b.customer_full_name.clone(),
            room: output::opt(b.room_number.as_ref()),
            bed: output::opt(b.bed_number.as_ref()),
            status: output::opt(b.booking_status.as_ref()),
            check_in: b.check_in_date.to_string(),
            check_out: b.check_out_date.to_string(),
            total: output::euros(b.total_price),
        }
    }
}

fn booking_detail(b: &Booking, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", output::label("Booking:", color), b.booking_id);
    let _ = writeln!(out, "{}  {}", output::label("Guest:", color), b.customer_full_name);
    if let Some(ref email) = b.customer_email {
        let _ = writeln!(out, "{}  {email}", output::label("Email:", color));
    }
    let _ = writeln!(
        out,
        "{}  {} / bed {}",
        output::label("Room:", color),
        output::opt(b.room_number.as_ref()),
        output::opt(b.bed_number.as_ref())
    );
    let _ = writeln!(
        out,
        "{}  {}",
        output::label("Status:", color),
        output::opt(b.booking_status.as_ref())
    );
    let _ = writeln!(
        out,
        "{}  {} → {}",
        output::label("Stay:", color),
        b.check_in_date,
        b.check_out_date
    );
    if let Some(created) = b.created_at {
        let _ = writeln!(out, "{}  {created}", output::label("Created:", color));
    }
    let _ = write!(out, "{}  {}", output::label("Total:", color), output::euros(b.total_price));
    out
}

fn print_bookings(bookings: &[Booking], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        bookings,
        |b| BookingRow::from(b),
        |b| b.booking_id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn print_booking(booking: &Booking, ctx: &Context, global: &GlobalOpts) {
    let out = output::render_single(
        &global.output,
        booking,
        |b| booking_detail(b, ctx.color),
        |b| b.booking_id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Search ──────────────────────────────────────────────────────────

/// Query the backend with the most selective filter given, then narrow
/// the result locally by the rest.
async fn find(ctx: &Context, args: FindBookingsArgs) -> Result<Vec<Booking>, CliError> {
    let admin = ctx.admin()?;
    let range = match (args.from.as_deref(), args.to.as_deref()) {
        (Some(from), Some(to)) => Some((util::parse_date("from", from)?, util::parse_date("to", to)?)),
        _ => None,
    };
    let name = args.first_name.zip(args.last_name);
    let status: Option<BookingStatus> = args.status.map(util::booking_status);

    let found = if let Some((ref first, ref last)) = name {
        admin.find_bookings_by_name(first, last).await?
    } else if let Some((start, end)) = range {
        admin.find_bookings_by_check_in(start, end).await?
    } else if let Some(status) = status {
        admin.find_bookings_by_status(status).await?
    } else {
        Vec::new()
    };

    let full_name = name.map(|(first, last)| format!("{first} {last}").to_lowercase());
    Ok(found
        .into_iter()
        .filter(|b| {
            full_name
                .as_ref()
                .is_none_or(|n| b.customer_full_name.to_lowercase() == *n)
        })
        .filter(|b| {
            range.is_none_or(|(start, end)| b.check_in_date >= start && b.check_in_date <= end)
        })
        .filter(|b| status.is_none_or(|s| b.booking_status == Some(s)))
        .collect())
}

// ── Builders ────────────────────────────────────────────────────────

fn create_request(args: CreateBookingArgs) -> Result<CreateBookingRequest, CliError> {
    if args.total < 0.0 {
        return Err(CliError::Validation {
            field: "total".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(CreateBookingRequest {
        customer_date_of_birth: util::parse_date("date-of-birth", &args.date_of_birth)?,
        check_in_date: util::parse_date("check-in", &args.check_in)?,
        check_out_date: util::parse_date("check-out", &args.check_out)?,
        customer_first_name: args.first_name,
        customer_last_name: args.last_name,
        customer_email: args.email,
        customer_phone: args.phone,
        room_number: args.room,
        total_price: args.total,
    })
}

fn apply_update(mut booking: Booking, args: UpdateBookingArgs) -> Result<Booking, CliError> {
    if let Some(status) = args.status {
        booking.booking_status = Some(util::booking_status(status));
    }
    if let Some(d) = util::parse_opt_date("check-in", args.check_in.as_deref())? {
        booking.check_in_date = d;
    }
    if let Some(d) = util::parse_opt_date("check-out", args.check_out.as_deref())? {
        booking.check_out_date = d;
    }
    if booking.check_out_date <= booking.check_in_date {
        return Err(CliError::Validation {
            field: "check-out".into(),
            reason: "must be after check-in".into(),
        });
    }
    if args.room.is_some() {
        booking.room_number = args.room;
    }
    if args.bed.is_some() {
        booking.bed_number = args.bed;
    }
    if let Some(total) = args.total {
        booking.total_price = total;
    }
    Ok(booking)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: BookingsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List => {
            let admin = ctx.admin()?;
            admin.refresh(Collection::Bookings).await?;
            let snap: Vec<Booking> = admin
                .store()
                .bookings_snapshot()
                .iter()
                .map(|b| (**b).clone())
                .collect();
            print_bookings(&snap, global);
            Ok(())
        }

        BookingsCommand::Get { id } => {
            let booking = ctx.admin()?.get_booking(id).await?;
            print_booking(&booking, ctx, global);
            Ok(())
        }

        BookingsCommand::Find(find_args) => {
            let found = find(ctx, find_args).await?;
            print_bookings(&found, global);
            Ok(())
        }

        BookingsCommand::StatusCounts => {
            let counts = ctx.admin()?.booking_status_counts().await?;
            let out = output::render_single(
                &global.output,
                &counts,
                |c| {
                    c.iter()
                        .map(|(status, n)| format!("{status:<10} {n}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                },
                |c| {
                    c.iter()
                        .map(|(status, n)| format!("{status}={n}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Latest => {
            match ctx.admin()?.latest_booking().await? {
                Some(booking) => print_booking(&booking, ctx, global),
                None => output::warning("No bookings yet", ctx.color),
            }
            Ok(())
        }

        BookingsCommand::Create(create_args) => {
            let request = create_request(*create_args)?;
            let result = util::run_admin(ctx, AdminCommand::CreateBooking(request), global).await?;
            if let Some(CommandResult::Booking(booking)) = result {
                print_booking(&booking, ctx, global);
            }
            Ok(())
        }

        BookingsCommand::Update(update_args) => {
            let current = ctx.admin()?.get_booking(update_args.id).await?;
            let updated = apply_update(current, update_args)?;
            util::run_admin(ctx, AdminCommand::UpdateBooking(updated), global).await?;
            Ok(())
        }

        BookingsCommand::Cancel { id } => {
            util::run_admin(ctx, AdminCommand::CancelBooking { booking_id: id }, global).await?;
            Ok(())
        }

        BookingsCommand::Delete { id } => {
            util::run_admin(ctx, AdminCommand::DeleteBooking { booking_id: id }, global).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;

    use super::*;

    fn booking() -> Booking {
        Booking {
            booking_id: 4,
            customer_full_name: "Ada Lovelace".into(),
            customer_email: None,
            room_number: Some("RN1".into()),
            bed_number: Some("B1".into()),
            booking_status: Some(BookingStatus::Booked),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            created_at: None,
            total_price: 100.0,
        }
    }

    fn update(check_out: Option<&str>) -> UpdateBookingArgs {
        UpdateBookingArgs {
            id: 4,
            status: Some(crate::cli::StatusArg::Completed),
            check_in: None,
            check_out: check_out.map(Into::into),
            room: None,
            bed: Some("B2".into()),
            total: None,
        }
    }

    #[test]
    fn update_overlays_only_given_fields() {
        let updated = apply_update(booking(), update(Some("2024-06-05"))).unwrap();
        assert_eq!(updated.booking_status, Some(BookingStatus::Completed));
        assert_eq!(updated.bed_number.as_deref(), Some("B2"));
        assert_eq!(updated.room_number.as_deref(), Some("RN1"));
        assert_eq!(updated.check_out_date, NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert!((updated.total_price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_rejects_inverted_stay() {
        let err = apply_update(booking(), update(Some("2024-05-30"))).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
