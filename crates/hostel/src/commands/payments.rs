//! Payment command handlers (admin).

use std::sync::Arc;

use tabled::Tabled;

use hostel_core::{Collection, Payment};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Booking")]
    booking: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.payment_id.clone(),
            booking: output::opt(p.booking_id.as_ref()),
            kind: output::opt(p.payment_type.as_ref()),
            date: p
                .payment_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            amount: output::euros(p.amount),
        }
    }
}

fn print_payments<T>(payments: &[T], global: &GlobalOpts)
where
    T: std::ops::Deref<Target = Payment> + serde::Serialize,
{
    let out = output::render_list(
        &global.output,
        payments,
        |p| PaymentRow::from(&**p),
        |p| p.payment_id.clone(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(ctx: &Context, args: PaymentsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let admin = ctx.admin()?;
    match args.command {
        PaymentsCommand::List => {
            admin.refresh(Collection::Payments).await?;
            let snap = admin.store().payments_snapshot();
            print_payments(snap.as_slice(), global);
        }

        PaymentsCommand::ByBooking { booking_id } => {
            let payment = admin
                .payment_for_booking(booking_id)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "payment for booking".into(),
                    identifier: booking_id.to_string(),
                    list_command: "payments list".into(),
                })?;
            print_payments(&[Arc::new(payment)], global);
        }

        PaymentsCommand::ByType { payment_type } => {
            let found: Vec<Arc<Payment>> = admin
                .payments_by_type(util::payment_type(payment_type))
                .await?
                .into_iter()
                .map(Arc::new)
                .collect();
            print_payments(&found, global);
        }
    }
    Ok(())
}
