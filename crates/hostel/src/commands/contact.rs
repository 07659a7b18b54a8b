//! Contact form handler.

use hostel_core::ContactRequest;

use crate::cli::{ContactArgs, ContactCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Context;

pub async fn handle(ctx: &Context, args: ContactArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ContactCommand::Send {
            name,
            email,
            message,
        } => {
            let request = ContactRequest {
                name,
                email,
                message,
            };
            ctx.hostel.send_contact(&request).await?;
            output::success("Message sent to the front desk", ctx.color, global.quiet);
            Ok(())
        }
    }
}
