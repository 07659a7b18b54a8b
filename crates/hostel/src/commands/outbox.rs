//! Notification outbox handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use hostel_core::{FlushReport, OutboxEntry};

use crate::cli::{GlobalOpts, OutboxArgs, OutboxCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Queued")]
    queued: String,
    #[tabled(rename = "Attempts")]
    attempts: String,
    #[tabled(rename = "Last error")]
    last_error: String,
}

fn entry_row(e: &OutboxEntry, max_attempts: u32) -> EntryRow {
    let mut id = e.id.to_string();
    id.truncate(8);
    EntryRow {
        id,
        from: e.request.name.clone(),
        queued: e.created_at.format("%Y-%m-%d %H:%M").to_string(),
        attempts: format!("{}/{max_attempts}", e.attempts),
        last_error: e.last_error.clone().unwrap_or_default(),
    }
}

fn report_detail(r: &FlushReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "delivered: {}", r.delivered);
    let _ = writeln!(out, "retrying:  {}", r.failed);
    let _ = write!(out, "dropped:   {}", r.dropped);
    out
}

pub async fn handle(ctx: &Context, args: OutboxArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let outbox = ctx.hostel.outbox();
    match args.command {
        OutboxCommand::List => {
            let pending = outbox.pending().await;
            let max = outbox.max_attempts();
            let out = output::render_list(
                &global.output,
                &pending,
                |e| entry_row(e, max),
                |e| e.id.to_string(),
            );
            output::print_output(&out, global.quiet);
        }

        OutboxCommand::Flush => {
            if outbox.is_empty().await {
                output::success("Outbox is empty", ctx.color, global.quiet);
                return Ok(());
            }
            let report = outbox.flush().await?;
            let out = output::render_single(&global.output, &report, report_detail, |r| {
                r.delivered.to_string()
            });
            output::print_output(&out, global.quiet);
            if report.dropped > 0 {
                output::warning(
                    format!("{} notification(s) gave up after {} attempts", report.dropped, outbox.max_attempts()),
                    ctx.color,
                );
            }
        }
    }
    Ok(())
}
