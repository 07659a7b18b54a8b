//! Notification and contact-message handlers (admin).

use std::ops::Deref;
use std::sync::Arc;

use tabled::Tabled;

use hostel_core::{AdminCommand, Collection, ContactMessage, Notification};

use crate::cli::{GlobalOpts, MessagesArgs, MessagesCommand, NotificationsArgs, NotificationsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

fn unread_marker(is_read: bool) -> &'static str {
    if is_read { "" } else { "●" }
}

// ── Notifications ───────────────────────────────────────────────────

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "")]
    unread: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Guest")]
    guest: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Stay")]
    stay: String,
    #[tabled(rename = "Received")]
    created: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        let stay = match (n.check_in_date, n.check_out_date) {
            (Some(a), Some(b)) => format!("{a} → {b}"),
            _ => String::new(),
        };
        Self {
            id: n.id,
            unread: unread_marker(n.is_read),
            title: n.title.clone(),
            guest: output::opt(n.customer_full_name.as_ref()),
            room: output::opt(n.room_number.as_ref()),
            stay,
            created: n
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn print_notifications<T>(items: &[T], global: &GlobalOpts)
where
    T: Deref<Target = Notification> + serde::Serialize,
{
    let out = output::render_list(
        &global.output,
        items,
        |n| NotificationRow::from(&**n),
        |n| n.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle_notifications(
    ctx: &Context,
    args: NotificationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NotificationsCommand::List { unread } => {
            let admin = ctx.admin()?;
            if unread {
                let items: Vec<Arc<Notification>> = admin
                    .unread_notifications()
                    .await?
                    .into_iter()
                    .map(Arc::new)
                    .collect();
                print_notifications(&items, global);
            } else {
                admin.refresh(Collection::Notifications).await?;
                print_notifications(admin.store().notifications_snapshot().as_slice(), global);
            }
            Ok(())
        }

        NotificationsCommand::Read { id } => {
            util::run_admin(ctx, AdminCommand::MarkNotificationRead { id }, global).await?;
            Ok(())
        }

        NotificationsCommand::Delete { id } => {
            util::run_admin(ctx, AdminCommand::DeleteNotification { id }, global).await?;
            Ok(())
        }
    }
}

// ── Contact messages ────────────────────────────────────────────────

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "")]
    unread: &'static str,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Message")]
    message: String,
}

const PREVIEW_CHARS: usize = 60;

impl From<&ContactMessage> for MessageRow {
    fn from(m: &ContactMessage) -> Self {
        let mut message: String = m.message.chars().take(PREVIEW_CHARS).collect();
        if m.message.chars().count() > PREVIEW_CHARS {
            message.push('…');
        }
        Self {
            id: m.id,
            unread: unread_marker(m.is_read),
            from: m.name.clone(),
            email: m.email.clone(),
            message: message.replace('\n', " "),
        }
    }
}

fn print_messages<T>(items: &[T], global: &GlobalOpts)
where
    T: Deref<Target = ContactMessage> + serde::Serialize,
{
    let out = output::render_list(
        &global.output,
        items,
        |m| MessageRow::from(&**m),
        |m| m.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle_messages(
    ctx: &Context,
    args: MessagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MessagesCommand::List { unread } => {
            let admin = ctx.admin()?;
            if unread {
                let items: Vec<Arc<ContactMessage>> = admin
                    .unread_messages()
                    .await?
                    .into_iter()
                    .map(Arc::new)
                    .collect();
                print_messages(&items, global);
            } else {
                admin.refresh(Collection::Messages).await?;
                print_messages(admin.store().messages_snapshot().as_slice(), global);
            }
            Ok(())
        }

        MessagesCommand::Read { id } => {
            util::run_admin(ctx, AdminCommand::MarkMessageRead { id }, global).await?;
            Ok(())
        }
    }
}
