//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod book;
pub mod bookings;
pub mod config_cmd;
pub mod contact;
pub mod customers;
pub mod inbox;
pub mod outbox;
pub mod payments;
pub mod rooms;
pub mod session;
pub mod util;

use hostel_core::{AdminConsole, Hostel};

use crate::cli::{Command, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;

/// Everything a backend-bound handler needs.
pub struct Context {
    pub hostel: Hostel,
    pub profile_name: String,
    pub profile: Profile,
    pub color: bool,
}

impl Context {
    /// Admin console, or a "log in first" error naming the profile.
    pub fn admin(&self) -> Result<AdminConsole, CliError> {
        self.hostel
            .admin()
            .map_err(|e| CliError::from(e).for_profile(&self.profile_name))
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Rooms(args) => rooms::handle(ctx, args, global).await,
        Command::Book(args) => book::handle(ctx, *args, global).await,
        Command::Contact(args) => contact::handle(ctx, args, global).await,
        Command::Login { username } => session::login(ctx, username, global).await,
        Command::Bookings(args) => bookings::handle(ctx, args, global).await,
        Command::Customers(args) => customers::handle(ctx, args, global).await,
        Command::AdminRooms(args) => rooms::handle_admin(ctx, args, global).await,
        Command::Beds(args) => rooms::handle_beds(ctx, args, global).await,
        Command::Payments(args) => payments::handle(ctx, args, global).await,
        Command::Notifications(args) => inbox::handle_notifications(ctx, args, global).await,
        Command::Messages(args) => inbox::handle_messages(ctx, args, global).await,
        Command::Outbox(args) => outbox::handle(ctx, args, global).await,
        // Handled before a backend is built
        Command::Logout | Command::Whoami | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Validation {
                field: "command".into(),
                reason: "this command does not use the backend".into(),
            })
        }
    }
}
