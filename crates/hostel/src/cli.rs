//! Clap derive structures for the `hostel` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Kept free of workspace crates so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hostel -- book rooms and run the front desk from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hostel",
    version,
    about = "Book hostel rooms and manage the admin dashboard from the command line",
    long_about = "Command-line client for the hostel booking backend.\n\n\
        Public commands search availability and place bookings; admin\n\
        commands require `hostel login` and operate on the dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HOSTEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "HOSTEL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOSTEL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HOSTEL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HOSTEL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Booked,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentTypeArg {
    CreditCard,
    Cash,
    Paypal,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the room catalogue and check availability
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Place a booking
    #[command(alias = "b")]
    Book(Box<BookArgs>),

    /// Send a message to the front desk
    Contact(ContactArgs),

    /// Log in as an administrator
    Login {
        /// Administrator username (defaults to the profile's)
        #[arg(long)]
        username: Option<String>,
    },

    /// Forget the stored administrator session
    Logout,

    /// Show the stored administrator session
    Whoami,

    /// Manage bookings (admin)
    #[command(alias = "bk")]
    Bookings(BookingsArgs),

    /// Manage customers (admin)
    #[command(alias = "cu")]
    Customers(CustomersArgs),

    /// Manage physical rooms (admin)
    AdminRooms(AdminRoomsArgs),

    /// Manage beds (admin)
    Beds(BedsArgs),

    /// Browse payments (admin)
    Payments(PaymentsArgs),

    /// Booking notifications (admin)
    #[command(alias = "notif")]
    Notifications(NotificationsArgs),

    /// Contact form messages (admin)
    #[command(alias = "msg")]
    Messages(MessagesArgs),

    /// Inspect and flush undelivered front-desk notifications
    Outbox(OutboxArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS (PUBLIC)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List room categories with nightly rates
    #[command(alias = "ls")]
    List,

    /// Room categories with free beds for a stay
    #[command(alias = "avail")]
    Available(StayArgs),
}

#[derive(Debug, Args)]
pub struct StayArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: String,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: String,

    /// Number of guests
    #[arg(long, short = 'g', default_value = "1")]
    pub guests: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Room category code (RN1, RN2, RN3); defaults to the first available
    #[arg(long, short = 'r')]
    pub room: Option<String>,

    #[command(flatten)]
    pub stay: StayArgs,

    /// Guest first name
    #[arg(long)]
    pub first_name: String,

    /// Guest last name
    #[arg(long)]
    pub last_name: String,

    /// Guest date of birth (YYYY-MM-DD)
    #[arg(long, alias = "dob")]
    pub date_of_birth: String,

    /// Guest email
    #[arg(long)]
    pub email: String,

    /// Guest phone number
    #[arg(long)]
    pub phone: String,

    /// Payment method (card, paypal, applepay, googlepay)
    #[arg(long, default_value = "card")]
    pub payment: String,

    /// Name on the card (defaults to the guest's name)
    #[arg(long)]
    pub cardholder: Option<String>,

    /// Card number (prompted when omitted on a terminal)
    #[arg(long, env = "HOSTEL_CARD_NUMBER", hide_env_values = true)]
    pub card_number: Option<String>,

    /// Card expiry (MM/YY)
    #[arg(long)]
    pub expiry: Option<String>,

    /// Card security code (prompted when omitted on a terminal)
    #[arg(long, env = "HOSTEL_CARD_CVV", hide_env_values = true)]
    pub cvv: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTACT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Send the contact form by email
    Send {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, short = 'm')]
        message: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List all bookings
    #[command(alias = "ls")]
    List,

    /// Show one booking
    Get {
        /// Booking ID
        id: i64,
    },

    /// Search bookings by guest name, check-in range, or status
    Find(FindBookingsArgs),

    /// Booking count per status
    StatusCounts,

    /// Most recently created booking
    Latest,

    /// Create a booking on behalf of a guest
    Create(Box<CreateBookingArgs>),

    /// Change fields of an existing booking
    Update(UpdateBookingArgs),

    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: i64,
    },

    /// Delete a booking permanently
    #[command(alias = "rm")]
    Delete {
        /// Booking ID
        id: i64,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct FindBookingsArgs {
    /// Guest first name
    #[arg(long, requires = "last_name")]
    pub first_name: Option<String>,

    /// Guest last name
    #[arg(long, requires = "first_name")]
    pub last_name: Option<String>,

    /// Earliest check-in date (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Latest check-in date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Booking status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Debug, Args)]
pub struct CreateBookingArgs {
    /// Room number or category code
    #[arg(long, short = 'r')]
    pub room: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: String,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, alias = "dob")]
    pub date_of_birth: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Total price in euros
    #[arg(long)]
    pub total: f64,
}

#[derive(Debug, Args)]
pub struct UpdateBookingArgs {
    /// Booking ID
    pub id: i64,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: Option<String>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: Option<String>,

    #[arg(long)]
    pub room: Option<String>,

    #[arg(long)]
    pub bed: Option<String>,

    /// Total price in euros
    #[arg(long)]
    pub total: Option<f64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CUSTOMERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List all customers
    #[command(alias = "ls")]
    List,

    /// Show a customer by ID or email
    Get {
        /// Customer ID, or an email address
        id_or_email: String,
    },

    /// Register a customer
    Create(CustomerFields),

    /// Change fields of an existing customer
    Update {
        /// Customer ID
        id: String,

        #[command(flatten)]
        fields: CustomerUpdateFields,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete {
        /// Customer ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, alias = "dob")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Args)]
pub struct CustomerUpdateFields {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, alias = "dob")]
    pub date_of_birth: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN ROOMS & BEDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminRoomsArgs {
    #[command(subcommand)]
    pub command: AdminRoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminRoomsCommand {
    /// List all rooms
    #[command(alias = "ls")]
    List,

    /// Show a room with its beds
    Get {
        /// Room ID
        room_id: String,
    },

    /// Create a room together with its beds
    Create {
        #[arg(long)]
        room_id: String,

        #[arg(long)]
        room_number: String,

        #[arg(long)]
        capacity: i32,

        #[arg(long, default_value = "0")]
        floor: i32,

        /// Number of beds to create
        #[arg(long)]
        beds: i32,
    },

    /// Change a room's number, floor or capacity
    Update {
        /// Room ID
        room_id: String,

        #[arg(long)]
        room_number: Option<String>,

        #[arg(long)]
        floor: Option<i32>,

        #[arg(long)]
        capacity: Option<i32>,
    },

    /// Delete a room and its beds
    #[command(alias = "rm")]
    Delete {
        /// Room ID
        room_id: String,
    },
}

#[derive(Debug, Args)]
pub struct BedsArgs {
    #[command(subcommand)]
    pub command: BedsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BedsCommand {
    /// List beds, optionally of one room
    #[command(alias = "ls")]
    List {
        /// Room ID
        #[arg(long)]
        room: Option<String>,
    },

    /// Add a bed to a room
    Add {
        /// Room ID
        #[arg(long)]
        room: String,

        /// Bed number within the room
        #[arg(long)]
        bed_number: String,
    },

    /// Remove a bed
    #[command(alias = "rm")]
    Delete {
        /// Bed ID
        bed_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// List all payments, newest first
    #[command(alias = "ls")]
    List,

    /// Payment for one booking
    ByBooking {
        /// Booking ID
        booking_id: i64,
    },

    /// Payments of one type
    ByType {
        #[arg(value_enum)]
        payment_type: PaymentTypeArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INBOX
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List notifications
    #[command(alias = "ls")]
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },

    /// Mark a notification as read
    Read {
        id: i64,
    },

    /// Delete a notification
    #[command(alias = "rm")]
    Delete {
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// List contact messages
    #[command(alias = "ls")]
    List {
        /// Only unread messages
        #[arg(long)]
        unread: bool,
    },

    /// Mark a message as read
    Read {
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OUTBOX
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OutboxArgs {
    #[command(subcommand)]
    pub command: OutboxCommand,
}

#[derive(Debug, Subcommand)]
pub enum OutboxCommand {
    /// Show notifications waiting for delivery
    #[command(alias = "ls")]
    List,

    /// Attempt delivery of every pending notification now
    Flush,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_url, username, timeout, insecure, price.RN1, ...)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the administrator password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
