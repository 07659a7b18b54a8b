//! Customer command handlers (admin).

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use hostel_core::{AdminCommand, Collection, Customer};

use crate::cli::{CustomerFields, CustomerUpdateFields, CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Room")]
    room: String,
}

impl From<&Arc<Customer>> for CustomerRow {
    fn from(c: &Arc<Customer>) -> Self {
        Self {
            id: output::opt(c.customer_id.as_ref()),
            name: c.full_name(),
            email: c.email.clone(),
            phone: output::opt(c.phone.as_ref()),
            room: output::opt(c.room_number.as_ref()),
        }
    }
}

fn customer_detail(c: &Customer, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        output::label("Customer:", color),
        output::opt(c.customer_id.as_ref())
    );
    let _ = writeln!(out, "{}  {}", output::label("Name:", color), c.full_name());
    let _ = writeln!(out, "{}  {}", output::label("Email:", color), c.email);
    let _ = writeln!(out, "{}  {}", output::label("Phone:", color), output::opt(c.phone.as_ref()));
    let _ = writeln!(
        out,
        "{}  {}",
        output::label("Born:", color),
        output::opt(c.date_of_birth.as_ref())
    );
    let _ = write!(
        out,
        "{}  {} / bed {}",
        output::label("Room:", color),
        output::opt(c.room_number.as_ref()),
        output::opt(c.bed_number.as_ref())
    );
    out
}

fn new_customer(fields: CustomerFields) -> Result<Customer, CliError> {
    Ok(Customer {
        date_of_birth: util::parse_opt_date("date-of-birth", fields.date_of_birth.as_deref())?,
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        ..Customer::default()
    })
}

fn apply_update(mut customer: Customer, fields: CustomerUpdateFields) -> Result<Customer, CliError> {
    if let Some(v) = fields.first_name {
        customer.first_name = v;
    }
    if let Some(v) = fields.last_name {
        customer.last_name = v;
    }
    if let Some(v) = fields.email {
        customer.email = v;
    }
    if fields.phone.is_some() {
        customer.phone = fields.phone;
    }
    if let Some(d) = util::parse_opt_date("date-of-birth", fields.date_of_birth.as_deref())? {
        customer.date_of_birth = Some(d);
    }
    Ok(customer)
}

pub async fn handle(ctx: &Context, args: CustomersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CustomersCommand::List => {
            let admin = ctx.admin()?;
            admin.refresh(Collection::Customers).await?;
            let snap = admin.store().customers_snapshot();
            let out = output::render_list(
                &global.output,
                snap.as_slice(),
                |c| CustomerRow::from(c),
                |c| c.customer_id.clone().unwrap_or_else(|| c.email.clone()),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get { id_or_email } => {
            let admin = ctx.admin()?;
            let customer = if id_or_email.contains('@') {
                admin
                    .find_customer_by_email(&id_or_email)
                    .await?
                    .ok_or_else(|| CliError::NotFound {
                        resource_type: "customer".into(),
                        identifier: id_or_email.clone(),
                        list_command: "customers list".into(),
                    })?
            } else {
                admin.get_customer(&id_or_email).await?
            };
            let out = output::render_single(
                &global.output,
                &customer,
                |c| customer_detail(c, ctx.color),
                |c| c.customer_id.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Create(fields) => {
            let customer = new_customer(fields)?;
            util::run_admin(ctx, AdminCommand::CreateCustomer(customer), global).await?;
            Ok(())
        }

        CustomersCommand::Update { id, fields } => {
            let current = ctx.admin()?.get_customer(&id).await?;
            let updated = apply_update(current, fields)?;
            util::run_admin(ctx, AdminCommand::UpdateCustomer(updated), global).await?;
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            util::run_admin(ctx, AdminCommand::DeleteCustomer { customer_id: id }, global).await?;
            Ok(())
        }
    }
}
