//! Room catalogue, availability, and admin room/bed handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use hostel_core::{
    AdminCommand, Availability, Bed, Collection, CreateRoomRequest, FetchOutcome, Room,
    RoomCategory, SearchCriteria, UpdateRoomRequest,
};

use crate::cli::{
    AdminRoomsArgs, AdminRoomsCommand, BedsArgs, BedsCommand, GlobalOpts, OutputFormat, RoomsArgs,
    RoomsCommand, StayArgs,
};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Catalogue ───────────────────────────────────────────────────────

/// A room category as offered to guests, with the price of the stay
/// when one was asked about.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomOffer {
    code: &'static str,
    name: &'static str,
    beds: u32,
    nightly_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stay_total: Option<u32>,
    description: &'static str,
}

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Room")]
    name: &'static str,
    #[tabled(rename = "Beds")]
    beds: u32,
    #[tabled(rename = "Per night")]
    rate: String,
    #[tabled(rename = "Stay total")]
    total: String,
}

impl From<&RoomOffer> for OfferRow {
    fn from(o: &RoomOffer) -> Self {
        Self {
            code: o.code,
            name: o.name,
            beds: o.beds,
            rate: o
                .nightly_rate
                .map_or_else(|| "n/a".into(), |r| format!("€{r}")),
            total: o.stay_total.map(|t| format!("€{t}")).unwrap_or_default(),
        }
    }
}

fn offer(ctx: &Context, category: RoomCategory, stay: Option<&StayArgs>) -> RoomOffer {
    let pricing = ctx.hostel.booking().pricing();
    let stay_total = stay.and_then(|s| {
        let quote = pricing.quote(Some(category), &s.check_in, &s.check_out, s.guests);
        quote.is_displayable().then_some(quote.total)
    });
    RoomOffer {
        code: category.code(),
        name: category.label(),
        beds: category.beds(),
        nightly_rate: pricing.rate(category),
        stay_total,
        description: category.description(),
    }
}

pub async fn handle(ctx: &Context, args: RoomsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RoomsCommand::List => {
            let offers: Vec<RoomOffer> = RoomCategory::all().map(|c| offer(ctx, c, None)).collect();
            let out = output::render_list(&global.output, &offers, |o| OfferRow::from(o), |o| {
                o.code.to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoomsCommand::Available(stay) => {
            let criteria = SearchCriteria {
                check_in: Some(util::parse_date("check-in", &stay.check_in)?),
                check_out: Some(util::parse_date("check-out", &stay.check_out)?),
                guests: stay.guests,
            };
            let rooms = available(ctx, criteria).await?;
            if rooms.is_empty() && matches!(global.output, OutputFormat::Table) {
                output::warning("No rooms available for those dates", ctx.color);
                return Ok(());
            }
            let offers: Vec<RoomOffer> = rooms.iter().map(|c| offer(ctx, *c, Some(&stay))).collect();
            let out = output::render_list(&global.output, &offers, |o| OfferRow::from(o), |o| {
                o.code.to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Run the availability query, keeping "no rooms" and "couldn't check"
/// apart.
pub async fn available(ctx: &Context, criteria: SearchCriteria) -> Result<Vec<RoomCategory>, CliError> {
    let session = ctx.hostel.booking();
    if matches!(
        session.fetch_availability(criteria).await,
        FetchOutcome::Skipped
    ) {
        return Err(CliError::Validation {
            field: "guests".into(),
            reason: "both dates and at least one guest are required".into(),
        });
    }
    match session.availability() {
        Availability::Loaded(rooms) => Ok(rooms),
        Availability::Failed(reason) => Err(CliError::ApiError {
            message: format!("could not check availability: {reason}"),
        }),
        Availability::Idle | Availability::Loading => Err(CliError::ApiError {
            message: "availability query did not complete".into(),
        }),
    }
}

// ── Admin rooms ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Beds")]
    beds: usize,
}

impl From<&Arc<Room>> for RoomRow {
    fn from(r: &Arc<Room>) -> Self {
        Self {
            id: r.room_id.clone(),
            number: r.room_number.clone(),
            floor: output::opt(r.floor.as_ref()),
            capacity: output::opt(r.capacity.as_ref()),
            beds: r.beds.len(),
        }
    }
}

fn room_detail(room: &Room, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", output::label("Room:", color), room.room_id);
    let _ = writeln!(out, "{}  {}", output::label("Number:", color), room.room_number);
    let _ = writeln!(out, "{}  {}", output::label("Floor:", color), output::opt(room.floor.as_ref()));
    let _ = writeln!(
        out,
        "{}  {}",
        output::label("Capacity:", color),
        output::opt(room.capacity.as_ref())
    );
    let beds: Vec<&str> = room.beds.iter().map(|b| b.bed_number.as_str()).collect();
    let _ = write!(out, "{}  {}", output::label("Beds:", color), beds.join(", "));
    out
}

pub async fn handle_admin(
    ctx: &Context,
    args: AdminRoomsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminRoomsCommand::List => {
            let admin = ctx.admin()?;
            admin.refresh(Collection::Rooms).await?;
            let snap = admin.store().rooms_snapshot();
            let out = output::render_list(&global.output, snap.as_slice(), |r| RoomRow::from(r), |r| {
                r.room_id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminRoomsCommand::Get { room_id } => {
            let room = ctx.admin()?.get_room(&room_id).await?;
            let out = output::render_single(
                &global.output,
                &room,
                |r| room_detail(r, ctx.color),
                |r| r.room_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminRoomsCommand::Create {
            room_id,
            room_number,
            capacity,
            floor,
            beds,
        } => {
            let request = CreateRoomRequest {
                room_id,
                room_number,
                capacity,
                floor,
                bed_count: beds,
            };
            util::run_admin(ctx, AdminCommand::CreateRoom(request), global).await?;
            Ok(())
        }

        AdminRoomsCommand::Update {
            room_id,
            room_number,
            floor,
            capacity,
        } => {
            let current = ctx.admin()?.get_room(&room_id).await?;
            let request = UpdateRoomRequest {
                room_number: room_number.unwrap_or(current.room_number),
                floor: floor.or(current.floor).unwrap_or_default(),
                capacity: capacity.or(current.capacity).unwrap_or_default(),
                room_id,
            };
            util::run_admin(ctx, AdminCommand::UpdateRoom(request), global).await?;
            Ok(())
        }

        AdminRoomsCommand::Delete { room_id } => {
            util::run_admin(ctx, AdminCommand::DeleteRoom { room_id }, global).await?;
            Ok(())
        }
    }
}

// ── Beds ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct BedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Bed")]
    number: String,
}

impl From<&Bed> for BedRow {
    fn from(b: &Bed) -> Self {
        Self {
            id: output::opt(b.bed_id.as_ref()),
            number: b.bed_number.clone(),
        }
    }
}

pub async fn handle_beds(ctx: &Context, args: BedsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BedsCommand::List { room } => {
            let admin = ctx.admin()?;
            let beds: Vec<Bed> = if let Some(room_id) = room {
                admin.beds_in_room(&room_id).await?
            } else {
                admin.refresh(Collection::Beds).await?;
                admin
                    .store()
                    .beds_snapshot()
                    .iter()
                    .map(|b| (**b).clone())
                    .collect()
            };
            let out = output::render_list(&global.output, &beds, |b| BedRow::from(b), |b| {
                b.bed_id.clone().unwrap_or_else(|| b.bed_number.clone())
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BedsCommand::Add { room, bed_number } => {
            util::run_admin(
                ctx,
                AdminCommand::AddBed {
                    room_id: room,
                    bed_number,
                },
                global,
            )
            .await?;
            Ok(())
        }

        BedsCommand::Delete { bed_id } => {
            util::run_admin(ctx, AdminCommand::DeleteBed { bed_id }, global).await?;
            Ok(())
        }
    }
}
