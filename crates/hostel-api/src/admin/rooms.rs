// Admin room and bed endpoints (`manageRoom/`, `manageBed/`)
//
// Rooms are addressed by the `room_id` query parameter rather than a
// path segment; beds likewise by `bed_id`.

use serde_json::json;
use tracing::debug;

use super::DASHBOARD;
use crate::client::{HostelClient, empty_if_not_found};
use crate::error::Error;
use crate::models::{Bed, CreateRoomRequest, Room, UpdateRoomRequest};

fn room_path(suffix: &str) -> String {
    format!("{DASHBOARD}/manageRoom/{suffix}")
}

fn bed_path(suffix: &str) -> String {
    format!("{DASHBOARD}/manageBed/{suffix}")
}

impl HostelClient {
    // ── Rooms ────────────────────────────────────────────────────────

    /// `GET manageRoom/getAllRooms`
    pub async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        self.get(&room_path("getAllRooms")).await
    }

    /// Room metadata together with its beds.
    ///
    /// `GET manageRoom/getRoomWithBeds?room_id=`
    pub async fn get_room_with_beds(&self, room_id: &str) -> Result<Room, Error> {
        self.get_with_params(
            &room_path("getRoomWithBeds"),
            &[("room_id", room_id.to_owned())],
        )
        .await
    }

    /// `POST manageRoom/createRoomWithBeds`
    pub async fn create_room(&self, request: &CreateRoomRequest) -> Result<(), Error> {
        debug!(room_id = %request.room_id, beds = request.bed_count, "creating room");
        self.post_no_response(&room_path("createRoomWithBeds"), request, &[])
            .await
    }

    /// `PUT manageRoom/updateRoom?room_id=`
    pub async fn update_room(&self, request: &UpdateRoomRequest) -> Result<(), Error> {
        debug!(room_id = %request.room_id, "updating room");
        self.put_no_response(
            &room_path("updateRoom"),
            Some(request),
            &[("room_id", request.room_id.clone())],
        )
        .await
    }

    /// `DELETE manageRoom/deleteRoom?room_id=`
    pub async fn delete_room(&self, room_id: &str) -> Result<(), Error> {
        debug!(room_id, "deleting room");
        self.delete(&room_path("deleteRoom"), &[("room_id", room_id.to_owned())])
            .await
    }

    // ── Beds ─────────────────────────────────────────────────────────

    /// `GET manageBed/getAllBeds`
    ///
    /// The backend answers 404 "Beds not found" when there are none.
    pub async fn list_beds(&self) -> Result<Vec<Bed>, Error> {
        empty_if_not_found(self.get(&bed_path("getAllBeds")).await)
    }

    /// `GET manageBed/getBedsByRoomId?room_id=`
    ///
    /// A room without beds comes back as 404, same as an unknown room.
    pub async fn list_beds_in_room(&self, room_id: &str) -> Result<Vec<Bed>, Error> {
        empty_if_not_found(
            self.get_with_params(
                &bed_path("getBedsByRoomId"),
                &[("room_id", room_id.to_owned())],
            )
            .await,
        )
    }

    /// `POST manageBed/addBed?room_id=` with `{"bedNumber": ...}`
    pub async fn add_bed(&self, room_id: &str, bed_number: &str) -> Result<(), Error> {
        debug!(room_id, bed_number, "adding bed");
        self.post_no_response(
            &bed_path("addBed"),
            &json!({ "bedNumber": bed_number }),
            &[("room_id", room_id.to_owned())],
        )
        .await
    }

    /// `DELETE manageBed/deleteBed?bed_id=`
    pub async fn delete_bed(&self, bed_id: &str) -> Result<(), Error> {
        debug!(bed_id, "deleting bed");
        self.delete(&bed_path("deleteBed"), &[("bed_id", bed_id.to_owned())])
            .await
    }
}
