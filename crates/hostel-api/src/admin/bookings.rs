// Admin booking endpoints (`manageBooking/`)

use chrono::NaiveDate;
use tracing::debug;

use super::DASHBOARD;
use crate::client::HostelClient;
use crate::error::Error;
use crate::models::{Booking, BookingStatus, CreateBookingRequest, StatusCounts};

fn path(suffix: &str) -> String {
    format!("{DASHBOARD}/manageBooking/{suffix}")
}

impl HostelClient {
    /// `GET manageBooking/getAllBookings`
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        self.get(&path("getAllBookings")).await
    }

    /// `GET manageBooking/getDetails?bookingId=`
    pub async fn get_booking(&self, booking_id: i64) -> Result<Booking, Error> {
        self.get_with_params(
            &path("getDetails"),
            &[("bookingId", booking_id.to_string())],
        )
        .await
    }

    /// `GET manageBooking/findByName?firstName=&lastName=`
    ///
    /// The backend answers 404 when nothing matches.
    pub async fn find_bookings_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Booking>, Error> {
        self.get_with_params(
            &path("findByName"),
            &[
                ("firstName", first_name.to_owned()),
                ("lastName", last_name.to_owned()),
            ],
        )
        .await
    }

    /// `GET manageBooking/findByCheckInDateRange?start=&end=`
    pub async fn find_bookings_by_check_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, Error> {
        self.get_with_params(
            &path("findByCheckInDateRange"),
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await
    }

    /// `GET manageBooking/findByStatus?status=`
    pub async fn find_bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, Error> {
        self.get_with_params(&path("findByStatus"), &[("status", status.to_string())])
            .await
    }

    /// `GET manageBooking/statusCounts`
    pub async fn booking_status_counts(&self) -> Result<StatusCounts, Error> {
        self.get(&path("statusCounts")).await
    }

    /// Most recently created booking, `None` on `204 No Content`.
    ///
    /// `GET manageBooking/latest`
    pub async fn latest_booking(&self) -> Result<Option<Booking>, Error> {
        self.get_optional(&path("latest")).await
    }

    /// `POST manageBooking/createBooking`
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, Error> {
        debug!(room = %request.room_number, "admin creating booking");
        self.post(&path("createBooking"), request).await
    }

    /// `PUT manageBooking/updateBooking` with the full booking row.
    pub async fn update_booking(&self, booking: &Booking) -> Result<(), Error> {
        debug!(booking_id = booking.booking_id, "updating booking");
        self.put_no_response(&path("updateBooking"), Some(booking), &[])
            .await
    }

    /// `PUT manageBooking/cancelBooking?bookingId=`
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<(), Error> {
        debug!(booking_id, "cancelling booking");
        self.put_no_response::<()>(
            &path("cancelBooking"),
            None,
            &[("bookingId", booking_id.to_string())],
        )
        .await
    }

    /// `DELETE manageBooking/deleteBooking/{id}`
    pub async fn delete_booking(&self, booking_id: i64) -> Result<(), Error> {
        debug!(booking_id, "deleting booking");
        self.delete(&path(&format!("deleteBooking/{booking_id}")), &[])
            .await
    }
}
