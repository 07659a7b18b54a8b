// Public booking endpoints
//
// Unauthenticated surface used by the marketing site: availability
// lookup and booking creation under `/api/user/`.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::client::HostelClient;
use crate::error::Error;
use crate::models::{CreateBookingRequest, UserBooking};

impl HostelClient {
    /// Room category identifiers with free capacity for the given stay.
    ///
    /// `GET /api/user/rooms/available?checkIn=&checkOut=&guests=`
    ///
    /// The body is expected to be a JSON array of strings. Any other shape
    /// yields an empty list; non-string elements are skipped.
    pub async fn available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<Vec<String>, Error> {
        debug!(%check_in, %check_out, guests, "querying availability");
        let value = self
            .get_value(
                "api/user/rooms/available",
                &[
                    ("checkIn", check_in.to_string()),
                    ("checkOut", check_out.to_string()),
                    ("guests", guests.to_string()),
                ],
            )
            .await?;

        let serde_json::Value::Array(items) = value else {
            warn!("availability response is not an array, treating as empty");
            return Ok(Vec::new());
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(id) => Some(id),
                _ => None,
            })
            .collect())
    }

    /// Create a booking from the public form.
    ///
    /// `POST /api/user/bookings/createBooking`
    pub async fn create_user_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<UserBooking, Error> {
        debug!(room = %request.room_number, "creating booking");
        self.post("api/user/bookings/createBooking", request).await
    }
}
