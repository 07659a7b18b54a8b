// Admin payment endpoints (`managePayment/`), read-only.

use super::DASHBOARD;
use crate::client::HostelClient;
use crate::error::Error;
use crate::models::{Payment, PaymentType};

fn path(suffix: &str) -> String {
    format!("{DASHBOARD}/managePayment/{suffix}")
}

impl HostelClient {
    /// Every payment, newest first.
    ///
    /// `GET managePayment/allSorted`
    pub async fn list_payments(&self) -> Result<Vec<Payment>, Error> {
        self.get(&path("allSorted")).await
    }

    /// `GET managePayment/byBooking?bookingId=`
    pub async fn payment_for_booking(&self, booking_id: i64) -> Result<Payment, Error> {
        self.get_with_params(&path("byBooking"), &[("bookingId", booking_id.to_string())])
            .await
    }

    /// `GET managePayment/byType?paymentType=`
    pub async fn payments_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>, Error> {
        self.get_with_params(
            &path("byType"),
            &[("paymentType", payment_type.to_string())],
        )
        .await
    }
}
