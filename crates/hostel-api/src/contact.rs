// Contact endpoints
//
// The public contact form and SMS dispatch post to `/api/contact/`,
// and the admin inbox reads and acknowledges the stored messages.

use tracing::debug;

use crate::client::HostelClient;
use crate::error::Error;
use crate::models::{ContactMessage, ContactRequest};

impl HostelClient {
    /// Send a contact-form email.
    ///
    /// `POST /api/contact/send-email`
    pub async fn send_contact_email(&self, request: &ContactRequest) -> Result<(), Error> {
        debug!(email = %request.email, "sending contact email");
        self.post_no_response("api/contact/send-email", request, &[])
            .await
    }

    /// Dispatch an SMS-style notification.
    ///
    /// `POST /api/contact/send-sms`
    pub async fn send_sms(&self, request: &ContactRequest) -> Result<(), Error> {
        debug!(email = %request.email, "sending sms notification");
        self.post_no_response("api/contact/send-sms", request, &[])
            .await
    }

    /// Every stored contact message.
    ///
    /// `GET /api/contact/all`
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, Error> {
        self.get("api/contact/all").await
    }

    /// Messages not yet acknowledged.
    ///
    /// `GET /api/contact/unread`
    pub async fn list_unread_contact_messages(&self) -> Result<Vec<ContactMessage>, Error> {
        self.get("api/contact/unread").await
    }

    /// `PUT /api/contact/mark-as-read/{id}`
    pub async fn mark_contact_message_read(&self, id: i64) -> Result<(), Error> {
        self.put_no_response::<()>(&format!("api/contact/mark-as-read/{id}"), None, &[])
            .await
    }
}
