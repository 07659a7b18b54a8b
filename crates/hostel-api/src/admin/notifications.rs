// Admin notification endpoints (`manageNotifications`)

use tracing::debug;

use super::DASHBOARD;
use crate::client::HostelClient;
use crate::error::Error;
use crate::models::Notification;

impl HostelClient {
    /// `GET manageNotifications`
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, Error> {
        self.get(&format!("{DASHBOARD}/manageNotifications")).await
    }

    /// `GET manageNotifications/unread`
    pub async fn list_unread_notifications(&self) -> Result<Vec<Notification>, Error> {
        self.get(&format!("{DASHBOARD}/manageNotifications/unread"))
            .await
    }

    /// `PATCH manageNotifications/{id}/markAsRead`
    pub async fn mark_notification_read(&self, id: i64) -> Result<(), Error> {
        debug!(id, "marking notification read");
        self.patch_no_response(&format!(
            "{DASHBOARD}/manageNotifications/{id}/markAsRead"
        ))
        .await
    }

    /// `DELETE manageNotifications/{id}`
    pub async fn delete_notification(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting notification");
        self.delete(&format!("{DASHBOARD}/manageNotifications/{id}"), &[])
            .await
    }
}
