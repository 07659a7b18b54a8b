// Admin dashboard endpoints
//
// Everything under `/api/admin/dashboard/`. The backend does not check a
// session on these routes; callers gate access on a stored admin id.

mod bookings;
mod customers;
mod notifications;
mod payments;
mod rooms;

/// Prefix shared by every dashboard route.
pub(crate) const DASHBOARD: &str = "api/admin/dashboard";
