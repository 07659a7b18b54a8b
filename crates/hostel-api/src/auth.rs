// Admin authentication
//
// A single username/password exchange. The backend answers with an
// `adminId` which the caller persists as its session marker; there is
// no token refresh or expiry.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::HostelClient;
use crate::error::Error;
use crate::models::{AdminLoginRequest, AdminLoginResponse};

impl HostelClient {
    /// Log in as an administrator.
    ///
    /// `POST /api/admin/login` with `{"username", "password"}`. A non-2xx
    /// status or a body with `success: false` maps to
    /// [`Error::Authentication`] carrying the server message.
    pub async fn admin_login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AdminLoginResponse, Error> {
        debug!(username, "logging in");

        let body = AdminLoginRequest {
            username,
            password: password.expose_secret(),
        };

        let resp: AdminLoginResponse = match self.post("api/admin/login", &body).await {
            Ok(resp) => resp,
            Err(Error::Api { status, message }) => {
                return Err(Error::Authentication {
                    message: format!("login failed (HTTP {status}): {message}"),
                });
            }
            Err(e) => return Err(e),
        };

        if !resp.success || resp.admin_id.is_none() {
            return Err(Error::Authentication {
                message: resp
                    .message
                    .unwrap_or_else(|| "invalid username or password".into()),
            });
        }

        debug!("login successful");
        Ok(resp)
    }
}
