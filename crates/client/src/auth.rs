use api_types::auth::{Login, LoginResponse, Register, User};
use reqwest::Method;
use serde_json::Value;

use crate::{error::ClientError, http::HttpClient, session::SessionStore};

/// Login, registration and current-user calls.
///
/// The token returned by a successful login is written into the shared
/// [`Session`](crate::session::Session) and persisted through the [`SessionStore`]; logout
/// clears both.
#[derive(Clone, Debug)]
pub struct AuthClient {
    http: HttpClient,
    store: SessionStore,
}

impl AuthClient {
    pub fn new(http: HttpClient, store: SessionStore) -> Self {
        Self { http, store }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let body = Login {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let value = self.http.send_json(Method::POST, "/auth/login", &body).await?;
        let LoginResponse { token, user } = serde_json::from_value(value)?;

        self.http.session().set_token(token.as_str());
        // A session that cannot be persisted still works until the program exits.
        if let Err(err) = self.store.save(&token) {
            tracing::warn!(path = %self.store.path().display(), "could not persist session: {err}");
        }
        tracing::info!(user = %user.username, "logged in");
        Ok(user)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let body = Register {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.http
            .send_json(Method::POST, "/auth/register", &body)
            .await?;
        tracing::info!(username = %body.username, "registered");
        Ok(())
    }

    /// Current user for the session token.
    pub async fn me(&self) -> Result<User, ClientError> {
        let value = self.http.get_json("/users/me").await?;
        let value = match value {
            Value::Object(mut map) if map.contains_key("user") => {
                map.remove("user").unwrap_or(Value::Null)
            }
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Loads a persisted token into the session and checks it against the backend.
    ///
    /// Returns `None` when there is no stored token or the backend rejects it; a rejected
    /// token is removed from disk.
    pub async fn resume(&self) -> Option<User> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(path = %self.store.path().display(), "could not read session: {err}");
                return None;
            }
        };
        self.http.session().set_token(token);
        match self.me().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "resumed session");
                Some(user)
            }
            Err(err) => {
                tracing::info!("stored session rejected: {err}");
                self.logout();
                None
            }
        }
    }

    pub fn logout(&self) {
        self.http.session().clear();
        if let Err(err) = self.store.clear() {
            tracing::warn!(path = %self.store.path().display(), "could not remove session: {err}");
        }
        tracing::info!("logged out");
    }
}
