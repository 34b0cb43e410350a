use std::time::Duration;

use api_types::ErrorBody;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ClientError, session::Session};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON transport shared by every resource client.
///
/// Attaches `Authorization: Bearer <token>` when the session holds a token and converts
/// non-success statuses into [`ClientError`]. Requests without a token are still sent; the
/// backend decides whether they fail.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl HttpClient {
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let res = self.execute(Method::GET, path, self.request(Method::GET, path)).await?;
        read_json(res).await
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let req = self.request(method.clone(), path).json(body);
        let res = self.execute(method, path, req).await?;
        read_json(res).await
    }

    /// Sends a request without a body and discards whatever the server answers.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ClientError> {
        let req = self.request(method.clone(), path);
        self.execute(method, path, req).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let res = match req.send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::warn!(%method, path, "request failed: {err}");
                return Err(ClientError::Network(err));
            }
        };

        let status = res.status();
        tracing::debug!(%method, path, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(res);
        }

        let message = res
            .json::<ErrorBody>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::warn!(%method, path, status = status.as_u16(), "server rejected request: {message}");
        let err = ClientError::from_status(status, message);
        if err.is_auth() && self.session.is_authenticated() {
            self.session.mark_expired();
        }
        Err(err)
    }
}

async fn read_json(res: Response) -> Result<Value, ClientError> {
    let bytes = res.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
