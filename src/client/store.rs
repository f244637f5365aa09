use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry};

use super::error::ClientError;

/// Store operations the landing page needs.
#[async_trait]
pub trait WaitlistApi: Send + Sync {
    async fn list(&self) -> Result<Vec<WaitlistEntry>, ClientError>;
    async fn append(&self, entry: &NewWaitlistEntry) -> Result<WaitlistEntry, ClientError>;
    async fn count(&self) -> Result<u64, ClientError>;
    /// Deletes every entry; returns how many were removed.
    async fn clear(&self) -> Result<u64, ClientError>;
}

/// HTTP client for the waitlist store.
#[derive(Clone)]
pub struct WaitlistClient {
    base_url: String,
    admin_token: Option<SecretString>,
    http_client: Client,
}

#[derive(Deserialize)]
struct ListBody {
    items: Vec<WaitlistEntry>,
}

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

#[derive(Deserialize)]
struct ClearBody {
    deleted: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl WaitlistClient {
    /// `base_url` is the site origin, e.g. `https://evolance.app`; requests
    /// go to `{base_url}/api/waitlist`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::Config(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            admin_token: None,
            http_client: Client::new(),
        })
    }

    /// Token sent as `Authorization: Bearer` on admin calls (list, clear).
    pub fn with_admin_token(mut self, token: SecretString) -> Self {
        self.admin_token = Some(token);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/waitlist{}", self.base_url, path)
    }

    fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorBody>().await.ok();
    let (code, message) = body.map(|b| (b.code, b.message)).unwrap_or((None, None));
    Err(ClientError::Api {
        status,
        code,
        message,
    })
}

#[async_trait]
impl WaitlistApi for WaitlistClient {
    async fn list(&self) -> Result<Vec<WaitlistEntry>, ClientError> {
        let response = self.admin(self.http_client.get(self.url(""))).send().await?;
        let body: ListBody = check(response).await?.json().await?;
        Ok(body.items)
    }

    async fn append(&self, entry: &NewWaitlistEntry) -> Result<WaitlistEntry, ClientError> {
        let response = self.http_client.post(self.url("")).json(entry).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn count(&self) -> Result<u64, ClientError> {
        let response = self.http_client.get(self.url("/count")).send().await?;
        let body: CountBody = check(response).await?.json().await?;
        Ok(body.count)
    }

    async fn clear(&self) -> Result<u64, ClientError> {
        let response = self
            .admin(self.http_client.post(self.url("/clear")))
            .send()
            .await?;
        let body: ClearBody = check(response).await?.json().await?;
        Ok(body.deleted)
    }
}
