//! reqwest-backed [`JsonHttpClient`].

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{HttpError, JsonHttpClient};

pub struct ReqwestJsonClient {
    http: Client,
    server_url: String,
}

impl ReqwestJsonClient {
    pub fn new(server_url: &str) -> Result<Self, HttpError> {
        Self::with_client(Client::new(), server_url)
    }

    /// Reuse a preconfigured client, e.g. one carrying session cookies.
    pub fn with_client(http: Client, server_url: &str) -> Result<Self, HttpError> {
        let parsed = Url::parse(server_url).map_err(|e| HttpError::InvalidUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HttpError::InvalidUrl {
                url: server_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

async fn check_status(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok());
    Err(HttpError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl JsonHttpClient for ReqwestJsonClient {
    async fn get_json(&self, path: &str) -> Result<Value, HttpError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = check_status(response).await?.json::<Value>().await?;
        Ok(body)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), HttpError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
