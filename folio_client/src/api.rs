use std::future::Future;

use anyhow::{anyhow, Context};
use serde::Serialize;
use url::Url;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// JSON body posted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub project: String,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Posts `request` to the relay. Fails on network errors and on any
    /// non-success status.
    fn send(&self, request: ContactRequest) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContactApi {
    /// `base_url` is the address the relay is served from, e.g.
    /// `https://api.example.com`.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let mut endpoint = base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| anyhow!("Relay url {base_url} cannot be used as a base"))?
            .pop_if_empty()
            .extend(["api", "contact"]);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApi for HttpContactApi {
    async fn send(&self, request: ContactRequest) -> anyhow::Result<()> {
        self.client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
