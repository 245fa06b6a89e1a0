//! A [`Transport`] backed by `reqwest`

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::client::RawResponse;
use crate::traits::Transport;

/// Sends requests to an actual server
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Use a pre-configured `reqwest` client (e.g. with a cookie store or a proxy)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        let status = response.status().as_u16();
        let content_type = response.headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        Ok(RawResponse { status, content_type, body })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        let response = self.client
            .get(url)
            .header(USER_AGENT, crate::config::user_agent())
            .send()
            .await?;
        Self::read(response).await
    }

    async fn post_form(&self, url: Url, form: Vec<(String, String)>) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        let response = self.client
            .post(url)
            .header(USER_AGENT, crate::config::user_agent())
            .form(&form)
            .send()
            .await?;
        Self::read(response).await
    }
}
