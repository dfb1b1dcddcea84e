use anyhow::Context;
use tracing::{debug, warn};

use crate::message::{Reply, Request};

/// Delivers one request to the service and hands back the raw response body.
pub trait Transport {
    fn exchange(&self, request: &Request) -> anyhow::Result<String>;
}

/// Posts requests as JSON to a single HTTP endpoint.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: String) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url })
    }
}

impl Transport for HttpTransport {
    fn exchange(&self, request: &Request) -> anyhow::Result<String> {
        debug!(url = %self.url, ?request, "Sending request");
        let res = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .with_context(|| format!("Failed to send request to {}", self.url))?;
        let status = res.status();
        if !status.is_success() {
            warn!(%status, "Service answered with a non-success status");
        }
        let body = res.text().context("Failed to read response body")?;
        debug!(url = %self.url, %status, "Got response");
        Ok(body)
    }
}

/// Send a request and decode the answer.
pub fn send(transport: &impl Transport, request: &Request) -> anyhow::Result<Reply> {
    let body = transport.exchange(request)?;
    Reply::parse(&body)
}
