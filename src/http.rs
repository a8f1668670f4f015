use crate::error::{Error, Result};
use crate::profile::ApiConfig;
use crate::request::RequestDescriptor;
use crate::url::Endpoint;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;
use tracing::debug;

/// Thin wrapper over one shared reqwest client, bound to the configured
/// endpoint. All transport-level trouble — connect failures, non-2xx statuses,
/// bodies that are not JSON — comes back as [`Error::FetchFailed`]; callers
/// never see a raw reqwest error.
pub struct ApiClient {
    client: Client,
    endpoint: Endpoint,
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // No request timeout: a slow response is superseded, not aborted.
        let client = Client::builder()
            .build()
            .map_err(|e| Error::FetchFailed(format!("client setup: {e}")))?;
        Ok(ApiClient {
            client,
            endpoint: config.endpoint().clone(),
        })
    }

    pub async fn get(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let url = descriptor.url_path().at(&self.endpoint);
        debug!(path = %descriptor, "sending request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::FetchFailed(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed(format!("status {status} for {descriptor}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::FetchFailed(format!("body is not JSON: {e}")))
    }
}
