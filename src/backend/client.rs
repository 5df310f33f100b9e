use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::models::{CreateSviRequest, Svi, Tenant, Vrf};

use super::{FetchError, NetworkApi, SubmissionError};

/// HTTP client for the tenant network store
pub struct NetworkApiClient {
    base_url: String,
    client: Client,
}

impl NetworkApiClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Helper to perform a GET list request with an optional id filter
    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        resource: &'static str,
        filter: Option<(&str, i64)>,
    ) -> Result<Vec<T>, FetchError> {
        let mut req = self
            .client
            .get(self.api_url(&format!("/{}", resource)))
            .header("Accept", "application/json");
        if let Some((key, id)) = filter {
            req = req.query(&[(key, id)]);
        }

        let resp = req.send().await.map_err(|e| FetchError::Transport {
            resource,
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = error_body(resp).await;
            tracing::debug!("GET /{} failed with {}: {}", resource, status, body);
            return Err(FetchError::Status { resource, status, body });
        }

        resp.json().await.map_err(|e| FetchError::Decode {
            resource,
            message: e.to_string(),
        })
    }
}

async fn error_body(resp: Response) -> String {
    resp.text().await.unwrap_or_default()
}

#[async_trait]
impl NetworkApi for NetworkApiClient {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, FetchError> {
        self.list("tenants", None).await
    }

    async fn list_vrfs(&self, tenant_id: Option<i64>) -> Result<Vec<Vrf>, FetchError> {
        self.list("vrfs", tenant_id.map(|id| ("tenant_id", id))).await
    }

    async fn list_svis(&self, vrf_id: Option<i64>) -> Result<Vec<Svi>, FetchError> {
        self.list("svis", vrf_id.map(|id| ("vrf_id", id))).await
    }

    async fn create_svi(&self, req: &CreateSviRequest) -> Result<Svi, SubmissionError> {
        let resp = self
            .client
            .post(self.api_url("/svis"))
            .json(req)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = error_body(resp).await;
            tracing::debug!("POST /svis failed with {}: {}", status, body);
            return Err(SubmissionError::Rejected { status, body });
        }

        resp.json()
            .await
            .map_err(|e| SubmissionError::Decode(e.to_string()))
    }
}
