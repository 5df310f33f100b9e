//! Access to the external network store that owns tenants, VRFs and SVIs.

pub mod client;
#[cfg(test)]
pub mod memory;

pub use client::NetworkApiClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CreateSviRequest, Svi, Tenant, Vrf};

/// A topology read against the network store failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to reach network store for {resource}: {message}")]
    Transport { resource: &'static str, message: String },
    #[error("network store returned {status} for {resource}")]
    Status { resource: &'static str, status: u16, body: String },
    #[error("malformed {resource} response from network store: {message}")]
    Decode { resource: &'static str, message: String },
}

/// A create request reached (or tried to reach) the store and was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("failed to reach network store: {0}")]
    Transport(String),
    #[error("network store rejected the SVI ({status})")]
    Rejected { status: u16, body: String },
    #[error("malformed create response from network store: {0}")]
    Decode(String),
}

impl SubmissionError {
    /// The store refused the record because it clashes with existing state,
    /// e.g. a VLAN already used inside the VRF.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Rejected { status: 409, .. })
    }
}

/// Read/write operations the network store answers
#[async_trait]
pub trait NetworkApi: Send + Sync {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, FetchError>;

    /// List VRFs, optionally restricted to one tenant
    async fn list_vrfs(&self, tenant_id: Option<i64>) -> Result<Vec<Vrf>, FetchError>;

    /// List SVIs, optionally restricted to one VRF
    async fn list_svis(&self, vrf_id: Option<i64>) -> Result<Vec<Svi>, FetchError>;

    async fn create_svi(&self, req: &CreateSviRequest) -> Result<Svi, SubmissionError>;
}
