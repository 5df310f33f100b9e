use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::models::*;
use crate::topology::{TenantView, TopologySummary};
use crate::AppState;

use super::ApiError;

#[derive(Serialize)]
pub struct TopologyResponse<'a> {
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
    pub summary: TopologySummary,
    pub tenants: Vec<TenantView<'a>>,
}

#[derive(Serialize)]
pub struct OrphansResponse {
    pub vrfs: Vec<Vrf>,
    pub svis: Vec<Svi>,
}

/// Render the tenant -> VRF -> SVI hierarchy of the current snapshot
pub async fn get_topology(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.topology.snapshot();
    // Views borrow from the snapshot; into_response serializes right away
    Json(TopologyResponse {
        generation: snapshot.generation(),
        fetched_at: snapshot.fetched_at(),
        summary: snapshot.summary(),
        tenants: snapshot.hierarchy(),
    })
    .into_response()
}

/// Re-fetch the topology from the network store
pub async fn refresh_topology(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state.topology.refresh().await?;
    Ok(Json(serde_json::json!({
        "generation": snapshot.generation(),
        "summary": snapshot.summary(),
    })))
}

pub async fn list_tenants(State(state): State<Arc<AppState>>) -> Json<Vec<Tenant>> {
    Json(state.topology.all_tenants())
}

/// VRFs of a tenant; empty for unknown tenants
pub async fn list_tenant_vrfs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Json<Vec<Vrf>> {
    Json(state.topology.vrfs_of_tenant(id))
}

/// VRFs an SVI may be created in
pub async fn list_vrfs(State(state): State<Arc<AppState>>) -> Json<Vec<Vrf>> {
    Json(state.topology.selectable_vrfs())
}

/// SVIs of a VRF; empty for unknown and orphaned VRFs
pub async fn list_vrf_svis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Json<Vec<Svi>> {
    Json(state.topology.svis_of_vrf(id))
}

/// Records excluded from the hierarchy because their parent is missing
pub async fn get_orphans(State(state): State<Arc<AppState>>) -> Json<OrphansResponse> {
    let snapshot = state.topology.snapshot();
    Json(OrphansResponse {
        vrfs: snapshot.orphan_vrfs().cloned().collect(),
        svis: snapshot.orphan_svis().cloned().collect(),
    })
}
