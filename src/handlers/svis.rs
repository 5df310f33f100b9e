use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::models::Svi;
use crate::workflow::{SviDraft, SviWorkflow, ViewStatus};
use crate::AppState;

use super::{created, ApiError};

#[derive(Serialize)]
pub struct CreateSviResponse {
    pub svi: Svi,
    /// True when the SVI was created but the topology could not be refreshed
    pub view_stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

/// Run the SVI creation workflow for a submitted form
pub async fn create_svi(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<SviDraft>,
) -> Result<(StatusCode, Json<CreateSviResponse>), ApiError> {
    let mut workflow = SviWorkflow::new(state.topology.clone(), state.api.clone());
    workflow.open();
    workflow.set_draft(draft)?;

    let outcome = match workflow.submit().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!(
                "SVI form rejected, workflow back in {:?}: {}",
                workflow.phase(),
                workflow.error().unwrap_or_default()
            );
            return Err(e.into());
        }
    };
    let response = match outcome.view {
        ViewStatus::Fresh { generation } => CreateSviResponse {
            svi: outcome.svi,
            view_stale: false,
            refresh_error: None,
            generation: Some(generation),
        },
        ViewStatus::Stale(e) => CreateSviResponse {
            svi: outcome.svi,
            view_stale: true,
            refresh_error: Some(e.to_string()),
            generation: None,
        },
    };
    Ok(created(response))
}
