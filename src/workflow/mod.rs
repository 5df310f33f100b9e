//! SVI creation workflow.
//!
//! ```text
//! Idle -> Editing -> Validating -> Submitting -> Succeeded -> Idle
//!            ^           |              |
//!            +-----------+--------------+-- Failed
//! ```

mod draft;

pub use draft::{FieldIssue, SviDraft, ValidationError};

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::{FetchError, NetworkApi, SubmissionError};
use crate::models::Svi;
use crate::topology::TopologyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Editing,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("no SVI draft is open for editing")]
    NotEditing,
}

/// State of the topology view after a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// The store was refreshed and now includes the new SVI
    Fresh { generation: u64 },
    /// The SVI exists in the network store but the refresh failed,
    /// so the topology view predates it
    Stale(FetchError),
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub svi: Svi,
    pub view: ViewStatus,
}

/// SviWorkflow drives one SVI form from open to submit.
///
/// Nothing leaves the process before `Submitting`; closing the form while
/// editing drops the draft without touching the network store.
pub struct SviWorkflow {
    store: Arc<TopologyStore>,
    api: Arc<dyn NetworkApi>,
    phase: Phase,
    draft: SviDraft,
    error: Option<String>,
}

impl SviWorkflow {
    pub fn new(store: Arc<TopologyStore>, api: Arc<dyn NetworkApi>) -> Self {
        Self {
            store,
            api,
            phase: Phase::Idle,
            draft: SviDraft::default(),
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    // only interactive form drivers use this; the HTTP handler runs one
    // workflow per request
    #[allow(dead_code)]
    pub fn draft(&self) -> &SviDraft {
        &self.draft
    }

    /// Message of the last failed submit, cleared when the form is reopened
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("SVI workflow {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Open the form with an empty draft. Reopening an open form keeps the
    /// draft and only clears the error.
    pub fn open(&mut self) {
        if self.phase == Phase::Idle {
            self.draft = SviDraft::default();
        }
        self.error = None;
        self.enter(Phase::Editing);
    }

    /// Close the form, discarding the draft
    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.draft = SviDraft::default();
        self.error = None;
        self.enter(Phase::Idle);
    }

    pub fn draft_mut(&mut self) -> Result<&mut SviDraft, WorkflowError> {
        if self.phase != Phase::Editing {
            return Err(WorkflowError::NotEditing);
        }
        Ok(&mut self.draft)
    }

    pub fn set_draft(&mut self, draft: SviDraft) -> Result<(), WorkflowError> {
        *self.draft_mut()? = draft;
        Ok(())
    }

    /// Validate the draft, create the SVI and refresh the topology.
    ///
    /// On a validation or submission failure the workflow returns to
    /// `Editing` with the draft intact. Once the store has accepted the
    /// SVI the call succeeds even if the refresh afterwards fails; the
    /// outcome then carries `ViewStatus::Stale`.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        if self.phase != Phase::Editing {
            return Err(WorkflowError::NotEditing);
        }

        self.enter(Phase::Validating);
        let req = match self.draft.validate(&self.store.snapshot()) {
            Ok(req) => req,
            Err(e) => {
                self.error = Some(e.to_string());
                self.enter(Phase::Editing);
                return Err(e.into());
            }
        };

        self.enter(Phase::Submitting);
        let svi = match self.api.create_svi(&req).await {
            Ok(svi) => svi,
            Err(e) => {
                tracing::warn!("Failed to create SVI {:?} in VRF {}: {}", req.name, req.vrf_id, e);
                self.error = Some(e.to_string());
                self.enter(Phase::Failed);
                self.enter(Phase::Editing);
                return Err(e.into());
            }
        };

        self.enter(Phase::Succeeded);
        tracing::info!("Created SVI {} ({}) in VRF {}", svi.svi_id, svi.name, svi.vrf_id);

        let view = match self.store.refresh().await {
            Ok(snapshot) => ViewStatus::Fresh { generation: snapshot.generation() },
            Err(e) => {
                tracing::warn!("SVI {} created but topology view is stale: {}", svi.svi_id, e);
                ViewStatus::Stale(e)
            }
        };

        self.draft = SviDraft::default();
        self.error = None;
        self.enter(Phase::Idle);
        Ok(SubmitOutcome { svi, view })
    }
}
