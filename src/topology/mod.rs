//! Topology store: fetches tenants, VRFs and SVIs and publishes them as
//! immutable, indexed snapshots.

mod snapshot;

pub use snapshot::{Snapshot, TenantView, TopologyData, TopologySummary};

use arc_swap::ArcSwap;
use chrono::Utc;
use futures::future::try_join_all;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::{FetchError, NetworkApi};
use crate::models::{Svi, Tenant, Vrf};

/// How a refresh gathers the three collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStrategy {
    /// Three unfiltered list reads, dispatched concurrently
    #[default]
    Flat,
    /// Tenants first, then VRFs per tenant, then SVIs per VRF
    FanOut,
}

impl FromStr for RefreshStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "fan-out" | "fanout" => Ok(Self::FanOut),
            other => Err(format!("unknown refresh strategy: {}", other)),
        }
    }
}

/// TopologyStore owns the current snapshot.
///
/// A refresh builds a complete snapshot off to the side and publishes it
/// with a single pointer swap, so readers see either the old or the new
/// snapshot and never a mix. A failed refresh publishes nothing.
/// Overlapping refreshes are last-write-wins: generations are handed out
/// as responses arrive, and a snapshot never replaces a newer one.
pub struct TopologyStore {
    api: Arc<dyn NetworkApi>,
    strategy: RefreshStrategy,
    current: ArcSwap<Snapshot>,
    generation: AtomicU64,
}

impl TopologyStore {
    pub fn new(api: Arc<dyn NetworkApi>, strategy: RefreshStrategy) -> Self {
        Self {
            api,
            strategy,
            current: ArcSwap::from_pointee(Snapshot::empty()),
            generation: AtomicU64::new(0),
        }
    }

    /// Re-fetch all three collections and replace the snapshot.
    /// Not retried; on failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, FetchError> {
        let fetched = match self.strategy {
            RefreshStrategy::Flat => fetch_flat(self.api.as_ref()).await,
            RefreshStrategy::FanOut => fetch_fan_out(self.api.as_ref()).await,
        };
        let data = match fetched {
            Ok(data) => data,
            Err(e) => {
                let kept = self.current.load().generation();
                tracing::warn!("Topology refresh failed, keeping generation {}: {}", kept, e);
                return Err(e);
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot::build(generation, Some(Utc::now()), data));

        let summary = snapshot.summary();
        if summary.orphan_vrfs > 0 || summary.orphan_svis > 0 {
            tracing::warn!(
                "Snapshot {} excludes {} orphan VRFs and {} orphan SVIs",
                generation,
                summary.orphan_vrfs,
                summary.orphan_svis
            );
        }
        tracing::info!(
            "Topology snapshot {}: {} tenants, {} VRFs, {} SVIs",
            generation,
            summary.tenants,
            summary.vrfs,
            summary.svis
        );

        Ok(self.publish(snapshot))
    }

    /// Swap in `snapshot` unless a newer generation is already current.
    /// Returns whichever snapshot ends up published.
    fn publish(&self, snapshot: Arc<Snapshot>) -> Arc<Snapshot> {
        let generation = snapshot.generation();
        let prev = self.current.rcu(|cur| {
            if cur.generation() > generation {
                Arc::clone(cur)
            } else {
                Arc::clone(&snapshot)
            }
        });
        if prev.generation() > generation {
            tracing::debug!(
                "Snapshot {} superseded by {} before publishing",
                generation,
                prev.generation()
            );
            return prev;
        }
        snapshot
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn all_tenants(&self) -> Vec<Tenant> {
        self.snapshot().tenants().to_vec()
    }

    pub fn vrfs_of_tenant(&self, tenant_id: i64) -> Vec<Vrf> {
        self.snapshot().vrfs_of_tenant(tenant_id).cloned().collect()
    }

    pub fn svis_of_vrf(&self, vrf_id: i64) -> Vec<Svi> {
        self.snapshot().svis_of_vrf(vrf_id).cloned().collect()
    }

    /// VRFs an SVI may currently be created in
    pub fn selectable_vrfs(&self) -> Vec<Vrf> {
        self.snapshot().selectable_vrfs().cloned().collect()
    }
}

async fn fetch_flat(api: &dyn NetworkApi) -> Result<TopologyData, FetchError> {
    let (tenants, vrfs, svis) = tokio::try_join!(
        api.list_tenants(),
        api.list_vrfs(None),
        api.list_svis(None),
    )?;
    Ok(TopologyData { tenants, vrfs, svis })
}

async fn fetch_fan_out(api: &dyn NetworkApi) -> Result<TopologyData, FetchError> {
    let tenants = api.list_tenants().await?;

    let vrfs: Vec<Vrf> = try_join_all(tenants.iter().map(|t| api.list_vrfs(Some(t.tenant_id))))
        .await?
        .into_iter()
        .flatten()
        .collect();

    let svis: Vec<Svi> = try_join_all(vrfs.iter().map(|v| api.list_svis(Some(v.vrf_id))))
        .await?
        .into_iter()
        .flatten()
        .collect();

    Ok(TopologyData { tenants, vrfs, svis })
}
