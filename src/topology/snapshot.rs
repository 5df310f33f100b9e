use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::{Svi, Tenant, Vrf};
use crate::utils::normalize_tags;

/// The three flat collections as returned by the network store
#[derive(Debug, Clone, Default)]
pub struct TopologyData {
    pub tenants: Vec<Tenant>,
    pub vrfs: Vec<Vrf>,
    pub svis: Vec<Svi>,
}

/// Snapshot is an immutable view of the topology at one point in time.
///
/// The raw collections keep every record in the order received, orphans
/// included. The indices only reference records whose parent chain
/// resolves: a VRF needs its tenant, an SVI needs a VRF that itself
/// resolves.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
    tenants: Vec<Tenant>,
    vrfs: Vec<Vrf>,
    svis: Vec<Svi>,
    vrfs_by_tenant: HashMap<i64, Vec<usize>>,
    svis_by_vrf: HashMap<i64, Vec<usize>>,
    resolved_vrfs: HashSet<i64>,
    // per record position, whether it made it into an index
    attached_vrfs: Vec<bool>,
    attached_svis: Vec<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    pub tenants: usize,
    pub vrfs: usize,
    pub svis: usize,
    pub orphan_vrfs: usize,
    pub orphan_svis: usize,
}

/// One tenant with its VRFs, as rendered by the dashboard
#[derive(Debug, Serialize)]
pub struct TenantView<'a> {
    #[serde(flatten)]
    pub tenant: &'a Tenant,
    pub vrfs: Vec<VrfView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct VrfView<'a> {
    #[serde(flatten)]
    pub vrf: &'a Vrf,
    pub svis: Vec<&'a Svi>,
}

impl Snapshot {
    /// The snapshot held before the first successful refresh
    pub fn empty() -> Self {
        Self::build(0, None, TopologyData::default())
    }

    pub fn build(generation: u64, fetched_at: Option<DateTime<Utc>>, data: TopologyData) -> Self {
        let TopologyData { tenants, vrfs, mut svis } = data;

        for svi in &mut svis {
            svi.tags = normalize_tags(&svi.tags);
        }

        let tenant_ids: HashSet<i64> = tenants.iter().map(|t| t.tenant_id).collect();

        let mut vrfs_by_tenant: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut resolved_vrfs = HashSet::new();
        let mut attached_vrfs = vec![false; vrfs.len()];
        for (pos, vrf) in vrfs.iter().enumerate() {
            if tenant_ids.contains(&vrf.tenant_id) {
                vrfs_by_tenant.entry(vrf.tenant_id).or_default().push(pos);
                resolved_vrfs.insert(vrf.vrf_id);
                attached_vrfs[pos] = true;
            }
        }

        let mut svis_by_vrf: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut attached_svis = vec![false; svis.len()];
        for (pos, svi) in svis.iter().enumerate() {
            if resolved_vrfs.contains(&svi.vrf_id) {
                svis_by_vrf.entry(svi.vrf_id).or_default().push(pos);
                attached_svis[pos] = true;
            }
        }

        Self {
            generation,
            fetched_at,
            tenants,
            vrfs,
            svis,
            vrfs_by_tenant,
            svis_by_vrf,
            resolved_vrfs,
            attached_vrfs,
            attached_svis,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    /// VRFs of a tenant in received order
    pub fn vrfs_of_tenant(&self, tenant_id: i64) -> impl Iterator<Item = &Vrf> + '_ {
        self.vrfs_by_tenant
            .get(&tenant_id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.vrfs[pos])
    }

    /// SVIs of a VRF in received order
    pub fn svis_of_vrf(&self, vrf_id: i64) -> impl Iterator<Item = &Svi> + '_ {
        self.svis_by_vrf
            .get(&vrf_id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.svis[pos])
    }

    /// Whether `vrf_id` names a VRF attached to a known tenant
    pub fn is_selectable_vrf(&self, vrf_id: i64) -> bool {
        self.resolved_vrfs.contains(&vrf_id)
    }

    /// VRFs an SVI may be created in, in received order
    pub fn selectable_vrfs(&self) -> impl Iterator<Item = &Vrf> + '_ {
        self.vrfs
            .iter()
            .zip(&self.attached_vrfs)
            .filter_map(|(v, &attached)| attached.then_some(v))
    }

    /// VRF records whose tenant is unknown, even if another record with
    /// the same id is attached
    pub fn orphan_vrfs(&self) -> impl Iterator<Item = &Vrf> + '_ {
        self.vrfs
            .iter()
            .zip(&self.attached_vrfs)
            .filter_map(|(v, &attached)| (!attached).then_some(v))
    }

    pub fn orphan_svis(&self) -> impl Iterator<Item = &Svi> + '_ {
        self.svis
            .iter()
            .zip(&self.attached_svis)
            .filter_map(|(s, &attached)| (!attached).then_some(s))
    }

    pub fn hierarchy(&self) -> Vec<TenantView<'_>> {
        self.tenants
            .iter()
            .map(|tenant| TenantView {
                tenant,
                vrfs: self
                    .vrfs_of_tenant(tenant.tenant_id)
                    .map(|vrf| VrfView {
                        vrf,
                        svis: self.svis_of_vrf(vrf.vrf_id).collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            tenants: self.tenants.len(),
            vrfs: self.vrfs.len(),
            svis: self.svis.len(),
            orphan_vrfs: self.orphan_vrfs().count(),
            orphan_svis: self.orphan_svis().count(),
        }
    }

    /// Compare collections, ignoring generation and fetch time
    pub fn same_content(&self, other: &Snapshot) -> bool {
        self.tenants == other.tenants && self.vrfs == other.vrfs && self.svis == other.svis
    }
}
