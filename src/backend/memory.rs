//! In-memory network store used by store and workflow tests.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Barrier};

use crate::models::{CreateSviRequest, Svi, Tenant, Vrf};

use super::{FetchError, NetworkApi, SubmissionError};

#[derive(Default)]
struct Tables {
    tenants: Vec<Tenant>,
    vrfs: Vec<Vrf>,
    svis: Vec<Svi>,
    failing: HashSet<&'static str>,
    fail_reads_after_create: bool,
    tenant_gates: VecDeque<oneshot::Receiver<()>>,
    rendezvous: Option<Arc<Barrier>>,
}

/// MemoryNetworkApi mimics the store: it enforces VLAN uniqueness among
/// enabled SVIs of a VRF and can be told to fail individual reads.
#[derive(Default)]
pub struct MemoryNetworkApi {
    tables: Mutex<Tables>,
    creates: AtomicUsize,
    gated: AtomicUsize,
}

impl MemoryNetworkApi {
    pub fn new(tenants: Vec<Tenant>, vrfs: Vec<Vrf>, svis: Vec<Svi>) -> Self {
        Self {
            tables: Mutex::new(Tables { tenants, vrfs, svis, ..Default::default() }),
            creates: AtomicUsize::new(0),
            gated: AtomicUsize::new(0),
        }
    }

    /// Tenant{1,"acme"}, Vrf{1,1,"red",5001}, Svi{1,1,10,"web"}
    pub fn acme() -> Self {
        Self::new(
            vec![tenant(1, "acme")],
            vec![vrf(1, 1, "red", 5001)],
            vec![svi(1, 1, 10, "web")],
        )
    }

    /// Make reads of `resource` ("tenants", "vrfs" or "svis") fail with a 503
    pub fn fail_reads_of(&self, resource: &'static str) {
        self.tables.lock().unwrap().failing.insert(resource);
    }

    pub fn heal(&self) {
        self.tables.lock().unwrap().failing.clear();
    }

    /// Accept the next create, then fail every read
    pub fn fail_reads_after_create(&self) {
        self.tables.lock().unwrap().fail_reads_after_create = true;
    }

    pub fn push_vrf(&self, vrf: Vrf) {
        self.tables.lock().unwrap().vrfs.push(vrf);
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Hold the next `n` tenant reads, in call order, until the matching
    /// sender fires
    pub fn gate_tenant_reads(&self, n: usize) -> Vec<oneshot::Sender<()>> {
        let mut tables = self.tables.lock().unwrap();
        (0..n)
            .map(|_| {
                let (tx, rx) = oneshot::channel();
                tables.tenant_gates.push_back(rx);
                tx
            })
            .collect()
    }

    /// Number of tenant reads that have reached their gate
    pub fn gated_reads(&self) -> usize {
        self.gated.load(Ordering::SeqCst)
    }

    /// Make every list read wait until `n` reads are in flight together
    pub fn rendezvous_reads(&self, n: usize) {
        self.tables.lock().unwrap().rendezvous = Some(Arc::new(Barrier::new(n)));
    }

    async fn rendezvous(&self) {
        let barrier = self.tables.lock().unwrap().rendezvous.clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
    }

    fn check(&self, resource: &'static str) -> Result<(), FetchError> {
        if self.tables.lock().unwrap().failing.contains(resource) {
            return Err(FetchError::Status {
                resource,
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NetworkApi for MemoryNetworkApi {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, FetchError> {
        let gate = self.tables.lock().unwrap().tenant_gates.pop_front();
        if let Some(gate) = gate {
            self.gated.fetch_add(1, Ordering::SeqCst);
            let _ = gate.await;
        }
        self.rendezvous().await;
        self.check("tenants")?;
        Ok(self.tables.lock().unwrap().tenants.clone())
    }

    async fn list_vrfs(&self, tenant_id: Option<i64>) -> Result<Vec<Vrf>, FetchError> {
        self.rendezvous().await;
        self.check("vrfs")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .vrfs
            .iter()
            .filter(|v| tenant_id.map_or(true, |t| v.tenant_id == t))
            .cloned()
            .collect())
    }

    async fn list_svis(&self, vrf_id: Option<i64>) -> Result<Vec<Svi>, FetchError> {
        self.rendezvous().await;
        self.check("svis")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .svis
            .iter()
            .filter(|s| vrf_id.map_or(true, |v| s.vrf_id == v))
            .cloned()
            .collect())
    }

    async fn create_svi(&self, req: &CreateSviRequest) -> Result<Svi, SubmissionError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();

        if !tables.vrfs.iter().any(|v| v.vrf_id == req.vrf_id) {
            return Err(SubmissionError::Rejected { status: 400, body: "unknown vrf".into() });
        }
        let clash = req.enabled
            && tables
                .svis
                .iter()
                .any(|s| s.enabled && s.vrf_id == req.vrf_id && s.vlan_id == req.vlan_id);
        if clash {
            return Err(SubmissionError::Rejected { status: 409, body: "vlan in use".into() });
        }

        let svi_id = tables.svis.iter().map(|s| s.svi_id).max().unwrap_or(0) + 1;
        let created = Svi {
            svi_id,
            vrf_id: req.vrf_id,
            vlan_id: req.vlan_id,
            name: req.name.clone(),
            enabled: req.enabled,
            ip_address_virtual: req.ip_address_virtual.clone(),
            tags: req.tags.clone(),
        };
        tables.svis.push(created.clone());

        if tables.fail_reads_after_create {
            tables.failing.extend(["tenants", "vrfs", "svis"]);
        }
        Ok(created)
    }
}

pub fn tenant(tenant_id: i64, name: &str) -> Tenant {
    Tenant { tenant_id, name: name.into(), mac_vrf_vni_base: 10000 * tenant_id }
}

pub fn vrf(vrf_id: i64, tenant_id: i64, name: &str, vrf_vni: i64) -> Vrf {
    Vrf { vrf_id, tenant_id, name: name.into(), vrf_vni }
}

pub fn svi(svi_id: i64, vrf_id: i64, vlan_id: i32, name: &str) -> Svi {
    Svi {
        svi_id,
        vrf_id,
        vlan_id,
        name: name.into(),
        enabled: true,
        ip_address_virtual: String::new(),
        tags: vec![],
    }
}
