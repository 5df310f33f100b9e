use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub tenant_id: i64,
    pub name: String,
    /// Base VNI of the tenant's MAC-VRF namespace
    pub mac_vrf_vni_base: i64,
}
