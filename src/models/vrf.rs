use serde::{Deserialize, Serialize};

/// Vrf is a routing domain owned by a tenant and identified on the
/// overlay by its VNI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vrf {
    pub vrf_id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub vrf_vni: i64,
}
