use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Svi is a routed, VLAN-bound gateway interface inside a VRF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Svi {
    pub svi_id: i64,
    pub vrf_id: i64,
    pub vlan_id: i32,
    pub name: String,
    #[serde(default = "default_svi_enabled")]
    pub enabled: bool,
    /// Virtual gateway address in CIDR notation, empty when unset
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address_virtual: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// CreateSviRequest is the body POSTed to the network store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSviRequest {
    pub vrf_id: i64,
    pub vlan_id: i32,
    pub name: String,
    pub ip_address_virtual: String,
    pub tags: Vec<String>,
    pub enabled: bool,
}

fn default_svi_enabled() -> bool { true }
