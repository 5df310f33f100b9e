use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CreateSviRequest;
use crate::topology::Snapshot;
use crate::utils::{is_valid_cidr, is_valid_vlan_id, split_tags, VLAN_ID_MAX, VLAN_ID_MIN};

/// SviDraft holds the SVI form exactly as the operator typed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SviDraft {
    pub vrf_id: String,
    pub vlan_id: String,
    pub name: String,
    pub ip_address_virtual: String,
    /// Comma-separated
    pub tags: String,
    pub enabled: bool,
}

impl Default for SviDraft {
    fn default() -> Self {
        Self {
            vrf_id: String::new(),
            vlan_id: String::new(),
            name: String::new(),
            ip_address_virtual: String::new(),
            tags: String::new(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// Every local rule the draft broke
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid SVI: {}", describe(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    #[cfg(test)]
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SviDraft {
    /// Check the draft against the VRFs in `snapshot` and produce the
    /// request body for the network store.
    pub fn validate(&self, snapshot: &Snapshot) -> Result<CreateSviRequest, ValidationError> {
        let mut issues = Vec::new();
        let mut issue = |field: &'static str, message: String| issues.push(FieldIssue { field, message });

        let vrf_id = match self.vrf_id.trim() {
            "" => {
                issue("vrf_id", "a VRF must be selected".into());
                None
            }
            raw => match raw.parse::<i64>() {
                Ok(id) if snapshot.is_selectable_vrf(id) => Some(id),
                Ok(id) => {
                    issue("vrf_id", format!("VRF {} is not in the current topology", id));
                    None
                }
                Err(_) => {
                    issue("vrf_id", format!("VRF id must be an integer, got {:?}", raw));
                    None
                }
            },
        };

        let vlan_id = match self.vlan_id.trim() {
            "" => {
                issue("vlan_id", "VLAN ID is required".into());
                None
            }
            raw => match raw.parse::<i32>() {
                Ok(id) if is_valid_vlan_id(id) => Some(id),
                Ok(id) => {
                    issue(
                        "vlan_id",
                        format!("VLAN ID {} is outside {}-{}", id, VLAN_ID_MIN, VLAN_ID_MAX),
                    );
                    None
                }
                Err(_) => {
                    issue("vlan_id", format!("VLAN ID must be an integer, got {:?}", raw));
                    None
                }
            },
        };

        let name = self.name.trim();
        if name.is_empty() {
            issue("name", "name is required".into());
        }

        let ip_address_virtual = self.ip_address_virtual.trim();
        if !ip_address_virtual.is_empty() && !is_valid_cidr(ip_address_virtual) {
            issue(
                "ip_address_virtual",
                format!("{:?} is not in CIDR notation (address/prefix)", ip_address_virtual),
            );
        }

        match (vrf_id, vlan_id) {
            (Some(vrf_id), Some(vlan_id)) if issues.is_empty() => Ok(CreateSviRequest {
                vrf_id,
                vlan_id,
                name: name.to_string(),
                ip_address_virtual: ip_address_virtual.to_string(),
                tags: split_tags(&self.tags),
                enabled: self.enabled,
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}
