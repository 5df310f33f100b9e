use ipnetwork::IpNetwork;

/// Lowest usable 802.1Q VLAN ID
pub const VLAN_ID_MIN: i32 = 1;
/// Highest usable 802.1Q VLAN ID (4095 is reserved)
pub const VLAN_ID_MAX: i32 = 4094;

/// Normalize a tag list: trim each entry, drop empties, collapse duplicates.
/// Order of first appearance is preserved.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Split a comma-separated tag string into a normalized tag list
/// e.g., "a, a ,b,,  " -> ["a", "b"]
pub fn split_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Check a VLAN ID against the usable 1-4094 range.
pub fn is_valid_vlan_id(vlan_id: i32) -> bool {
    (VLAN_ID_MIN..=VLAN_ID_MAX).contains(&vlan_id)
}

/// Validate a CIDR string (e.g., "10.0.0.1/24" or "fd00::1/64").
/// Host bits may be set since this is a gateway address, but the prefix
/// length is mandatory.
pub fn is_valid_cidr(cidr: &str) -> bool {
    let Some((addr, prefix)) = cidr.split_once('/') else {
        return false;
    };
    if addr.is_empty() || prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    cidr.parse::<IpNetwork>().is_ok()
}
