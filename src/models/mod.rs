mod svi;
mod tenant;
mod vrf;

pub use svi::{CreateSviRequest, Svi};
pub use tenant::Tenant;
pub use vrf::Vrf;

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
