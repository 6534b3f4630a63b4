pub mod entity;
pub mod opportunity;
pub mod stats;

use serde::{Deserialize, Deserializer};

/// Backend payloads send `null` where a field has no data; treat that like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
