use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of a parcel. parcel numbers are not always numeric (APNs often
/// carry dashes or letters), so they are kept as strings.
#[derive(
    Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ParcelId(pub String);

impl Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParcelId {
    fn from(value: &str) -> Self {
        ParcelId(value.to_string())
    }
}

impl From<String> for ParcelId {
    fn from(value: String) -> Self {
        ParcelId(value)
    }
}
