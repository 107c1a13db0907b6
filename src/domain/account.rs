use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account or contract address on the simulated chain. The nil UUID is the
/// zero-address sentinel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Address(pub Uuid);

impl Address {
    pub fn zero() -> Self { Self(Uuid::nil()) }
    pub fn random() -> Self { Self(Uuid::new_v4()) }
    pub fn is_zero(&self) -> bool { self.0.is_nil() }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

impl std::str::FromStr for Address {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Uuid::parse_str(s).map(Address) }
}
