use serde::{Deserialize, Serialize};

/// Singleton unit-limit policy; invariant `min_units < max_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub min_units: u32,
    pub max_units: u32,
}

impl Default for UnitConfig {
    /// Fallback used when the backend has no stored policy yet.
    fn default() -> Self {
        Self {
            min_units: 12,
            max_units: 20,
        }
    }
}
