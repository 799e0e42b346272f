//! Ledger configuration.

use serde::{Deserialize, Serialize};

/// Static configuration for an [`AllocationLedger`](crate::AllocationLedger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Serialize upserts and removes per (being, type) so the ceiling check
    /// and the write cannot interleave with another writer on this ledger.
    pub serialize_writes: bool,
    /// Create a missing being on first allocation instead of failing with
    /// `UnknownBeing`.
    pub auto_provision_beings: bool,
    /// Name given to auto-provisioned beings.
    pub placeholder_being_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            serialize_writes: true,
            auto_provision_beings: true,
            placeholder_being_name: "Unnamed being".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Set whether writers are serialized per (being, type).
    pub fn with_serialize_writes(mut self, on: bool) -> Self {
        self.serialize_writes = on;
        self
    }

    /// Set whether missing beings are created on first allocation.
    pub fn with_auto_provision_beings(mut self, on: bool) -> Self {
        self.auto_provision_beings = on;
        self
    }

    /// Set the name given to auto-provisioned beings.
    pub fn with_placeholder_being_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_being_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LedgerConfig =
            serde_json::from_str(r#"{"auto_provision_beings": false}"#).unwrap();
        assert!(!config.auto_provision_beings);
        assert!(config.serialize_writes);
        assert_eq!(config.placeholder_being_name, "Unnamed being");
    }
}
