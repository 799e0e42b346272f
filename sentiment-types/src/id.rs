//! Typed ID wrappers for beings, subjects, sentiment types, peers and protocols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed ID wrappers prevent mixing up a being with a subject, or a peer
/// with a protocol. These are just strings underneath; format rules that
/// matter (no `:` inside key components) are enforced by
/// [`AllocationKey`](crate::key::AllocationKey), not here.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new typed ID from anything that converts to String.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(BeingId, "Identifier of a being, the principal that owns a budget.");
typed_id!(SubjectId, "Identifier of a subject receiving a share of a budget.");
typed_id!(
    SentimentType,
    "Named allocation dimension such as `priority`. Budgets are scoped per (being, type)."
);
typed_id!(PeerId, "Identity of a peer on the transport.");
typed_id!(
    ProtocolId,
    "Versioned protocol identifier used to route streams, e.g. `/root-solar/sentiment/1.0.0`."
);
