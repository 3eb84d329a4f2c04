//! Correlation identifiers for AI traffic.
//!
//! Questions carry small per-batch integer ids; these ULID-backed ids only
//! tie log lines for one gateway round trip together, so they are never
//! persisted and never parsed back.

use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a fresh id.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Identifies one dispatch from the client to the gateway.
    GatewayRequestId,
    "gwreq"
);

define_id!(
    /// Identifies one call from the gateway to the model provider.
    LlmInvocationId,
    "llm"
);
