//! Strongly-typed ID wrappers for the three resources and their owner
//!
//! The remote store keys every row by a plain UUID column; the newtypes
//! exist so an expense id can never be handed to a budget operation. On
//! the wire they are transparent UUIDs. `Display` renders a short
//! prefixed form for log lines; the full UUID comes from [`ExpenseId::as_uuid`]
//! and friends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $short:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        // Short form for logs and status lines; full UUIDs stay on the wire
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = self.0.to_string();
                write!(f, "{}{}", $short, &text[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(UserId, "usr-");
