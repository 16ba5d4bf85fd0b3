//! Integer identifiers for network entities.
//!
//! Every entity in the dataset is keyed by a small non-negative integer.
//! Wrapping each kind in its own newtype keeps station ids from being
//! passed where a cluster id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! impl_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw dataset identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

impl_identifier!(
    /// A platform-level station node. One real-world station usually has
    /// one of these per line that serves it.
    StationId
);
impl_identifier!(
    /// A real-world station: the group of station nodes sharing a name
    /// and location.
    ClusterId
);
impl_identifier!(
    /// A transit line.
    LineId
);
impl_identifier!(
    /// An administrative region (prefecture) code.
    RegionCode
);
