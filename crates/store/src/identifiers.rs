//! Type-safe, efficient identifiers for land features.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.
//! Parcel identifiers come from the source element id when present, or a
//! positional synthetic id (`land-<index>`) otherwise — synthetic ids are not
//! stable across re-fetches.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(ParcelIdentifier);
impl_identifier!(StationIdentifier);

impl ParcelIdentifier {
    /// Synthetic fallback id for source elements without one.
    pub fn synthetic(index: usize) -> Self {
        Self::new(format!("land-{index}"))
    }
}

impl StationIdentifier {
    /// Synthetic fallback id for source elements without one.
    pub fn synthetic(index: usize) -> Self {
        Self::new(format!("station-{index}"))
    }
}
