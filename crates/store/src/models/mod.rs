//! Land feature models and types.

pub mod types;

// Re-exports for convenience
pub use types::{Parcel, Result, SelectionChange, Station, StationKind, StoreError};
