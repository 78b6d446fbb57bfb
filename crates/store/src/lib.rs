//! # landbank-store
//!
//! In-memory geospatial feature store for vacant-land surveying.
//!
//! ## Features
//!
//! - **Typed ingestion**: raw way/node geodata elements normalized into
//!   parcels and stations, with permissive defaults for missing tags
//! - **Spherical areas**: parcel areas measured on the sphere, not a plane
//! - **Single selection**: a small state machine guaranteeing at most one
//!   selected parcel, with observer notifications on every transition
//! - **Spatial queries**: R-tree backed station lookups
//!
//! ## Example
//!
//! ```
//! use landbank_store::prelude::*;
//! use geo::Coord;
//!
//! let mut store = FeatureStore::new();
//! store.replace_parcels(vec![SourceElement::Way {
//!     id: Some(42),
//!     geometry: vec![
//!         Coord { x: -4.250, y: 55.860 },
//!         Coord { x: -4.250, y: 55.861 },
//!         Coord { x: -4.249, y: 55.861 },
//!         Coord { x: -4.249, y: 55.860 },
//!     ],
//!     tags: Default::default(),
//! }]);
//!
//! let change = store.toggle(&"42".into()).unwrap();
//! assert!(change.is_selected);
//! assert!(store.selected_parcel().unwrap().area_m2 > 0.0);
//! ```

pub mod geometry;
pub mod identifiers;
pub mod ingest;
pub mod models;
pub mod spatial;
pub mod store;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::ingest::{SourceElement, TagDefaults, Tags};
    pub use crate::models::types::*;
    pub use crate::store::FeatureStore;
}

pub use prelude::*;
