//! # landbank-overpass
//!
//! Overpass API client for the land survey: bounding-box queries for
//! vacant/disused land ways and railway station nodes, decoded into the
//! store's `SourceElement` ingestion shape.

pub mod client;
pub mod dto;
pub mod query;

pub use client::{OverpassClient, OverpassError, Result, DEFAULT_ENDPOINT};
pub use query::BoundingBox;
