//! # landbank-isochrone
//!
//! Public-transport accessibility scoring from travel-time isochrones:
//! a Mapbox Isochrone API client, a planar area scorer compressing the
//! reachable area into a bounded 1-100 score, and a last-writer-wins
//! session guard for superseded requests.

pub mod client;
pub mod score;
pub mod session;

pub use client::{IsochroneClient, IsochroneError, Result, DEFAULT_CONTOUR_MINUTES};
pub use score::accessibility_score;
pub use session::{RequestToken, ScoreSession};
