//! In-memory feature store with single-selection tracking.
//!
//! Holds the current parcel and station collections, an R-tree over station
//! locations, and the selection state machine. The store is an explicit
//! instance meant to be passed to consumers; tests can spin up as many
//! independent stores as they need.
//!
//! All mutation goes through `&mut self`, so a store is single-threaded by
//! construction. Anyone sharing one across threads must wrap it in a mutex
//! or an actor to keep the single-selection invariant.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use rstar::RTree;

use crate::identifiers::*;
use crate::ingest::{parcels_from_elements, stations_from_elements, SourceElement, TagDefaults};
use crate::models::types::*;
use crate::spatial::index::StationNode;
use crate::spatial::queries::{haversine_distance, meters_to_degrees_approx};

type SelectionCallback = Box<dyn Fn(&SelectionChange) + Send + Sync>;

/// Feature store for land parcels and railway stations.
///
/// Invariant: at most one parcel has `selected == true`, and it is always
/// the one named by `selected_id()`.
pub struct FeatureStore {
    defaults: TagDefaults,

    // Core data
    parcels: Vec<Parcel>,
    stations: Vec<Arc<Station>>,

    // Lookup maps
    parcel_index: HashMap<ParcelIdentifier, usize>,
    station_map: HashMap<StationIdentifier, Arc<Station>>,

    // Spatial index
    station_tree: RTree<StationNode>,

    // Selection state
    selected: Option<ParcelIdentifier>,
    observers: Vec<SelectionCallback>,
}

impl FeatureStore {
    /// Create an empty store with the standard tag defaults
    pub fn new() -> Self {
        Self::with_defaults(TagDefaults::default())
    }

    /// Create an empty store with custom tag defaults
    pub fn with_defaults(defaults: TagDefaults) -> Self {
        Self {
            defaults,
            parcels: Vec::new(),
            stations: Vec::new(),
            parcel_index: HashMap::new(),
            station_map: HashMap::new(),
            station_tree: RTree::new(),
            selected: None,
            observers: Vec::new(),
        }
    }

    // ---- Ingestion ----

    /// Replace the parcel collection from raw way elements.
    ///
    /// This is a bulk replace, not a merge. Any active selection is reset to
    /// none without emitting a notification: the old collection is gone, the
    /// parcel was not deselected.
    pub fn replace_parcels(&mut self, elements: Vec<SourceElement>) {
        self.parcels = parcels_from_elements(elements, &self.defaults);
        self.parcel_index = self
            .parcels
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        self.selected = None;
    }

    /// Replace the station collection from raw node elements
    pub fn replace_stations(&mut self, elements: Vec<SourceElement>) {
        self.stations = stations_from_elements(elements, &self.defaults)
            .into_iter()
            .map(Arc::new)
            .collect();
        self.station_map = self
            .stations
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect();
        self.station_tree = RTree::bulk_load(
            self.stations.iter().cloned().map(StationNode::new).collect(),
        );
    }

    // ---- Lookups ----

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    pub fn parcel(&self, id: &ParcelIdentifier) -> Option<&Parcel> {
        self.parcel_index.get(id).map(|&i| &self.parcels[i])
    }

    pub fn station(&self, id: &StationIdentifier) -> Option<Arc<Station>> {
        self.station_map.get(id).cloned()
    }

    /// Case-insensitive substring search over parcel description and owner.
    /// An empty query returns all parcels unfiltered.
    pub fn search(&self, query: &str) -> Vec<&Parcel> {
        if query.is_empty() {
            return self.parcels.iter().collect();
        }

        let query = query.to_lowercase();
        self.parcels
            .iter()
            .filter(|p| {
                p.description.to_lowercase().contains(&query)
                    || p.owner.to_lowercase().contains(&query)
            })
            .collect()
    }

    // ---- Selection state machine ----

    /// Select a parcel, clearing any previous selection first.
    ///
    /// Unknown ids leave the state untouched and return `ParcelNotFound`;
    /// the previous selection, if any, stays active.
    pub fn select(&mut self, id: &ParcelIdentifier) -> Result<Parcel> {
        let index = *self
            .parcel_index
            .get(id)
            .ok_or_else(|| StoreError::ParcelNotFound(id.clone()))?;

        if let Some(previous) = self.selected.take() {
            if let Some(&i) = self.parcel_index.get(&previous) {
                self.parcels[i].selected = false;
            }
        }

        self.parcels[index].selected = true;
        self.selected = Some(id.clone());

        let parcel = self.parcels[index].clone();
        self.notify(&SelectionChange {
            is_selected: true,
            parcel: Some(parcel.clone()),
        });
        Ok(parcel)
    }

    /// Clear the active selection, returning the just-deselected parcel.
    /// A no-op returning `None` when nothing is selected; no notification
    /// is emitted in that case.
    pub fn deselect(&mut self) -> Option<Parcel> {
        let id = self.selected.take()?;
        let index = *self.parcel_index.get(&id)?;

        self.parcels[index].selected = false;
        let parcel = self.parcels[index].clone();

        self.notify(&SelectionChange {
            is_selected: false,
            parcel: None,
        });
        Some(parcel)
    }

    /// Toggle a parcel: deselect it if it is the active selection, otherwise
    /// select it (clearing any other active selection first).
    pub fn toggle(&mut self, id: &ParcelIdentifier) -> Result<SelectionChange> {
        if self.selected.as_ref() == Some(id) {
            let parcel = self.deselect();
            Ok(SelectionChange {
                is_selected: false,
                parcel,
            })
        } else {
            let parcel = self.select(id)?;
            Ok(SelectionChange {
                is_selected: true,
                parcel: Some(parcel),
            })
        }
    }

    pub fn selected_id(&self) -> Option<&ParcelIdentifier> {
        self.selected.as_ref()
    }

    pub fn selected_parcel(&self) -> Option<&Parcel> {
        let id = self.selected.as_ref()?;
        self.parcel(id)
    }

    /// Register a callback invoked on every successful selection transition
    pub fn on_selection_change(&mut self, callback: impl Fn(&SelectionChange) + Send + Sync + 'static) {
        self.observers.push(Box::new(callback));
    }

    fn notify(&self, change: &SelectionChange) {
        for observer in &self.observers {
            observer(change);
        }
    }

    // ---- Spatial queries ----

    /// Find stations within `radius_m` meters of a point.
    ///
    /// Two-stage: Euclidean degree-space prefilter in the R-tree, padded for
    /// longitude shrink at the query latitude, then a Haversine pass.
    pub fn stations_near(&self, point: Point, radius_m: f64) -> Vec<Arc<Station>> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let cos_lat = point.y().to_radians().cos().abs().max(1e-6);
        let radius_deg = meters_to_degrees_approx(radius_m) / cos_lat;

        self.station_tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter(|node| haversine_distance(point, node.station.location) <= radius_m)
            .map(|node| node.station.clone())
            .collect()
    }

    /// Find the station nearest to a point, with its distance in meters.
    ///
    /// The Euclidean nearest in degree space is not always the geodesic
    /// nearest, so a handful of R-tree candidates are refined by Haversine.
    pub fn nearest_station(&self, point: Point) -> Option<(Arc<Station>, f64)> {
        self.station_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(8)
            .map(|node| {
                let dist = haversine_distance(point, node.station.location);
                (node.station.clone(), dist)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}
