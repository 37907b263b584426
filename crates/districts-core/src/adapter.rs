// crates/districts-core/src/adapter.rs

//! Keeps the layers on a [`MapSurface`] in step with the session's data.

use crate::edit::{DistrictEdit, Masms};
use crate::feature::{Bounds, DistrictId, FeatureSet, LatLng};
use crate::store::RecordStore;
use crate::surface::{CircleStyle, LayerId, MapSurface, PolygonStyle};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DistrictLayers {
    polygon: LayerId,
    label: Option<LayerId>,
    anchor: Option<LatLng>,
}

/// The two layers of a membership marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub glow: LayerId,
    pub dot: LayerId,
}

/// Layer bookkeeping for every drawn district.
///
/// Features that share an identifier each keep their own polygon and label;
/// the edit of that identifier styles all of them, and its marker sits at
/// the anchor of the first one.
///
/// Invariant: at most one [`MarkerPair`] per district. [`MapAdapter::sync_marker`]
/// removes both layers of an existing pair before it adds a new one.
#[derive(Debug, Default)]
pub struct MapAdapter {
    districts: HashMap<DistrictId, Vec<DistrictLayers>>,
    markers: HashMap<DistrictId, MarkerPair>,
    home: Option<Bounds>,
    at_max_zoom: bool,
    visible: bool,
}

impl MapAdapter {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// Draw every feature: polygon, label and (for members) marker.
    ///
    /// Calling this again with a newer feature set replaces all district
    /// layers. The viewport is fitted only the first time features arrive.
    pub fn draw_features<S: MapSurface>(
        &mut self,
        surface: &mut S,
        features: &FeatureSet,
        store: &RecordStore,
    ) {
        self.clear(surface);

        for feature in features.iter() {
            let edit = store.get(&feature.id);
            let style = self.style_for(edit);
            let polygon = surface.draw_polygon(&feature.id, &feature.geometry, &style);
            let anchor = feature.anchor();
            let label = anchor.map(|at| surface.draw_label(at, &feature.label_text()));
            let drawn = self.districts.entry(feature.id.clone()).or_default();
            drawn.push(DistrictLayers {
                polygon,
                label,
                anchor,
            });
            if drawn.len() > 1 {
                tracing::debug!(id = %feature.id, "district identifier shared by several features");
                continue;
            }
            if let Some(edit) = edit {
                self.sync_marker(surface, &feature.id, edit.masms);
            }
        }

        if let Some(bounds) = features.bounds() {
            if self.home.is_none() {
                surface.fit_bounds(bounds);
            }
            self.home = Some(bounds);
        }
        tracing::info!(districts = self.districts.len(), markers = self.markers.len(), "drew district layers");
    }

    fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        for (_, pair) in self.markers.drain() {
            surface.remove_layer(pair.glow);
            surface.remove_layer(pair.dot);
        }
        for layers in self.districts.drain().flat_map(|(_, drawn)| drawn) {
            surface.remove_layer(layers.polygon);
            if let Some(label) = layers.label {
                surface.remove_layer(label);
            }
        }
    }

    fn style_for(&self, edit: Option<&DistrictEdit>) -> PolygonStyle {
        PolygonStyle::for_district(edit.and_then(|e| e.color), self.at_max_zoom)
    }

    /// Reflect a freshly saved edit: restyle the polygon and add, replace or
    /// remove the membership marker.
    pub fn apply_edit<S: MapSurface>(&mut self, surface: &mut S, id: &DistrictId, edit: &DistrictEdit) {
        let style = self.style_for(Some(edit));
        for layers in self.layers_of(id) {
            surface.set_polygon_style(layers.polygon, &style);
        }
        self.sync_marker(surface, id, edit.masms);
    }

    /// Make the marker state of `id` match `masms`.
    pub fn sync_marker<S: MapSurface>(&mut self, surface: &mut S, id: &DistrictId, masms: Masms) {
        if let Some(pair) = self.markers.remove(id) {
            surface.remove_layer(pair.glow);
            surface.remove_layer(pair.dot);
            tracing::debug!(%id, "removed membership marker");
        }
        if !masms.is_member() {
            return;
        }
        let Some(at) = self.anchor(id) else {
            return;
        };
        let glow = surface.draw_circle_marker(at, &CircleStyle::member_glow());
        let dot = surface.draw_circle_marker(at, &CircleStyle::member_dot());
        self.markers.insert(id.clone(), MarkerPair { glow, dot });
        tracing::debug!(%id, "added membership marker");
    }

    /// Re-derive every polygon fill after a zoom change. Stored colors are
    /// read, never written.
    pub fn zoom_changed<S: MapSurface>(&mut self, surface: &mut S, at_max_zoom: bool, store: &RecordStore) {
        self.at_max_zoom = at_max_zoom;
        for (id, drawn) in &self.districts {
            let style = self.style_for(store.get(id));
            for layers in drawn {
                surface.set_polygon_style(layers.polygon, &style);
            }
        }
    }

    pub fn hover_in<S: MapSurface>(&self, surface: &mut S, id: &DistrictId, store: &RecordStore) {
        let style = self.style_for(store.get(id));
        for layers in self.layers_of(id) {
            surface.set_polygon_style(layers.polygon, &style);
            surface.bring_to_front(layers.polygon);
        }
    }

    pub fn hover_out<S: MapSurface>(&self, surface: &mut S, id: &DistrictId, store: &RecordStore) {
        let style = self.style_for(store.get(id));
        for layers in self.layers_of(id) {
            surface.set_polygon_style(layers.polygon, &style);
        }
    }

    fn layers_of(&self, id: &DistrictId) -> &[DistrictLayers] {
        self.districts.get(id).map_or(&[], Vec::as_slice)
    }

    /// Fit the viewport to all districts again. No-op before features load.
    pub fn reset_view<S: MapSurface>(&self, surface: &mut S) {
        if let Some(bounds) = self.home {
            surface.fit_bounds(bounds);
        }
    }

    /// Hide or show the district polygons; returns the new visibility.
    /// No-op before features load.
    pub fn toggle_visible<S: MapSurface>(&mut self, surface: &mut S) -> bool {
        if self.districts.is_empty() {
            return self.visible;
        }
        self.visible = !self.visible;
        surface.set_polygons_visible(self.visible);
        self.visible
    }

    pub fn marker(&self, id: &DistrictId) -> Option<MarkerPair> {
        self.markers.get(id).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Marker position of `id`: the anchor of its first drawn feature.
    pub fn anchor(&self, id: &DistrictId) -> Option<LatLng> {
        self.layers_of(id).first().and_then(|l| l.anchor)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::DistrictColor;
    use crate::feature::{DistrictFeature, Geometry};
    use crate::surface::HeadlessSurface;
    use serde_json::{json, Map, Value};

    fn features() -> FeatureSet {
        let square = |x: f64| {
            Geometry::Polygon(vec![vec![[x, 45.0], [x + 1.0, 45.0], [x + 1.0, 46.0], [x, 45.0]]])
        };
        let props = |v: Value| -> Map<String, Value> { v.as_object().cloned().unwrap() };
        FeatureSet::new(vec![
            DistrictFeature::from_properties(props(json!({"SDORGID": "a", "PREFNAME": "Alpha"})), square(-94.0)),
            DistrictFeature::from_properties(props(json!({"SDORGID": "b", "PREFNAME": "Beta"})), square(-92.0)),
        ])
    }

    fn member(color: Option<DistrictColor>) -> DistrictEdit {
        DistrictEdit {
            masms: Masms::Yes,
            color,
            ..Default::default()
        }
    }

    #[test]
    fn draws_polygons_labels_and_stored_markers() {
        let mut store = RecordStore::new();
        store.put(DistrictId::from("b"), member(Some(DistrictColor::Green)));

        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        adapter.draw_features(&mut surface, &features(), &store);

        assert_eq!(surface.polygon_count(), 2);
        assert_eq!(surface.labels(), vec!["Alpha", "Beta"]);
        assert_eq!(surface.circle_count(), 2);
        assert!(adapter.marker(&DistrictId::from("b")).is_some());
        assert!(surface.polygon_style(&DistrictId::from("b")).unwrap().is_filled());
        assert_eq!(surface.fit_count(), 1);
    }

    #[test]
    fn resync_never_leaves_two_pairs() {
        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        adapter.draw_features(&mut surface, &features(), &RecordStore::new());

        let id = DistrictId::from("a");
        adapter.apply_edit(&mut surface, &id, &member(None));
        adapter.apply_edit(&mut surface, &id, &member(None));
        assert_eq!(surface.circle_count(), 2);
        assert_eq!(adapter.marker_count(), 1);

        adapter.apply_edit(&mut surface, &id, &DistrictEdit::default());
        assert_eq!(surface.circle_count(), 0);
        assert_eq!(adapter.marker_count(), 0);
    }

    #[test]
    fn redraw_replaces_layers_without_refitting() {
        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        let store = RecordStore::new();
        adapter.draw_features(&mut surface, &features(), &store);
        adapter.draw_features(&mut surface, &features(), &store);
        assert_eq!(surface.polygon_count(), 2);
        assert_eq!(surface.labels().len(), 2);
        assert_eq!(surface.fit_count(), 1);
    }

    #[test]
    fn max_zoom_suppresses_fill_and_restores_it() {
        let mut store = RecordStore::new();
        let id = DistrictId::from("a");
        store.put(id.clone(), DistrictEdit { color: Some(DistrictColor::Red), ..Default::default() });

        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        adapter.draw_features(&mut surface, &features(), &store);

        adapter.zoom_changed(&mut surface, true, &store);
        assert!(!surface.polygon_style(&id).unwrap().is_filled());
        assert_eq!(store.get(&id).unwrap().color, Some(DistrictColor::Red));

        adapter.zoom_changed(&mut surface, false, &store);
        assert!(surface.polygon_style(&id).unwrap().is_filled());
    }

    #[test]
    fn hover_brings_polygon_to_front() {
        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        let store = RecordStore::new();
        adapter.draw_features(&mut surface, &features(), &store);
        let first = surface.front_polygon();

        adapter.hover_in(&mut surface, &DistrictId::from("a"), &store);
        assert_ne!(surface.front_polygon(), first);
    }

    #[test]
    fn toggle_and_reset_need_features() {
        let mut surface = HeadlessSurface::new();
        let mut adapter = MapAdapter::new();
        assert!(adapter.toggle_visible(&mut surface));
        adapter.reset_view(&mut surface);
        assert_eq!(surface.fit_count(), 0);

        adapter.draw_features(&mut surface, &features(), &RecordStore::new());
        assert!(!adapter.toggle_visible(&mut surface));
        assert!(!surface.polygons_visible());
        adapter.reset_view(&mut surface);
        assert_eq!(surface.fit_count(), 2);
    }
}
