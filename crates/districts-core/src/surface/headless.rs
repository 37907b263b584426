// crates/districts-core/src/surface/headless.rs
use super::{CircleStyle, LayerId, MapSurface, PolygonStyle};
use crate::feature::{Bounds, DistrictId, Geometry, LatLng};
use serde::Serialize;
use std::collections::BTreeMap;

/// A layer as recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadlessLayer {
    Polygon {
        district: DistrictId,
        style: PolygonStyle,
    },
    Label {
        at: LatLng,
        text: String,
    },
    Circle {
        at: LatLng,
        style: CircleStyle,
    },
}

/// In-memory surface that records what would be on screen.
///
/// Used by the CLI to replay sessions without a browser, and by tests.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessSurface {
    layers: BTreeMap<LayerId, HeadlessLayer>,
    /// Polygon layers, back to front.
    z_order: Vec<LayerId>,
    viewport: Option<Bounds>,
    fit_count: usize,
    polygons_visible: bool,
    #[serde(skip)]
    next_id: u64,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            layers: BTreeMap::new(),
            z_order: Vec::new(),
            viewport: None,
            fit_count: 0,
            polygons_visible: true,
            next_id: 1,
        }
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, layer: HeadlessLayer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &HeadlessLayer)> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Current style of the polygon drawn for `district`.
    pub fn polygon_style(&self, district: &DistrictId) -> Option<&PolygonStyle> {
        self.layers.values().find_map(|layer| match layer {
            HeadlessLayer::Polygon { district: d, style } if d == district => Some(style),
            _ => None,
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, HeadlessLayer::Polygon { .. }))
            .count()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.layers
            .values()
            .filter_map(|l| match l {
                HeadlessLayer::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Circle markers placed at `at`.
    pub fn circles_at(&self, at: LatLng) -> Vec<&CircleStyle> {
        self.layers
            .values()
            .filter_map(|l| match l {
                HeadlessLayer::Circle { at: p, style } if *p == at => Some(style),
                _ => None,
            })
            .collect()
    }

    pub fn circle_count(&self) -> usize {
        self.layers
            .values()
            .filter(|l| matches!(l, HeadlessLayer::Circle { .. }))
            .count()
    }

    /// Polygon layer drawn last (top-most).
    pub fn front_polygon(&self) -> Option<LayerId> {
        self.z_order.last().copied()
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    pub fn fit_count(&self) -> usize {
        self.fit_count
    }

    pub fn polygons_visible(&self) -> bool {
        self.polygons_visible
    }
}

impl MapSurface for HeadlessSurface {
    fn draw_polygon(
        &mut self,
        district: &DistrictId,
        _geometry: &Geometry,
        style: &PolygonStyle,
    ) -> LayerId {
        let id = self.add(HeadlessLayer::Polygon {
            district: district.clone(),
            style: style.clone(),
        });
        self.z_order.push(id);
        id
    }

    fn set_polygon_style(&mut self, layer: LayerId, style: &PolygonStyle) {
        if let Some(HeadlessLayer::Polygon { style: current, .. }) = self.layers.get_mut(&layer) {
            *current = style.clone();
        }
    }

    fn bring_to_front(&mut self, layer: LayerId) {
        if let Some(pos) = self.z_order.iter().position(|l| *l == layer) {
            let id = self.z_order.remove(pos);
            self.z_order.push(id);
        }
    }

    fn draw_label(&mut self, at: LatLng, text: &str) -> LayerId {
        self.add(HeadlessLayer::Label {
            at,
            text: text.to_string(),
        })
    }

    fn draw_circle_marker(&mut self, at: LatLng, style: &CircleStyle) -> LayerId {
        self.add(HeadlessLayer::Circle {
            at,
            style: style.clone(),
        })
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
        self.z_order.retain(|l| *l != layer);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
        self.fit_count += 1;
    }

    fn set_polygons_visible(&mut self, visible: bool) {
        self.polygons_visible = visible;
    }
}
