// crates/districts-core/src/surface/mod.rs

//! # Rendering Surface
//!
//! The map widget is an external collaborator. Everything the session needs
//! from it fits in [`MapSurface`]: draw and restyle polygons, draw labels and
//! circle markers, remove layers, fit the viewport. Input flows the other
//! way as [`SurfaceEvent`]s handed to [`crate::session::Session::dispatch`].

pub mod headless;

use crate::edit::DistrictColor;
use crate::feature::{Bounds, DistrictId, Geometry, LatLng};
use crate::keys::KeyPress;
use serde::{Deserialize, Serialize};

pub use headless::HeadlessSurface;

/// Opaque handle of a layer drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

/// Polygon paint. Field names follow the usual web-map option names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

pub const OUTLINE_COLOR: &str = "#000";
pub const OUTLINE_WEIGHT: f64 = 2.0;
pub const TAGGED_FILL_OPACITY: f64 = 0.5;
pub const TRANSPARENT: &str = "transparent";

impl PolygonStyle {
    /// Style for a district tagged with `color`. At maximum zoom the fill is
    /// always suppressed so the base map stays readable.
    pub fn for_district(color: Option<DistrictColor>, at_max_zoom: bool) -> Self {
        let (fill_color, fill_opacity) = match color {
            Some(c) if !at_max_zoom => (c.hex(), TAGGED_FILL_OPACITY),
            Some(c) => (c.hex(), 0.0),
            None => (TRANSPARENT, 0.0),
        };
        Self {
            color: OUTLINE_COLOR.to_string(),
            weight: OUTLINE_WEIGHT,
            fill_color: fill_color.to_string(),
            fill_opacity,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.fill_opacity > 0.0
    }
}

/// Circle marker paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleStyle {
    pub radius: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

pub const MEMBER_TOOLTIP: &str = "MASMS Member";

impl CircleStyle {
    /// Soft outer halo of a membership marker.
    pub fn member_glow() -> Self {
        Self {
            radius: 13.0,
            color: "rgba(255,255,255,0.5)".to_string(),
            fill_color: "rgba(255,255,255,0.3)".to_string(),
            fill_opacity: 0.7,
            weight: 0.0,
            tooltip: None,
        }
    }

    /// Solid inner dot of a membership marker.
    pub fn member_dot() -> Self {
        Self {
            radius: 10.0,
            color: "#fff".to_string(),
            fill_color: "#00fff7".to_string(),
            fill_opacity: 1.0,
            weight: 4.0,
            tooltip: Some(MEMBER_TOOLTIP.to_string()),
        }
    }
}

/// Drawing capability of the map widget.
pub trait MapSurface {
    /// Draw an interactive district polygon. Clicks and hovers on it must be
    /// reported back as [`SurfaceEvent`]s carrying `district`.
    fn draw_polygon(
        &mut self,
        district: &DistrictId,
        geometry: &Geometry,
        style: &PolygonStyle,
    ) -> LayerId;

    fn set_polygon_style(&mut self, layer: LayerId, style: &PolygonStyle);

    fn bring_to_front(&mut self, layer: LayerId);

    /// Draw a non-interactive text label centered on `at`.
    fn draw_label(&mut self, at: LatLng, text: &str) -> LayerId;

    fn draw_circle_marker(&mut self, at: LatLng, style: &CircleStyle) -> LayerId;

    fn remove_layer(&mut self, layer: LayerId);

    fn fit_bounds(&mut self, bounds: Bounds);

    /// Show or hide every district polygon at once.
    fn set_polygons_visible(&mut self, visible: bool);
}

/// Input from the map widget and the page around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Click { district: DistrictId },
    HoverIn { district: DistrictId },
    HoverOut { district: DistrictId },
    ZoomEnd { zoom: u8 },
    Key(KeyPress),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_style_follows_color_and_zoom() {
        let plain = PolygonStyle::for_district(None, false);
        assert_eq!(plain.fill_color, TRANSPARENT);
        assert!(!plain.is_filled());

        let red = PolygonStyle::for_district(Some(DistrictColor::Red), false);
        assert_eq!(red.fill_color, "#e74c3c");
        assert_eq!(red.fill_opacity, TAGGED_FILL_OPACITY);

        let red_max = PolygonStyle::for_district(Some(DistrictColor::Red), true);
        assert!(!red_max.is_filled());
        assert_eq!(red_max.color, OUTLINE_COLOR);
    }

    #[test]
    fn events_round_trip_through_json() {
        let event: SurfaceEvent =
            serde_json::from_str(r#"{"event":"click","district":"0709-01"}"#).unwrap();
        assert_eq!(event, SurfaceEvent::Click { district: DistrictId::from("0709-01") });
    }
}
