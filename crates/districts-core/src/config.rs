// crates/districts-core/src/config.rs
use crate::contacts::ContactColumns;
use crate::error::Result;
use crate::feature::LatLng;
use serde::{Deserialize, Serialize};

pub const FEATURE_SERVICE_URL: &str = "https://services.arcgis.com/GXwOsvnLQI6EDOp7/ArcGIS/rest/services/Minnesota_School_District_Boundaries_Current_Year_View/FeatureServer/0";

pub const CONTACTS_FILE: &str =
    "North School Districts Building & Grounds Directors_ Superintendnts contact info - Sheet1.csv";

/// A raster base layer for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

/// Map and data-source settings. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_layers: Vec<TileLayer>,
    pub feature_service_url: String,
    pub contacts_file: String,
    pub contact_columns: ContactColumns,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(46.7296, -94.6859),
            zoom: 6,
            min_zoom: 8,
            max_zoom: 19,
            tile_layers: vec![
                TileLayer {
                    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                    attribution: "© OpenStreetMap contributors".to_string(),
                    max_zoom: 19,
                },
                TileLayer {
                    url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
                    attribution: "&copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
                        .to_string(),
                    max_zoom: 19,
                },
            ],
            feature_service_url: FEATURE_SERVICE_URL.to_string(),
            contacts_file: CONTACTS_FILE.to_string(),
            contact_columns: ContactColumns::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[cfg(feature = "json")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = crate::loader::common_io::read_text(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// GeoJSON query URL for every feature of the configured layer.
    pub fn feature_query_url(&self) -> String {
        format!(
            "{}/query?where=1%3D1&outFields=*&outSR=4326&f=geojson",
            self.feature_service_url.trim_end_matches('/')
        )
    }

    pub fn is_max_zoom(&self, zoom: u8) -> bool {
        zoom >= self.max_zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = MapConfig::from_json_str(r#"{"maxZoom": 17, "contactColumns": {"delimiter": ";"}}"#)
            .unwrap();
        assert_eq!(cfg.max_zoom, 17);
        assert_eq!(cfg.min_zoom, 8);
        assert_eq!(cfg.contact_columns.delimiter, ';');
        assert_eq!(cfg.contact_columns.district, "School District");
    }

    #[test]
    fn query_url_targets_geojson() {
        let cfg = MapConfig {
            feature_service_url: "https://example.org/FeatureServer/0/".into(),
            ..MapConfig::default()
        };
        assert_eq!(
            cfg.feature_query_url(),
            "https://example.org/FeatureServer/0/query?where=1%3D1&outFields=*&outSR=4326&f=geojson"
        );
    }
}
