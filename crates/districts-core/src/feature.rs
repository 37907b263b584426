// crates/districts-core/src/feature.rs

//! District polygons as delivered by the boundary feature service.

use crate::error::{DistrictError, Result};
use crate::text::clean_display_name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::io::Read;

/// Property keys tried, in order, for the district identifier.
pub const ID_KEYS: [&str; 3] = ["SDORGID", "DISTRICT_ID", "ID"];
/// Property keys tried, in order, for the district display name.
pub const NAME_KEYS: [&str; 3] = ["PREFNAME", "SHORTNAME", "NAME"];

pub const UNKNOWN_ID: &str = "N/A";
pub const UNKNOWN_NAME: &str = "Unknown District";

/// Stable identifier of a district, taken from the feature's property bag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(pub String);

impl DistrictId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DistrictId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.west = self.west.min(p.lng);
        self.north = self.north.max(p.lat);
        self.east = self.east.max(p.lng);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// Polygon geometry. Rings hold `[lng, lat]` positions as in GeoJSON; the
/// first ring of each polygon is the outer boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl Geometry {
    /// Outer rings of every polygon part.
    pub fn outer_rings(&self) -> Vec<&[[f64; 2]]> {
        match self {
            Geometry::Polygon(rings) => rings.first().map(Vec::as_slice).into_iter().collect(),
            Geometry::MultiPolygon(parts) => parts
                .iter()
                .filter_map(|rings| rings.first().map(Vec::as_slice))
                .collect(),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut out: Option<Bounds> = None;
        for ring in self.outer_rings() {
            for &[lng, lat] in ring {
                let p = LatLng::new(lat, lng);
                match out.as_mut() {
                    Some(b) => b.extend(p),
                    None => out = Some(Bounds::from_point(p)),
                }
            }
        }
        out
    }
}

/// One district polygon with its property bag. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictFeature {
    pub id: DistrictId,
    /// Raw display name, before cleaning.
    pub name: String,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

impl DistrictFeature {
    /// Build a feature from its property bag, resolving identifier and name
    /// through their fallback chains.
    pub fn from_properties(properties: Map<String, Value>, geometry: Geometry) -> Self {
        let id = first_present(&properties, &ID_KEYS).unwrap_or_else(|| UNKNOWN_ID.to_string());
        let name =
            first_present(&properties, &NAME_KEYS).unwrap_or_else(|| UNKNOWN_NAME.to_string());
        Self {
            id: DistrictId(id),
            name,
            geometry,
            properties,
        }
    }

    /// Cleaned name used for labels, the form and the search list.
    pub fn display_name(&self) -> String {
        clean_display_name(&self.name)
    }

    /// Label text. Features without any name property are labelled
    /// `District` rather than `Unknown District`.
    pub fn label_text(&self) -> String {
        match first_present(&self.properties, &NAME_KEYS[..2]) {
            Some(name) => clean_display_name(&name),
            None => "District".to_string(),
        }
    }

    /// A property as display text. Numbers and booleans are stringified;
    /// nulls, arrays and objects count as absent.
    pub fn property(&self, key: &str) -> Option<String> {
        property_text(self.properties.get(key)?)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounds()
    }

    /// Where labels and membership markers are placed: the center of the
    /// feature's bounding box.
    pub fn anchor(&self) -> Option<LatLng> {
        self.bounds().map(|b| b.center())
    }
}

fn property_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Integral floats print without a fraction (`706.0` -> `706`), the way the
/// feature service's own clients render them.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn first_present(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| properties.get(*k).and_then(property_text))
}

/// All district features of the session, in service order.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: Vec<DistrictFeature>,
    index: HashMap<DistrictId, usize>,
}

impl FeatureSet {
    /// Keep every feature and index them by identifier. When several
    /// features share an identifier (all the id-less ones share `N/A`), the
    /// first of them answers [`FeatureSet::get`]; the rest are still drawn
    /// and searchable.
    pub fn new(features: Vec<DistrictFeature>) -> Self {
        let mut index = HashMap::with_capacity(features.len());
        for (i, f) in features.iter().enumerate() {
            if index.contains_key(&f.id) {
                tracing::warn!(id = %f.id, "duplicate district identifier; lookups use the first feature");
                continue;
            }
            index.insert(f.id.clone(), i);
        }
        Self { features, index }
    }

    /// Parse a GeoJSON `FeatureCollection`. Features without geometry or with
    /// a non-polygonal geometry are skipped.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_geojson_value(value)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self> {
        let raw: RawCollection = serde_json::from_value(value)?;
        if raw.kind != "FeatureCollection" {
            return Err(DistrictError::InvalidData(format!(
                "expected a FeatureCollection, got {}",
                raw.kind
            )));
        }

        let mut features = Vec::with_capacity(raw.features.len());
        for (n, feature) in raw.features.into_iter().enumerate() {
            let properties = feature.properties.unwrap_or_default();
            let Some(geometry) = feature.geometry else {
                tracing::warn!(feature = n, "skipping feature without geometry");
                continue;
            };
            match serde_json::from_value::<Geometry>(geometry) {
                Ok(geometry) => features.push(DistrictFeature::from_properties(properties, geometry)),
                Err(e) => tracing::warn!(feature = n, error = %e, "skipping non-polygon feature"),
            }
        }
        Ok(Self::new(features))
    }

    pub fn get(&self, id: &DistrictId) -> Option<&DistrictFeature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistrictFeature> {
        self.features.iter()
    }

    /// First feature whose cleaned display name equals `name` exactly.
    pub fn find_by_display_name(&self, name: &str) -> Option<&DistrictFeature> {
        self.features.iter().find(|f| f.display_name() == name)
    }

    /// Union of all feature bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.features
            .iter()
            .filter_map(DistrictFeature::bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Value>,
}
