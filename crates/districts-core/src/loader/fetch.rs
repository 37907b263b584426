// crates/districts-core/src/loader/fetch.rs

//! Blocking downloads of the district layer and the contact export.

use crate::config::MapConfig;
use crate::contacts::{ContactBook, ContactColumns};
use crate::error::{DistrictError, Result};
use crate::feature::FeatureSet;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(60);

fn get_text(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(DistrictError::NotFound(format!(
            "{url} returned {}",
            response.status()
        )));
    }
    Ok(response.text()?)
}

/// Query every feature of the configured layer as GeoJSON.
pub fn fetch_features(config: &MapConfig) -> Result<FeatureSet> {
    let url = config.feature_query_url();
    tracing::info!(%url, "fetching district features");
    let set = FeatureSet::from_geojson_str(&get_text(&url)?)?;
    tracing::info!(features = set.len(), "fetched district features");
    Ok(set)
}

/// Download a contact spreadsheet export.
pub fn fetch_contacts(url: &str, columns: &ContactColumns) -> Result<ContactBook> {
    tracing::info!(%url, "fetching contact file");
    let text = get_text(url)?;
    ContactBook::parse(text.trim_start_matches('\u{feff}'), columns)
}
