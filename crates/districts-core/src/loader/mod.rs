// crates/districts-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (files, decompression, HTTP) and delegates to
//! the payload parsers: delimited text for contacts, GeoJSON for district
//! polygons.

pub mod common_io;
pub mod delimited;

#[cfg(feature = "fetch")]
pub mod fetch;

use crate::contacts::{ContactBook, ContactColumns};
use crate::error::Result;
use crate::feature::FeatureSet;
use std::path::Path;

impl ContactBook {
    /// Load a contact spreadsheet export from disk.
    pub fn load_from_path(path: impl AsRef<Path>, columns: &ContactColumns) -> Result<Self> {
        let path = path.as_ref();
        let text = common_io::read_text(path)?;
        let book = Self::parse(&text, columns)?;
        tracing::info!(path = %path.display(), contacts = book.len(), "loaded contact file");
        Ok(book)
    }
}

#[cfg(feature = "json")]
impl FeatureSet {
    /// Load a GeoJSON feature collection (as returned by the feature
    /// service with `f=geojson`) from disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let set = Self::from_reader(reader)?;
        tracing::info!(path = %path.display(), features = set.len(), "loaded district features");
        Ok(set)
    }
}
