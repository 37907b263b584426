//! districts-cli
//! =============
//!
//! Command-line interface for `districts-core`.
//!
//! This crate primarily provides a binary (`districts-cli`). The library
//! target only exists so the overview below renders as documentation.
//!
//! Quick start
//! -----------
//!
//! ```text
//! districts-cli --features districts.geojson --contacts contacts.csv report
//! districts-cli --contacts contacts.csv match "Ely Public School District"
//! districts-cli --features districts.geojson replay session.json
//! ```
//!
//! For programmatic access use `districts-core` directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
