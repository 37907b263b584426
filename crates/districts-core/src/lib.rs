// crates/districts-core/src/lib.rs

//! Session model behind the Minnesota school district map: district
//! polygons, the contact spreadsheet, per-district edits and the layers
//! drawn for them.
//!
//! Rendering is left to a [`surface::MapSurface`]; the browser build draws
//! on a real map widget and [`surface::HeadlessSurface`] records layers in
//! memory.

pub mod adapter;
pub mod clock;
pub mod config;
pub mod contacts;
pub mod edit;
pub mod error;
pub mod feature;
pub mod keys;
pub mod loader; // Files, gzip and HTTP
pub mod matcher;
pub mod panel;
pub mod search;
pub mod session;
pub mod store;
pub mod surface;
pub mod text;

// Re-exports
pub use crate::error::{DistrictError, Result};
pub use crate::config::MapConfig;
pub use crate::contacts::{ContactBook, ContactColumns, ContactRecord};
pub use crate::edit::{DistrictColor, DistrictEdit, Masms};
pub use crate::feature::{DistrictFeature, DistrictId, FeatureSet, Geometry, LatLng};
pub use crate::matcher::{match_contact, MatchType};
pub use crate::session::{Outcome, Session};
pub use crate::surface::{HeadlessSurface, MapSurface, SurfaceEvent};

pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::keys::{KeyPress, Shortcut};
    pub use crate::panel::{DistrictForm, FormSubmission};
    pub use crate::search::{DistrictSummary, SearchList};
    pub use crate::{
        ContactBook, DistrictEdit, DistrictId, FeatureSet, HeadlessSurface, MapConfig,
        MapSurface, MatchType, Outcome, Session, SurfaceEvent,
    };
}
