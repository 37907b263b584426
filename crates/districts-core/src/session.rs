// crates/districts-core/src/session.rs

//! # Session Context
//!
//! One [`Session`] owns everything a page session knows: the district
//! features, the contact book, the edits, the layer bookkeeping and the
//! surface it draws on. It is created at startup, changed only through the
//! methods below and dropped when the session ends. Nothing survives it.
//!
//! Features and contacts arrive independently and in either order. Clicks
//! before the contact book arrives simply report
//! [`MatchType::None`](crate::matcher::MatchType::None), and edits saved
//! before the polygons arrive are drawn once they do.

use crate::adapter::MapAdapter;
use crate::clock::{Clock, SystemClock};
use crate::config::MapConfig;
use crate::contacts::ContactBook;
use crate::edit::DistrictEdit;
use crate::error::Result;
use crate::feature::{DistrictId, FeatureSet};
use crate::keys::{KeyPress, Shortcut};
use crate::matcher::{match_contact, match_feature, ContactMatch};
use crate::panel::{DistrictForm, FormSubmission};
use crate::search::{filter_entries, search_entries, SearchList};
use crate::store::RecordStore;
use crate::surface::{MapSurface, SurfaceEvent};
use serde::Serialize;

/// What the page should do after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Nothing,
    OpenForm(DistrictForm),
    ViewReset,
    DistrictsToggled { visible: bool },
}

pub struct Session<S: MapSurface> {
    config: MapConfig,
    surface: S,
    features: FeatureSet,
    contacts: Option<ContactBook>,
    store: RecordStore,
    adapter: MapAdapter,
    clock: Box<dyn Clock>,
    zoom: u8,
    selected: Option<DistrictId>,
}

impl<S: MapSurface> Session<S> {
    pub fn new(surface: S, config: MapConfig) -> Self {
        let zoom = config.zoom;
        Self {
            config,
            surface,
            features: FeatureSet::default(),
            contacts: None,
            store: RecordStore::new(),
            adapter: MapAdapter::new(),
            clock: Box::new(SystemClock),
            zoom,
            selected: None,
        }
    }

    /// Replace the clock used to stamp saved notes.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // -----------------------------------------------------------------------
    // DATA ARRIVAL
    // -----------------------------------------------------------------------

    /// Install (or replace) the district polygons and draw them.
    pub fn load_features(&mut self, features: FeatureSet) {
        self.features = features;
        self.adapter
            .draw_features(&mut self.surface, &self.features, &self.store);
    }

    /// Parse and install a GeoJSON feature collection. On failure the
    /// previous features stay in place.
    pub fn load_features_geojson(&mut self, text: &str) -> Result<usize> {
        let features = FeatureSet::from_geojson_str(text).inspect_err(|e| {
            tracing::warn!(error = %e, "could not read district features");
        })?;
        let count = features.len();
        self.load_features(features);
        Ok(count)
    }

    /// Install (or replace) the contact book.
    pub fn load_contacts(&mut self, contacts: ContactBook) {
        tracing::info!(contacts = contacts.len(), "contact book loaded");
        self.contacts = Some(contacts);
    }

    /// Parse and install a contact spreadsheet export. On failure the
    /// previous contacts (if any) stay in place.
    pub fn load_contacts_text(&mut self, text: &str) -> Result<usize> {
        let book = ContactBook::parse(text, &self.config.contact_columns).inspect_err(|e| {
            tracing::warn!(error = %e, "could not read contact file");
        })?;
        let count = book.len();
        self.load_contacts(book);
        Ok(count)
    }

    pub fn contacts_loaded(&self) -> bool {
        self.contacts.is_some()
    }

    // -----------------------------------------------------------------------
    // EVENTS
    // -----------------------------------------------------------------------

    pub fn dispatch(&mut self, event: SurfaceEvent) -> Outcome {
        match event {
            SurfaceEvent::Click { district } => self
                .open(&district)
                .map_or(Outcome::Nothing, Outcome::OpenForm),
            SurfaceEvent::HoverIn { district } => {
                self.adapter
                    .hover_in(&mut self.surface, &district, &self.store);
                Outcome::Nothing
            }
            SurfaceEvent::HoverOut { district } => {
                self.adapter
                    .hover_out(&mut self.surface, &district, &self.store);
                Outcome::Nothing
            }
            SurfaceEvent::ZoomEnd { zoom } => {
                self.zoom_changed(zoom);
                Outcome::Nothing
            }
            SurfaceEvent::Key(press) => match self.handle_key(&press) {
                Some(Shortcut::ResetView) => Outcome::ViewReset,
                Some(Shortcut::ToggleDistricts) => Outcome::DistrictsToggled {
                    visible: self.adapter.is_visible(),
                },
                None => Outcome::Nothing,
            },
        }
    }

    /// What clicking the polygon of `id` shows. `None` for unknown ids.
    pub fn open(&mut self, id: &DistrictId) -> Option<DistrictForm> {
        let feature = self.features.get(id)?;
        let contact = match &self.contacts {
            Some(book) => match_contact(&feature.name, book),
            None => ContactMatch::none(),
        };
        let form = DistrictForm::build(feature, self.store.get(id), contact);
        tracing::debug!(%id, match_type = ?form.match_type, "opened district");
        self.selected = Some(id.clone());
        Some(form)
    }

    /// Save the form of `id`, replacing any previous edit wholesale, and
    /// update the polygon fill and membership marker.
    pub fn submit(&mut self, id: &DistrictId, form: FormSubmission) -> DistrictEdit {
        let edit = form.into_edit(self.clock.as_ref());
        self.adapter.apply_edit(&mut self.surface, id, &edit);
        self.store.put(id.clone(), edit.clone());
        edit
    }

    /// Save the form of the district opened last.
    pub fn submit_selected(&mut self, form: FormSubmission) -> Option<DistrictEdit> {
        let id = self.selected.clone()?;
        Some(self.submit(&id, form))
    }

    pub fn zoom_changed(&mut self, zoom: u8) {
        self.zoom = zoom;
        let at_max = self.config.is_max_zoom(zoom);
        self.adapter
            .zoom_changed(&mut self.surface, at_max, &self.store);
    }

    pub fn handle_key(&mut self, press: &KeyPress) -> Option<Shortcut> {
        let shortcut = Shortcut::from_key(press)?;
        match shortcut {
            Shortcut::ResetView => self.reset_view(),
            Shortcut::ToggleDistricts => {
                self.toggle_districts();
            }
        }
        Some(shortcut)
    }

    pub fn reset_view(&mut self) {
        self.adapter.reset_view(&mut self.surface);
    }

    pub fn toggle_districts(&mut self) -> bool {
        self.adapter.toggle_visible(&mut self.surface)
    }

    // -----------------------------------------------------------------------
    // SEARCH
    // -----------------------------------------------------------------------

    /// Results for the current contents of the search box.
    pub fn search(&self, query: &str) -> SearchList {
        let entries = search_entries(self.contacts.as_ref(), &self.features);
        filter_entries(&entries, query)
    }

    /// Pick a search result by name; identical to clicking its polygon.
    ///
    /// Entries come from the contact file, so their names are resolved to a
    /// polygon with [`match_feature`]. Names with no polygon do nothing.
    pub fn select_search_result(&mut self, name: &str) -> Option<DistrictForm> {
        let id = match_feature(name, &self.features)?.id.clone();
        self.open(&id)
    }

    /// Enter in the search box selects the first result.
    pub fn search_enter(&mut self, query: &str) -> Option<DistrictForm> {
        let first = self.search(query).results.into_iter().next()?;
        self.select_search_result(&first.name)
    }

    // -----------------------------------------------------------------------
    // ACCESSORS
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn contacts(&self) -> Option<&ContactBook> {
        self.contacts.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn adapter(&self) -> &MapAdapter {
        &self.adapter
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn selected(&self) -> Option<&DistrictId> {
        self.selected.as_ref()
    }
}
