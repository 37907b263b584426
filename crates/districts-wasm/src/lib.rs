//! districts-wasm: WebAssembly bindings for districts-core
//!
//! Runs a district map session in the browser. The page owns the map widget
//! (Leaflet or similar) and hands this crate a small *driver* object; the
//! session tells the driver what to draw and the page forwards map events
//! back into the session.
//!
//! Driver methods
//! --------------
//! Every layer id is chosen on the Rust side and passed in, so the driver
//! only has to keep an `id -> layer` table.
//!
//! - `drawPolygon(layerId, districtId, geometry, style)`: `geometry` is a
//!   GeoJSON geometry, `style` uses `color`, `weight`, `fillColor`,
//!   `fillOpacity`. Clicks and hovers on the polygon should call
//!   `app.click(districtId)`, `app.hover_in(districtId)` and
//!   `app.hover_out(districtId)`.
//! - `setPolygonStyle(layerId, style)`, `bringToFront(layerId)`
//! - `drawLabel(layerId, lat, lng, text)`
//! - `drawCircleMarker(layerId, lat, lng, style)`: `style` also carries
//!   `radius` and an optional `tooltip`.
//! - `removeLayer(layerId)`
//! - `fitBounds(south, west, north, east)`
//! - `setPolygonsVisible(visible)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { DistrictMapApp } from 'districts-wasm';
//!
//! async function main() {
//!   await init();
//!   const app = new DistrictMapApp(leafletDriver(map), undefined);
//!   app.start(undefined, undefined); // feature service + contacts file
//!   map.on('zoomend', () => app.zoom_end(map.getZoom()));
//!   document.addEventListener('keydown', (e) => {
//!     const outcome = app.key_down(e.key, e.ctrlKey, e.metaKey);
//!     if (outcome.outcome !== 'nothing') e.preventDefault();
//!   });
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Results are plain JSON-compatible objects (`camelCase` fields).
//! - Driver calls happen while the session is borrowed; a driver must not
//!   call back into the app synchronously from inside one.

use districts_core::clock::Clock;
use districts_core::feature::{Bounds, DistrictId, Geometry, LatLng};
use districts_core::keys::KeyPress;
use districts_core::panel::FormSubmission;
use districts_core::surface::{CircleStyle, LayerId, MapSurface, PolygonStyle};
use districts_core::{MapConfig, Session, SurfaceEvent};
use gloo_net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("Initializing district map WASM module...");
}

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/* --------------------------------------------------------------------------
   Surface backed by the page's driver object
-------------------------------------------------------------------------- */

/// [`MapSurface`] that forwards every drawing call to a JS driver object.
pub struct JsSurface {
    driver: JsValue,
    next_id: u64,
}

impl JsSurface {
    pub fn new(driver: JsValue) -> Self {
        Self { driver, next_id: 1 }
    }

    fn allocate(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn call(&self, method: &str, args: &[JsValue]) {
        let function = js_sys::Reflect::get(&self.driver, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        let Some(function) = function else {
            warn(&format!("map driver has no method {method}"));
            return;
        };
        let args: js_sys::Array = args.iter().collect();
        if let Err(err) = function.apply(&self.driver, &args) {
            warn(&format!("map driver {method} failed: {err:?}"));
        }
    }

    fn value<T: Serialize + ?Sized>(value: &T) -> JsValue {
        to_js(value).unwrap_or(JsValue::NULL)
    }
}

fn layer(id: LayerId) -> JsValue {
    // Layer ids stay far below 2^53.
    JsValue::from_f64(id.0 as f64)
}

impl MapSurface for JsSurface {
    fn draw_polygon(&mut self, district: &DistrictId, geometry: &Geometry, style: &PolygonStyle) -> LayerId {
        let id = self.allocate();
        self.call(
            "drawPolygon",
            &[
                layer(id),
                JsValue::from_str(district.as_str()),
                Self::value(geometry),
                Self::value(style),
            ],
        );
        id
    }

    fn set_polygon_style(&mut self, id: LayerId, style: &PolygonStyle) {
        self.call("setPolygonStyle", &[layer(id), Self::value(style)]);
    }

    fn bring_to_front(&mut self, id: LayerId) {
        self.call("bringToFront", &[layer(id)]);
    }

    fn draw_label(&mut self, at: LatLng, text: &str) -> LayerId {
        let id = self.allocate();
        self.call(
            "drawLabel",
            &[layer(id), at.lat.into(), at.lng.into(), JsValue::from_str(text)],
        );
        id
    }

    fn draw_circle_marker(&mut self, at: LatLng, style: &CircleStyle) -> LayerId {
        let id = self.allocate();
        self.call(
            "drawCircleMarker",
            &[layer(id), at.lat.into(), at.lng.into(), Self::value(style)],
        );
        id
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.call("removeLayer", &[layer(id)]);
    }

    fn fit_bounds(&mut self, b: Bounds) {
        self.call(
            "fitBounds",
            &[b.south.into(), b.west.into(), b.north.into(), b.east.into()],
        );
    }

    fn set_polygons_visible(&mut self, visible: bool) {
        self.call("setPolygonsVisible", &[visible.into()]);
    }
}

/// Browser-local time, as shown after saved notes.
struct JsClock;

impl Clock for JsClock {
    fn timestamp(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("en-US", &JsValue::UNDEFINED)
            .into()
    }
}

/* --------------------------------------------------------------------------
   App
-------------------------------------------------------------------------- */

type SharedSession = Rc<RefCell<Session<JsSurface>>>;

#[wasm_bindgen]
pub struct DistrictMapApp {
    session: SharedSession,
}

#[wasm_bindgen]
impl DistrictMapApp {
    /// `config` is a partial `MapConfig` object; `undefined` keeps every default.
    #[wasm_bindgen(constructor)]
    pub fn new(driver: JsValue, config: JsValue) -> Result<DistrictMapApp, JsValue> {
        let config: MapConfig = if config.is_undefined() || config.is_null() {
            MapConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let session = Session::new(JsSurface::new(driver), config).with_clock(JsClock);
        Ok(Self {
            session: Rc::new(RefCell::new(session)),
        })
    }

    /// Effective map config (center, zooms, tile layers, sources).
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.borrow().config())
    }

    pub fn load_features_geojson(&self, text: &str) -> Result<usize, JsValue> {
        self.session
            .borrow_mut()
            .load_features_geojson(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn load_contacts_csv(&self, text: &str) -> Result<usize, JsValue> {
        self.session
            .borrow_mut()
            .load_contacts_text(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Fetch features and contacts in the background. Missing URLs default
    /// to the configured feature service and contacts file. Either may land
    /// first; failures are logged and leave the map as it was.
    pub fn start(&self, features_url: Option<String>, contacts_url: Option<String>) {
        let (features_url, contacts_url) = {
            let session = self.session.borrow();
            let config = session.config();
            (
                features_url.unwrap_or_else(|| config.feature_query_url()),
                contacts_url.unwrap_or_else(|| config.contacts_file.clone()),
            )
        };

        let session = Rc::clone(&self.session);
        spawn_local(async move {
            match fetch_text(&features_url).await {
                Ok(text) => match session.borrow_mut().load_features_geojson(&text) {
                    Ok(n) => log(&format!("✓ Loaded {n} districts")),
                    Err(e) => warn(&format!("Could not read district features: {e}")),
                },
                Err(e) => warn(&format!("Failed to fetch district features: {e:?}")),
            }
        });

        let session = Rc::clone(&self.session);
        spawn_local(async move {
            match fetch_text(&contacts_url).await {
                Ok(text) => match session.borrow_mut().load_contacts_text(&text) {
                    Ok(n) => log(&format!("✓ Loaded {n} contacts")),
                    Err(e) => warn(&format!("Could not read contact file: {e}")),
                },
                Err(e) => warn(&format!("Failed to fetch contact file: {e:?}")),
            }
        });
    }

    /// Form for the clicked district, or `null` for an unknown id.
    pub fn click(&self, district: &str) -> Result<JsValue, JsValue> {
        let form = self.session.borrow_mut().open(&DistrictId::from(district));
        to_js(&form)
    }

    pub fn hover_in(&self, district: &str) {
        self.session.borrow_mut().dispatch(SurfaceEvent::HoverIn {
            district: DistrictId::from(district),
        });
    }

    pub fn hover_out(&self, district: &str) {
        self.session.borrow_mut().dispatch(SurfaceEvent::HoverOut {
            district: DistrictId::from(district),
        });
    }

    pub fn zoom_end(&self, zoom: u8) {
        self.session.borrow_mut().zoom_changed(zoom);
    }

    /// Save a form (`FormSubmission` shape) and return the stored edit.
    pub fn submit(&self, district: &str, form: JsValue) -> Result<JsValue, JsValue> {
        let form: FormSubmission = serde_wasm_bindgen::from_value(form)?;
        let edit = self
            .session
            .borrow_mut()
            .submit(&DistrictId::from(district), form);
        to_js(&edit)
    }

    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        to_js(&self.session.borrow().search(query))
    }

    pub fn select_search_result(&self, name: &str) -> Result<JsValue, JsValue> {
        let form = self.session.borrow_mut().select_search_result(name);
        to_js(&form)
    }

    pub fn search_enter(&self, query: &str) -> Result<JsValue, JsValue> {
        let form = self.session.borrow_mut().search_enter(query);
        to_js(&form)
    }

    /// Returns an `Outcome`; anything but `nothing` means the key was used.
    pub fn key_down(&self, key: &str, ctrl: bool, meta: bool) -> Result<JsValue, JsValue> {
        let outcome = self
            .session
            .borrow_mut()
            .dispatch(SurfaceEvent::Key(KeyPress::new(key, ctrl, meta)));
        to_js(&outcome)
    }

    pub fn reset_view(&self) {
        self.session.borrow_mut().reset_view();
    }

    /// Hide or show the district polygons; returns the new visibility.
    pub fn toggle_districts(&self) -> bool {
        self.session.borrow_mut().toggle_districts()
    }

    pub fn contacts_loaded(&self) -> bool {
        self.session.borrow().contacts_loaded()
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
