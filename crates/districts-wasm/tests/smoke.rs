use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

use districts_wasm::DistrictMapApp;

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature",
         "properties": {"SDORGID": "0706", "PREFNAME": "Ely Public School District"},
         "geometry": {"type": "Polygon", "coordinates": [[[-92.0, 47.8], [-91.6, 47.8], [-91.6, 48.0], [-92.0, 47.8]]]}}
    ]
}"#;

const METHODS: [&str; 8] = [
    "drawPolygon",
    "setPolygonStyle",
    "bringToFront",
    "drawLabel",
    "drawCircleMarker",
    "removeLayer",
    "fitBounds",
    "setPolygonsVisible",
];

/// A driver whose methods only count how often they were called.
fn counting_driver() -> JsValue {
    let driver = js_sys::Object::new();
    for name in METHODS {
        let body = format!("this.calls = this.calls || {{}}; this.calls['{name}'] = (this.calls['{name}'] || 0) + 1;");
        let f = js_sys::Function::new_no_args(&body);
        js_sys::Reflect::set(&driver, &name.into(), &f).unwrap();
    }
    driver.into()
}

fn calls(driver: &JsValue, name: &str) -> f64 {
    js_sys::Reflect::get(driver, &"calls".into())
        .and_then(|c| js_sys::Reflect::get(&c, &name.into()))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn get(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn draws_features_through_driver() {
    let driver = counting_driver();
    let app = DistrictMapApp::new(driver.clone(), JsValue::UNDEFINED).unwrap();

    assert_eq!(app.load_features_geojson(GEOJSON).unwrap(), 1);
    assert_eq!(calls(&driver, "drawPolygon"), 1.0);
    assert_eq!(calls(&driver, "drawLabel"), 1.0);
    assert_eq!(calls(&driver, "fitBounds"), 1.0);
}

#[wasm_bindgen_test]
fn click_returns_form() {
    let app = DistrictMapApp::new(counting_driver(), JsValue::UNDEFINED).unwrap();
    app.load_features_geojson(GEOJSON).unwrap();

    let form = app.click("0706").unwrap();
    assert_eq!(get(&form, "districtName").as_string().as_deref(), Some("Ely"));
    assert_eq!(get(&form, "matchType").as_string().as_deref(), Some("none"));

    assert!(app.click("9999").unwrap().is_null());
}

#[wasm_bindgen_test]
fn member_save_adds_marker_pair() {
    let driver = counting_driver();
    let app = DistrictMapApp::new(driver.clone(), JsValue::UNDEFINED).unwrap();
    app.load_features_geojson(GEOJSON).unwrap();

    let form = js_sys::Object::new();
    js_sys::Reflect::set(&form, &"masmsYes".into(), &true.into()).unwrap();
    app.submit("0706", form.into()).unwrap();
    assert_eq!(calls(&driver, "drawCircleMarker"), 2.0);
}

#[wasm_bindgen_test]
fn shortcuts_report_outcome() {
    let app = DistrictMapApp::new(counting_driver(), JsValue::UNDEFINED).unwrap();
    app.load_features_geojson(GEOJSON).unwrap();

    let outcome = app.key_down("t", true, false).unwrap();
    assert_eq!(get(&outcome, "outcome").as_string().as_deref(), Some("districts_toggled"));
    assert_eq!(get(&outcome, "visible").as_bool(), Some(false));

    let ignored = app.key_down("t", false, false).unwrap();
    assert_eq!(get(&ignored, "outcome").as_string().as_deref(), Some("nothing"));
}
