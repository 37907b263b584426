//! Whole-session behavior against the in-memory surface.

use districts_core::prelude::*;
use districts_core::edit::{DistrictColor, Masms};
use districts_core::panel::{FUZZY_ADVISORY, NO_CONTACT_ADVISORY};
use districts_core::surface::CircleStyle;
use pretty_assertions::assert_eq;

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature",
         "properties": {"SDORGID": "0706", "PREFNAME": "Ely Public School District", "website": "https://ely.example"},
         "geometry": {"type": "Polygon", "coordinates": [[[-92.0, 47.8], [-91.6, 47.8], [-91.6, 48.0], [-92.0, 47.8]]]}},
        {"type": "Feature",
         "properties": {"SDORGID": "0709", "PREFNAME": "Duluth Public School District"},
         "geometry": {"type": "MultiPolygon", "coordinates": [[[[-92.3, 46.7], [-92.0, 46.7], [-92.0, 46.9], [-92.3, 46.7]]]]}},
        {"type": "Feature",
         "properties": {"SDORGID": "0001", "PREFNAME": "Aitkin Public School District"},
         "geometry": {"type": "Polygon", "coordinates": [[[-93.8, 46.4], [-93.5, 46.4], [-93.5, 46.6], [-93.8, 46.4]]]}}
    ]
}"#;

const CONTACTS: &str = "\
School District,Main point of contact,Phone,Emails,Title
Ely Public School District,Sam Berg,218-555-0111,sam@ely.example,Superintendent
Duluth Schools ISD 709,\"Lee, Anders\",218-555-0199,lee@duluth.example,Director
";

fn session() -> Session<HeadlessSurface> {
    Session::new(HeadlessSurface::new(), MapConfig::default())
        .with_clock(FixedClock("2024-05-01 09:30:00 UTC".into()))
}

fn loaded() -> Session<HeadlessSurface> {
    let mut s = session();
    assert_eq!(s.load_features_geojson(GEOJSON).unwrap(), 3);
    assert_eq!(s.load_contacts_text(CONTACTS).unwrap(), 2);
    s
}

fn id(raw: &str) -> DistrictId {
    DistrictId::from(raw)
}

#[test]
fn unedited_click_shows_contact_fields() {
    let mut s = loaded();

    let ely = s.open(&id("0706")).unwrap();
    assert_eq!(ely.district_name, "Ely");
    assert_eq!(ely.contact_person, "Sam Berg");
    assert_eq!(ely.email, "sam@ely.example");
    assert_eq!(ely.phone_number, "218-555-0111");
    assert_eq!(ely.website_link.as_deref(), Some("https://ely.example"));
    assert_eq!(ely.notes, "");
    assert_eq!(ely.masms, Masms::Unset);
    assert_eq!(ely.color, None);
    assert_eq!(ely.match_type, MatchType::Exact);
    assert_eq!(ely.advisory, None);

    let duluth = s.open(&id("0709")).unwrap();
    assert_eq!(duluth.contact_person, "Lee, Anders");
    assert_eq!(duluth.match_type, MatchType::Fuzzy);
    assert_eq!(duluth.advisory, Some(FUZZY_ADVISORY));

    let aitkin = s.open(&id("0001")).unwrap();
    assert_eq!(aitkin.contact_person, "");
    assert_eq!(aitkin.match_type, MatchType::None);
    assert_eq!(aitkin.advisory, Some(NO_CONTACT_ADVISORY));
}

#[test]
fn saved_edit_wins_over_contacts() {
    let mut s = loaded();
    let ely = id("0706");

    let form = s.open(&ely).unwrap();
    let mut submission = FormSubmission::from(&form);
    submission.contact_person = String::new();
    submission.notes = "Spoke with the office".into();
    submission.color = Some(DistrictColor::Orange.hex().into());
    s.submit(&ely, submission);

    let reopened = s.open(&ely).unwrap();
    assert_eq!(reopened.contact_person, "");
    assert_eq!(reopened.phone_number, "218-555-0111");
    assert_eq!(
        reopened.notes,
        "Spoke with the office [Saved on: 2024-05-01 09:30:00 UTC]"
    );
    assert_eq!(reopened.color, Some(DistrictColor::Orange));
    assert_eq!(
        s.surface().polygon_style(&ely).unwrap().fill_color,
        DistrictColor::Orange.hex()
    );
}

#[test]
fn membership_marker_follows_masms() {
    let mut s = loaded();
    let ely = id("0706");
    let anchor = s.adapter().anchor(&ely).unwrap();

    let yes = FormSubmission {
        masms_yes: true,
        ..Default::default()
    };
    s.submit(&ely, yes.clone());
    s.submit(&ely, yes);
    assert_eq!(
        s.surface().circles_at(anchor),
        vec![&CircleStyle::member_glow(), &CircleStyle::member_dot()]
    );
    assert_eq!(s.surface().circle_count(), 2);

    s.submit(
        &ely,
        FormSubmission {
            masms_no: true,
            ..Default::default()
        },
    );
    assert_eq!(s.surface().circle_count(), 0);
    assert_eq!(s.adapter().marker(&ely), None);
}

#[test]
fn click_before_contacts_then_after() {
    let mut s = session();
    s.load_features_geojson(GEOJSON).unwrap();
    assert_eq!(s.open(&id("0706")).unwrap().match_type, MatchType::None);

    s.load_contacts_text(CONTACTS).unwrap();
    assert_eq!(s.open(&id("0706")).unwrap().match_type, MatchType::Exact);
}

#[test]
fn edits_saved_before_polygons_are_drawn_later() {
    let mut s = session();
    let ely = id("0706");
    s.submit(
        &ely,
        FormSubmission {
            masms_yes: true,
            color: Some(DistrictColor::Red.hex().into()),
            ..Default::default()
        },
    );
    assert_eq!(s.surface().layer_count(), 0);

    s.load_features_geojson(GEOJSON).unwrap();
    assert_eq!(s.surface().polygon_count(), 3);
    assert!(s.surface().polygon_style(&ely).unwrap().is_filled());
    assert_eq!(s.surface().circle_count(), 2);
    assert_eq!(s.surface().fit_count(), 1);
}

#[test]
fn max_zoom_hides_fills_without_touching_edits() {
    let mut s = loaded();
    let ely = id("0706");
    s.submit(
        &ely,
        FormSubmission {
            color: Some(DistrictColor::Green.hex().into()),
            ..Default::default()
        },
    );

    s.dispatch(SurfaceEvent::ZoomEnd { zoom: 19 });
    assert!(!s.surface().polygon_style(&ely).unwrap().is_filled());

    s.dispatch(SurfaceEvent::HoverIn { district: ely.clone() });
    s.dispatch(SurfaceEvent::HoverOut { district: ely.clone() });
    assert!(!s.surface().polygon_style(&ely).unwrap().is_filled());
    assert_eq!(s.store().get(&ely).unwrap().color, Some(DistrictColor::Green));

    s.dispatch(SurfaceEvent::ZoomEnd { zoom: 12 });
    assert!(s.surface().polygon_style(&ely).unwrap().is_filled());
}

#[test]
fn search_selection_equals_click() {
    let mut s = loaded();

    let list = s.search("218-555");
    assert_eq!(list.results.len(), 2);

    let picked = s.select_search_result("Ely").unwrap();
    let clicked = s.open(&id("0706")).unwrap();
    assert_eq!(picked, clicked);

    let entered = s.search_enter("lee").unwrap();
    assert_eq!(entered.district_id, id("0709"));

    assert_eq!(s.search("zzz").message(), Some("No results found."));
}

#[test]
fn shortcuts_reset_and_toggle() {
    let mut s = loaded();
    assert_eq!(s.surface().fit_count(), 1);

    let reset = SurfaceEvent::Key(KeyPress::new("R", true, false));
    assert_eq!(s.dispatch(reset), Outcome::ViewReset);
    assert_eq!(s.surface().fit_count(), 2);

    let toggle = || SurfaceEvent::Key(KeyPress::new("t", false, true));
    assert_eq!(s.dispatch(toggle()), Outcome::DistrictsToggled { visible: false });
    assert!(!s.surface().polygons_visible());
    assert_eq!(s.dispatch(toggle()), Outcome::DistrictsToggled { visible: true });
    assert!(s.surface().polygons_visible());
}

#[test]
fn events_round_trip_through_json() {
    let event: SurfaceEvent =
        serde_json::from_str(r#"{"event": "key", "key": "t", "ctrl": true}"#).unwrap();
    assert_eq!(event, SurfaceEvent::Key(KeyPress::new("t", true, false)));

    let click: SurfaceEvent =
        serde_json::from_str(r#"{"event": "click", "district": "0706"}"#).unwrap();
    assert_eq!(click, SurfaceEvent::Click { district: id("0706") });
}
