//! Walk through one map session without a browser.
//!
//! This example demonstrates how to:
//! - Load district polygons and the contact spreadsheet
//! - Open a district the way a click does
//! - Save an edit and watch the layers change
//! - Zoom, search and use the keyboard shortcuts

use districts_core::prelude::*;
use districts_core::edit::DistrictColor;

const GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature",
         "properties": {"SDORGID": "0706", "PREFNAME": "Ely Public School District"},
         "geometry": {"type": "Polygon", "coordinates": [[[-92.0, 47.8], [-91.6, 47.8], [-91.6, 48.0], [-92.0, 47.8]]]}},
        {"type": "Feature",
         "properties": {"SDORGID": "0709", "PREFNAME": "Duluth Public School District"},
         "geometry": {"type": "Polygon", "coordinates": [[[-92.3, 46.7], [-92.0, 46.7], [-92.0, 46.9], [-92.3, 46.7]]]}}
    ]
}"#;

const CONTACTS: &str = "School District,Main point of contact,Phone,Emails\n\
Ely Public School District,Sam Berg,218-555-0111,sam@ely.example\n\
Duluth Schools ISD 709,Lee Anders,218-555-0199,lee@duluth.example\n";

fn main() -> districts_core::Result<()> {
    println!("=== District Map Session Walkthrough ===\n");

    let mut session = Session::new(HeadlessSurface::new(), MapConfig::default());

    println!("--- Step 1: Load data ---");
    let features = session.load_features_geojson(GEOJSON)?;
    let contacts = session.load_contacts_text(CONTACTS)?;
    println!("{features} districts, {contacts} contacts");
    println!("{} layers on the surface\n", session.surface().layer_count());

    println!("--- Step 2: Click a district ---");
    let ely = DistrictId::from("0706");
    if let Some(form) = session.open(&ely) {
        println!("{} ({:?} match)", form.district_name, form.match_type);
        println!("Contact: {} / {}", form.contact_person, form.phone_number);
        if let Some(advisory) = form.advisory {
            println!("Note: {advisory}");
        }

        println!("\n--- Step 3: Save as a green MASMS member ---");
        let mut submission = FormSubmission::from(&form);
        submission.masms_yes = true;
        submission.color = Some(DistrictColor::Green.hex().to_string());
        submission.notes = "Walkthrough".to_string();
        let edit = session.submit(&ely, submission);
        println!("Notes saved as: {}", edit.notes.unwrap_or_default());
        println!("Membership markers: {}", session.surface().circle_count());
    }
    println!();

    println!("--- Step 4: Zoom all the way in ---");
    let max = session.config().max_zoom;
    session.dispatch(SurfaceEvent::ZoomEnd { zoom: max });
    let filled = session
        .surface()
        .polygon_style(&ely)
        .is_some_and(|s| s.is_filled());
    println!("Ely filled at zoom {max}: {filled}\n");

    println!("--- Step 5: Search ---");
    for hit in session.search("218").results {
        println!("{} | {} | {}", hit.name, hit.contact, hit.phone);
    }
    if let Some(form) = session.search_enter("lee") {
        println!("Enter on \"lee\" opens {}", form.district_name);
    }
    println!();

    println!("--- Step 6: Shortcuts ---");
    let outcome = session.dispatch(SurfaceEvent::Key(KeyPress::new("t", true, false)));
    println!("Ctrl+T -> {outcome:?}");

    Ok(())
}
