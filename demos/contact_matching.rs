//! How polygon names are matched to contact rows.
//!
//! Run with a polygon name to try your own:
//! `cargo run --example contact_matching -- "Ely Public School District"`

use districts_core::matcher::{core_name, match_contact};
use districts_core::text::normalize_name;
use districts_core::{ContactBook, ContactRecord};

fn main() {
    let book = ContactBook::from_records([
        ContactRecord::new("Ely Public School District", "Sam Berg", "218-555-0111", ""),
        ContactRecord::new("Anytown Schools", "Pat Doe", "", ""),
        ContactRecord::new("Park Rapids", "Kim Lund", "", ""),
        ContactRecord::new("Park", "Jo Park", "", ""),
    ]);

    let from_args: Vec<String> = std::env::args().skip(1).collect();
    let names: Vec<String> = if from_args.is_empty() {
        [
            "Ely Public School District",
            "Anytown School District",
            "Park Rapids Area Schools",
            "O'Brien School Dist.",
        ]
        .map(String::from)
        .to_vec()
    } else {
        from_args
    };

    for name in &names {
        let m = match_contact(name, &book);
        println!("{name}");
        println!("  normalized: {}", normalize_name(name));
        println!("  core:       {}", core_name(name));
        match m.record {
            Some(r) => println!("  -> {:?}: {} ({})", m.match_type, r.district, r.contact_person),
            None => println!("  -> no contact"),
        }
    }
}
