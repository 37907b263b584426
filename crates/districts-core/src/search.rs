// crates/districts-core/src/search.rs

//! Live district search over names, contacts and phone numbers.

use crate::contacts::ContactBook;
use crate::feature::FeatureSet;
use crate::text::{contains_folded, fold_query};
use serde::Serialize;
use std::collections::HashSet;

pub const NO_RESULTS: &str = "No results found.";

/// One row of the search list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictSummary {
    pub name: String,
    pub contact: String,
    pub phone: String,
}

/// What the search dropdown shows after a keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchList {
    /// `false` for an empty query: the dropdown is hidden.
    pub visible: bool,
    pub results: Vec<DistrictSummary>,
}

impl SearchList {
    /// Message shown in place of results, if any.
    pub fn message(&self) -> Option<&'static str> {
        (self.visible && self.results.is_empty()).then_some(NO_RESULTS)
    }
}

/// Every district the search can find.
///
/// Built from the contact rows once they have loaded; until then (or when
/// the contact file had no rows) from the cleaned feature names. Entries
/// whose lowercase name was already seen are dropped.
pub fn search_entries(contacts: Option<&ContactBook>, features: &FeatureSet) -> Vec<DistrictSummary> {
    let from_contacts: Vec<DistrictSummary> = contacts
        .map(|book| {
            book.records()
                .iter()
                .map(|r| DistrictSummary {
                    name: r.district.trim().to_string(),
                    contact: r.contact_person.trim().to_string(),
                    phone: r.phone.trim().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let entries = if from_contacts.is_empty() {
        features
            .iter()
            .map(|f| DistrictSummary {
                name: f.display_name(),
                contact: String::new(),
                phone: String::new(),
            })
            .collect()
    } else {
        from_contacts
    };

    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|d| seen.insert(d.name.to_lowercase()))
        .collect()
}

/// Filter `entries` by a free-text query.
pub fn filter_entries(entries: &[DistrictSummary], query: &str) -> SearchList {
    let q = fold_query(query);
    if q.is_empty() {
        return SearchList::default();
    }
    let results = entries
        .iter()
        .filter(|d| {
            contains_folded(&d.name, &q)
                || contains_folded(&d.contact, &q)
                || contains_folded(&d.phone, &q)
        })
        .cloned()
        .collect();
    SearchList {
        visible: true,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ContactRecord;
    use crate::feature::{DistrictFeature, Geometry};
    use serde_json::json;

    fn features() -> FeatureSet {
        let g = Geometry::Polygon(vec![vec![[-93.0, 45.0], [-92.0, 45.0], [-92.0, 46.0]]]);
        let f = |id: &str, name: &str| {
            DistrictFeature::from_properties(
                json!({"SDORGID": id, "PREFNAME": name}).as_object().cloned().unwrap(),
                g.clone(),
            )
        };
        FeatureSet::new(vec![
            f("1", "Duluth Public School District"),
            f("2", "Ely School District"),
            f("3", "DULUTH"),
        ])
    }

    #[test]
    fn falls_back_to_feature_names_and_dedups() {
        let entries = search_entries(None, &features());
        let names: Vec<_> = entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Duluth", "Ely"]);

        let empty = ContactBook::new();
        assert_eq!(search_entries(Some(&empty), &features()).len(), 2);
    }

    #[test]
    fn prefers_contacts_once_loaded() {
        let book = ContactBook::from_records([
            ContactRecord::new(" Hibbing ", "Lee", "218-555-0199", ""),
            ContactRecord::new("Ely", "Sam Berg", "218-555-0111", ""),
        ]);
        let entries = search_entries(Some(&book), &features());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Hibbing");
    }

    #[test]
    fn matches_name_contact_or_phone() {
        let book = ContactBook::from_records([
            ContactRecord::new("Hibbing", "Lee Anders", "218-555-0199", ""),
            ContactRecord::new("Ely", "Sam Berg", "218-555-0111", ""),
        ]);
        let entries = search_entries(Some(&book), &FeatureSet::default());

        assert_eq!(filter_entries(&entries, "HIB").results.len(), 1);
        assert_eq!(filter_entries(&entries, "berg").results[0].name, "Ely");
        assert_eq!(filter_entries(&entries, "555-01").results.len(), 2);

        let none = filter_entries(&entries, "zzz");
        assert!(none.visible);
        assert_eq!(none.message(), Some(NO_RESULTS));
    }

    #[test]
    fn blank_query_hides_list() {
        let entries = search_entries(None, &features());
        let list = filter_entries(&entries, "   ");
        assert!(!list.visible);
        assert_eq!(list.message(), None);
    }
}
