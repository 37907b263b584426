// crates/districts-core/src/matcher.rs

//! Resolves a polygon's display name to a contact spreadsheet row.

use crate::contacts::{ContactBook, ContactRecord};
use crate::feature::{DistrictFeature, FeatureSet};
use crate::text::normalize_name;
use serde::{Deserialize, Serialize};

/// How a contact record was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMatch<'a> {
    pub record: Option<&'a ContactRecord>,
    pub match_type: MatchType,
}

impl<'a> ContactMatch<'a> {
    pub fn none() -> Self {
        Self {
            record: None,
            match_type: MatchType::None,
        }
    }
}

/// Look up the contact row for a raw polygon name.
///
/// 1. Normalize the name and try an exact key lookup.
/// 2. Otherwise take a key that contains the normalized name or is
///    contained by it. Among several such keys the one sharing the longest
///    run of characters with the name wins, then the one closest in length,
///    then the alphabetically first.
/// 3. Otherwise repeat step 2 on [`core_name`] forms, which drop words such
///    as `school`, `district` and `public`.
/// 4. Otherwise there is no match.
///
/// A name that normalizes to nothing never matches.
///
/// ```rust
/// use districts_core::contacts::{ContactBook, ContactRecord};
/// use districts_core::matcher::{match_contact, MatchType};
///
/// let book = ContactBook::from_records([ContactRecord::new("Anytown Schools", "Pat", "", "")]);
/// let m = match_contact("Anytown School District", &book);
/// assert_eq!(m.match_type, MatchType::Fuzzy);
/// ```
pub fn match_contact<'a>(raw_name: &str, contacts: &'a ContactBook) -> ContactMatch<'a> {
    let name = normalize_name(raw_name);
    if name.is_empty() {
        return ContactMatch::none();
    }

    if let Some(record) = contacts.get(&name) {
        tracing::debug!(%raw_name, "exact contact match");
        return ContactMatch {
            record: Some(record),
            match_type: MatchType::Exact,
        };
    }

    let keys = contacts
        .entries()
        .map(|(key, record)| (key.to_string(), record));
    let best = best_containment(keys, &name)
        .or_else(|| {
            // Second pass: compare with district boilerplate words removed,
            // so "Anytown Schools" meets "Anytown School District".
            let core = core_name(raw_name);
            if core.is_empty() {
                return None;
            }
            let cores = contacts
                .entries()
                .map(|(_, record)| (core_name(&record.district), record))
                .filter(|(key, _)| !key.is_empty());
            best_containment(cores, &core)
        });

    match best {
        Some((key, record)) => {
            tracing::debug!(%raw_name, %key, "fuzzy contact match");
            ContactMatch {
                record: Some(record),
                match_type: MatchType::Fuzzy,
            }
        }
        None => {
            tracing::debug!(%raw_name, "no contact match");
            ContactMatch::none()
        }
    }
}

/// The polygon a contact row or search entry refers to; the reverse of
/// [`match_contact`] with the same rules and tie-breaks.
///
/// Cleaned display names are compared first, so a name taken from the
/// feature list always finds its own polygon.
pub fn match_feature<'a>(raw_name: &str, features: &'a FeatureSet) -> Option<&'a DistrictFeature> {
    if let Some(feature) = features.find_by_display_name(raw_name) {
        return Some(feature);
    }
    let name = normalize_name(raw_name);
    if name.is_empty() {
        return None;
    }
    if let Some(feature) = features.iter().find(|f| normalize_name(&f.name) == name) {
        return Some(feature);
    }
    let keyed = features.iter().map(|f| (normalize_name(&f.name), f));
    best_containment(keyed, &name)
        .or_else(|| {
            let core = core_name(raw_name);
            if core.is_empty() {
                return None;
            }
            let cores = features
                .iter()
                .map(|f| (core_name(&f.name), f))
                .filter(|(key, _)| !key.is_empty());
            best_containment(cores, &core)
        })
        .map(|(_, feature)| feature)
}

/// Words that say "this is a school district" without naming one.
const BOILERPLATE: [&str; 6] = ["school", "schools", "district", "public", "independent", "isd"];

/// Normalized name with district boilerplate words removed.
pub fn core_name(raw_name: &str) -> String {
    deunicode::deunicode(raw_name)
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty() && !BOILERPLATE.contains(word))
        .collect()
}

/// Best candidate whose key contains `name` or is contained by it.
fn best_containment<T>(
    candidates: impl Iterator<Item = (String, T)>,
    name: &str,
) -> Option<(String, T)> {
    candidates
        .filter(|(key, _)| name.contains(key.as_str()) || key.contains(name))
        .min_by(|(a, _), (b, _)| {
            fuzzy_rank(name, a)
                .cmp(&fuzzy_rank(name, b))
                .then_with(|| a.cmp(b))
        })
}

/// Ordering key for containment candidates; smaller is better.
///
/// When one string contains the other the shared run is the shorter of
/// the two, so the primary key is that length (reversed to sort longest
/// first) and the secondary key the length difference.
fn fuzzy_rank(name: &str, key: &str) -> (std::cmp::Reverse<usize>, usize) {
    let overlap = name.len().min(key.len());
    (std::cmp::Reverse(overlap), name.len().abs_diff(key.len()))
}
