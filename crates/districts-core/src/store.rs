// crates/districts-core/src/store.rs
use crate::edit::DistrictEdit;
use crate::feature::DistrictId;
use std::collections::HashMap;

/// Session-scoped district edits.
///
/// Every `put` replaces the whole record; fields are never merged. There is
/// no validation and the last write wins.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    edits: HashMap<DistrictId, DistrictEdit>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &DistrictId) -> Option<&DistrictEdit> {
        self.edits.get(id)
    }

    /// Store `edit` for `id`, returning the record it replaced.
    pub fn put(&mut self, id: DistrictId, edit: DistrictEdit) -> Option<DistrictEdit> {
        tracing::debug!(%id, masms = edit.masms.as_str(), "storing district edit");
        self.edits.insert(id, edit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DistrictId, &DistrictEdit)> {
        self.edits.iter()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{DistrictColor, Masms};

    #[test]
    fn put_then_get_returns_exact_edit() {
        let mut store = RecordStore::new();
        let id = DistrictId::from("0709-01");
        let edit = DistrictEdit {
            contact_person: Some("Pat".into()),
            email: Some("pat@example.org".into()),
            masms: Masms::Yes,
            color: Some(DistrictColor::Green),
            ..Default::default()
        };
        assert!(store.put(id.clone(), edit.clone()).is_none());
        assert_eq!(store.get(&id), Some(&edit));
    }

    #[test]
    fn second_put_replaces_without_merge() {
        let mut store = RecordStore::new();
        let id = DistrictId::from("1");
        store.put(
            id.clone(),
            DistrictEdit {
                contact_person: Some("Pat".into()),
                website: Some("https://isd1.example".into()),
                color: Some(DistrictColor::Red),
                ..Default::default()
            },
        );
        let partial = DistrictEdit {
            contact_person: Some("Sam".into()),
            ..Default::default()
        };
        let previous = store.put(id.clone(), partial.clone()).unwrap();
        assert_eq!(previous.contact_person.as_deref(), Some("Pat"));

        let now = store.get(&id).unwrap();
        assert_eq!(now, &partial);
        assert_eq!(now.website, None);
        assert_eq!(now.color, None);
    }

    #[test]
    fn unknown_id_is_empty() {
        let store = RecordStore::new();
        assert!(store.get(&DistrictId::from("missing")).is_none());
        assert!(store.is_empty());
    }
}
