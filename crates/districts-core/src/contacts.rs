// crates/districts-core/src/contacts.rs
use crate::error::{DistrictError, Result};
use crate::loader::delimited::parse_delimited;
use crate::text::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Header names of the columns the map reads from the contact spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactColumns {
    pub district: String,
    pub contact_person: String,
    pub phone: String,
    pub emails: String,
    pub delimiter: char,
}

impl Default for ContactColumns {
    fn default() -> Self {
        Self {
            district: "School District".to_string(),
            contact_person: "Main point of contact".to_string(),
            phone: "Phone".to_string(),
            emails: "Emails".to_string(),
            delimiter: ',',
        }
    }
}

/// One spreadsheet row.
///
/// All values are trimmed. Columns the map does not know about are kept in
/// `fields` under their header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub district: String,
    pub contact_person: String,
    pub phone: String,
    pub emails: String,
    pub fields: BTreeMap<String, String>,
}

impl ContactRecord {
    pub fn new(
        district: impl Into<String>,
        contact_person: impl Into<String>,
        phone: impl Into<String>,
        emails: impl Into<String>,
    ) -> Self {
        Self {
            district: district.into(),
            contact_person: contact_person.into(),
            phone: phone.into(),
            emails: emails.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Any column by header name, including the well-known ones.
    pub fn field(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }
}

/// Contact records keyed by normalized district name.
///
/// Iteration follows file order. A later row whose name normalizes to an
/// existing key replaces the earlier row in place.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    records: Vec<ContactRecord>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse spreadsheet text. The first row is the header.
    pub fn parse(text: &str, columns: &ContactColumns) -> Result<Self> {
        let mut rows = parse_delimited(text, columns.delimiter).into_iter();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| DistrictError::InvalidData("contact file has no header row".into()))?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut book = Self::new();
        for row in rows {
            let fields: BTreeMap<String, String> = headers
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let value = row.get(idx).map(|v| v.trim()).unwrap_or_default();
                    (h.clone(), value.to_string())
                })
                .collect();

            let get = |name: &str| fields.get(name).cloned().unwrap_or_default();
            let record = ContactRecord {
                district: get(&columns.district),
                contact_person: get(&columns.contact_person),
                phone: get(&columns.phone),
                emails: get(&columns.emails),
                fields,
            };
            if record.district.is_empty() {
                continue;
            }
            book.insert(record);
        }
        Ok(book)
    }

    /// Build a book from already-parsed records.
    pub fn from_records(records: impl IntoIterator<Item = ContactRecord>) -> Self {
        let mut book = Self::new();
        for record in records {
            book.insert(record);
        }
        book
    }

    /// Insert a record under its normalized name. Records whose name
    /// normalizes to nothing are dropped and `false` is returned.
    pub fn insert(&mut self, record: ContactRecord) -> bool {
        let key = normalize_name(&record.district);
        if key.is_empty() {
            tracing::debug!(district = %record.district, "skipping contact with empty normalized name");
            return false;
        }
        match self.index.get(&key) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.keys.push(key);
                self.records.push(record);
            }
        }
        true
    }

    /// Exact lookup by an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&ContactRecord> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    /// `(normalized key, record)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ContactRecord)> {
        self.keys.iter().map(String::as_str).zip(self.records.iter())
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "School District ,Main point of contact,Phone,Emails,Region\r\n\
        Duluth Public Schools, Pat Olson ,218-555-0100,pat@duluth.example,Northeast\r\n\
        \"Ely, ISD 696\",Sam Berg,218-555-0111,\"sam@ely.example\r\nalt@ely.example\",North\r\n\
        ,Nobody,000,,\r\n\
        \r\n";

    #[test]
    fn parses_header_and_rows() {
        let book = ContactBook::parse(SHEET, &ContactColumns::default()).unwrap();
        assert_eq!(book.len(), 2);

        let duluth = book.get("duluthpublicschools").unwrap();
        assert_eq!(duluth.contact_person, "Pat Olson");
        assert_eq!(duluth.phone, "218-555-0100");
        assert_eq!(duluth.field("Region"), Some("Northeast"));

        let ely = book.get("elyisd696").unwrap();
        assert_eq!(ely.emails, "sam@ely.example\r\nalt@ely.example");
    }

    #[test]
    fn later_duplicate_replaces_in_place() {
        let book = ContactBook::from_records([
            ContactRecord::new("Ely", "First", "1", ""),
            ContactRecord::new("Hibbing", "H", "2", ""),
            ContactRecord::new("ELY.", "Second", "3", ""),
        ]);
        assert_eq!(book.len(), 2);
        let names: Vec<_> = book.entries().map(|(_, r)| r.contact_person.as_str()).collect();
        assert_eq!(names, vec!["Second", "H"]);
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(ContactBook::parse("", &ContactColumns::default()).is_err());
    }

    #[test]
    fn short_rows_fill_missing_columns_with_empty() {
        let book = ContactBook::parse("School District,Phone\nEly\n", &ContactColumns::default())
            .unwrap();
        assert_eq!(book.get("ely").unwrap().phone, "");
    }
}
