// crates/districts-core/src/panel.rs

//! # Info Panel
//!
//! View model of the sidebar form shown after a district is clicked, and
//! the conversion of a submitted form back into a [`DistrictEdit`].
//!
//! Each text field defaults from the first non-empty source in
//! edit > matched contact > feature property > empty. An edit field that
//! was saved blank stays blank.

use crate::clock::Clock;
use crate::edit::{DistrictColor, DistrictEdit, Masms};
use crate::feature::{DistrictFeature, DistrictId};
use crate::matcher::{ContactMatch, MatchType};
use serde::{Deserialize, Serialize};

pub const NO_CONTACT_ADVISORY: &str =
    "No contact info found for this district. Check the name in your CSV.";
pub const FUZZY_ADVISORY: &str = "Fuzzy match used. Check if info is correct.";

/// One entry of the color picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteOption {
    pub name: &'static str,
    pub value: &'static str,
}

pub fn palette() -> Vec<PaletteOption> {
    DistrictColor::ALL
        .into_iter()
        .map(|c| PaletteOption {
            name: c.label(),
            value: c.hex(),
        })
        .collect()
}

/// Everything the sidebar needs to render the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictForm {
    pub district_id: DistrictId,
    pub district_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone_number: String,
    pub secondary_phone: String,
    pub website: String,
    pub num_schools: String,
    pub masms: Masms,
    pub notes: String,
    /// Preselected only when a saved edit carries a color.
    pub color: Option<DistrictColor>,
    pub palette: Vec<PaletteOption>,
    /// Link target for "Visit Website", present when the website is not blank.
    pub website_link: Option<String>,
    pub match_type: MatchType,
    pub advisory: Option<&'static str>,
}

impl DistrictForm {
    pub fn build(
        feature: &DistrictFeature,
        edit: Option<&DistrictEdit>,
        contact: ContactMatch<'_>,
    ) -> Self {
        let record = contact.record;
        let field =
            |saved: Option<&Option<String>>, from_contact: Option<&str>, key: &str| -> String {
                if let Some(Some(value)) = saved {
                    return value.clone();
                }
                from_contact
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .or_else(|| feature.property(key))
                    .unwrap_or_default()
            };

        let website = field(edit.map(|e| &e.website), None, "website");
        let masms = match edit {
            Some(e) => e.masms,
            None => match feature.property("masms").as_deref() {
                Some("Yes") => Masms::Yes,
                Some("No") => Masms::No,
                _ => Masms::Unset,
            },
        };

        Self {
            district_id: feature.id.clone(),
            district_name: edit
                .and_then(|e| e.district_name.clone())
                .unwrap_or_else(|| feature.display_name()),
            contact_person: field(
                edit.map(|e| &e.contact_person),
                record.map(|r| r.contact_person.as_str()),
                "contactPerson",
            ),
            email: field(edit.map(|e| &e.email), record.map(|r| r.emails.as_str()), "email"),
            phone_number: field(
                edit.map(|e| &e.phone_number),
                record.map(|r| r.phone.as_str()),
                "phoneNumber",
            ),
            secondary_phone: field(edit.map(|e| &e.secondary_phone), None, "secondaryPhone"),
            website_link: (!website.trim().is_empty()).then(|| website.clone()),
            website,
            num_schools: field(edit.map(|e| &e.num_schools), None, "numSchools"),
            masms,
            notes: field(edit.map(|e| &e.notes), None, "notes"),
            color: edit.and_then(|e| e.color),
            palette: palette(),
            match_type: contact.match_type,
            advisory: match contact.match_type {
                MatchType::Exact => None,
                MatchType::Fuzzy => Some(FUZZY_ADVISORY),
                MatchType::None => Some(NO_CONTACT_ADVISORY),
            },
        }
    }
}

/// Values of the sidebar form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSubmission {
    pub district_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone_number: String,
    pub secondary_phone: String,
    pub website: String,
    pub num_schools: String,
    pub masms_yes: bool,
    pub masms_no: bool,
    pub notes: String,
    /// Hex value of the checked color radio, if any.
    pub color: Option<String>,
}

impl FormSubmission {
    /// Turn the submitted values into a full replacement edit. Non-blank
    /// notes get a ` [Saved on: …]` suffix.
    pub fn into_edit(self, clock: &dyn Clock) -> DistrictEdit {
        let notes = if self.notes.trim().is_empty() {
            self.notes
        } else {
            format!("{} [Saved on: {}]", self.notes, clock.timestamp())
        };
        let color = self.color.as_deref().and_then(|value| {
            let parsed = DistrictColor::parse(value);
            if parsed.is_none() && !value.trim().is_empty() {
                tracing::warn!(%value, "ignoring color outside the palette");
            }
            parsed
        });

        DistrictEdit {
            district_name: Some(self.district_name),
            contact_person: Some(self.contact_person),
            email: Some(self.email),
            phone_number: Some(self.phone_number),
            secondary_phone: Some(self.secondary_phone),
            website: Some(self.website),
            num_schools: Some(self.num_schools),
            masms: Masms::from_checkboxes(self.masms_yes, self.masms_no),
            notes: Some(notes),
            color,
        }
    }
}

impl From<&DistrictForm> for FormSubmission {
    /// The submission a user produces by pressing Save without touching
    /// anything.
    fn from(form: &DistrictForm) -> Self {
        Self {
            district_name: form.district_name.clone(),
            contact_person: form.contact_person.clone(),
            email: form.email.clone(),
            phone_number: form.phone_number.clone(),
            secondary_phone: form.secondary_phone.clone(),
            website: form.website.clone(),
            num_schools: form.num_schools.clone(),
            masms_yes: form.masms == Masms::Yes,
            masms_no: form.masms == Masms::No,
            notes: form.notes.clone(),
            color: form.color.map(|c| c.hex().to_string()),
        }
    }
}
