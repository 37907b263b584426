// crates/districts-core/src/edit.rs
use serde::{Deserialize, Serialize};

/// The fixed color palette a district can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictColor {
    Red,
    Green,
    Yellow,
    Orange,
}

impl DistrictColor {
    pub const ALL: [DistrictColor; 4] = [
        DistrictColor::Red,
        DistrictColor::Green,
        DistrictColor::Yellow,
        DistrictColor::Orange,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            DistrictColor::Red => "#e74c3c",
            DistrictColor::Green => "#27ae60",
            DistrictColor::Yellow => "#f1c40f",
            DistrictColor::Orange => "#f39c12",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistrictColor::Red => "Red",
            DistrictColor::Green => "Green",
            DistrictColor::Yellow => "Yellow",
            DistrictColor::Orange => "Orange",
        }
    }

    /// Parse a palette hex value (case-insensitive) or a palette name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(value) || c.label().eq_ignore_ascii_case(value))
    }
}

/// MASMS membership flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Masms {
    Yes,
    No,
    #[default]
    Unset,
}

impl Masms {
    /// Collapse the two form checkboxes into the tri-state. `Yes` wins if
    /// both are somehow checked.
    pub fn from_checkboxes(yes: bool, no: bool) -> Self {
        match (yes, no) {
            (true, _) => Masms::Yes,
            (false, true) => Masms::No,
            (false, false) => Masms::Unset,
        }
    }

    pub fn is_member(self) -> bool {
        self == Masms::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Masms::Yes => "Yes",
            Masms::No => "No",
            Masms::Unset => "",
        }
    }
}

/// User edits for one district.
///
/// A `None` text field is unset and lets the info panel fall back to the
/// matched contact or the feature's own properties. `Some("")` is an
/// explicit blank and does not fall back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictEdit {
    pub district_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub secondary_phone: Option<String>,
    pub website: Option<String>,
    pub num_schools: Option<String>,
    #[serde(default)]
    pub masms: Masms,
    pub notes: Option<String>,
    pub color: Option<DistrictColor>,
}
