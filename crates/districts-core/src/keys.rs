// crates/districts-core/src/keys.rs
use serde::{Deserialize, Serialize};

/// A key press as reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    /// Command key on macOS.
    #[serde(default)]
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
        }
    }
}

/// Keyboard commands. Both require Ctrl (or Cmd).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    /// Ctrl+R: fit the view to all districts again.
    ResetView,
    /// Ctrl+T: hide or show the district polygons.
    ToggleDistricts,
}

impl Shortcut {
    pub fn from_key(press: &KeyPress) -> Option<Self> {
        if !(press.ctrl || press.meta) {
            return None;
        }
        match press.key.as_str() {
            "r" | "R" => Some(Shortcut::ResetView),
            "t" | "T" => Some(Shortcut::ToggleDistricts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_is_required() {
        assert_eq!(Shortcut::from_key(&KeyPress::new("r", false, false)), None);
        assert_eq!(Shortcut::from_key(&KeyPress::new("r", true, false)), Some(Shortcut::ResetView));
        assert_eq!(
            Shortcut::from_key(&KeyPress::new("T", false, true)),
            Some(Shortcut::ToggleDistricts)
        );
        assert_eq!(Shortcut::from_key(&KeyPress::new("x", true, true)), None);
    }
}
