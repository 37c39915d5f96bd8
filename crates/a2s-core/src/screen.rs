//! Screens of the design flow and the state sections they own.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{A2sError, Result};

/// One full-page view in the flow.
///
/// Names serialize in lower case (`"onboarding"`, `"room"`, ...), matching the
/// identifiers the screens use when they ask to navigate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    /// Video upload plus budget/room/style questionnaire. Initial screen.
    #[default]
    Onboarding,
    /// 3D room visualization with budget slider.
    Room,
    /// Furniture catalog.
    Catalog,
    /// Drag-and-drop placement of selected items.
    Placement,
    /// Live consultation with a design expert.
    Expert,
    /// Local vendor connection and quotes.
    Vendor,
    /// Order review and payment.
    Checkout,
}

/// Sub-record of the aggregate state a screen's payload folds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    User,
    Room,
    Furniture,
    Expert,
    Vendor,
}

impl Screen {
    /// Parses a screen name, rejecting anything outside the flow.
    pub fn parse(name: &str) -> Result<Self> {
        name.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| A2sError::unknown_screen(name))
    }

    /// All screens in flow order.
    pub fn all() -> impl Iterator<Item = Screen> {
        Screen::iter()
    }

    /// The state section a payload is folded into when leaving this screen.
    ///
    /// Checkout owns no section; leaving it only records the step.
    pub fn section(self) -> Option<Section> {
        match self {
            Screen::Onboarding => Some(Section::User),
            Screen::Room => Some(Section::Room),
            Screen::Catalog | Screen::Placement => Some(Section::Furniture),
            Screen::Expert => Some(Section::Expert),
            Screen::Vendor => Some(Section::Vendor),
            Screen::Checkout => None,
        }
    }

    /// Screens that never get forced back to the expert on a budget overrun.
    pub fn is_budget_escalation_exempt(self) -> bool {
        matches!(self, Screen::Expert | Screen::Vendor | Screen::Checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_screens() {
        assert_eq!(Screen::parse("room").unwrap(), Screen::Room);
        assert_eq!(Screen::parse(" Checkout ").unwrap(), Screen::Checkout);
        assert_eq!(Screen::Placement.to_string(), "placement");
    }

    #[test]
    fn test_parse_unknown_screen() {
        let err = Screen::parse("garage").unwrap_err();
        assert!(err.is_unknown_screen());
    }

    #[test]
    fn test_sections() {
        assert_eq!(Screen::Catalog.section(), Some(Section::Furniture));
        assert_eq!(Screen::Placement.section(), Some(Section::Furniture));
        assert_eq!(Screen::Checkout.section(), None);
        assert_eq!(Screen::all().count(), 7);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Screen::Expert).unwrap();
        assert_eq!(json, "\"expert\"");
        let back: Screen = serde_json::from_str("\"vendor\"").unwrap();
        assert_eq!(back, Screen::Vendor);
    }
}
