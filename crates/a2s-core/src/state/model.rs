//! Aggregate application state.
//!
//! One record holds everything the screens share: user preferences, room
//! status, the cart, consultation status, vendor quotes and the workflow log.
//! It is created empty at startup and lives for one browsing session.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::placement::Layout;
use crate::screen::Screen;

/// Room the user is furnishing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomType {
    Bedroom,
    Living,
    Kitchen,
    Office,
}

/// Design style tag picked during onboarding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StylePreference {
    Modern,
    Traditional,
    Contemporary,
    Scandinavian,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Budget in currency units (INR). Assumed non-negative, not enforced.
    pub budget: f64,
    pub room_type: Option<RoomType>,
    pub style_preference: Option<StylePreference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatus {
    #[serde(rename = "layout3DGenerated")]
    pub layout_3d_generated: bool,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub vendor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureState {
    pub selected_items: Vec<CartItem>,
    /// Caller-supplied sum of selected prices; never recomputed by the shell.
    pub total_cost: f64,
    /// Follows `layout.len()` whenever a layout is reported.
    pub placed_items: u32,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertStatus {
    pub consultation_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatus {
    pub quotes_received: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowLog {
    /// Mirrors the shell's current screen.
    pub current_step: Screen,
    /// Append-only, no dedup. One entry per committed navigation.
    pub completed_steps: Vec<Screen>,
}

/// The aggregate state shared by every screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: UserPreferences,
    pub room: RoomStatus,
    pub furniture: FurnitureState,
    pub expert: ExpertStatus,
    pub vendor: VendorStatus,
    pub workflow: WorkflowLog,
}

impl AppState {
    /// Creates a new AppState with zero/empty defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the placed count fits within the cart.
    pub fn placement_within_cart(&self) -> bool {
        self.furniture.placed_items as usize <= self.furniture.selected_items.len()
    }

    /// Whether the cart total exceeds the budget.
    pub fn is_over_budget(&self) -> bool {
        self.furniture.total_cost > self.user.budget
    }

    /// Sum of the cart prices, independent of the caller-supplied total.
    pub fn cart_subtotal(&self) -> f64 {
        self.furniture.selected_items.iter().map(|i| i.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let state = AppState::new();
        assert_eq!(state.user.budget, 0.0);
        assert!(state.user.room_type.is_none());
        assert!(state.user.style_preference.is_none());
        assert!(!state.room.layout_3d_generated);
        assert!(state.furniture.selected_items.is_empty());
        assert_eq!(state.workflow.current_step, Screen::Onboarding);
        assert!(state.workflow.completed_steps.is_empty());
    }

    #[test]
    fn test_placement_within_cart() {
        let mut state = AppState::new();
        assert!(state.placement_within_cart());
        state.furniture.placed_items = 1;
        assert!(!state.placement_within_cart());
    }

    #[test]
    fn test_camel_case_snapshot() {
        let json = serde_json::to_value(AppState::new()).unwrap();
        assert!(json["room"]["layout3DGenerated"].is_boolean());
        assert!(json["furniture"]["selectedItems"].is_array());
        assert_eq!(json["workflow"]["currentStep"], "onboarding");
    }
}
