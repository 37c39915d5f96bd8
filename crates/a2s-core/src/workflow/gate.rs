//! Readiness predicates guarding each screen.
//!
//! Every predicate is a pure function of the aggregate state and the gate
//! thresholds. Screens without a predicate are always enterable.

use serde::{Deserialize, Serialize};

use crate::config::GateConfig;
use crate::screen::Screen;
use crate::state::AppState;

/// Why a navigation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDenial {
    pub target: Screen,
    /// Human-readable requirement that was not met.
    pub requirement: String,
}

impl std::fmt::Display for GateDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot enter '{}': {}", self.target, self.requirement)
    }
}

/// The requirement text for a screen's gate.
pub fn requirement(target: Screen) -> &'static str {
    match target {
        Screen::Room => "budget above zero and a room type",
        Screen::Catalog => "a generated 3D layout",
        Screen::Placement => "at least one selected item",
        Screen::Expert => "a placed item or a cart above the budget threshold",
        Screen::Vendor => "a completed consultation or enough placed items",
        Screen::Checkout => "a placed item and at least one vendor quote",
        Screen::Onboarding => "nothing",
    }
}

/// Evaluates the gate for `target` against `state`.
pub fn is_open(target: Screen, state: &AppState, gates: &GateConfig) -> bool {
    let user = &state.user;
    let furniture = &state.furniture;

    match target {
        Screen::Room => user.budget > 0.0 && user.room_type.is_some(),
        Screen::Catalog => state.room.layout_3d_generated,
        Screen::Placement => !furniture.selected_items.is_empty(),
        Screen::Expert => {
            furniture.placed_items > 0
                || furniture.total_cost > user.budget * gates.expert_budget_ratio
        }
        Screen::Vendor => {
            state.expert.consultation_completed
                || furniture.placed_items >= gates.vendor_min_placed
        }
        Screen::Checkout => furniture.placed_items > 0 && state.vendor.quotes_received > 0,
        Screen::Onboarding => true,
    }
}

/// Like [`is_open`], but reports the unmet requirement.
pub fn check(
    target: Screen,
    state: &AppState,
    gates: &GateConfig,
) -> std::result::Result<(), GateDenial> {
    if is_open(target, state, gates) {
        Ok(())
    } else {
        Err(GateDenial {
            target,
            requirement: requirement(target).to_string(),
        })
    }
}
