//! Mock data every screen renders from.
//!
//! All screens read this one data set, so the cart, the placement view and
//! the checkout agree on prices and vendors.

mod furniture;
mod people;

use serde::Serialize;

use crate::state::RoomType;

pub use furniture::{CATEGORIES, Category, FURNITURE, FurnitureItem, find, search};
pub use people::{
    CONSULTATION_SLOTS, EXPERT_REPLIES, EXPERTS, Expert, PortfolioEntry, VENDORS, Vendor,
    find_vendor,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPreset {
    pub id: &'static str,
    pub room_type: RoomType,
    pub name: &'static str,
    pub description: &'static str,
    pub suggested_budget_min: f64,
    pub suggested_budget_max: f64,
    pub essential_items: &'static [&'static str],
}

impl RoomPreset {
    pub fn budget_fits(&self, budget: f64) -> bool {
        (self.suggested_budget_min..=self.suggested_budget_max).contains(&budget)
    }
}

pub const ROOM_PRESETS: &[RoomPreset] = &[
    RoomPreset {
        id: "bedroom",
        room_type: RoomType::Bedroom,
        name: "Modern Bedroom",
        description: "Sleek and minimalist bedroom setup",
        suggested_budget_min: 25000.0,
        suggested_budget_max: 50000.0,
        essential_items: &["bed", "wardrobe", "nightstand", "lighting"],
    },
    RoomPreset {
        id: "living-room",
        room_type: RoomType::Living,
        name: "Cozy Living Room",
        description: "Comfortable family living space",
        suggested_budget_min: 35000.0,
        suggested_budget_max: 75000.0,
        essential_items: &["sofa", "coffee-table", "tv-unit", "lighting"],
    },
    RoomPreset {
        id: "home-office",
        room_type: RoomType::Office,
        name: "Productive Home Office",
        description: "Efficient workspace for remote work",
        suggested_budget_min: 15000.0,
        suggested_budget_max: 35000.0,
        essential_items: &["desk", "chair", "storage", "lighting"],
    },
];

pub fn preset_for(room_type: RoomType) -> Option<&'static RoomPreset> {
    ROOM_PRESETS.iter().find(|p| p.room_type == room_type)
}

pub const DELIVERY_SLOTS: &[&str] = &[
    "Tomorrow 10AM-2PM",
    "Tomorrow 2PM-6PM",
    "Day after 10AM-2PM",
    "Day after 2PM-6PM",
    "Weekend 10AM-6PM",
];

/// Budget quick-pick amounts offered during onboarding.
pub const BUDGET_PRESETS: &[f64] = &[15000.0, 30000.0, 50000.0, 100000.0];
