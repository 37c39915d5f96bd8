//! Partial updates reported by screens.
//!
//! A screen hands the shell a payload describing what the user just did. Each
//! variant targets one section of [`AppState`]; `None` fields leave the
//! current value untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{AppState, CartItem, RoomType, StylePreference};
use crate::error::{A2sError, Result};
use crate::placement::Layout;
use crate::screen::{Screen, Section};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "room_type")]
    pub room_type: Option<RoomType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "style_preference",
        alias = "style"
    )]
    pub style_preference: Option<StylePreference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomPatch {
    #[serde(
        default,
        rename = "layout3DGenerated",
        alias = "layout_3d_generated",
        alias = "layout",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout_3d_generated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FurniturePatch {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "selected_items")]
    pub selected_items: Option<Vec<CartItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "total_cost")]
    pub total_cost: Option<f64>,
    /// Count-only report for callers without a layout. Ignored when
    /// `layout` is set.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "placed_items")]
    pub placed_items: Option<u32>,
    /// Replaces the layout; the placed count is taken from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl FurniturePatch {
    /// Replaces the cart and sets the total to the sum of its prices.
    pub fn from_cart(items: Vec<CartItem>) -> Self {
        let total: f64 = items.iter().map(|i| i.price).sum();
        Self {
            selected_items: Some(items),
            total_cost: Some(total),
            ..Self::default()
        }
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
            ..Self::default()
        }
    }

    /// Only updates the placed count.
    pub fn placed(count: u32) -> Self {
        Self {
            placed_items: Some(count),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpertPatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "consultation_completed"
    )]
    pub consultation_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VendorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "quotes_received")]
    pub quotes_received: Option<u32>,
}

/// What a screen reports when the user leaves it (or makes progress on it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "data", rename_all = "lowercase")]
pub enum ScreenPayload {
    User(UserPatch),
    Room(RoomPatch),
    Furniture(FurniturePatch),
    Expert(ExpertPatch),
    Vendor(VendorPatch),
}

impl ScreenPayload {
    pub fn section(&self) -> Section {
        match self {
            ScreenPayload::User(_) => Section::User,
            ScreenPayload::Room(_) => Section::Room,
            ScreenPayload::Furniture(_) => Section::Furniture,
            ScreenPayload::Expert(_) => Section::Expert,
            ScreenPayload::Vendor(_) => Section::Vendor,
        }
    }

    /// Decodes a flat JSON object into the section owned by `screen`.
    ///
    /// This is the entry point for string-keyed callers (REPL, replay
    /// scripts) that do not know the section layout.
    pub fn from_fields(screen: Screen, fields: Value) -> Result<Self> {
        if !fields.is_object() {
            return Err(A2sError::invalid_payload(format!(
                "expected a JSON object, got {}",
                fields
            )));
        }

        let section = screen.section().ok_or_else(|| {
            A2sError::invalid_payload(format!("screen '{}' does not accept a payload", screen))
        })?;

        let decode_err = |e: serde_json::Error| {
            A2sError::invalid_payload(format!("{} payload: {}", section, e))
        };

        let payload = match section {
            Section::User => ScreenPayload::User(serde_json::from_value(fields).map_err(decode_err)?),
            Section::Room => ScreenPayload::Room(serde_json::from_value(fields).map_err(decode_err)?),
            Section::Furniture => {
                ScreenPayload::Furniture(serde_json::from_value(fields).map_err(decode_err)?)
            }
            Section::Expert => {
                ScreenPayload::Expert(serde_json::from_value(fields).map_err(decode_err)?)
            }
            Section::Vendor => {
                ScreenPayload::Vendor(serde_json::from_value(fields).map_err(decode_err)?)
            }
        };

        Ok(payload)
    }

    /// Merges the set fields into `state`.
    pub fn fold_into(self, state: &mut AppState) {
        match self {
            ScreenPayload::User(p) => {
                if let Some(budget) = p.budget {
                    state.user.budget = budget;
                }
                if let Some(room_type) = p.room_type {
                    state.user.room_type = Some(room_type);
                }
                if let Some(style) = p.style_preference {
                    state.user.style_preference = Some(style);
                }
            }
            ScreenPayload::Room(p) => {
                if let Some(generated) = p.layout_3d_generated {
                    state.room.layout_3d_generated = generated;
                }
            }
            ScreenPayload::Furniture(p) => {
                if let Some(items) = p.selected_items {
                    state.furniture.selected_items = items;
                }
                if let Some(total) = p.total_cost {
                    state.furniture.total_cost = total;
                }
                match p.layout {
                    Some(layout) => {
                        state.furniture.placed_items = layout.len() as u32;
                        state.furniture.layout = layout;
                    }
                    None => {
                        if let Some(placed) = p.placed_items {
                            state.furniture.placed_items = placed;
                        }
                    }
                }
            }
            ScreenPayload::Expert(p) => {
                if let Some(done) = p.consultation_completed {
                    state.expert.consultation_completed = done;
                }
            }
            ScreenPayload::Vendor(p) => {
                if let Some(quotes) = p.quotes_received {
                    state.vendor.quotes_received = quotes;
                }
            }
        }
    }
}
