//! Furniture layout on the placement screen.
//!
//! Positions are percentages of the room plan with `(0, 0)` at the top-left
//! corner. The door is at the bottom centre, so the strip running up from it
//! is the main walking path.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::catalog;
use crate::error::{A2sError, Result};
use crate::state::{AppState, RoomType};

/// Horizontal extent of the walking path, in percent of the plan width.
const WALKWAY_X: (f64, f64) = (40.0, 60.0);
/// The walking path starts at this depth and runs down to the door.
const WALKWAY_FROM_Y: f64 = 50.0;

/// Space usage above which the layout counts as crowded, in percent.
pub const CROWDED_USAGE_PERCENT: f64 = 80.0;

/// Free floor left for movable furniture once fixed pieces (bed, counters,
/// built-in storage) are accounted for.
pub fn open_floor_m2(room_type: Option<RoomType>) -> f64 {
    match room_type {
        Some(RoomType::Living) => 3.0,
        Some(RoomType::Kitchen) => 1.5,
        Some(RoomType::Office) => 1.6,
        Some(RoomType::Bedroom) | None => 1.8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position, clamped to the room plan.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }

    pub fn in_walking_path(&self) -> bool {
        (WALKWAY_X.0..=WALKWAY_X.1).contains(&self.x) && self.y >= WALKWAY_FROM_Y
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.x, self.y)
    }
}

/// Clockwise rotation in quarter turns, stored as degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Rotation(u16);

impl Rotation {
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Turns by `quarter_turns` steps of 90°. Negative values turn
    /// counter-clockwise; the result wraps at 360.
    pub fn turned(self, quarter_turns: i32) -> Self {
        let turns = i32::from(self.0 / 90) + quarter_turns;
        // rem_euclid(4) is in 0..4, so the product fits in u16.
        Self((turns.rem_euclid(4) * 90) as u16)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = A2sError;

    fn try_from(degrees: u16) -> Result<Self> {
        if degrees % 90 == 0 && degrees < 360 {
            Ok(Self(degrees))
        } else {
            Err(A2sError::placement(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {}",
                degrees
            )))
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// One cart item positioned on the room plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    /// Catalog id, matching a `CartItem::id`.
    #[serde(alias = "item_id")]
    pub item_id: String,
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlacedItem {
    pub fn new(item_id: impl Into<String>, position: Position) -> Self {
        Self {
            item_id: item_id.into(),
            position: Position::new(position.x, position.y),
            rotation: Rotation::default(),
        }
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = Position::new(position.x, position.y);
    }

    pub fn rotate(&mut self, quarter_turns: i32) {
        self.rotation = self.rotation.turned(quarter_turns);
    }

    /// Floor area taken by the item. Items missing from the catalog take none.
    pub fn footprint_m2(&self) -> f64 {
        catalog::find(&self.item_id)
            .and_then(|item| item.footprint_m2())
            .unwrap_or(0.0)
    }
}

/// The placed items of one room. `place` keeps one entry per catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    items: Vec<PlacedItem>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: &str) -> Option<&PlacedItem> {
        self.items.iter().find(|p| p.item_id == item_id)
    }

    fn get_mut(&mut self, item_id: &str) -> Result<&mut PlacedItem> {
        self.items
            .iter_mut()
            .find(|p| p.item_id == item_id)
            .ok_or_else(|| A2sError::placement(format!("'{}' is not placed", item_id)))
    }

    /// Puts an item on the plan.
    ///
    /// # Errors
    ///
    /// Returns `Placement` if the item is already placed.
    pub fn place(&mut self, item_id: &str, position: Position) -> Result<()> {
        if self.get(item_id).is_some() {
            return Err(A2sError::placement(format!("'{}' is already placed", item_id)));
        }
        self.items.push(PlacedItem::new(item_id, position));
        Ok(())
    }

    pub fn move_item(&mut self, item_id: &str, position: Position) -> Result<()> {
        self.get_mut(item_id)?.move_to(position);
        Ok(())
    }

    /// Returns the rotation after turning.
    pub fn rotate_item(&mut self, item_id: &str, quarter_turns: i32) -> Result<Rotation> {
        let item = self.get_mut(item_id)?;
        item.rotate(quarter_turns);
        Ok(item.rotation)
    }

    pub fn remove(&mut self, item_id: &str) -> Result<PlacedItem> {
        let index = self
            .items
            .iter()
            .position(|p| p.item_id == item_id)
            .ok_or_else(|| A2sError::placement(format!("'{}' is not placed", item_id)))?;
        Ok(self.items.remove(index))
    }

    /// Share of the open floor the placed items cover, in percent.
    pub fn space_usage(&self, room_type: Option<RoomType>) -> f64 {
        let covered: f64 = self.items.iter().map(PlacedItem::footprint_m2).sum();
        covered / open_floor_m2(room_type) * 100.0
    }
}

impl From<Vec<PlacedItem>> for Layout {
    fn from(items: Vec<PlacedItem>) -> Self {
        Self { items }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WarningKind {
    Space,
    Budget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutWarning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
}

/// Space and budget warnings for the current layout.
pub fn warnings(state: &AppState) -> Vec<LayoutWarning> {
    let layout = &state.furniture.layout;
    let mut warnings: Vec<LayoutWarning> = layout
        .items()
        .iter()
        .filter(|p| p.position.in_walking_path())
        .map(|p| LayoutWarning {
            kind: WarningKind::Space,
            severity: Severity::Warning,
            message: format!("{} blocks main walking path", display_name(state, &p.item_id)),
        })
        .collect();

    let usage = layout.space_usage(state.user.room_type);
    if usage > CROWDED_USAGE_PERCENT {
        warnings.push(LayoutWarning {
            kind: WarningKind::Space,
            severity: Severity::Warning,
            message: format!("Furniture covers {:.0}% of the open floor", usage),
        });
    }

    if state.is_over_budget() {
        warnings.push(LayoutWarning {
            kind: WarningKind::Budget,
            severity: Severity::Error,
            message: format!(
                "₹{} exceeds budget by ₹{}",
                state.furniture.total_cost,
                state.furniture.total_cost - state.user.budget
            ),
        });
    }

    warnings
}

fn display_name(state: &AppState, item_id: &str) -> String {
    state
        .furniture
        .selected_items
        .iter()
        .find(|i| i.id == item_id)
        .map(|i| i.name.clone())
        .or_else(|| catalog::find(item_id).map(|i| i.name.to_string()))
        .unwrap_or_else(|| item_id.to_string())
}
