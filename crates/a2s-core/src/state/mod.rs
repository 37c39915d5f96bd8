//! Aggregate state domain module.
//!
//! - `model`: the `AppState` record and its sections
//! - `patch`: partial updates screens report (`ScreenPayload`)

mod model;
mod patch;

pub use model::{
    AppState, CartItem, ExpertStatus, FurnitureState, RoomStatus, RoomType, StylePreference,
    UserPreferences, VendorStatus, WorkflowLog,
};
pub use patch::{ExpertPatch, FurniturePatch, RoomPatch, ScreenPayload, UserPatch, VendorPatch};
