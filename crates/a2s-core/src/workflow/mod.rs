//! Navigation and workflow gating.
//!
//! # Module Structure
//!
//! - `gate`: readiness predicates per destination screen
//! - `outcome`: navigation results and shell side effects
//! - `shell`: the `WorkflowShell` state container
//!
//! # Usage
//!
//! ```
//! use a2s_core::screen::Screen;
//! use a2s_core::state::{RoomType, ScreenPayload, UserPatch};
//! use a2s_core::workflow::WorkflowShell;
//!
//! let mut shell = WorkflowShell::default();
//! let payload = ScreenPayload::User(UserPatch {
//!     budget: Some(30000.0),
//!     room_type: Some(RoomType::Bedroom),
//!     style_preference: None,
//! });
//! let nav = shell.navigate(Screen::Room, Some(payload)).unwrap();
//! assert!(nav.outcome.is_moved());
//! assert_eq!(shell.current_screen(), Screen::Room);
//! ```

pub mod gate;
mod outcome;
mod shell;

pub use gate::GateDenial;
pub use outcome::{Navigation, NavigationOutcome, ShellEffect};
pub use shell::{ShellSnapshot, WorkflowShell};
