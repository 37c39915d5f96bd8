//! Domain core of the A2S (Aesthetics to Spaces) design flow.
//!
//! The centre of the crate is [`workflow::WorkflowShell`], which owns the
//! aggregate [`state::AppState`] and decides which [`screen::Screen`] is
//! visible. Everything else is the mock data and arithmetic the screens
//! display.

pub mod catalog;
pub mod config;
pub mod error;
pub mod placement;
pub mod pricing;
pub mod screen;
pub mod state;
pub mod workflow;

// Re-export common types
pub use error::{A2sError, Result};
pub use screen::Screen;
pub use workflow::WorkflowShell;
