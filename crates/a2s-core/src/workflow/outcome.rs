//! Results and side effects reported by the shell.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::gate::GateDenial;
use crate::screen::Screen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The gate held; the fold was committed and the screen switched.
    Moved { from: Screen, to: Screen },
    /// The gate refused; nothing changed.
    Denied(GateDenial),
}

impl NavigationOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, NavigationOutcome::Moved { .. })
    }

    pub fn denial(&self) -> Option<&GateDenial> {
        match self {
            NavigationOutcome::Denied(denial) => Some(denial),
            NavigationOutcome::Moved { .. } => None,
        }
    }
}

/// Something that happened (or must happen) after a state update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellEffect {
    /// The cart went over budget and the shell moved to the expert screen.
    /// Already applied when reported.
    EscalatedToExpert { from: Screen },
    /// The host should switch to `to` after `delay`, via
    /// `WorkflowShell::complete_scheduled`.
    ScheduleTransition { to: Screen, delay: Duration },
}

/// Full result of a `navigate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub outcome: NavigationOutcome,
    /// Screen visible after the call, including automatic transitions.
    pub current: Screen,
    pub effects: Vec<ShellEffect>,
}
