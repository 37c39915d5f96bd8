use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::gate::{self, GateDenial};
use super::outcome::{Navigation, NavigationOutcome, ShellEffect};
use crate::config::{GateConfig, ShowroomConfig};
use crate::error::{A2sError, Result};
use crate::screen::Screen;
use crate::state::{AppState, ScreenPayload};

/// Point-in-time copy of the shell, suitable for printing or scripting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub current_screen: Screen,
    pub state: AppState,
}

/// Single authority for which screen is visible and whether the user may
/// move to another one.
///
/// `WorkflowShell` is responsible for:
/// - Folding screen payloads into the aggregate state
/// - Evaluating the readiness gate of the destination screen
/// - Escalating to the expert screen when the cart exceeds the budget
/// - Requesting the one-time expert to vendor hand-off
///
/// It performs no I/O and never sleeps; delayed work is handed back to the
/// caller as a [`ShellEffect::ScheduleTransition`].
#[derive(Debug, Clone)]
pub struct WorkflowShell {
    state: AppState,
    current: Screen,
    gates: GateConfig,
    handoff_delay: Duration,
    /// Latched once the hand-off has been requested.
    handoff_requested: bool,
}

impl Default for WorkflowShell {
    fn default() -> Self {
        Self::new(&ShowroomConfig::default())
    }
}

impl WorkflowShell {
    /// Creates a shell on the onboarding screen with an empty state.
    pub fn new(config: &ShowroomConfig) -> Self {
        Self::from_state(AppState::new(), config)
    }

    /// Creates a shell from an existing state. The current screen is taken
    /// from `state.workflow.current_step`; no side effects are evaluated
    /// until the next state update.
    pub fn from_state(state: AppState, config: &ShowroomConfig) -> Self {
        Self {
            current: state.workflow.current_step,
            state,
            gates: config.gates.clone(),
            handoff_delay: config.simulation.expert_handoff_delay(),
            handoff_requested: false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            current_screen: self.current,
            state: self.state.clone(),
        }
    }

    /// Whether the gate for `screen` holds against the current state.
    pub fn can_enter(&self, screen: Screen) -> bool {
        gate::is_open(screen, &self.state, &self.gates)
    }

    /// Gate status of every screen against the current state.
    pub fn gate_report(&self) -> Vec<(Screen, bool)> {
        Screen::all().map(|s| (s, self.can_enter(s))).collect()
    }

    /// Requests a move to `target`, folding `payload` into the section owned
    /// by the screen being left.
    ///
    /// The gate is evaluated against the folded state. When it refuses, the
    /// fold is discarded and the outcome is [`NavigationOutcome::Denied`].
    ///
    /// # Errors
    ///
    /// Returns `PayloadSection` if the payload targets a section the current
    /// screen does not own. Gate refusals are not errors.
    pub fn navigate(&mut self, target: Screen, payload: Option<ScreenPayload>) -> Result<Navigation> {
        let mut candidate = self.state.clone();
        if let Some(payload) = payload {
            self.ensure_section(&payload)?;
            payload.fold_into(&mut candidate);
        }
        candidate.workflow.completed_steps.push(self.current);

        if let Err(denial) = gate::check(target, &candidate, &self.gates) {
            self.log_denial(&denial);
            return Ok(Navigation {
                outcome: NavigationOutcome::Denied(denial),
                current: self.current,
                effects: Vec::new(),
            });
        }

        let from = self.current;
        candidate.workflow.current_step = target;
        self.state = candidate;
        self.current = target;

        tracing::info!(
            "[WorkflowShell] Navigated {} -> {} (completed steps: {})",
            from,
            target,
            self.state.workflow.completed_steps.len()
        );

        let effects = self.after_update();

        Ok(Navigation {
            outcome: NavigationOutcome::Moved { from, to: target },
            current: self.current,
            effects,
        })
    }

    /// Folds a payload into the current screen's section without leaving it.
    ///
    /// # Errors
    ///
    /// Returns `PayloadSection` if the payload targets another section.
    pub fn update(&mut self, payload: ScreenPayload) -> Result<Vec<ShellEffect>> {
        self.ensure_section(&payload)?;
        tracing::debug!(
            "[WorkflowShell] Updating section '{}' on screen {}",
            payload.section(),
            self.current
        );
        payload.fold_into(&mut self.state);
        Ok(self.after_update())
    }

    /// Mutates the state directly, then evaluates side effects.
    ///
    /// The current screen is owned by the shell; changes the closure makes to
    /// `workflow.current_step` are overwritten.
    pub fn apply<F>(&mut self, f: F) -> Vec<ShellEffect>
    where
        F: FnOnce(&mut AppState),
    {
        f(&mut self.state);
        self.state.workflow.current_step = self.current;
        self.after_update()
    }

    /// Performs a transition previously requested through
    /// [`ShellEffect::ScheduleTransition`]. No gate is evaluated and no step
    /// is recorded.
    pub fn complete_scheduled(&mut self, to: Screen) -> Vec<ShellEffect> {
        let from = self.current;
        self.current = to;
        self.state.workflow.current_step = to;
        tracing::info!("[WorkflowShell] Scheduled transition {} -> {}", from, to);
        self.after_update()
    }

    fn ensure_section(&self, payload: &ScreenPayload) -> Result<()> {
        if self.current.section() == Some(payload.section()) {
            Ok(())
        } else {
            Err(A2sError::PayloadSection {
                screen: self.current.to_string(),
                payload: payload.section().to_string(),
            })
        }
    }

    fn log_denial(&self, denial: &GateDenial) {
        tracing::debug!(
            "[WorkflowShell] Navigation {} -> {} denied: requires {}",
            self.current,
            denial.target,
            denial.requirement
        );
    }

    /// Side-effect evaluation run after every state update.
    fn after_update(&mut self) -> Vec<ShellEffect> {
        let mut effects = Vec::new();

        if !self.state.placement_within_cart() {
            tracing::warn!(
                "[WorkflowShell] {} placed items but only {} selected",
                self.state.furniture.placed_items,
                self.state.furniture.selected_items.len()
            );
        }

        if self.state.is_over_budget() && !self.current.is_budget_escalation_exempt() {
            let from = self.current;
            self.current = Screen::Expert;
            self.state.workflow.current_step = Screen::Expert;
            tracing::info!(
                "[WorkflowShell] Cart {} exceeds budget {}, escalating {} -> expert",
                self.state.furniture.total_cost,
                self.state.user.budget,
                from
            );
            effects.push(ShellEffect::EscalatedToExpert { from });
        }

        if self.current == Screen::Expert
            && self.state.expert.consultation_completed
            && !self.handoff_requested
        {
            self.handoff_requested = true;
            tracing::info!(
                "[WorkflowShell] Consultation completed, vendor hand-off in {:?}",
                self.handoff_delay
            );
            effects.push(ShellEffect::ScheduleTransition {
                to: Screen::Vendor,
                delay: self.handoff_delay,
            });
        }

        effects
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
