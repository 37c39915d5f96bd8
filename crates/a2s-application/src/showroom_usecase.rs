//! Showroom use case.
//!
//! `ShowroomUseCase` is the single writer of the [`WorkflowShell`]. It turns
//! shell effects into scheduled tasks and runs the simulated operations
//! (video upload, payment, expert chat) that the screens start.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use a2s_core::catalog::{self, EXPERT_REPLIES};
use a2s_core::config::{ConfigRepository, ShowroomConfig, SimulationConfig};
use a2s_core::error::{A2sError, Result};
use a2s_core::placement::{self, Layout, LayoutWarning, Position};
use a2s_core::pricing::{OrderSummary, PaymentMethod};
use a2s_core::state::{AppState, FurniturePatch, ScreenPayload, UserPatch};
use a2s_core::workflow::{Navigation, NavigationOutcome, ShellEffect, ShellSnapshot};
use a2s_core::{Screen, WorkflowShell};
use a2s_execution::{TaskId, TaskInfo, TaskKind, TaskScheduler};
use anyhow::Context;
use chrono::Utc;
use rand::seq::SliceRandom;
use serde_json::Value;
use tokio::sync::{RwLock, mpsc};

use crate::events::{ChatMessage, ChatSender, OrderConfirmation, ShowroomEvent};

/// Use case driving one showroom session.
///
/// # Responsibilities
///
/// - Forwarding navigation and updates to the shell and publishing the result
/// - Editing the placement layout
/// - Scheduling the expert to vendor hand-off the shell requests
/// - Running the simulated upload, payment and chat delays
///
/// # Thread Safety
///
/// Cloning is cheap; every clone shares the same shell, scheduler and event
/// channel. Scheduled continuations hold such a clone.
#[derive(Clone)]
pub struct ShowroomUseCase {
    shell: Arc<RwLock<WorkflowShell>>,
    scheduler: Arc<TaskScheduler>,
    simulation: SimulationConfig,
    events: mpsc::UnboundedSender<ShowroomEvent>,
    /// Set while a video upload is in flight.
    uploading: Arc<AtomicBool>,
}

impl ShowroomUseCase {
    /// Creates a use case with a fresh shell on the onboarding screen.
    pub fn new(config: ShowroomConfig) -> (Self, mpsc::UnboundedReceiver<ShowroomEvent>) {
        let shell = WorkflowShell::new(&config);
        Self::with_shell(shell, config.simulation)
    }

    /// Creates a use case around an existing shell.
    pub fn with_shell(
        shell: WorkflowShell,
        simulation: SimulationConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ShowroomEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let usecase = Self {
            shell: Arc::new(RwLock::new(shell)),
            scheduler: Arc::new(TaskScheduler::new()),
            simulation,
            events,
            uploading: Arc::new(AtomicBool::new(false)),
        };
        (usecase, receiver)
    }

    /// Loads the configuration from `repository` and creates a use case.
    pub async fn bootstrap(
        repository: &dyn ConfigRepository,
    ) -> anyhow::Result<(Self, mpsc::UnboundedReceiver<ShowroomEvent>)> {
        let config = repository
            .load()
            .await
            .context("Failed to load showroom configuration")?;
        tracing::info!(
            "[Showroom] Starting with upload {}ms, payment {}ms, chat {}ms, hand-off {}ms",
            config.simulation.upload_ms,
            config.simulation.payment_ms,
            config.simulation.chat_reply_ms,
            config.simulation.expert_handoff_ms
        );
        Ok(Self::new(config))
    }

    pub async fn snapshot(&self) -> ShellSnapshot {
        self.shell.read().await.snapshot()
    }

    pub async fn current_screen(&self) -> Screen {
        self.shell.read().await.current_screen()
    }

    pub async fn gate_report(&self) -> Vec<(Screen, bool)> {
        self.shell.read().await.gate_report()
    }

    /// Checkout summary for the current cart and budget.
    pub async fn order_summary(&self) -> OrderSummary {
        let shell = self.shell.read().await;
        let state = shell.state();
        OrderSummary::from_cart(&state.furniture.selected_items, state.user.budget)
    }

    /// Requests a move to `target`. See [`WorkflowShell::navigate`].
    pub async fn navigate(
        &self,
        target: Screen,
        payload: Option<ScreenPayload>,
    ) -> Result<Navigation> {
        let navigation = self.shell.write().await.navigate(target, payload)?;
        self.publish_navigation(&navigation);
        Ok(navigation)
    }

    fn publish_navigation(&self, navigation: &Navigation) {
        match &navigation.outcome {
            NavigationOutcome::Moved { from, to } => {
                self.publish(ShowroomEvent::ScreenChanged { from: *from, to: *to });
            }
            NavigationOutcome::Denied(denial) => {
                self.publish(ShowroomEvent::NavigationDenied {
                    denial: denial.clone(),
                });
            }
        }
        self.apply_effects(navigation.effects.clone());
    }

    /// String-keyed navigation: `fields` is a flat JSON object decoded for
    /// the section of the screen being left.
    ///
    /// Decoding and navigation happen under one write lock, so a scheduled
    /// transition cannot change the screen in between.
    pub async fn navigate_named(&self, screen: &str, fields: Option<Value>) -> Result<Navigation> {
        let target = Screen::parse(screen)?;
        let navigation = {
            let mut shell = self.shell.write().await;
            let payload = fields
                .map(|fields| ScreenPayload::from_fields(shell.current_screen(), fields))
                .transpose()?;
            shell.navigate(target, payload)?
        };
        self.publish_navigation(&navigation);
        Ok(navigation)
    }

    /// Folds `payload` into the current screen's section without navigating.
    pub async fn update(&self, payload: ScreenPayload) -> Result<Vec<ShellEffect>> {
        let effects = self.shell.write().await.update(payload)?;
        self.apply_effects(effects.clone());
        Ok(effects)
    }

    /// String-keyed [`update`](Self::update), decoded under the same lock.
    pub async fn update_fields(&self, fields: Value) -> Result<Vec<ShellEffect>> {
        let effects = {
            let mut shell = self.shell.write().await;
            let payload = ScreenPayload::from_fields(shell.current_screen(), fields)?;
            shell.update(payload)?
        };
        self.apply_effects(effects.clone());
        Ok(effects)
    }

    /// Places a cart item on the room plan.
    ///
    /// # Errors
    ///
    /// `Placement` if the item is not in the cart or already placed;
    /// `PayloadSection` when the current screen does not own the furniture
    /// section.
    pub async fn place_item(&self, item_id: &str, position: Position) -> Result<Vec<ShellEffect>> {
        self.edit_layout(|state, layout| {
            if !state.furniture.selected_items.iter().any(|i| i.id == item_id) {
                return Err(A2sError::placement(format!("'{}' is not in the cart", item_id)));
            }
            layout.place(item_id, position)
        })
        .await
    }

    pub async fn move_item(&self, item_id: &str, position: Position) -> Result<Vec<ShellEffect>> {
        self.edit_layout(|_, layout| layout.move_item(item_id, position))
            .await
    }

    pub async fn rotate_item(&self, item_id: &str, quarter_turns: i32) -> Result<Vec<ShellEffect>> {
        self.edit_layout(|_, layout| layout.rotate_item(item_id, quarter_turns).map(|_| ()))
            .await
    }

    pub async fn remove_item(&self, item_id: &str) -> Result<Vec<ShellEffect>> {
        self.edit_layout(|_, layout| layout.remove(item_id).map(|_| ()))
            .await
    }

    pub async fn layout_warnings(&self) -> Vec<LayoutWarning> {
        placement::warnings(self.shell.read().await.state())
    }

    /// Applies `edit` to a copy of the layout and reports the result as a
    /// furniture update. A failed edit leaves the shell untouched.
    async fn edit_layout<F>(&self, edit: F) -> Result<Vec<ShellEffect>>
    where
        F: FnOnce(&AppState, &mut Layout) -> Result<()>,
    {
        let effects = {
            let mut shell = self.shell.write().await;
            let mut layout = shell.state().furniture.layout.clone();
            edit(shell.state(), &mut layout)?;
            shell.update(ScreenPayload::Furniture(FurniturePatch::with_layout(layout)))?
        };
        self.apply_effects(effects.clone());
        Ok(effects)
    }

    /// Starts the simulated room-video upload. When it completes, the shell
    /// navigates onboarding -> room with `preferences`.
    ///
    /// Returns `None` if an upload is already in flight.
    pub fn start_video_upload(&self, preferences: UserPatch) -> Option<TaskId> {
        if self.uploading.swap(true, Ordering::SeqCst) {
            tracing::debug!("[Showroom] Video upload already in progress, ignoring");
            return None;
        }

        let usecase = self.clone();
        let task = self
            .scheduler
            .schedule(TaskKind::VideoUpload, self.simulation.upload_delay(), move || async move {
                usecase.uploading.store(false, Ordering::SeqCst);
                let moved = match usecase
                    .navigate(Screen::Room, Some(ScreenPayload::User(preferences)))
                    .await
                {
                    Ok(navigation) => navigation.outcome.is_moved(),
                    Err(e) => {
                        tracing::warn!("[Showroom] Upload finished but navigation failed: {}", e);
                        false
                    }
                };
                usecase.publish(ShowroomEvent::UploadCompleted { moved });
            });

        tracing::info!("[Showroom] Video upload started ({})", task);
        self.publish(ShowroomEvent::UploadStarted { task });
        Some(task)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Starts a simulated payment for the current cart. Every call schedules
    /// its own payment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if `delivery_slot` is not an offered slot.
    pub async fn submit_payment(&self, method: PaymentMethod, delivery_slot: &str) -> Result<TaskId> {
        if !catalog::DELIVERY_SLOTS.contains(&delivery_slot) {
            return Err(A2sError::invalid_payload(format!(
                "unknown delivery slot '{}'",
                delivery_slot
            )));
        }

        let summary = self.order_summary().await;
        let slot = delivery_slot.to_string();
        let usecase = self.clone();
        let task = self
            .scheduler
            .schedule(TaskKind::Payment, self.simulation.payment_delay(), move || async move {
                let confirmation = OrderConfirmation::new(method, slot, summary, Utc::now());
                tracing::info!(
                    "[Showroom] Payment completed, order {} total {}",
                    confirmation.order_number,
                    confirmation.total()
                );
                usecase.publish(ShowroomEvent::PaymentCompleted { confirmation });
            });

        tracing::info!("[Showroom] Payment via {} started ({})", method, task);
        self.publish(ShowroomEvent::PaymentStarted { task, method });
        Ok(task)
    }

    /// Sends a chat message to the expert. Blank messages are ignored.
    ///
    /// Returns the id of the pending expert reply.
    pub fn send_chat_message(&self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.publish(ShowroomEvent::Chat {
            message: ChatMessage::new(ChatSender::User, text),
        });

        let reply = EXPERT_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default();
        let usecase = self.clone();
        let task = self
            .scheduler
            .schedule(TaskKind::ChatReply, self.simulation.chat_reply_delay(), move || async move {
                usecase.publish(ShowroomEvent::Chat {
                    message: ChatMessage::new(ChatSender::Expert, reply),
                });
            });
        Some(task)
    }

    /// Cancels a pending task. Cancelling an upload releases the upload guard.
    pub fn cancel_task(&self, id: TaskId) -> bool {
        let kind = self
            .scheduler
            .pending()
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| info.kind);

        if !self.scheduler.cancel(id) {
            return false;
        }
        if kind == Some(TaskKind::VideoUpload) {
            self.uploading.store(false, Ordering::SeqCst);
        }
        self.publish(ShowroomEvent::TaskCancelled { task: id });
        true
    }

    pub fn pending_tasks(&self) -> Vec<TaskInfo> {
        self.scheduler.pending()
    }

    /// Waits until no task is pending.
    pub async fn wait_idle(&self) {
        self.scheduler.wait_idle().await;
    }

    /// Cancels every pending task.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
        self.uploading.store(false, Ordering::SeqCst);
    }

    fn apply_effects(&self, effects: Vec<ShellEffect>) {
        for effect in effects {
            match effect {
                ShellEffect::EscalatedToExpert { from } => {
                    self.publish(ShowroomEvent::EscalatedToExpert { from });
                }
                ShellEffect::ScheduleTransition { to, delay } => {
                    let usecase = self.clone();
                    let task = self.scheduler.schedule(
                        TaskKind::ExpertHandoff,
                        delay,
                        move || async move {
                            let (from, effects) = {
                                let mut shell = usecase.shell.write().await;
                                let from = shell.current_screen();
                                (from, shell.complete_scheduled(to))
                            };
                            if from != to {
                                usecase.publish(ShowroomEvent::ScreenChanged { from, to });
                            }
                            usecase.apply_effects(effects);
                        },
                    );
                    self.publish(ShowroomEvent::HandoffScheduled { task, to, delay });
                }
            }
        }
    }

    fn publish(&self, event: ShowroomEvent) {
        // No receiver means nobody is listening; the state is still correct.
        if self.events.send(event).is_err() {
            tracing::trace!("[Showroom] Event dropped, receiver closed");
        }
    }
}
