//! `a2s replay`: drive a session from a JSON script.
//!
//! A script is an array of steps. A step with a `screen` navigates there,
//! reporting the optional `payload` for the screen being left. A step
//! without a `screen` folds its `payload` into the current screen.
//!
//! ```json
//! [
//!   {"screen": "room", "payload": {"budget": 30000, "roomType": "bedroom"}},
//!   {"payload": {"layout3DGenerated": true}},
//!   {"screen": "catalog"}
//! ]
//! ```

use std::path::Path;

use a2s_application::{ShowroomEvent, ShowroomUseCase};
use a2s_core::workflow::{NavigationOutcome, ShellSnapshot};
use a2s_core::Screen;
use a2s_infrastructure::TomlConfigRepository;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub screen: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub index: usize,
    pub from: Screen,
    pub current: Screen,
    /// `None` for update-only steps.
    pub outcome: Option<NavigationOutcome>,
    pub events: Vec<ShowroomEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    /// Events from tasks that completed after the last step.
    pub trailing_events: Vec<ShowroomEvent>,
    pub snapshot: ShellSnapshot,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let steps: Vec<Step> = serde_json::from_str(text).context("Script must be a JSON array of steps")?;
    for (i, step) in steps.iter().enumerate() {
        if step.screen.is_none() && step.payload.is_none() {
            bail!("Step {} has neither a screen nor a payload", i + 1);
        }
    }
    Ok(steps)
}

/// Runs every step, then waits for scheduled transitions to settle.
pub async fn execute(
    usecase: &ShowroomUseCase,
    events: &mut UnboundedReceiver<ShowroomEvent>,
    steps: Vec<Step>,
) -> Result<ReplayReport> {
    let mut reports = Vec::with_capacity(steps.len());

    for (i, step) in steps.into_iter().enumerate() {
        let index = i + 1;
        let from = usecase.current_screen().await;
        let outcome = match step.screen {
            Some(screen) => {
                let navigation = usecase
                    .navigate_named(&screen, step.payload)
                    .await
                    .with_context(|| format!("Step {} failed", index))?;
                Some(navigation.outcome)
            }
            None => {
                let payload = step.payload.unwrap_or(Value::Null);
                usecase
                    .update_fields(payload)
                    .await
                    .with_context(|| format!("Step {} failed", index))?;
                None
            }
        };
        tracing::debug!("[Replay] Step {} done", index);

        reports.push(StepReport {
            index,
            from,
            current: usecase.current_screen().await,
            outcome,
            events: drain(events),
        });
    }

    usecase.wait_idle().await;

    Ok(ReplayReport {
        steps: reports,
        trailing_events: drain(events),
        snapshot: usecase.snapshot().await,
    })
}

fn drain(events: &mut UnboundedReceiver<ShowroomEvent>) -> Vec<ShowroomEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

pub async fn run(repository: &TomlConfigRepository, file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let steps = parse_script(&text)?;

    let (usecase, mut events) = ShowroomUseCase::bootstrap(repository).await?;
    let report = execute(&usecase, &mut events, steps).await?;
    usecase.shutdown().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    for step in &report.steps {
        let verdict = match &step.outcome {
            Some(NavigationOutcome::Moved { to, .. }) => format!("moved to {}", to),
            Some(NavigationOutcome::Denied(denial)) => format!("denied, {}", denial),
            None => "updated".to_string(),
        };
        println!("{:>2}. {:<11} {}", step.index, step.from.to_string(), verdict);
        if step.current != step.from && !matches!(step.outcome, Some(NavigationOutcome::Moved { .. })) {
            println!("    now on {}", step.current);
        }
        for event in &step.events {
            if let ShowroomEvent::EscalatedToExpert { from } = event {
                println!("    over budget, escalated from {} to expert", from);
            }
        }
    }

    for event in &report.trailing_events {
        if let ShowroomEvent::ScreenChanged { from, to } = event {
            println!("    scheduled: {} -> {}", from, to);
        }
    }

    let state = &report.snapshot.state;
    let steps: Vec<String> = state
        .workflow
        .completed_steps
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!();
    println!("Final screen: {}", report.snapshot.current_screen);
    println!("Completed steps: [{}]", steps.join(", "));
    println!(
        "Cart: {} item(s), total {}, placed {}",
        state.furniture.selected_items.len(),
        state.furniture.total_cost,
        state.furniture.placed_items
    );
}
