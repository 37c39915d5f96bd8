mod commands;
mod helper;
mod render;

use a2s_application::ShowroomUseCase;
use a2s_core::catalog::{self, DELIVERY_SLOTS};
use a2s_execution::WorkflowEventLayer;
use a2s_infrastructure::TomlConfigRepository;
use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::helper::CliHelper;

/// Interactive showroom session.
///
/// 1. Installs tracing with the workflow event layer so shell decisions print inline
/// 2. Loads the config and builds the use case
/// 3. Prints showroom events from a background task
/// 4. Reads slash commands until `quit` or EOF
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Logging =====
    let (log_tx, mut log_rx) = mpsc::unbounded_channel();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(WorkflowEventLayer::new(log_tx))
        .init();

    // ===== Backend Initialization =====
    let repository = TomlConfigRepository::new()?;
    tracing::debug!("[REPL] Config file: {}", repository.path().display());
    let (usecase, mut event_rx) = ShowroomUseCase::bootstrap(&repository).await?;

    let printer = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(event) = event_rx.recv() => render::event(&event),
                Some(log) = log_rx.recv() => render::log_event(&log),
                else => break,
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== A2S Showroom ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/upload 30000 bedroom' to begin, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let prompt = format!("{}> ", usecase.current_screen().await);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                match commands::parse(trimmed) {
                    Ok(command) => {
                        if let Err(e) = run(&usecase, command).await {
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                    Err(e) => eprintln!("{}", format!("{:#}", e).red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    usecase.shutdown().await;
    drop(usecase);
    printer.abort();
    let _ = printer.await;

    Ok(())
}

async fn run(usecase: &ShowroomUseCase, command: Command) -> a2s_core::Result<()> {
    match command {
        Command::Go { screen, fields } => {
            let navigation = usecase.navigate_named(&screen, fields).await?;
            if navigation.current == a2s_core::Screen::Checkout && navigation.outcome.is_moved() {
                render::summary(&usecase.order_summary().await);
            }
        }
        Command::Update(fields) => {
            usecase.update_fields(fields).await?;
        }
        Command::Status => {
            render::snapshot(&usecase.snapshot().await);
            render::summary(&usecase.order_summary().await);
        }
        Command::Gates => {
            let current = usecase.current_screen().await;
            render::gates(&usecase.gate_report().await, current);
        }
        Command::Catalog { category, query } => {
            render::catalog(&catalog::search(&query, &category));
        }
        Command::Experts => render::experts(),
        Command::Vendors { item } => render::vendors(item.as_deref()),
        Command::Layout => {
            render::layout(&usecase.snapshot().await.state, &usecase.layout_warnings().await);
        }
        Command::Place { item, position } => {
            usecase.place_item(&item, position).await?;
            render::warnings(&usecase.layout_warnings().await);
        }
        Command::Move { item, position } => {
            usecase.move_item(&item, position).await?;
            render::warnings(&usecase.layout_warnings().await);
        }
        Command::Rotate { item, turns } => {
            usecase.rotate_item(&item, turns).await?;
            render::warnings(&usecase.layout_warnings().await);
        }
        Command::Remove(item) => {
            usecase.remove_item(&item).await?;
        }
        Command::Upload(preferences) => {
            if usecase.start_video_upload(preferences).is_none() {
                println!("{}", "An upload is already in progress".yellow());
            }
        }
        Command::Pay { method, slot } => {
            usecase.submit_payment(method, DELIVERY_SLOTS[slot]).await?;
        }
        Command::Chat(text) => {
            if usecase.send_chat_message(&text).is_none() {
                println!("{}", "Type a message after /chat".bright_black());
            }
        }
        Command::Tasks => render::tasks(&usecase.pending_tasks()),
        Command::Cancel(id) => {
            if !usecase.cancel_task(id) {
                println!("{}", format!("No pending task {}", id).yellow());
            }
        }
        Command::Help => println!("{}", commands::HELP),
    }
    Ok(())
}
