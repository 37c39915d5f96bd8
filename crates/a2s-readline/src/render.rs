//! Coloured console output for events, snapshots and catalog listings.

use a2s_application::{ChatSender, ShowroomEvent};
use a2s_core::catalog::{self, CONSULTATION_SLOTS, EXPERTS, FurnitureItem, VENDORS};
use a2s_core::placement::{LayoutWarning, Severity};
use a2s_core::pricing::{BudgetBreakdown, BudgetStatus, OrderSummary};
use a2s_core::state::AppState;
use a2s_core::workflow::ShellSnapshot;
use a2s_core::Screen;
use a2s_execution::{TaskInfo, WorkflowLogEvent};
use colored::Colorize;

pub fn event(event: &ShowroomEvent) {
    match event {
        ShowroomEvent::ScreenChanged { from, to } => {
            println!("{}", format!("Screen: {} -> {}", from, to).bright_green());
        }
        ShowroomEvent::NavigationDenied { denial } => {
            println!("{}", format!("Cannot open {}", denial).yellow());
        }
        ShowroomEvent::EscalatedToExpert { from } => {
            println!(
                "{}",
                format!("Cart is over budget, moved from {} to the design expert", from).bright_yellow()
            );
        }
        ShowroomEvent::HandoffScheduled { task, to, delay } => {
            println!(
                "{}",
                format!("Consultation done, opening {} in {:?} (task {})", to, delay, task).bright_black()
            );
        }
        ShowroomEvent::UploadStarted { task } => {
            println!("{}", format!("Uploading room video... (task {})", task).bright_black());
        }
        ShowroomEvent::UploadCompleted { moved } => {
            if *moved {
                println!("{}", "Upload complete, 3D scan ready".bright_green());
            } else {
                println!("{}", "Upload complete, but onboarding is not finished".yellow());
            }
        }
        ShowroomEvent::PaymentStarted { task, method } => {
            println!(
                "{}",
                format!("Processing {} payment... (task {})", method.label(), task).bright_black()
            );
        }
        ShowroomEvent::PaymentCompleted { confirmation } => {
            println!("{}", "Order placed successfully!".bright_green().bold());
            println!("  Order #{}", confirmation.order_number.bold());
            for line in &confirmation.summary.lines {
                println!("  - {} ({}) ₹{}", line.name, line.vendor, line.price);
            }
            println!("  Total: ₹{}", confirmation.total());
            println!(
                "  Delivery: {} ({}), slot {}",
                confirmation.delivery_window, confirmation.delivery_estimate, confirmation.delivery_slot
            );
        }
        ShowroomEvent::Chat { message } => match message.sender {
            ChatSender::User => println!("{}", format!("[you] {}", message.text).green()),
            ChatSender::Expert => {
                println!("{}", "[expert]".bright_magenta());
                println!("{}", message.text.bright_blue());
            }
        },
        ShowroomEvent::TaskCancelled { task } => {
            println!("{}", format!("Cancelled task {}", task).bright_black());
        }
    }
}

pub fn log_event(event: &WorkflowLogEvent) {
    let line = format!("{} {}", event.level, event.message);
    match event.level.as_str() {
        "WARN" => println!("{}", line.yellow()),
        "ERROR" => println!("{}", line.red()),
        _ => println!("{}", line.bright_black()),
    }
}

pub fn snapshot(snapshot: &ShellSnapshot) {
    let state = &snapshot.state;
    println!("{}", format!("Current screen: {}", snapshot.current_screen).bold());
    println!(
        "  budget ₹{}  room {}  style {}",
        state.user.budget,
        state
            .user
            .room_type
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string()),
        state
            .user
            .style_preference
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  3D layout: {}", state.room.layout_3d_generated);
    println!(
        "  cart: {} item(s), ₹{}, {} placed",
        state.furniture.selected_items.len(),
        state.furniture.total_cost,
        state.furniture.placed_items
    );
    println!(
        "  consultation: {}  quotes: {}",
        state.expert.consultation_completed, state.vendor.quotes_received
    );
    let steps: Vec<String> = state
        .workflow
        .completed_steps
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!("  completed: [{}]", steps.join(", "));

    if let Some(preset) = state.user.room_type.and_then(catalog::preset_for) {
        let fit = if preset.budget_fits(state.user.budget) { "within" } else { "outside" };
        println!(
            "  {} suggests ₹{}-₹{} ({} range)",
            preset.name, preset.suggested_budget_min, preset.suggested_budget_max, fit
        );
    }

    let breakdown = BudgetBreakdown::from_cart(state.user.budget, &state.furniture.selected_items);
    for spend in &breakdown.categories {
        let status = match spend.status() {
            BudgetStatus::Ok => "ok".green(),
            BudgetStatus::Warning => "warning".yellow(),
            BudgetStatus::Over => "over".red(),
        };
        println!(
            "  {:<10} ₹{} of ₹{:.0} {}",
            spend.category, spend.spent, spend.allocated, status
        );
    }
    if !breakdown.categories.is_empty() {
        println!(
            "  ₹{} remaining ({:.0}% used)",
            breakdown.remaining(),
            breakdown.utilization_percent()
        );
    }
}

pub fn layout(state: &AppState, warnings: &[LayoutWarning]) {
    let layout = &state.furniture.layout;
    if layout.is_empty() {
        println!("{}", "Nothing placed yet, try /place <item> <x> <y>".bright_black());
    }
    for placed in layout.items() {
        println!(
            "  {:<20} at {:<10} {}",
            placed.item_id,
            placed.position.to_string(),
            placed.rotation
        );
    }
    println!(
        "  space used: {:.0}%",
        layout.space_usage(state.user.room_type)
    );
    self::warnings(warnings);
}

pub fn warnings(warnings: &[LayoutWarning]) {
    for warning in warnings {
        let line = format!("  ! [{}] {}", warning.kind, warning.message);
        match warning.severity {
            Severity::Error => println!("{}", line.red()),
            Severity::Warning => println!("{}", line.yellow()),
        }
    }
}

pub fn gates(report: &[(Screen, bool)], current: Screen) {
    for (screen, open) in report {
        let marker = if *screen == current { "*" } else { " " };
        let status = if *open { "open".green() } else { "locked".red() };
        println!("{} {:<11} {}", marker, screen.to_string(), status);
    }
}

pub fn catalog(items: &[&FurnitureItem]) {
    if items.is_empty() {
        println!("{}", "No furniture matches".bright_black());
        return;
    }
    for item in items {
        let stock = if item.in_stock { "" } else { " (out of stock)" };
        println!(
            "{:<18} {:<24} ₹{:<6} {} ★{}{}",
            item.id,
            item.name,
            item.price,
            item.vendor,
            item.rating,
            stock.red()
        );
    }
}

pub fn experts() {
    for expert in EXPERTS {
        println!(
            "{} - {} ★{} ({} reviews), ₹{}/session, {}",
            expert.name.bold(),
            expert.title,
            expert.rating,
            expert.reviews,
            expert.price,
            expert.availability
        );
        println!("    {}", expert.specialties.join(", ").bright_black());
    }
    println!("Slots: {}", CONSULTATION_SLOTS.join(" | "));
}

pub fn vendors(item: Option<&str>) {
    for vendor in VENDORS {
        let verified = if vendor.verified { " ✓" } else { "" };
        let open = if vendor.open_now { "open".green() } else { "closed".red() };
        println!(
            "{}{} ({}) ★{}, {} away, {}",
            vendor.name.bold(),
            verified,
            vendor.kind,
            vendor.rating,
            vendor.distance,
            open
        );
        if let Some(item) = item {
            match vendor.quote_for(item) {
                Some(entry) if entry.in_stock => println!("    quote: ₹{}", entry.price),
                Some(entry) => println!("    quote: ₹{} (out of stock)", entry.price),
                None => println!("{}", "    no quote for this item".bright_black()),
            }
        } else if !vendor.offers.is_empty() {
            println!("    {}", vendor.offers.join("; ").bright_black());
        }
    }
}

pub fn summary(summary: &OrderSummary) {
    println!(
        "  subtotal ₹{}  savings ₹{}  total ₹{}  ({:.0}% of budget)",
        summary.subtotal, summary.savings, summary.total, summary.budget_used_percent
    );
}

pub fn tasks(tasks: &[TaskInfo]) {
    if tasks.is_empty() {
        println!("{}", "No pending tasks".bright_black());
    }
    for task in tasks {
        println!("{}  {:<14} {:?}", task.id, task.kind.to_string(), task.delay);
    }
}
