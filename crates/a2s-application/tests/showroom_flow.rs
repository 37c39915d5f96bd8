use std::time::Duration;

use a2s_application::{ChatSender, ShowroomEvent, ShowroomUseCase};
use a2s_core::catalog::{self, EXPERT_REPLIES};
use a2s_core::config::{ConfigRepository, ShowroomConfig};
use a2s_core::placement::{Position, WarningKind};
use a2s_core::pricing::PaymentMethod;
use a2s_core::state::{
    CartItem, ExpertPatch, FurniturePatch, RoomPatch, RoomType, ScreenPayload, UserPatch,
};
use a2s_core::{Result, Screen};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

fn drain(rx: &mut UnboundedReceiver<ShowroomEvent>) -> Vec<ShowroomEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn preferences(budget: f64) -> UserPatch {
    UserPatch {
        budget: Some(budget),
        room_type: Some(RoomType::Bedroom),
        style_preference: None,
    }
}

fn cart() -> Vec<CartItem> {
    ["oak-study-table", "ergonomic-chair", "modern-floor-lamp"]
        .iter()
        .filter_map(|id| catalog::find(id))
        .map(CartItem::from)
        .collect()
}

/// Walks a fresh session up to the placement screen with `cart()` selected.
async fn walk_to_placement(usecase: &ShowroomUseCase) {
    let steps = [
        (Screen::Room, ScreenPayload::User(preferences(30000.0))),
        (
            Screen::Catalog,
            ScreenPayload::Room(RoomPatch {
                layout_3d_generated: Some(true),
            }),
        ),
        (Screen::Placement, ScreenPayload::Furniture(FurniturePatch::from_cart(cart()))),
    ];
    for (target, payload) in steps {
        let navigation = usecase.navigate(target, Some(payload)).await.unwrap();
        assert!(navigation.outcome.is_moved(), "blocked before {}", target);
    }
}

/// Walks a fresh session up to the expert screen with one item placed.
async fn walk_to_expert(usecase: &ShowroomUseCase) {
    walk_to_placement(usecase).await;
    let navigation = usecase
        .navigate(Screen::Expert, Some(ScreenPayload::Furniture(FurniturePatch::placed(1))))
        .await
        .unwrap();
    assert!(navigation.outcome.is_moved(), "blocked before expert");
}

async fn complete_consultation(usecase: &ShowroomUseCase) {
    usecase
        .update(ScreenPayload::Expert(ExpertPatch {
            consultation_completed: Some(true),
        }))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_video_upload_moves_to_room_once() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());

    assert!(usecase.start_video_upload(preferences(30000.0)).is_some());
    assert!(usecase.start_video_upload(preferences(50000.0)).is_none());
    assert!(usecase.is_uploading());

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(usecase.current_screen().await, Screen::Onboarding);

    usecase.wait_idle().await;
    let snapshot = usecase.snapshot().await;
    assert_eq!(snapshot.current_screen, Screen::Room);
    assert_eq!(snapshot.state.user.budget, 30000.0);
    assert!(!usecase.is_uploading());

    let events = drain(&mut rx);
    assert!(matches!(events[0], ShowroomEvent::UploadStarted { .. }));
    assert!(events.contains(&ShowroomEvent::ScreenChanged {
        from: Screen::Onboarding,
        to: Screen::Room
    }));
    assert_eq!(events.last(), Some(&ShowroomEvent::UploadCompleted { moved: true }));
}

#[tokio::test(start_paused = true)]
async fn test_upload_without_budget_stays_on_onboarding() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());

    usecase.start_video_upload(preferences(0.0));
    usecase.wait_idle().await;

    assert_eq!(usecase.current_screen().await, Screen::Onboarding);
    let events = drain(&mut rx);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ShowroomEvent::NavigationDenied { denial } if denial.target == Screen::Room))
    );
    assert_eq!(events.last(), Some(&ShowroomEvent::UploadCompleted { moved: false }));

    // The guard is released, so the user can retry.
    assert!(usecase.start_video_upload(preferences(30000.0)).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_consultation_hands_off_to_vendor() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_expert(&usecase).await;

    let effects = usecase
        .update(ScreenPayload::Expert(ExpertPatch {
            consultation_completed: Some(true),
        }))
        .await
        .unwrap();
    assert_eq!(effects.len(), 1);
    assert_eq!(usecase.pending_tasks().len(), 1);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(usecase.current_screen().await, Screen::Expert);

    usecase.wait_idle().await;
    let snapshot = usecase.snapshot().await;
    assert_eq!(snapshot.current_screen, Screen::Vendor);
    // Automatic transitions are not recorded as completed steps.
    assert_eq!(snapshot.state.workflow.completed_steps.len(), 4);

    let events = drain(&mut rx);
    assert!(events.contains(&ShowroomEvent::ScreenChanged {
        from: Screen::Expert,
        to: Screen::Vendor
    }));
    let handoffs = events
        .iter()
        .filter(|e| matches!(e, ShowroomEvent::HandoffScheduled { .. }))
        .count();
    assert_eq!(handoffs, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_handoff_never_fires() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_expert(&usecase).await;
    usecase
        .update(ScreenPayload::Expert(ExpertPatch {
            consultation_completed: Some(true),
        }))
        .await
        .unwrap();

    let task = drain(&mut rx)
        .into_iter()
        .find_map(|e| match e {
            ShowroomEvent::HandoffScheduled { task, .. } => Some(task),
            _ => None,
        })
        .unwrap();

    assert!(usecase.cancel_task(task));
    usecase.wait_idle().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(usecase.current_screen().await, Screen::Expert);
    assert_eq!(drain(&mut rx), vec![ShowroomEvent::TaskCancelled { task }]);
}

#[tokio::test(start_paused = true)]
async fn test_payments_are_not_deduplicated() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_expert(&usecase).await;
    drain(&mut rx);

    let slot = catalog::DELIVERY_SLOTS[0];
    usecase.submit_payment(PaymentMethod::Upi, slot).await.unwrap();
    usecase.submit_payment(PaymentMethod::Card, slot).await.unwrap();
    assert!(
        usecase
            .submit_payment(PaymentMethod::Cod, "Next year")
            .await
            .unwrap_err()
            .is_payload_error()
    );

    usecase.wait_idle().await;
    let confirmations: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            ShowroomEvent::PaymentCompleted { confirmation } => Some(confirmation),
            _ => None,
        })
        .collect();

    assert_eq!(confirmations.len(), 2);
    for confirmation in &confirmations {
        assert!(confirmation.order_number.starts_with("A2S-"));
        assert_eq!(confirmation.order_number.len(), 10);
        assert_eq!(confirmation.total(), 15299.0);
        assert_eq!(confirmation.summary.lines.len(), 3);
        assert_eq!(confirmation.delivery_slot, slot);
    }
}

#[tokio::test(start_paused = true)]
async fn test_chat_reply_arrives_after_delay() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());

    assert!(usecase.send_chat_message("   ").is_none());
    assert!(drain(&mut rx).is_empty());

    assert!(usecase.send_chat_message("Does the lamp fit?").is_some());
    let immediate = drain(&mut rx);
    assert_eq!(immediate.len(), 1);
    assert!(matches!(
        &immediate[0],
        ShowroomEvent::Chat { message } if message.sender == ChatSender::User && message.text == "Does the lamp fit?"
    ));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    usecase.wait_idle().await;
    let replies = drain(&mut rx);
    assert!(matches!(
        &replies[..],
        [ShowroomEvent::Chat { message }]
            if message.sender == ChatSender::Expert && EXPERT_REPLIES.contains(&message.text.as_str())
    ));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_work() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());
    usecase.start_video_upload(preferences(30000.0));
    usecase.send_chat_message("hello");

    usecase.shutdown().await;
    assert!(usecase.pending_tasks().is_empty());
    assert!(!usecase.is_uploading());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(usecase.current_screen().await, Screen::Onboarding);
    assert!(
        !drain(&mut rx)
            .iter()
            .any(|e| matches!(e, ShowroomEvent::UploadCompleted { .. }))
    );
}

struct FixedConfig(ShowroomConfig);

#[async_trait]
impl ConfigRepository for FixedConfig {
    async fn load(&self) -> Result<ShowroomConfig> {
        Ok(self.0.clone())
    }

    async fn save(&self, _config: &ShowroomConfig) -> Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_bootstrap_uses_configured_delays() {
    let mut config = ShowroomConfig::default();
    config.simulation.upload_ms = 100;
    let (usecase, _rx) = ShowroomUseCase::bootstrap(&FixedConfig(config)).await.unwrap();

    usecase.start_video_upload(preferences(30000.0));
    tokio::time::sleep(Duration::from_millis(101)).await;
    usecase.wait_idle().await;

    assert_eq!(usecase.current_screen().await, Screen::Room);
}

#[tokio::test]
async fn test_named_navigation_decodes_fields() {
    let (usecase, _rx) = ShowroomUseCase::new(ShowroomConfig::default());

    let navigation = usecase
        .navigate_named(
            "room",
            Some(serde_json::json!({"budget": 30000, "roomType": "bedroom"})),
        )
        .await
        .unwrap();
    assert!(navigation.outcome.is_moved());

    let err = usecase.navigate_named("garage", None).await.unwrap_err();
    assert!(err.is_unknown_screen());
}

#[tokio::test(start_paused = true)]
async fn test_handoff_after_manual_move_reports_no_transition() {
    let (usecase, mut rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_expert(&usecase).await;
    complete_consultation(&usecase).await;

    let navigation = usecase.navigate(Screen::Vendor, None).await.unwrap();
    assert!(navigation.outcome.is_moved());
    usecase.wait_idle().await;

    assert_eq!(usecase.current_screen().await, Screen::Vendor);
    let changes: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            ShowroomEvent::ScreenChanged { from, to } => Some((from, to)),
            _ => None,
        })
        .filter(|(_, to)| *to == Screen::Vendor)
        .collect();
    assert_eq!(changes, vec![(Screen::Expert, Screen::Vendor)]);
}

#[tokio::test(start_paused = true)]
async fn test_named_navigation_decodes_for_the_screen_it_leaves() {
    let (usecase, _rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_expert(&usecase).await;
    complete_consultation(&usecase).await;
    usecase.wait_idle().await;

    let navigation = usecase
        .navigate_named("checkout", Some(json!({"quotesReceived": 2})))
        .await
        .unwrap();
    assert!(navigation.outcome.is_moved());
    assert_eq!(usecase.snapshot().await.state.vendor.quotes_received, 2);

    let err = usecase
        .update_fields(json!({"quotesReceived": 3}))
        .await
        .unwrap_err();
    assert!(err.is_payload_error());
}

#[tokio::test]
async fn test_layout_edits_drive_placed_count() {
    let (usecase, _rx) = ShowroomUseCase::new(ShowroomConfig::default());
    walk_to_placement(&usecase).await;

    usecase
        .place_item("oak-study-table", Position::new(40.0, 60.0))
        .await
        .unwrap();
    usecase
        .place_item("ergonomic-chair", Position::new(35.0, 45.0))
        .await
        .unwrap();
    let err = usecase
        .place_item("wooden-bookshelf", Position::new(80.0, 20.0))
        .await
        .unwrap_err();
    assert!(err.is_placement_error());
    assert!(usecase.rotate_item("modern-floor-lamp", 1).await.is_err());

    usecase.rotate_item("ergonomic-chair", 3).await.unwrap();
    usecase.rotate_item("ergonomic-chair", 2).await.unwrap();

    let state = usecase.snapshot().await.state;
    assert_eq!(state.furniture.placed_items, 2);
    assert_eq!(
        state.furniture.layout.get("ergonomic-chair").map(|p| p.rotation.degrees()),
        Some(90)
    );

    let warnings = usecase.layout_warnings().await;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::Space);

    usecase
        .move_item("oak-study-table", Position::new(10.0, 20.0))
        .await
        .unwrap();
    assert!(usecase.layout_warnings().await.is_empty());

    usecase.remove_item("ergonomic-chair").await.unwrap();
    assert_eq!(usecase.snapshot().await.state.furniture.placed_items, 1);

    let navigation = usecase.navigate(Screen::Expert, None).await.unwrap();
    assert!(navigation.outcome.is_moved());
    let err = usecase
        .place_item("modern-floor-lamp", Position::default())
        .await
        .unwrap_err();
    assert!(err.is_payload_error());
}
