//! End-to-end booking flows through the handlers, with all repositories
//! in memory and time pinned by a fixed clock.

use std::sync::Arc;

use expert_hours::adapters::memory::{
    FixedClock, InMemoryDayOverrideRepository, InMemoryExpertCatalog,
    InMemoryFeedbackRepository, InMemoryPayoutRepository, InMemoryPurchaseRepository,
    InMemorySessionRepository, InMemoryWindowSetRepository,
};
use expert_hours::application::handlers::availability::{
    AddWindowCommand, AddWindowHandler, SetDayOverrideCommand, SetDayOverrideHandler,
};
use expert_hours::application::handlers::billing::{RecordPayoutCommand, RecordPayoutHandler};
use expert_hours::application::handlers::booking::{
    BookSlotsCommand, BookSlotsHandler, CancelActor, CancelSessionCommand, CancelSessionHandler,
    PurchasePackageCommand, PurchasePackageHandler,
};
use expert_hours::application::handlers::feedback::{
    SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use expert_hours::application::queries::{
    EarningsQuery, EarningsQueryHandler, FreeSlotsQuery, FreeSlotsQueryHandler,
};
use expert_hours::domain::expert::{Expert, ExpertDomain};
use expert_hours::domain::foundation::{
    DateKey, DomainError, ErrorCode, ExpertId, Timestamp, UserId,
};

/// Everything wired against shared in-memory stores.
struct App {
    clock: Arc<FixedClock>,
    purchase_package: PurchasePackageHandler,
    book_slots: BookSlotsHandler,
    cancel_session: CancelSessionHandler,
    add_window: AddWindowHandler,
    set_day_override: SetDayOverrideHandler,
    record_payout: RecordPayoutHandler,
    submit_feedback: SubmitFeedbackHandler,
    free_slots: FreeSlotsQueryHandler,
    earnings: EarningsQueryHandler,
    expert_id: ExpertId,
}

fn weekday_expert() -> Expert {
    Expert::new(
        ExpertId::new(),
        "Nikhil Sharma".to_string(),
        ExpertDomain::Cybersecurity,
        "Security reviews for small businesses.".to_string(),
        "8 years".to_string(),
        4.7,
        1500,
        540,  // 09:00
        1020, // 17:00
        vec![1, 2, 3, 4, 5],
    )
    .unwrap()
}

fn app_at(now: Timestamp) -> App {
    let expert = weekday_expert();
    let expert_id = *expert.id();

    let experts = Arc::new(InMemoryExpertCatalog::with_experts(vec![expert]));
    let purchases = Arc::new(InMemoryPurchaseRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let day_overrides = Arc::new(InMemoryDayOverrideRepository::new());
    let window_sets = Arc::new(InMemoryWindowSetRepository::new());
    let payouts = Arc::new(InMemoryPayoutRepository::new());
    let feedback = Arc::new(InMemoryFeedbackRepository::new());
    let clock = Arc::new(FixedClock::at(now));

    App {
        purchase_package: PurchasePackageHandler::new(
            experts.clone(),
            purchases.clone(),
            clock.clone(),
        ),
        book_slots: BookSlotsHandler::new(
            experts.clone(),
            purchases.clone(),
            sessions.clone(),
            day_overrides.clone(),
            window_sets.clone(),
            clock.clone(),
        ),
        cancel_session: CancelSessionHandler::new(
            sessions.clone(),
            purchases.clone(),
            clock.clone(),
        ),
        add_window: AddWindowHandler::new(
            experts.clone(),
            sessions.clone(),
            window_sets.clone(),
        ),
        set_day_override: SetDayOverrideHandler::new(experts.clone(), day_overrides.clone()),
        record_payout: RecordPayoutHandler::new(experts.clone(), payouts.clone(), clock.clone()),
        submit_feedback: SubmitFeedbackHandler::new(
            purchases.clone(),
            sessions.clone(),
            feedback.clone(),
            clock.clone(),
        ),
        free_slots: FreeSlotsQueryHandler::new(
            experts.clone(),
            sessions.clone(),
            day_overrides.clone(),
            window_sets.clone(),
            clock.clone(),
        ),
        earnings: EarningsQueryHandler::new(experts, sessions, payouts, clock.clone()),
        clock,
        expert_id,
    }
}

fn client() -> UserId {
    UserId::new("client-1").unwrap()
}

fn monday() -> DateKey {
    DateKey::from_ymd(2025, 3, 10).unwrap()
}

/// The Friday morning before the booked Monday.
fn friday_before() -> Timestamp {
    DateKey::from_ymd(2025, 3, 7).unwrap().instant_at(540)
}

#[tokio::test]
async fn full_weekday_grid_is_sixteen_slots() {
    let app = app_at(friday_before());

    let slots = app
        .free_slots
        .handle(FreeSlotsQuery {
            expert_id: app.expert_id,
            date: monday(),
        })
        .await
        .unwrap();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots.first().unwrap().start, "09:00");
    assert_eq!(slots.last().unwrap().start, "16:30");
}

#[tokio::test]
async fn booked_slot_disappears_from_the_listing() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    app.book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600],
        })
        .await
        .unwrap();

    let slots = app
        .free_slots
        .handle(FreeSlotsQuery {
            expert_id: app.expert_id,
            date: monday(),
        })
        .await
        .unwrap();

    assert_eq!(slots.len(), 15);
    assert!(slots.iter().all(|s| s.start != "10:00"));
}

#[tokio::test]
async fn day_off_override_empties_the_listing_unless_windows_exist() {
    let app = app_at(friday_before());

    app.set_day_override
        .handle(SetDayOverrideCommand {
            expert_id: app.expert_id,
            date: monday(),
            hours: None,
        })
        .await
        .unwrap();

    let query = FreeSlotsQuery {
        expert_id: app.expert_id,
        date: monday(),
    };
    assert!(app.free_slots.handle(query.clone()).await.unwrap().is_empty());

    // Explicit windows outrank the day-off override.
    app.add_window
        .handle(AddWindowCommand {
            expert_id: app.expert_id,
            date: monday(),
            start: "14:00".to_string(),
            end: "15:00".to_string(),
        })
        .await
        .unwrap();

    let slots = app.free_slots.handle(query).await.unwrap();
    let starts: Vec<&str> = slots.iter().map(|s| s.start.as_str()).collect();
    assert_eq!(starts, vec!["14:00", "14:30"]);
}

#[tokio::test]
async fn one_hour_package_covers_exactly_two_slots() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    let result = app
        .book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600, 630],
        })
        .await
        .unwrap();
    assert_eq!(result.hours_remaining, 0.0);

    let third = app
        .book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![660],
        })
        .await;
    assert!(matches!(
        third,
        Err(DomainError { code: ErrorCode::InsufficientHours, .. })
    ));
}

#[tokio::test]
async fn cancellation_thirty_hours_ahead_refunds_the_half_hour() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    let booked = app
        .book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600],
        })
        .await
        .unwrap()
        .sessions;

    // 30 hours before the Monday 10:00 start.
    app.clock.set(monday().instant_at(600).plus_hours(-30));

    let result = app
        .cancel_session
        .handle(CancelSessionCommand {
            session_id: *booked[0].id(),
            actor: CancelActor::Client(client()),
            reason: "conflict".to_string(),
        })
        .await
        .unwrap();

    assert!(result.session.is_cancelled());
    assert_eq!(result.hours_refunded, 0.5);
    assert_eq!(result.hours_remaining, 1.0);

    // The slot is bookable again.
    let slots = app
        .free_slots
        .handle(FreeSlotsQuery {
            expert_id: app.expert_id,
            date: monday(),
        })
        .await
        .unwrap();
    assert!(slots.iter().any(|s| s.start == "10:00"));
}

#[tokio::test]
async fn late_cancellation_is_refused() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    let booked = app
        .book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600],
        })
        .await
        .unwrap()
        .sessions;

    // 23 hours and 59 minutes before start: one minute too late.
    app.clock
        .set(monday().instant_at(600).plus_hours(-24).plus_minutes(1));

    let result = app
        .cancel_session
        .handle(CancelSessionCommand {
            session_id: *booked[0].id(),
            actor: CancelActor::Client(client()),
            reason: "conflict".to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(DomainError { code: ErrorCode::CancellationWindowClosed, .. })
    ));
}

#[tokio::test]
async fn two_clients_racing_for_one_slot_get_one_winner() {
    let app = Arc::new(app_at(friday_before()));
    let other = UserId::new("client-2").unwrap();

    let mut purchase_ids = Vec::new();
    for user in [client(), other.clone()] {
        let purchase = app
            .purchase_package
            .handle(PurchasePackageCommand {
                user_id: user,
                expert_id: app.expert_id,
                package_hours: 1,
            })
            .await
            .unwrap()
            .purchase;
        purchase_ids.push(*purchase.id());
    }

    let first = app.book_slots.handle(BookSlotsCommand {
        user_id: client(),
        purchase_id: purchase_ids[0],
        date: monday(),
        start_mins: vec![600],
    });
    let second = app.book_slots.handle(BookSlotsCommand {
        user_id: other,
        purchase_id: purchase_ids[1],
        date: monday(),
        start_mins: vec![600],
    });

    let (a, b) = tokio::join!(first, second);
    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    let loser = if a.is_err() { a } else { b };
    assert!(matches!(
        loser,
        Err(DomainError { code: ErrorCode::NoAvailableSlots, .. })
    ));
}

#[tokio::test]
async fn feedback_opens_only_after_hours_spent_and_sessions_done() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    app.book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600, 630],
        })
        .await
        .unwrap();

    let cmd = SubmitFeedbackCommand {
        user_id: client(),
        purchase_id: *purchase.id(),
        rating: Some(5),
        text: Some("Sharp and practical".to_string()),
    };

    // Sessions still ahead: gate closed.
    let early = app.submit_feedback.handle(cmd.clone()).await;
    assert!(matches!(
        early,
        Err(DomainError { code: ErrorCode::ValidationFailed, .. })
    ));

    // After the Monday sessions have run.
    app.clock.set(monday().instant_at(700));
    app.submit_feedback.handle(cmd.clone()).await.unwrap();

    // Only once.
    let again = app.submit_feedback.handle(cmd).await;
    assert!(matches!(
        again,
        Err(DomainError { code: ErrorCode::DuplicateFeedback, .. })
    ));
}

#[tokio::test]
async fn earnings_follow_completed_sessions_and_payouts() {
    let app = app_at(friday_before());
    let purchase = app
        .purchase_package
        .handle(PurchasePackageCommand {
            user_id: client(),
            expert_id: app.expert_id,
            package_hours: 1,
        })
        .await
        .unwrap()
        .purchase;

    app.book_slots
        .handle(BookSlotsCommand {
            user_id: client(),
            purchase_id: *purchase.id(),
            date: monday(),
            start_mins: vec![600, 630],
        })
        .await
        .unwrap();

    // Before the sessions run, nothing is earned.
    let before = app
        .earnings
        .handle(EarningsQuery {
            expert_id: app.expert_id,
        })
        .await
        .unwrap();
    assert_eq!(before.earned, 0.0);
    assert_eq!(before.due, 0.0);

    // After both half hours: 1.0h x 1500.
    app.clock.set(monday().instant_at(700));
    app.record_payout
        .handle(RecordPayoutCommand {
            expert_id: app.expert_id,
            amount: 1000,
            note: None,
        })
        .await
        .unwrap();

    let after = app
        .earnings
        .handle(EarningsQuery {
            expert_id: app.expert_id,
        })
        .await
        .unwrap();
    assert_eq!(after.hours_completed, 1.0);
    assert_eq!(after.earned, 1500.0);
    assert_eq!(after.paid, 1000);
    assert_eq!(after.due, 500.0);
}
