mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sparesti_core::badges::BadgeService;
use sparesti_core::challenges::{
    ChallengePolicy, ChallengeService, ChallengeUpdate, NewChallenge,
};
use sparesti_core::models::PageRequest;
use sparesti_core::users::UserService;
use sparesti_core::ErrorKind;

fn new_challenge(title: &str, target: Decimal, saved: Decimal) -> NewChallenge {
    NewChallenge {
        id: None,
        title: title.to_string(),
        description: Some("skip the morning latte".to_string()),
        challenge_type: "COFFEE".to_string(),
        target,
        saved,
    }
}

#[test]
fn create_challenge_starts_empty_and_active() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("No takeaway coffee", dec!(250), Decimal::ZERO), "alice")
        .unwrap();

    assert!(!challenge.id.is_empty());
    assert_eq!(challenge.saved, Decimal::ZERO);
    assert_eq!(challenge.completion, Decimal::ZERO);
    assert!(challenge.completed_on.is_none());

    let fetched = service.get_challenge(&challenge.id, "alice").unwrap();
    assert_eq!(fetched.title, "No takeaway coffee");
}

#[test]
fn create_rejects_non_positive_target_and_blank_title() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let err = service
        .create_challenge(new_challenge("Zero target", Decimal::ZERO, Decimal::ZERO), "alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);

    let err = service
        .create_challenge(new_challenge("  ", dec!(100), Decimal::ZERO), "alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);

    let err = service
        .create_challenge(new_challenge("Negative saved", dec!(100), dec!(-1)), "alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);
}

#[test]
fn update_recomputes_completion_percentage() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("Brown bag lunch", dec!(250), Decimal::ZERO), "alice")
        .unwrap();

    let update = ChallengeUpdate {
        title: challenge.title.clone(),
        description: challenge.description.clone(),
        challenge_type: challenge.challenge_type.clone(),
        target: dec!(250),
        saved: dec!(250),
    };
    let updated = service
        .update_challenge(&challenge.id, update, "alice")
        .unwrap();

    assert_eq!(updated.saved, dec!(250));
    assert_eq!(updated.completion, dec!(100.00));
    assert!(updated.completed_on.is_none());

    let update = ChallengeUpdate {
        title: updated.title.clone(),
        description: updated.description.clone(),
        challenge_type: updated.challenge_type.clone(),
        target: dec!(300),
        saved: dec!(100),
    };
    let updated = service
        .update_challenge(&challenge.id, update, "alice")
        .unwrap();
    assert_eq!(updated.completion, dec!(33.33));
}

#[test]
fn completion_applies_aggregate_and_streak_once() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let users = UserService::new(pool.clone());
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("Cook at home", dec!(250), dec!(250)), "alice")
        .unwrap();

    let completed = service.complete_challenge(&challenge.id, "alice").unwrap();
    assert!(completed.completed_on.is_some());

    let user = users.get_user("alice").unwrap();
    assert_eq!(user.saved_amount, dec!(250));
    assert_eq!(user.streak, 1);
    assert!(user.streak_start.is_some());

    // second completion of the same challenge must not double-count
    let err = service.complete_challenge(&challenge.id, "alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyCompleted);

    let user = users.get_user("alice").unwrap();
    assert_eq!(user.saved_amount, dec!(250));
    assert_eq!(user.streak, 1);
}

#[test]
fn completions_inside_one_window_keep_the_streak() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let users = UserService::new(pool.clone());
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let first = service
        .create_challenge(new_challenge("First", dec!(100), dec!(100)), "alice")
        .unwrap();
    let second = service
        .create_challenge(new_challenge("Second", dec!(50), dec!(50)), "alice")
        .unwrap();

    service.complete_challenge(&first.id, "alice").unwrap();
    service.complete_challenge(&second.id, "alice").unwrap();

    let user = users.get_user("alice").unwrap();
    assert_eq!(user.saved_amount, dec!(150));
    assert_eq!(user.streak, 1);
}

#[test]
fn update_of_completed_challenge_is_rejected() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("Frozen", dec!(100), dec!(100)), "alice")
        .unwrap();
    service.complete_challenge(&challenge.id, "alice").unwrap();

    let update = ChallengeUpdate {
        title: "Rewritten".to_string(),
        description: None,
        challenge_type: "COFFEE".to_string(),
        target: dec!(200),
        saved: dec!(10),
    };
    let err = service
        .update_challenge(&challenge.id, update, "alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyCompleted);

    let unchanged = service.get_challenge(&challenge.id, "alice").unwrap();
    assert_eq!(unchanged.title, "Frozen");
    assert_eq!(unchanged.completion, dec!(100.00));
}

#[test]
fn challenges_are_invisible_to_other_users() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    common::seed_user(&pool, "bob");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("Private", dec!(100), Decimal::ZERO), "alice")
        .unwrap();

    let err = service.get_challenge(&challenge.id, "bob").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let update = ChallengeUpdate {
        title: "Hijacked".to_string(),
        description: None,
        challenge_type: "COFFEE".to_string(),
        target: dec!(100),
        saved: dec!(50),
    };
    let err = service
        .update_challenge(&challenge.id, update, "bob")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.delete_challenge(&challenge.id, "bob").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // still intact for its owner
    let intact = service.get_challenge(&challenge.id, "alice").unwrap();
    assert_eq!(intact.title, "Private");
}

#[test]
fn active_challenge_cap_rejects_and_persists_nothing() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let policy = ChallengePolicy {
        max_active: 2,
        ..ChallengePolicy::default()
    };
    let service = ChallengeService::new(pool, policy);

    service
        .create_challenge(new_challenge("One", dec!(100), Decimal::ZERO), "alice")
        .unwrap();
    let second = service
        .create_challenge(new_challenge("Two", dec!(100), dec!(100)), "alice")
        .unwrap();

    let err = service
        .create_challenge(new_challenge("Three", dec!(100), Decimal::ZERO), "alice")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);

    let all = service
        .get_challenges_by_user("alice", PageRequest::default())
        .unwrap();
    assert_eq!(all.total, 2);

    // completed challenges free up capacity
    service.complete_challenge(&second.id, "alice").unwrap();
    service
        .create_challenge(new_challenge("Three", dec!(100), Decimal::ZERO), "alice")
        .unwrap();
}

#[test]
fn deleting_a_completed_challenge_keeps_the_aggregate() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let users = UserService::new(pool.clone());
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let challenge = service
        .create_challenge(new_challenge("Done and gone", dec!(300), dec!(300)), "alice")
        .unwrap();
    service.complete_challenge(&challenge.id, "alice").unwrap();
    service.delete_challenge(&challenge.id, "alice").unwrap();

    let err = service.get_challenge(&challenge.id, "alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let user = users.get_user("alice").unwrap();
    assert_eq!(user.saved_amount, dec!(300));
}

#[test]
fn completion_awards_badges_up_to_the_new_total() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let badges = BadgeService::new(pool.clone());
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    assert!(badges.get_user_badges("alice").unwrap().is_empty());

    let challenge = service
        .create_challenge(new_challenge("Big push", dec!(600), dec!(600)), "alice")
        .unwrap();
    service.complete_challenge(&challenge.id, "alice").unwrap();

    let earned = badges.get_user_badges("alice").unwrap();
    let names: Vec<&str> = earned.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"First Hundred"));
    assert!(names.contains(&"Piggy Bank"));
    assert!(!names.contains(&"Super Saver"));

    // a later completion must not duplicate already earned badges
    let next = service
        .create_challenge(new_challenge("Next", dec!(100), dec!(100)), "alice")
        .unwrap();
    service.complete_challenge(&next.id, "alice").unwrap();
    assert_eq!(badges.get_user_badges("alice").unwrap().len(), 2);
}

#[test]
fn listing_splits_active_and_completed() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    let done = service
        .create_challenge(new_challenge("Done", dec!(100), dec!(100)), "alice")
        .unwrap();
    service
        .create_challenge(new_challenge("Open", dec!(100), Decimal::ZERO), "alice")
        .unwrap();
    service.complete_challenge(&done.id, "alice").unwrap();

    let active = service
        .get_active_challenges("alice", PageRequest::default())
        .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].title, "Open");

    let completed = service
        .get_completed_challenges("alice", PageRequest::default())
        .unwrap();
    assert_eq!(completed.total, 1);
    assert_eq!(completed.items[0].title, "Done");

    let all = service
        .get_challenges_by_user("alice", PageRequest::default())
        .unwrap();
    assert_eq!(all.total, 2);
}

#[test]
fn pagination_is_stable_and_complete() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = ChallengeService::new(pool, ChallengePolicy::default());

    for i in 0..5 {
        service
            .create_challenge(
                new_challenge(&format!("Challenge {}", i), dec!(100), Decimal::ZERO),
                "alice",
            )
            .unwrap();
    }

    let mut seen = Vec::new();
    for page in 0..3 {
        let result = service
            .get_challenges_by_user("alice", PageRequest { page, size: 2 })
            .unwrap();
        assert_eq!(result.total, 5);
        assert_eq!(result.page, page);
        seen.extend(result.items.into_iter().map(|c| c.id));
    }

    assert_eq!(seen.len(), 5);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5, "pages must not overlap");
}
