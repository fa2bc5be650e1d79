mod common;

use rust_decimal::Decimal;

use sparesti_core::users::{NewUser, UserService};
use sparesti_core::ErrorKind;

#[test]
fn registration_starts_with_an_empty_aggregate() {
    let pool = common::setup_test_db();
    let user = common::seed_user(&pool, "alice");

    assert_eq!(user.saved_amount, Decimal::ZERO);
    assert_eq!(user.streak, 0);
    assert!(user.streak_start.is_none());

    let fetched = UserService::new(pool).get_user("alice").unwrap();
    assert_eq!(fetched.id, user.id);
}

#[test]
fn duplicate_username_is_rejected() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = UserService::new(pool);

    let err = service
        .register_user(NewUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn duplicate_email_is_rejected() {
    let pool = common::setup_test_db();
    common::seed_user(&pool, "alice");
    let service = UserService::new(pool);

    let err = service
        .register_user(NewUser {
            username: "bob".to_string(),
            email: "alice@example.com".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn malformed_registration_is_rejected() {
    let pool = common::setup_test_db();
    let service = UserService::new(pool);

    let err = service
        .register_user(NewUser {
            username: "  ".to_string(),
            email: "x@example.com".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);

    let err = service
        .register_user(NewUser {
            username: "carol".to_string(),
            email: "not-an-email".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadInput);
}

#[test]
fn unknown_user_lookup_is_not_found() {
    let pool = common::setup_test_db();
    let err = UserService::new(pool).get_user("ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
