use std::sync::Arc;

use sparesti_core::db::{self, DbPool};
use sparesti_core::users::{NewUser, User, UserService};

/// Creates a throwaway file-backed database with migrations applied
pub fn setup_test_db() -> Arc<DbPool> {
    let dir = std::env::temp_dir().join(format!("sparesti-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create test directory");

    let db_path = db::init(dir.to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    pool
}

/// Registers a user with an empty aggregate
pub fn seed_user(pool: &Arc<DbPool>, username: &str) -> User {
    UserService::new(pool.clone())
        .register_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
        })
        .expect("Failed to register user")
}
