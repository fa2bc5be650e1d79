use chrono::NaiveDateTime;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::users_model::{NewUser, User};
use super::users_repository::UserRepository;
use super::users_service::UserService;

/// Trait defining the contract for user repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn create(&self, new_user: NewUser) -> super::Result<User>;
    fn get_by_username(&self, username: &str) -> super::Result<User>;
    fn get_by_username_in_transaction(
        &self,
        username: &str,
        conn: &mut SqliteConnection,
    ) -> super::Result<User>;
    fn apply_completion_in_transaction(
        &self,
        user_id: &str,
        saved_amount: Decimal,
        streak: i64,
        streak_start: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> super::Result<()>;
}

/// Trait defining the contract for user service operations.
pub trait UserServiceTrait: Send + Sync {
    fn register_user(&self, new_user: NewUser) -> crate::Result<User>;
    fn get_user(&self, username: &str) -> crate::Result<User>;
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, new_user: NewUser) -> super::Result<User> {
        self.create(new_user)
    }

    fn get_by_username(&self, username: &str) -> super::Result<User> {
        self.get_by_username(username)
    }

    fn get_by_username_in_transaction(
        &self,
        username: &str,
        conn: &mut SqliteConnection,
    ) -> super::Result<User> {
        self.get_by_username_in_transaction(username, conn)
    }

    fn apply_completion_in_transaction(
        &self,
        user_id: &str,
        saved_amount: Decimal,
        streak: i64,
        streak_start: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> super::Result<()> {
        self.apply_completion_in_transaction(user_id, saved_amount, streak, streak_start, conn)
    }
}

impl UserServiceTrait for UserService {
    fn register_user(&self, new_user: NewUser) -> crate::Result<User> {
        self.register_user(new_user)
    }

    fn get_user(&self, username: &str) -> crate::Result<User> {
        self.get_user(username)
    }
}
