use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::users;
use crate::users::{Result, UserError};

use super::users_model::{NewUser, User, UserDB};

/// Repository for managing user records in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts a new user record
    pub fn create(&self, new_user: NewUser) -> Result<User> {
        let mut user_db: UserDB = new_user.into();
        user_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;

        diesel::insert_into(users::table)
            .values(&user_db)
            .execute(&mut conn)?;

        Ok(user_db.into())
    }

    /// Resolves an authenticated username to a user record
    pub fn get_by_username(&self, username: &str) -> Result<User> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| UserError::DatabaseError(e.to_string()))?;
        self.get_by_username_in_transaction(username, &mut conn)
    }

    pub fn get_by_username_in_transaction(
        &self,
        username: &str,
        conn: &mut SqliteConnection,
    ) -> Result<User> {
        let user = users::table
            .filter(users::username.eq(username))
            .first::<UserDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UserError::NotFound(format!("User '{}' not found", username))
                }
                _ => UserError::DatabaseError(e.to_string()),
            })?;

        Ok(user.into())
    }

    /// Writes the aggregate fields updated by a challenge completion
    pub fn apply_completion_in_transaction(
        &self,
        user_id: &str,
        saved_amount: Decimal,
        streak: i64,
        streak_start: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        let affected = diesel::update(users::table.find(user_id))
            .set((
                users::saved_amount.eq(saved_amount.to_string()),
                users::streak.eq(streak),
                users::streak_start.eq(streak_start),
                users::updated_at.eq(now),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(UserError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        Ok(())
    }
}
