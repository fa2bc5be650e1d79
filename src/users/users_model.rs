use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

/// Domain model representing a user of the system.
///
/// `saved_amount`, `streak` and `streak_start` are the aggregate fields;
/// they are mutated only as a side effect of challenge completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub saved_amount: Decimal,
    pub streak: i64,
    pub streak_start: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Validates the new user data
    pub fn validate(&self) -> crate::Result<()> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            ))
            .into());
        }
        Ok(())
    }
}

/// Database model for users
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub saved_amount: String,
    pub streak: i64,
    pub streak_start: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            saved_amount: Decimal::from_str(&db.saved_amount).unwrap_or_default(),
            streak: db.streak,
            streak_start: db.streak_start,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            username: domain.username,
            email: domain.email,
            saved_amount: Decimal::ZERO.to_string(),
            streak: 0,
            streak_start: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// New streak state produced by [`advance_streak`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: i64,
    pub streak_start: NaiveDateTime,
}

/// Advances or resets a user's streak for a completion happening at `now`.
///
/// Windows are counted from `streak_start` in steps of `window`. A streak of
/// `n` means windows `0..n` each saw at least one completion. Completing again
/// inside an already-counted window leaves the streak unchanged; completing in
/// window `n` extends it; anything later means a window was missed and the
/// streak restarts at 1 with `now` as the new origin.
pub fn advance_streak(
    streak: i64,
    streak_start: Option<NaiveDateTime>,
    now: NaiveDateTime,
    window: Duration,
) -> StreakUpdate {
    match streak_start {
        Some(start) if streak > 0 && now >= start => {
            let elapsed = now.signed_duration_since(start);
            let windows = elapsed
                .num_seconds()
                .div_euclid(window.num_seconds().max(1));
            if windows < streak {
                StreakUpdate {
                    streak,
                    streak_start: start,
                }
            } else if windows == streak {
                StreakUpdate {
                    streak: streak + 1,
                    streak_start: start,
                }
            } else {
                StreakUpdate {
                    streak: 1,
                    streak_start: now,
                }
            }
        }
        _ => StreakUpdate {
            streak: 1,
            streak_start: now,
        },
    }
}
