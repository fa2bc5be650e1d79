use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_ACTIVE_CHALLENGES, DEFAULT_STREAK_WINDOW_DAYS};
use crate::errors::ValidationError;
use crate::money;

/// Domain model representing a single savings challenge.
///
/// `completion` is derived from `saved` and `target` and recomputed on every
/// mutation of either; once `completed_on` is set the row is frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target: Decimal,
    pub saved: Decimal,
    pub completion: Decimal,
    pub created_on: NaiveDateTime,
    pub completed_on: Option<NaiveDateTime>,
}

impl Challenge {
    pub fn is_completed(&self) -> bool {
        self.completed_on.is_some()
    }
}

/// Input model for creating a new challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallenge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target: Decimal,
    #[serde(default)]
    pub saved: Decimal,
}

impl NewChallenge {
    /// Validates the new challenge data
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.target <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Challenge target must be positive".to_string(),
            )
            .into());
        }
        if self.saved < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Saved amount cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Input model for updating an active challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeUpdate {
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target: Decimal,
    pub saved: Decimal,
}

impl ChallengeUpdate {
    /// Validates the challenge update data
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.target <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Challenge target must be positive".to_string(),
            )
            .into());
        }
        if self.saved < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Saved amount cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Policy parameters for the challenge lifecycle.
///
/// The streak window length and the active challenge cap are deployment
/// configuration, not invariants; defaults live in `constants`.
#[derive(Debug, Clone, Copy)]
pub struct ChallengePolicy {
    pub max_active: usize,
    pub streak_window: Duration,
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        ChallengePolicy {
            max_active: DEFAULT_MAX_ACTIVE_CHALLENGES,
            streak_window: Duration::days(DEFAULT_STREAK_WINDOW_DAYS),
        }
    }
}

/// Database model for challenges
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
#[diesel(table_name = crate::schema::challenges)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChallengeDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub target: String,
    pub saved: String,
    pub completion: String,
    pub created_on: NaiveDateTime,
    pub completed_on: Option<NaiveDateTime>,
}

impl ChallengeDB {
    /// Builds a fresh row from a validated payload, owned by `owner_id`.
    ///
    /// Assigns `created_on`, leaves `completed_on` empty and derives the
    /// completion percentage from the initial amounts.
    pub fn from_new(new_challenge: NewChallenge, owner_id: &str) -> crate::Result<Self> {
        let completion = money::percentage(new_challenge.saved, new_challenge.target)?;
        Ok(Self {
            id: new_challenge.id.unwrap_or_default(),
            user_id: owner_id.to_string(),
            title: new_challenge.title,
            description: new_challenge.description,
            challenge_type: new_challenge.challenge_type,
            target: new_challenge.target.to_string(),
            saved: new_challenge.saved.to_string(),
            completion: completion.to_string(),
            created_on: chrono::Utc::now().naive_utc(),
            completed_on: None,
        })
    }

    /// Applies an update payload in place and recomputes the completion
    /// percentage. `id`, `user_id`, `created_on` and `completed_on` are
    /// never touched.
    pub fn apply_update(&mut self, update: ChallengeUpdate) -> crate::Result<()> {
        let completion = money::percentage(update.saved, update.target)?;
        self.title = update.title;
        self.description = update.description;
        self.challenge_type = update.challenge_type;
        self.target = update.target.to_string();
        self.saved = update.saved.to_string();
        self.completion = completion.to_string();
        Ok(())
    }
}

impl From<ChallengeDB> for Challenge {
    fn from(db: ChallengeDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            challenge_type: db.challenge_type,
            target: Decimal::from_str(&db.target).unwrap_or_default(),
            saved: Decimal::from_str(&db.saved).unwrap_or_default(),
            completion: Decimal::from_str(&db.completion).unwrap_or_default(),
            created_on: db.created_on,
            completed_on: db.completed_on,
        }
    }
}
