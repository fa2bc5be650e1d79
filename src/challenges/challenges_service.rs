use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;

use crate::badges::BadgeRepository;
use crate::challenge_config::ChallengeConfigRepository;
use crate::challenges::ChallengeError;
use crate::db::get_connection;
use crate::errors::{Error, Result};
use crate::models::{Page, PageRequest};
use crate::users::{advance_streak, UserRepository};

use super::challenges_generator::generate_candidates;
use super::challenges_model::{
    Challenge, ChallengeDB, ChallengePolicy, ChallengeUpdate, NewChallenge,
};
use super::challenges_repository::ChallengeRepository;

/// Service owning the challenge lifecycle.
///
/// Completion is the only path that mutates the owning user's aggregate
/// fields (`saved_amount`, `streak`, `streak_start`) and awards badges; all
/// of that happens in one immediate transaction.
pub struct ChallengeService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    challenge_repo: ChallengeRepository,
    config_repo: ChallengeConfigRepository,
    user_repo: UserRepository,
    badge_repo: BadgeRepository,
    policy: ChallengePolicy,
}

impl ChallengeService {
    /// Creates a new ChallengeService instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        policy: ChallengePolicy,
    ) -> Self {
        Self {
            challenge_repo: ChallengeRepository::new(pool.clone()),
            config_repo: ChallengeConfigRepository::new(pool.clone()),
            user_repo: UserRepository::new(pool.clone()),
            badge_repo: BadgeRepository::new(pool.clone()),
            pool,
            policy,
        }
    }

    /// Creates a new challenge owned by the authenticated user.
    ///
    /// The active-challenge cap is checked in the same transaction as the
    /// insert; hitting it fails with `LimitExceeded` and persists nothing.
    pub fn create_challenge(
        &self,
        new_challenge: NewChallenge,
        username: &str,
    ) -> Result<Challenge> {
        debug!("Creating challenge for user '{}'", username);
        new_challenge.validate()?;

        let user = self.user_repo.get_by_username(username)?;
        let challenge_db = ChallengeDB::from_new(new_challenge, &user.id)?;

        let mut conn = get_connection(&self.pool)?;
        let challenge = conn.immediate_transaction::<Challenge, Error, _>(|conn| {
            Ok(self
                .challenge_repo
                .create_in_transaction(challenge_db, self.policy.max_active, conn)?)
        })?;

        info!(
            "Created challenge '{}' ({}) for user '{}'",
            challenge.title, challenge.id, username
        );
        Ok(challenge)
    }

    /// Retrieves a single challenge owned by the user
    pub fn get_challenge(&self, challenge_id: &str, username: &str) -> Result<Challenge> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self
            .challenge_repo
            .get_by_id_and_user(challenge_id, &user.id)?)
    }

    /// Lists all of the user's challenges
    pub fn get_challenges_by_user(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<Challenge>> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self.challenge_repo.list_by_user(&user.id, page)?)
    }

    /// Lists the user's active challenges
    pub fn get_active_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<Challenge>> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self.challenge_repo.list_active(&user.id, page)?)
    }

    /// Lists the user's completed challenges
    pub fn get_completed_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<Challenge>> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self.challenge_repo.list_completed(&user.id, page)?)
    }

    /// Updates an active challenge and recomputes its completion percentage.
    ///
    /// A completed challenge is frozen; updating it fails with
    /// `AlreadyCompleted` so the recorded completion percentage keeps
    /// reflecting the value at completion time.
    pub fn update_challenge(
        &self,
        challenge_id: &str,
        update: ChallengeUpdate,
        username: &str,
    ) -> Result<Challenge> {
        debug!("Updating challenge {} for user '{}'", challenge_id, username);
        update.validate()?;

        let user = self.user_repo.get_by_username(username)?;

        let mut conn = get_connection(&self.pool)?;
        let challenge = conn.immediate_transaction::<Challenge, Error, _>(|conn| {
            let mut challenge_db = self.challenge_repo.get_row_by_id_and_user_in_transaction(
                challenge_id,
                &user.id,
                conn,
            )?;

            if challenge_db.completed_on.is_some() {
                return Err(ChallengeError::AlreadyCompleted(format!(
                    "Challenge with id {} is already completed",
                    challenge_id
                ))
                .into());
            }

            challenge_db.apply_update(update)?;

            Ok(self
                .challenge_repo
                .update_in_transaction(&challenge_db, conn)?)
        })?;

        info!("Updated challenge {} for user '{}'", challenge_id, username);
        Ok(challenge)
    }

    /// Marks a challenge as completed and applies its side effects.
    ///
    /// Sets `completed_on`, adds the challenge's saved amount to the user's
    /// total, advances or resets the streak, and awards any badge whose
    /// threshold the new total reaches. Exactly one of two racing
    /// completions succeeds; the other fails with `AlreadyCompleted` and
    /// applies no side effects.
    pub fn complete_challenge(&self, challenge_id: &str, username: &str) -> Result<Challenge> {
        debug!(
            "Completing challenge {} for user '{}'",
            challenge_id, username
        );

        let mut conn = get_connection(&self.pool)?;
        let challenge = conn.immediate_transaction::<Challenge, Error, _>(|conn| {
            let user = self.user_repo.get_by_username_in_transaction(username, conn)?;
            let challenge = self.challenge_repo.get_by_id_and_user_in_transaction(
                challenge_id,
                &user.id,
                conn,
            )?;

            if challenge.is_completed() {
                return Err(ChallengeError::AlreadyCompleted(format!(
                    "Challenge with id {} is already completed",
                    challenge_id
                ))
                .into());
            }

            let now = chrono::Utc::now().naive_utc();
            let affected = self.challenge_repo.mark_completed_in_transaction(
                challenge_id,
                &user.id,
                now,
                conn,
            )?;
            if affected == 0 {
                return Err(ChallengeError::AlreadyCompleted(format!(
                    "Challenge with id {} is already completed",
                    challenge_id
                ))
                .into());
            }

            let new_total = user.saved_amount + challenge.saved;
            let streak = advance_streak(
                user.streak,
                user.streak_start,
                now,
                self.policy.streak_window,
            );
            self.user_repo.apply_completion_in_transaction(
                &user.id,
                new_total,
                streak.streak,
                streak.streak_start,
                conn,
            )?;

            let earned: Vec<String> = self
                .badge_repo
                .list_in_transaction(conn)?
                .into_iter()
                .filter(|badge| badge.threshold <= new_total)
                .map(|badge| badge.id)
                .collect();
            if !earned.is_empty() {
                self.badge_repo
                    .award_in_transaction(&user.id, &earned, now, conn)?;
            }

            Ok(self.challenge_repo.get_by_id_and_user_in_transaction(
                challenge_id,
                &user.id,
                conn,
            )?)
        })?;

        info!(
            "Completed challenge {} for user '{}': saved {} toward target {}",
            challenge_id, username, challenge.saved, challenge.target
        );
        Ok(challenge)
    }

    /// Deletes a challenge owned by the user.
    ///
    /// Aggregate effects of a prior completion are one-way ratchets tied to
    /// the completion event and are not rolled back here.
    pub fn delete_challenge(&self, challenge_id: &str, username: &str) -> Result<()> {
        debug!("Deleting challenge {} for user '{}'", challenge_id, username);
        let user = self.user_repo.get_by_username(username)?;
        self.challenge_repo.delete(challenge_id, &user.id)?;
        info!("Deleted challenge {} for user '{}'", challenge_id, username);
        Ok(())
    }

    /// Generates unpersisted challenge candidates from the user's config.
    ///
    /// Fails with `NotFound` when the user has no config. Accepted
    /// candidates are persisted by the caller through `create_challenge`.
    pub fn generate_challenges(&self, username: &str) -> Result<Vec<NewChallenge>> {
        let user = self.user_repo.get_by_username(username)?;
        let config = self.config_repo.get_by_user(&user.id)?;
        Ok(generate_candidates(&config))
    }
}
