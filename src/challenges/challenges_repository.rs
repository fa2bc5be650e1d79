use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::challenges::{ChallengeError, Result};
use crate::db::get_connection;
use crate::models::{Page, PageRequest};
use crate::schema::challenges;

use super::challenges_model::{Challenge, ChallengeDB};

/// Repository for challenge rows.
///
/// Every lookup is keyed by (id, owner); a challenge owned by someone else is
/// indistinguishable from a missing one.
pub struct ChallengeRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ChallengeRepository {
    /// Creates a new ChallengeRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts a new challenge, enforcing the active-challenge cap.
    ///
    /// The count and insert run in the caller's immediate transaction so two
    /// concurrent creates cannot both pass the cap check.
    pub fn create_in_transaction(
        &self,
        mut challenge_db: ChallengeDB,
        max_active: usize,
        conn: &mut SqliteConnection,
    ) -> Result<Challenge> {
        let active: i64 = challenges::table
            .filter(challenges::user_id.eq(&challenge_db.user_id))
            .filter(challenges::completed_on.is_null())
            .count()
            .get_result(conn)?;

        if active >= max_active as i64 {
            return Err(ChallengeError::LimitExceeded(max_active));
        }

        challenge_db.id = uuid::Uuid::new_v4().to_string();

        diesel::insert_into(challenges::table)
            .values(&challenge_db)
            .execute(conn)?;

        Ok(challenge_db.into())
    }

    /// Retrieves a challenge by id, scoped to its owner
    pub fn get_by_id_and_user(&self, challenge_id: &str, owner_id: &str) -> Result<Challenge> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ChallengeError::DatabaseError(e.to_string()))?;
        self.get_by_id_and_user_in_transaction(challenge_id, owner_id, &mut conn)
    }

    pub fn get_by_id_and_user_in_transaction(
        &self,
        challenge_id: &str,
        owner_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Challenge> {
        Ok(self
            .get_row_by_id_and_user_in_transaction(challenge_id, owner_id, conn)?
            .into())
    }

    /// Raw-row variant used when the caller mutates and writes the row back
    pub fn get_row_by_id_and_user_in_transaction(
        &self,
        challenge_id: &str,
        owner_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<ChallengeDB> {
        challenges::table
            .filter(challenges::id.eq(challenge_id))
            .filter(challenges::user_id.eq(owner_id))
            .first::<ChallengeDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => ChallengeError::NotFound(format!(
                    "Challenge with id {} not found",
                    challenge_id
                )),
                _ => ChallengeError::DatabaseError(e.to_string()),
            })
    }

    /// Lists all challenges owned by a user, paginated
    pub fn list_by_user(&self, owner_id: &str, page: PageRequest) -> Result<Page<Challenge>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ChallengeError::DatabaseError(e.to_string()))?;

        let total: i64 = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .count()
            .get_result(&mut conn)?;

        let rows = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .order((challenges::created_on.asc(), challenges::id.asc()))
            .limit(page.limit())
            .offset(page.offset())
            .load::<ChallengeDB>(&mut conn)?;

        Ok(Page::new(
            rows.into_iter().map(Challenge::from).collect(),
            page,
            total,
        ))
    }

    /// Lists a user's active (not yet completed) challenges, paginated
    pub fn list_active(&self, owner_id: &str, page: PageRequest) -> Result<Page<Challenge>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ChallengeError::DatabaseError(e.to_string()))?;

        let total: i64 = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .filter(challenges::completed_on.is_null())
            .count()
            .get_result(&mut conn)?;

        let rows = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .filter(challenges::completed_on.is_null())
            .order((challenges::created_on.asc(), challenges::id.asc()))
            .limit(page.limit())
            .offset(page.offset())
            .load::<ChallengeDB>(&mut conn)?;

        Ok(Page::new(
            rows.into_iter().map(Challenge::from).collect(),
            page,
            total,
        ))
    }

    /// Lists a user's completed challenges, paginated
    pub fn list_completed(&self, owner_id: &str, page: PageRequest) -> Result<Page<Challenge>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ChallengeError::DatabaseError(e.to_string()))?;

        let total: i64 = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .filter(challenges::completed_on.is_not_null())
            .count()
            .get_result(&mut conn)?;

        let rows = challenges::table
            .filter(challenges::user_id.eq(owner_id))
            .filter(challenges::completed_on.is_not_null())
            .order((challenges::created_on.asc(), challenges::id.asc()))
            .limit(page.limit())
            .offset(page.offset())
            .load::<ChallengeDB>(&mut conn)?;

        Ok(Page::new(
            rows.into_iter().map(Challenge::from).collect(),
            page,
            total,
        ))
    }

    /// Writes back a mutated row, scoped to its owner
    pub fn update_in_transaction(
        &self,
        challenge_db: &ChallengeDB,
        conn: &mut SqliteConnection,
    ) -> Result<Challenge> {
        let affected = diesel::update(
            challenges::table
                .filter(challenges::id.eq(&challenge_db.id))
                .filter(challenges::user_id.eq(&challenge_db.user_id)),
        )
        .set(challenge_db)
        .execute(conn)?;

        if affected == 0 {
            return Err(ChallengeError::NotFound(format!(
                "Challenge with id {} not found",
                challenge_db.id
            )));
        }

        Ok(challenge_db.clone().into())
    }

    /// Sets `completed_on`, guarded so that only one of two racing
    /// completions can succeed. Returns the number of affected rows.
    pub fn mark_completed_in_transaction(
        &self,
        challenge_id: &str,
        owner_id: &str,
        completed_on: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> Result<usize> {
        Ok(diesel::update(
            challenges::table
                .filter(challenges::id.eq(challenge_id))
                .filter(challenges::user_id.eq(owner_id))
                .filter(challenges::completed_on.is_null()),
        )
        .set(challenges::completed_on.eq(completed_on))
        .execute(conn)?)
    }

    /// Deletes a challenge, scoped to its owner
    pub fn delete(&self, challenge_id: &str, owner_id: &str) -> Result<usize> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ChallengeError::DatabaseError(e.to_string()))?;

        let affected = diesel::delete(
            challenges::table
                .filter(challenges::id.eq(challenge_id))
                .filter(challenges::user_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(ChallengeError::NotFound(format!(
                "Challenge with id {} not found",
                challenge_id
            )));
        }

        Ok(affected)
    }
}
