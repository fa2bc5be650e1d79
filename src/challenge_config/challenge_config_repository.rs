use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::challenge_config::{ChallengeConfigError, Result};
use crate::db::get_connection;
use crate::schema::challenge_configs;

use super::challenge_config_model::{ChallengeConfig, ChallengeConfigDB, NewChallengeConfig};

/// Repository for the per-user singleton challenge config
pub struct ChallengeConfigRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ChallengeConfigRepository {
    /// Creates a new ChallengeConfigRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts the config for a user that does not have one yet.
    ///
    /// The exists-check and the insert run in one immediate transaction so
    /// two concurrent creates cannot both observe an empty slot; the primary
    /// key enforces the invariant even against a connection that bypasses
    /// this method.
    pub fn create(&self, config_db: ChallengeConfigDB) -> Result<ChallengeConfig> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ChallengeConfigError::DatabaseError(e.to_string()))?;

        conn.immediate_transaction::<ChallengeConfig, ChallengeConfigError, _>(|conn| {
            let existing: i64 = challenge_configs::table
                .filter(challenge_configs::user_id.eq(&config_db.user_id))
                .count()
                .get_result(conn)?;

            if existing > 0 {
                return Err(ChallengeConfigError::AlreadyExists(format!(
                    "User {} already has a challenge config",
                    config_db.user_id
                )));
            }

            diesel::insert_into(challenge_configs::table)
                .values(&config_db)
                .execute(conn)?;

            config_db.try_into()
        })
    }

    /// Retrieves the config owned by `owner_id`
    pub fn get_by_user(&self, owner_id: &str) -> Result<ChallengeConfig> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ChallengeConfigError::DatabaseError(e.to_string()))?;

        let config = challenge_configs::table
            .find(owner_id)
            .first::<ChallengeConfigDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => ChallengeConfigError::NotFound(format!(
                    "No challenge config found for user {}",
                    owner_id
                )),
                _ => ChallengeConfigError::DatabaseError(e.to_string()),
            })?;

        config.try_into()
    }

    /// Replaces the mutable fields of an existing config
    pub fn update(&self, owner_id: &str, update: NewChallengeConfig) -> Result<ChallengeConfig> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ChallengeConfigError::DatabaseError(e.to_string()))?;

        conn.immediate_transaction::<ChallengeConfig, ChallengeConfigError, _>(|conn| {
            let mut existing = challenge_configs::table
                .find(owner_id)
                .first::<ChallengeConfigDB>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => ChallengeConfigError::NotFound(format!(
                        "No challenge config found for user {}",
                        owner_id
                    )),
                    _ => ChallengeConfigError::DatabaseError(e.to_string()),
                })?;

            existing.apply_update(update);

            diesel::update(challenge_configs::table.find(owner_id))
                .set(&existing)
                .execute(conn)?;

            existing.try_into()
        })
    }
}
