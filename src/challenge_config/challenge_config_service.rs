use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;

use crate::errors::Result;
use crate::users::UserRepository;

use super::challenge_config_model::{ChallengeConfig, ChallengeConfigDB, NewChallengeConfig};
use super::challenge_config_repository::ChallengeConfigRepository;

/// Service for managing the per-user challenge config.
///
/// All operations are keyed by the authenticated username; the config itself
/// is stored against the resolved user id.
pub struct ChallengeConfigService {
    user_repo: UserRepository,
    config_repo: ChallengeConfigRepository,
}

impl ChallengeConfigService {
    /// Creates a new ChallengeConfigService instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self {
            user_repo: UserRepository::new(pool.clone()),
            config_repo: ChallengeConfigRepository::new(pool),
        }
    }

    /// Creates the config for a user that does not have one yet
    pub fn create_config(
        &self,
        new_config: NewChallengeConfig,
        username: &str,
    ) -> Result<ChallengeConfig> {
        debug!("Creating challenge config for user '{}'", username);
        new_config.validate()?;

        let user = self.user_repo.get_by_username(username)?;
        let config = self
            .config_repo
            .create(ChallengeConfigDB::from_new(new_config, &user.id))?;

        info!("Created challenge config for user '{}'", username);
        Ok(config)
    }

    /// Retrieves the user's config
    pub fn get_config(&self, username: &str) -> Result<ChallengeConfig> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self.config_repo.get_by_user(&user.id)?)
    }

    /// Replaces the mutable fields of the user's config
    pub fn update_config(
        &self,
        update: NewChallengeConfig,
        username: &str,
    ) -> Result<ChallengeConfig> {
        debug!("Updating challenge config for user '{}'", username);
        update.validate()?;

        let user = self.user_repo.get_by_username(username)?;
        Ok(self.config_repo.update(&user.id, update)?)
    }
}
