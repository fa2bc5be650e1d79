use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::errors::Result;
use crate::users::UserRepository;

use super::badges_model::Badge;
use super::badges_repository::BadgeRepository;

/// Service exposing the badge catalog and a user's earned badges.
///
/// Awarding happens inside the challenge completion transaction, not here.
pub struct BadgeService {
    user_repo: UserRepository,
    badge_repo: BadgeRepository,
}

impl BadgeService {
    /// Creates a new BadgeService instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self {
            user_repo: UserRepository::new(pool.clone()),
            badge_repo: BadgeRepository::new(pool),
        }
    }

    /// Lists the badge catalog
    pub fn get_badges(&self) -> Result<Vec<Badge>> {
        Ok(self.badge_repo.list()?)
    }

    /// Lists the badges earned by a user
    pub fn get_user_badges(&self, username: &str) -> Result<Vec<Badge>> {
        let user = self.user_repo.get_by_username(username)?;
        Ok(self.badge_repo.list_for_user(&user.id)?)
    }
}
