use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::badges::{BadgeError, Result};
use crate::db::get_connection;
use crate::schema::{badges, user_badges};

use super::badges_model::{Badge, BadgeDB, UserBadgeDB};

/// Repository for the badge catalog and per-user awards
pub struct BadgeRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl BadgeRepository {
    /// Creates a new BadgeRepository instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Loads the full badge catalog
    pub fn list(&self) -> Result<Vec<Badge>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| BadgeError::DatabaseError(e.to_string()))?;
        self.list_in_transaction(&mut conn)
    }

    pub fn list_in_transaction(&self, conn: &mut SqliteConnection) -> Result<Vec<Badge>> {
        let rows = badges::table.load::<BadgeDB>(conn)?;
        Ok(rows.into_iter().map(Badge::from).collect())
    }

    /// Loads the badges awarded to a user
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Badge>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| BadgeError::DatabaseError(e.to_string()))?;

        let rows = user_badges::table
            .inner_join(badges::table.on(badges::id.eq(user_badges::badge_id)))
            .filter(user_badges::user_id.eq(user_id))
            .select((badges::id, badges::name, badges::description, badges::threshold))
            .load::<BadgeDB>(&mut conn)?;

        Ok(rows.into_iter().map(Badge::from).collect())
    }

    /// Awards the given badges to a user, skipping ones already held
    pub fn award_in_transaction(
        &self,
        user_id: &str,
        badge_ids: &[String],
        awarded_on: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> Result<usize> {
        let rows: Vec<UserBadgeDB> = badge_ids
            .iter()
            .map(|badge_id| UserBadgeDB {
                user_id: user_id.to_string(),
                badge_id: badge_id.clone(),
                awarded_on,
            })
            .collect();

        Ok(diesel::insert_or_ignore_into(user_badges::table)
            .values(&rows)
            .execute(conn)?)
    }
}
