use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Immutable catalog entry describing an achievement badge.
///
/// `threshold` is the total saved amount a user has to reach to earn it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub threshold: Decimal,
}

/// Database model for the badge catalog
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::badges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BadgeDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub threshold: String,
}

/// Database model for the user/badge association
#[derive(Queryable, Identifiable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::user_badges)]
#[diesel(primary_key(user_id, badge_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserBadgeDB {
    pub user_id: String,
    pub badge_id: String,
    pub awarded_on: NaiveDateTime,
}

impl From<BadgeDB> for Badge {
    fn from(db: BadgeDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            threshold: Decimal::from_str(&db.threshold).unwrap_or_default(),
        }
    }
}
