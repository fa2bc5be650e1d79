use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::challenge_config_errors::ChallengeConfigError;
use crate::errors::ValidationError;

/// Ordinal motivation level steering how many challenges are generated and
/// how ambitious their targets are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Motivation {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Motivation {
    /// Ordinal value, 1 (VERY_LOW) through 5 (VERY_HIGH)
    pub fn level(&self) -> u32 {
        match self {
            Motivation::VeryLow => 1,
            Motivation::Low => 2,
            Motivation::Medium => 3,
            Motivation::High => 4,
            Motivation::VeryHigh => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Motivation::VeryLow => "VERY_LOW",
            Motivation::Low => "LOW",
            Motivation::Medium => "MEDIUM",
            Motivation::High => "HIGH",
            Motivation::VeryHigh => "VERY_HIGH",
        }
    }
}

impl FromStr for Motivation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "VERY_LOW" => Ok(Motivation::VeryLow),
            "LOW" => Ok(Motivation::Low),
            "MEDIUM" => Ok(Motivation::Medium),
            "HIGH" => Ok(Motivation::High),
            "VERY_HIGH" => Ok(Motivation::VeryHigh),
            other => Err(format!("Unknown motivation level: {}", other)),
        }
    }
}

/// Domain model for a user's challenge generation preferences.
///
/// Keyed by the owning user's id; every user has at most one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeConfig {
    pub user_id: String,
    pub motivation: Motivation,
    pub target_min: Decimal,
    pub target_max: Decimal,
    pub preferred_types: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or replacing a challenge config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallengeConfig {
    pub motivation: Motivation,
    pub target_min: Decimal,
    pub target_max: Decimal,
    #[serde(default)]
    pub preferred_types: Vec<String>,
}

impl NewChallengeConfig {
    /// Validates the config data
    pub fn validate(&self) -> crate::Result<()> {
        if self.target_min <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Target range minimum must be positive".to_string(),
            )
            .into());
        }
        if self.target_max < self.target_min {
            return Err(ValidationError::InvalidInput(
                "Target range maximum cannot be below the minimum".to_string(),
            )
            .into());
        }
        if self.preferred_types.iter().any(|t| t.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "Preferred challenge types cannot be blank".to_string(),
            )
            .into());
        }
        // types are stored comma-separated
        if self.preferred_types.iter().any(|t| t.contains(',')) {
            return Err(ValidationError::InvalidInput(
                "Preferred challenge types cannot contain commas".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Database model for challenge configs
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
#[diesel(table_name = crate::schema::challenge_configs)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChallengeConfigDB {
    pub user_id: String,
    pub motivation: String,
    pub target_min: String,
    pub target_max: String,
    pub preferred_types: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ChallengeConfigDB {
    /// Builds a fresh row from a validated payload for `owner_id`
    pub fn from_new(new_config: NewChallengeConfig, owner_id: &str) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            user_id: owner_id.to_string(),
            motivation: new_config.motivation.as_str().to_string(),
            target_min: new_config.target_min.to_string(),
            target_max: new_config.target_max.to_string(),
            preferred_types: new_config.preferred_types.join(","),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable fields in place; ownership and creation time are
    /// not touched
    pub fn apply_update(&mut self, update: NewChallengeConfig) {
        self.motivation = update.motivation.as_str().to_string();
        self.target_min = update.target_min.to_string();
        self.target_max = update.target_max.to_string();
        self.preferred_types = update.preferred_types.join(",");
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

impl TryFrom<ChallengeConfigDB> for ChallengeConfig {
    type Error = ChallengeConfigError;

    // A motivation string that no longer parses is corrupted data, not a
    // value we can substitute; generation behavior depends on it.
    fn try_from(db: ChallengeConfigDB) -> std::result::Result<Self, Self::Error> {
        let motivation =
            Motivation::from_str(&db.motivation).map_err(ChallengeConfigError::DatabaseError)?;

        Ok(Self {
            user_id: db.user_id,
            motivation,
            target_min: Decimal::from_str(&db.target_min).unwrap_or_default(),
            target_max: Decimal::from_str(&db.target_max).unwrap_or_default(),
            preferred_types: db
                .preferred_types
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.trim().to_string())
                .collect(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config_db(motivation: &str) -> ChallengeConfigDB {
        let now = chrono::Utc::now().naive_utc();
        ChallengeConfigDB {
            user_id: "user-1".to_string(),
            motivation: motivation.to_string(),
            target_min: "100".to_string(),
            target_max: "500".to_string(),
            preferred_types: "COFFEE,TRANSPORT".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn motivation_uses_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(Motivation::VeryHigh).unwrap(),
            "VERY_HIGH"
        );
        let parsed: Motivation = serde_json::from_value(serde_json::json!("LOW")).unwrap();
        assert_eq!(parsed, Motivation::Low);
    }

    #[test]
    fn comma_in_preferred_type_is_rejected() {
        let config = NewChallengeConfig {
            motivation: Motivation::Medium,
            target_min: dec!(100),
            target_max: dec!(500),
            preferred_types: vec!["COFFEE,TRANSPORT".to_string()],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stored_config_round_trips() {
        let config: ChallengeConfig = config_db("HIGH").try_into().unwrap();
        assert_eq!(config.motivation, Motivation::High);
        assert_eq!(config.preferred_types, vec!["COFFEE", "TRANSPORT"]);
    }

    #[test]
    fn corrupted_motivation_is_not_papered_over() {
        let result: std::result::Result<ChallengeConfig, _> = config_db("EXTREME").try_into();
        assert!(result.is_err());
    }
}
