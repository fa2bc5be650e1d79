use super::challenge_config_model::{ChallengeConfig, NewChallengeConfig};
use super::challenge_config_repository::ChallengeConfigRepository;
use super::challenge_config_service::ChallengeConfigService;

/// Trait defining the contract for challenge config repository operations.
pub trait ChallengeConfigRepositoryTrait: Send + Sync {
    fn get_by_user(&self, owner_id: &str) -> super::Result<ChallengeConfig>;
    fn update(&self, owner_id: &str, update: NewChallengeConfig) -> super::Result<ChallengeConfig>;
}

/// Trait defining the contract for challenge config service operations.
pub trait ChallengeConfigServiceTrait: Send + Sync {
    fn create_config(
        &self,
        new_config: NewChallengeConfig,
        username: &str,
    ) -> crate::Result<ChallengeConfig>;
    fn get_config(&self, username: &str) -> crate::Result<ChallengeConfig>;
    fn update_config(
        &self,
        update: NewChallengeConfig,
        username: &str,
    ) -> crate::Result<ChallengeConfig>;
}

impl ChallengeConfigRepositoryTrait for ChallengeConfigRepository {
    fn get_by_user(&self, owner_id: &str) -> super::Result<ChallengeConfig> {
        self.get_by_user(owner_id)
    }

    fn update(&self, owner_id: &str, update: NewChallengeConfig) -> super::Result<ChallengeConfig> {
        self.update(owner_id, update)
    }
}

impl ChallengeConfigServiceTrait for ChallengeConfigService {
    fn create_config(
        &self,
        new_config: NewChallengeConfig,
        username: &str,
    ) -> crate::Result<ChallengeConfig> {
        self.create_config(new_config, username)
    }

    fn get_config(&self, username: &str) -> crate::Result<ChallengeConfig> {
        self.get_config(username)
    }

    fn update_config(
        &self,
        update: NewChallengeConfig,
        username: &str,
    ) -> crate::Result<ChallengeConfig> {
        self.update_config(update, username)
    }
}
