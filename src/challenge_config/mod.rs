// Module declarations
pub(crate) mod challenge_config_errors;
pub(crate) mod challenge_config_model;
pub(crate) mod challenge_config_repository;
pub(crate) mod challenge_config_service;
pub(crate) mod challenge_config_traits;

// Re-export the public interface
pub use challenge_config_model::{
    ChallengeConfig, ChallengeConfigDB, Motivation, NewChallengeConfig,
};
pub use challenge_config_repository::ChallengeConfigRepository;
pub use challenge_config_service::ChallengeConfigService;
pub use challenge_config_traits::{ChallengeConfigRepositoryTrait, ChallengeConfigServiceTrait};

// Re-export error types for convenience
pub use challenge_config_errors::{ChallengeConfigError, Result};
