// Module declarations
pub(crate) mod challenges_errors;
pub(crate) mod challenges_generator;
pub(crate) mod challenges_model;
pub(crate) mod challenges_repository;
pub(crate) mod challenges_service;
pub(crate) mod challenges_traits;

// Re-export the public interface
pub use challenges_generator::generate_candidates;
pub use challenges_model::{
    Challenge, ChallengeDB, ChallengePolicy, ChallengeUpdate, NewChallenge,
};
pub use challenges_repository::ChallengeRepository;
pub use challenges_service::ChallengeService;
pub use challenges_traits::{ChallengeRepositoryTrait, ChallengeServiceTrait};

// Re-export error types for convenience
pub use challenges_errors::{ChallengeError, Result};
