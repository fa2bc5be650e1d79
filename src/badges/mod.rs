// Module declarations
pub(crate) mod badges_errors;
pub(crate) mod badges_model;
pub(crate) mod badges_repository;
pub(crate) mod badges_service;

// Re-export the public interface
pub use badges_model::{Badge, BadgeDB, UserBadgeDB};
pub use badges_repository::BadgeRepository;
pub use badges_service::BadgeService;

// Re-export error types for convenience
pub use badges_errors::{BadgeError, Result};
