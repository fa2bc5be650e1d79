use chrono::NaiveDateTime;
use diesel::sqlite::SqliteConnection;

use crate::models::{Page, PageRequest};

use super::challenges_model::{Challenge, ChallengeDB, ChallengeUpdate, NewChallenge};
use super::challenges_repository::ChallengeRepository;
use super::challenges_service::ChallengeService;

/// Trait defining the contract for challenge repository operations.
pub trait ChallengeRepositoryTrait: Send + Sync {
    fn create_in_transaction(
        &self,
        challenge_db: ChallengeDB,
        max_active: usize,
        conn: &mut SqliteConnection,
    ) -> super::Result<Challenge>;
    fn get_by_id_and_user(&self, challenge_id: &str, owner_id: &str) -> super::Result<Challenge>;
    fn list_by_user(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>>;
    fn list_active(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>>;
    fn list_completed(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>>;
    fn mark_completed_in_transaction(
        &self,
        challenge_id: &str,
        owner_id: &str,
        completed_on: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> super::Result<usize>;
    fn delete(&self, challenge_id: &str, owner_id: &str) -> super::Result<usize>;
}

/// Trait defining the contract for challenge service operations.
pub trait ChallengeServiceTrait: Send + Sync {
    fn create_challenge(
        &self,
        new_challenge: NewChallenge,
        username: &str,
    ) -> crate::Result<Challenge>;
    fn get_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<Challenge>;
    fn get_challenges_by_user(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>>;
    fn get_active_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>>;
    fn get_completed_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>>;
    fn update_challenge(
        &self,
        challenge_id: &str,
        update: ChallengeUpdate,
        username: &str,
    ) -> crate::Result<Challenge>;
    fn complete_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<Challenge>;
    fn delete_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<()>;
    fn generate_challenges(&self, username: &str) -> crate::Result<Vec<NewChallenge>>;
}

impl ChallengeRepositoryTrait for ChallengeRepository {
    fn create_in_transaction(
        &self,
        challenge_db: ChallengeDB,
        max_active: usize,
        conn: &mut SqliteConnection,
    ) -> super::Result<Challenge> {
        self.create_in_transaction(challenge_db, max_active, conn)
    }

    fn get_by_id_and_user(&self, challenge_id: &str, owner_id: &str) -> super::Result<Challenge> {
        self.get_by_id_and_user(challenge_id, owner_id)
    }

    fn list_by_user(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>> {
        self.list_by_user(owner_id, page)
    }

    fn list_active(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>> {
        self.list_active(owner_id, page)
    }

    fn list_completed(&self, owner_id: &str, page: PageRequest) -> super::Result<Page<Challenge>> {
        self.list_completed(owner_id, page)
    }

    fn mark_completed_in_transaction(
        &self,
        challenge_id: &str,
        owner_id: &str,
        completed_on: NaiveDateTime,
        conn: &mut SqliteConnection,
    ) -> super::Result<usize> {
        self.mark_completed_in_transaction(challenge_id, owner_id, completed_on, conn)
    }

    fn delete(&self, challenge_id: &str, owner_id: &str) -> super::Result<usize> {
        self.delete(challenge_id, owner_id)
    }
}

impl ChallengeServiceTrait for ChallengeService {
    fn create_challenge(
        &self,
        new_challenge: NewChallenge,
        username: &str,
    ) -> crate::Result<Challenge> {
        self.create_challenge(new_challenge, username)
    }

    fn get_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<Challenge> {
        self.get_challenge(challenge_id, username)
    }

    fn get_challenges_by_user(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>> {
        self.get_challenges_by_user(username, page)
    }

    fn get_active_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>> {
        self.get_active_challenges(username, page)
    }

    fn get_completed_challenges(
        &self,
        username: &str,
        page: PageRequest,
    ) -> crate::Result<Page<Challenge>> {
        self.get_completed_challenges(username, page)
    }

    fn update_challenge(
        &self,
        challenge_id: &str,
        update: ChallengeUpdate,
        username: &str,
    ) -> crate::Result<Challenge> {
        self.update_challenge(challenge_id, update, username)
    }

    fn complete_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<Challenge> {
        self.complete_challenge(challenge_id, username)
    }

    fn delete_challenge(&self, challenge_id: &str, username: &str) -> crate::Result<()> {
        self.delete_challenge(challenge_id, username)
    }

    fn generate_challenges(&self, username: &str) -> crate::Result<Vec<NewChallenge>> {
        self.generate_challenges(username)
    }
}
