use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;

use crate::errors::Result;

use super::users_model::{NewUser, User};
use super::users_repository::UserRepository;

/// Service for registering and resolving users.
///
/// Authentication itself lives outside this crate; the service only resolves
/// the authenticated username to a user record.
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService instance
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self {
            user_repo: UserRepository::new(pool),
        }
    }

    /// Registers a new user with an empty aggregate
    pub fn register_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user = self.user_repo.create(new_user)?;
        info!("Registered user '{}'", user.username);
        Ok(user)
    }

    /// Retrieves a user by username
    pub fn get_user(&self, username: &str) -> Result<User> {
        Ok(self.user_repo.get_by_username(username)?)
    }
}
