pub mod db;

pub mod badges;
pub mod challenge_config;
pub mod challenges;
pub mod users;

pub mod constants;
pub mod errors;
pub mod models;
pub mod money;
pub mod schema;

pub use errors::{Error, ErrorKind, Result};
