/// Decimal places for completion percentages
pub const PERCENT_DECIMALS: u32 = 2;

/// Decimal places for money amounts
pub const MONEY_DECIMALS: u32 = 2;

/// Maximum number of concurrently active challenges per user
pub const DEFAULT_MAX_ACTIVE_CHALLENGES: usize = 10;

/// Length in days of a qualifying streak window
pub const DEFAULT_STREAK_WINDOW_DAYS: i64 = 7;

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Upper bound for requested page sizes
pub const MAX_PAGE_SIZE: i64 = 100;

/// Challenge type used when a config has no preferred types
pub const DEFAULT_CHALLENGE_TYPE: &str = "SAVING";
