/// Delay between scheduling a contract upgrade and the earliest moment it
/// can be executed (48 hours).
pub const UPGRADE_TIME_LOCK_SECS: u64 = 48 * 60 * 60;
