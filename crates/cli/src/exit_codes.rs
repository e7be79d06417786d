//! Process exit codes for `workflow-validator`.

/// Every check passed.
pub const OK: u8 = 0;
/// At least one check failed, or the report could not be written.
pub const FAILED: u8 = 1;
