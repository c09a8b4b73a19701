//! Stable exit codes for the build binaries.

/// Output written.
pub const OK: i32 = 0;
/// The pilots dataset does not exist; no output was produced.
pub const MISSING_INPUT: i32 = 1;
/// Any other failure (malformed dataset, bad config, write errors).
pub const FAILURE: i32 = 2;
