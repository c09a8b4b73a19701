//! Typed fatal errors that map to dedicated exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The pilots dataset is absent; nothing is written.
    #[error("pilots dataset not found at {}", .path.display())]
    MissingInput { path: PathBuf },
}

/// Exit code for an error bubbled up to a binary's `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingInput { .. }) => exit_codes::MISSING_INPUT,
        None => exit_codes::FAILURE,
    }
}
