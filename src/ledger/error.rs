use thiserror::Error;

use crate::model::LeaveStatus;
use crate::repo::RepoError;

/// Business outcomes of ledger operations. Every variant except `Repo` is
/// an expected, recoverable condition the caller can branch on; `Repo`
/// wraps unexpected store failures and propagates opaquely.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("Dates must be in 'YYYY-MM-DD' format.")]
    InvalidDate,

    #[error("End date must be on or after start date.")]
    InvalidRange,

    #[error("Leave start date cannot be before joining date.")]
    PreJoining,

    #[error("Insufficient leave balance. You have {remaining} days available.")]
    InsufficientBalance { remaining: i64 },

    #[error("You have an overlapping approved leave request.")]
    Overlap,

    #[error("Employee not found.")]
    EmployeeNotFound(u64),

    #[error("Leave request not found.")]
    LeaveNotFound(u64),

    #[error("Leave already {0}.")]
    AlreadyDecided(LeaveStatus),

    #[error("Email already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
