mod mysql;

pub use mysql::{MySqlLedgerTx, MySqlRepository};

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Employee, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest};

/// Failures surfaced by the persistence layer. `DuplicateKey` is the one
/// constraint violation the ledger branches on (unique email); everything
/// else propagates opaquely.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("duplicate key")]
    DuplicateKey,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Filter for querying leave request history.
#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<u64>,
    pub status: Option<LeaveStatus>,
}

/// Store access as the ledger sees it. Read-only lookups run directly
/// against the pool; every read-then-write sequence goes through a
/// transaction obtained from `begin`.
#[allow(async_fn_in_trait)]
pub trait Repository {
    type Tx: LedgerTx;

    async fn begin(&self) -> Result<Self::Tx, RepoError>;

    async fn employee_by_id(&self, id: u64) -> Result<Option<Employee>, RepoError>;

    async fn leave_request_by_id(&self, id: u64) -> Result<Option<LeaveRequest>, RepoError>;

    async fn list_leave_requests(
        &self,
        filter: &LeaveFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaveRequest>, i64), RepoError>;
}

/// A single transactional scope. Dropping without `commit` rolls back, so
/// a failed operation never leaves partial writes behind.
#[allow(async_fn_in_trait)]
pub trait LedgerTx {
    async fn employee_by_id(&mut self, id: u64) -> Result<Option<Employee>, RepoError>;

    /// Fetch an employee and hold a row lock on it until the transaction
    /// ends, serializing concurrent balance mutations.
    async fn employee_for_update(&mut self, id: u64) -> Result<Option<Employee>, RepoError>;

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, RepoError>;

    /// Relative update: `leaves_taken = leaves_taken + days`.
    async fn increment_leaves_taken(&mut self, id: u64, days: i64) -> Result<(), RepoError>;

    async fn leave_request_by_id(&mut self, id: u64) -> Result<Option<LeaveRequest>, RepoError>;

    async fn insert_leave_request(
        &mut self,
        new: &NewLeaveRequest,
    ) -> Result<LeaveRequest, RepoError>;

    async fn set_leave_request_status(
        &mut self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<(), RepoError>;

    /// Any Approved request of this employee whose range intersects
    /// `[start, end]`, boundaries included.
    async fn approved_overlapping(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<LeaveRequest>, RepoError>;

    async fn commit(self) -> Result<(), RepoError>;
}
