use chrono::NaiveDate;

use super::{Clock, LedgerError, SystemClock};
use crate::model::{
    DEFAULT_TOTAL_LEAVES, Employee, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest,
    leave_days,
};
use crate::repo::{LeaveFilter, LedgerTx, RepoError, Repository};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LedgerError::InvalidDate)
}

/// The leave-balance ledger: employee registration, leave application and
/// the approve/reject decision, with all balance arithmetic and overlap
/// rules. Storage is reached only through the injected repository; each
/// operation runs in a single transaction and commits atomically.
pub struct LeaveLedger<R: Repository> {
    repo: R,
    clock: Box<dyn Clock>,
}

impl<R: Repository> LeaveLedger<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Box::new(SystemClock))
    }

    pub fn with_clock(repo: R, clock: Box<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Record a new employee with the default entitlement and an untouched
    /// balance.
    pub async fn register_employee(
        &self,
        name: &str,
        email: &str,
        department: Option<String>,
        joining_date: &str,
    ) -> Result<Employee, LedgerError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() || joining_date.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Name, email, and joining_date are required".to_string(),
            ));
        }

        let joining_date = parse_date(joining_date)?;

        let mut tx = self.repo.begin().await?;

        let employee = tx
            .insert_employee(&NewEmployee {
                name: name.to_string(),
                email: email.to_string(),
                department,
                joining_date,
                total_leaves: DEFAULT_TOTAL_LEAVES,
                leaves_taken: 0,
            })
            .await
            .map_err(|e| match e {
                RepoError::DuplicateKey => LedgerError::DuplicateEmail(email.to_string()),
                other => LedgerError::Repo(other),
            })?;

        tx.commit().await?;
        Ok(employee)
    }

    /// Submit a leave request. Validates the dates against the joining
    /// date, the remaining balance and approved overlaps, then records the
    /// request as Pending. The employee's balance is not touched until the
    /// request is approved.
    pub async fn apply_leave(
        &self,
        employee_id: u64,
        start_date: &str,
        end_date: &str,
        reason: &str,
    ) -> Result<LeaveRequest, LedgerError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::Validation(
                "employee_id, start_date, end_date, and reason are required.".to_string(),
            ));
        }

        let mut tx = self.repo.begin().await?;

        let employee = tx
            .employee_by_id(employee_id)
            .await?
            .ok_or(LedgerError::EmployeeNotFound(employee_id))?;

        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        if start > end {
            return Err(LedgerError::InvalidRange);
        }

        if start < employee.joining_date {
            return Err(LedgerError::PreJoining);
        }

        let days = leave_days(start, end);
        let remaining = employee.remaining();
        if days > remaining {
            return Err(LedgerError::InsufficientBalance { remaining });
        }

        if tx
            .approved_overlapping(employee_id, start, end)
            .await?
            .is_some()
        {
            return Err(LedgerError::Overlap);
        }

        let request = tx
            .insert_leave_request(&NewLeaveRequest {
                employee_id,
                start_date: start,
                end_date: end,
                reason: reason.to_string(),
                status: LeaveStatus::Pending,
                applied_on: self.clock.today(),
            })
            .await?;

        tx.commit().await?;
        Ok(request)
    }

    /// Decide a pending request. Approval re-validates the balance at
    /// decision time under a row lock on the employee, then deducts the
    /// days and flips the status in the same transaction. Rejection only
    /// flips the status. Decided requests are immutable.
    pub async fn decide_leave(
        &self,
        leave_id: u64,
        decision: LeaveStatus,
    ) -> Result<LeaveRequest, LedgerError> {
        match decision {
            LeaveStatus::Approved | LeaveStatus::Rejected => {}
            LeaveStatus::Pending => {
                return Err(LedgerError::Validation(
                    "Status must be 'Approved' or 'Rejected'.".to_string(),
                ));
            }
        }

        let mut tx = self.repo.begin().await?;

        let mut request = tx
            .leave_request_by_id(leave_id)
            .await?
            .ok_or(LedgerError::LeaveNotFound(leave_id))?;

        if request.status != LeaveStatus::Pending {
            return Err(LedgerError::AlreadyDecided(request.status));
        }

        if decision == LeaveStatus::Approved {
            let employee = tx
                .employee_for_update(request.employee_id)
                .await?
                .ok_or(LedgerError::EmployeeNotFound(request.employee_id))?;

            // Balance may have shrunk since application; re-check before
            // deducting.
            let days = request.leave_days();
            let remaining = employee.remaining();
            if days > remaining {
                return Err(LedgerError::InsufficientBalance { remaining });
            }

            tx.increment_leaves_taken(employee.id, days).await?;
        }

        tx.set_leave_request_status(leave_id, decision).await?;
        tx.commit().await?;

        request.status = decision;
        Ok(request)
    }

    /// Employee lookup for the read-only endpoints.
    pub async fn employee(&self, employee_id: u64) -> Result<Employee, LedgerError> {
        self.repo
            .employee_by_id(employee_id)
            .await?
            .ok_or(LedgerError::EmployeeNotFound(employee_id))
    }

    /// Leave request lookup for the read-only endpoints.
    pub async fn leave_request(&self, leave_id: u64) -> Result<LeaveRequest, LedgerError> {
        self.repo
            .leave_request_by_id(leave_id)
            .await?
            .ok_or(LedgerError::LeaveNotFound(leave_id))
    }

    /// Paginated leave history, optionally filtered by employee and status.
    pub async fn leave_history(
        &self,
        filter: &LeaveFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaveRequest>, i64), LedgerError> {
        Ok(self.repo.list_leave_requests(filter, page, per_page).await?)
    }
}
