// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use leave_ledger::ledger::{Clock, LeaveLedger};
use leave_ledger::model::{
    Employee, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest, ranges_overlap,
};
use leave_ledger::repo::{LeaveFilter, LedgerTx, RepoError, Repository};

/// Calendar pinned to a fixed day.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
struct MemState {
    employees: HashMap<u64, Employee>,
    leaves: HashMap<u64, LeaveRequest>,
    next_employee_id: u64,
    next_leave_id: u64,
}

/// In-memory repository with transaction semantics: `begin` snapshots the
/// state, mutations run on the snapshot, and only `commit` publishes it.
/// Dropping an uncommitted transaction discards its writes.
#[derive(Default, Clone)]
pub struct MemRepository {
    state: Arc<Mutex<MemState>>,
}

impl MemRepository {
    /// Directly set an employee's entitlement, for balance-edge fixtures.
    pub fn set_balance(&self, employee_id: u64, total_leaves: i32, leaves_taken: i32) {
        let mut state = self.state.lock().unwrap();
        let employee = state
            .employees
            .get_mut(&employee_id)
            .expect("employee fixture missing");
        employee.total_leaves = total_leaves;
        employee.leaves_taken = leaves_taken;
    }

    pub fn employee_count(&self) -> usize {
        self.state.lock().unwrap().employees.len()
    }

    pub fn leave_count(&self) -> usize {
        self.state.lock().unwrap().leaves.len()
    }
}

pub struct MemTx {
    shared: Arc<Mutex<MemState>>,
    work: MemState,
}

impl Repository for MemRepository {
    type Tx = MemTx;

    async fn begin(&self) -> Result<MemTx, RepoError> {
        let work = self.state.lock().unwrap().clone();
        Ok(MemTx {
            shared: self.state.clone(),
            work,
        })
    }

    async fn employee_by_id(&self, id: u64) -> Result<Option<Employee>, RepoError> {
        Ok(self.state.lock().unwrap().employees.get(&id).cloned())
    }

    async fn leave_request_by_id(&self, id: u64) -> Result<Option<LeaveRequest>, RepoError> {
        Ok(self.state.lock().unwrap().leaves.get(&id).cloned())
    }

    async fn list_leave_requests(
        &self,
        filter: &LeaveFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaveRequest>, i64), RepoError> {
        let state = self.state.lock().unwrap();

        let mut matching: Vec<LeaveRequest> = state
            .leaves
            .values()
            .filter(|l| filter.employee_id.is_none_or(|id| l.employee_id == id))
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.applied_on.cmp(&a.applied_on).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let offset = (page.saturating_sub(1)) * per_page;
        let data = matching
            .into_iter()
            .skip(offset as usize)
            .take(per_page as usize)
            .collect();

        Ok((data, total))
    }
}

impl LedgerTx for MemTx {
    async fn employee_by_id(&mut self, id: u64) -> Result<Option<Employee>, RepoError> {
        Ok(self.work.employees.get(&id).cloned())
    }

    async fn employee_for_update(&mut self, id: u64) -> Result<Option<Employee>, RepoError> {
        // Single-threaded tests: a plain read stands in for the row lock.
        Ok(self.work.employees.get(&id).cloned())
    }

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, RepoError> {
        if self.work.employees.values().any(|e| e.email == new.email) {
            return Err(RepoError::DuplicateKey);
        }

        self.work.next_employee_id += 1;
        let employee = Employee {
            id: self.work.next_employee_id,
            name: new.name.clone(),
            email: new.email.clone(),
            department: new.department.clone(),
            joining_date: new.joining_date,
            total_leaves: new.total_leaves,
            leaves_taken: new.leaves_taken,
        };
        self.work.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn increment_leaves_taken(&mut self, id: u64, days: i64) -> Result<(), RepoError> {
        let employee = self
            .work
            .employees
            .get_mut(&id)
            .expect("increment on missing employee");
        employee.leaves_taken += days as i32;
        Ok(())
    }

    async fn leave_request_by_id(&mut self, id: u64) -> Result<Option<LeaveRequest>, RepoError> {
        Ok(self.work.leaves.get(&id).cloned())
    }

    async fn insert_leave_request(
        &mut self,
        new: &NewLeaveRequest,
    ) -> Result<LeaveRequest, RepoError> {
        self.work.next_leave_id += 1;
        let request = LeaveRequest {
            id: self.work.next_leave_id,
            employee_id: new.employee_id,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason.clone(),
            status: new.status,
            applied_on: new.applied_on,
        };
        self.work.leaves.insert(request.id, request.clone());
        Ok(request)
    }

    async fn set_leave_request_status(
        &mut self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<(), RepoError> {
        let request = self
            .work
            .leaves
            .get_mut(&id)
            .expect("status update on missing leave request");
        request.status = status;
        Ok(())
    }

    async fn approved_overlapping(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<LeaveRequest>, RepoError> {
        Ok(self
            .work
            .leaves
            .values()
            .find(|l| {
                l.employee_id == employee_id
                    && l.status == LeaveStatus::Approved
                    && ranges_overlap(l.start_date, l.end_date, start, end)
            })
            .cloned())
    }

    async fn commit(self) -> Result<(), RepoError> {
        *self.shared.lock().unwrap() = self.work;
        Ok(())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Day the fixed test clock reports.
pub const TODAY: &str = "2024-06-01";

/// Ledger over a fresh in-memory store, plus a handle to inspect the store
/// after operations.
pub fn test_ledger() -> (LeaveLedger<MemRepository>, MemRepository) {
    let repo = MemRepository::default();
    let ledger = LeaveLedger::with_clock(repo.clone(), Box::new(FixedClock(date(TODAY))));
    (ledger, repo)
}

/// Register an employee who joined on 2024-01-01.
pub async fn register(ledger: &LeaveLedger<MemRepository>, email: &str) -> Employee {
    ledger
        .register_employee("Jane Doe", email, Some("Engineering".to_string()), "2024-01-01")
        .await
        .expect("employee fixture failed")
}
