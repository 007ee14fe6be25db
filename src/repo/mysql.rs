use chrono::NaiveDate;
use sqlx::mysql::{MySql, MySqlPool, MySqlRow};
use sqlx::{Row, Transaction};

use super::{LeaveFilter, LedgerTx, RepoError, Repository};
use crate::model::{Employee, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest};

// MySQL reports unique-key violations under SQLSTATE 23000.
const SQLSTATE_INTEGRITY_VIOLATION: &str = "23000";

/// MySQL-backed repository. Plain lookups run on the pool; `begin` hands
/// out a transaction-backed unit of work.
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

pub struct MySqlLedgerTx {
    tx: Transaction<'static, MySql>,
}

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Str(String),
}

fn row_to_employee(row: &MySqlRow) -> Result<Employee, RepoError> {
    Ok(Employee {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        department: row.try_get("department")?,
        joining_date: row.try_get("joining_date")?,
        total_leaves: row.try_get("total_leaves")?,
        leaves_taken: row.try_get("leaves_taken")?,
    })
}

fn row_to_leave_request(row: &MySqlRow) -> Result<LeaveRequest, RepoError> {
    let status: String = row.try_get("status")?;
    let status = status.parse::<LeaveStatus>().map_err(|_| {
        RepoError::Database(sqlx::Error::Decode(
            format!("unknown leave status: {status}").into(),
        ))
    })?;

    Ok(LeaveRequest {
        id: row.try_get("id")?,
        employee_id: row.try_get("employee_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        reason: row.try_get("reason")?,
        status,
        applied_on: row.try_get("applied_on")?,
    })
}

fn map_insert_err(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(SQLSTATE_INTEGRITY_VIOLATION) {
            return RepoError::DuplicateKey;
        }
    }
    RepoError::Database(e)
}

const SELECT_EMPLOYEE: &str = r#"
    SELECT id, name, email, department, joining_date, total_leaves, leaves_taken
    FROM employees
    WHERE id = ?
"#;

const SELECT_LEAVE_REQUEST: &str = r#"
    SELECT id, employee_id, start_date, end_date, reason, status, applied_on
    FROM leave_requests
    WHERE id = ?
"#;

impl Repository for MySqlRepository {
    type Tx = MySqlLedgerTx;

    async fn begin(&self) -> Result<MySqlLedgerTx, RepoError> {
        let tx = self.pool.begin().await?;
        Ok(MySqlLedgerTx { tx })
    }

    async fn employee_by_id(&self, id: u64) -> Result<Option<Employee>, RepoError> {
        let row = sqlx::query(SELECT_EMPLOYEE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    async fn leave_request_by_id(&self, id: u64) -> Result<Option<LeaveRequest>, RepoError> {
        let row = sqlx::query(SELECT_LEAVE_REQUEST)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_leave_request).transpose()
    }

    async fn list_leave_requests(
        &self,
        filter: &LeaveFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaveRequest>, i64), RepoError> {
        // -------------------------
        // WHERE clause
        // -------------------------
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(emp_id) = filter.employee_id {
            where_sql.push_str(" AND employee_id = ?");
            args.push(FilterValue::U64(emp_id));
        }

        if let Some(status) = filter.status {
            where_sql.push_str(" AND status = ?");
            args.push(FilterValue::Str(status.to_string()));
        }

        // -------------------------
        // COUNT query
        // -------------------------
        let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::U64(v) => count_q.bind(*v),
                FilterValue::Str(s) => count_q.bind(s.clone()),
            };
        }

        let total = count_q.fetch_one(&self.pool).await?;

        // -------------------------
        // DATA query
        // -------------------------
        let offset = (page.saturating_sub(1)) * per_page;
        let data_sql = format!(
            r#"
            SELECT id, employee_id, start_date, end_date, reason, status, applied_on
            FROM leave_requests
            {}
            ORDER BY applied_on DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
            where_sql
        );

        let mut data_q = sqlx::query(&data_sql);
        for arg in args {
            data_q = match arg {
                FilterValue::U64(v) => data_q.bind(v),
                FilterValue::Str(s) => data_q.bind(s),
            };
        }

        let rows = data_q
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let requests = rows
            .iter()
            .map(row_to_leave_request)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((requests, total))
    }
}

impl LedgerTx for MySqlLedgerTx {
    async fn employee_by_id(&mut self, id: u64) -> Result<Option<Employee>, RepoError> {
        let row = sqlx::query(SELECT_EMPLOYEE)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    async fn employee_for_update(&mut self, id: u64) -> Result<Option<Employee>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, department, joining_date, total_leaves, leaves_taken
            FROM employees
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees
                (name, email, department, joining_date, total_leaves, leaves_taken)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.department)
        .bind(new.joining_date)
        .bind(new.total_leaves)
        .bind(new.leaves_taken)
        .execute(&mut *self.tx)
        .await
        .map_err(map_insert_err)?;

        Ok(Employee {
            id: result.last_insert_id(),
            name: new.name.clone(),
            email: new.email.clone(),
            department: new.department.clone(),
            joining_date: new.joining_date,
            total_leaves: new.total_leaves,
            leaves_taken: new.leaves_taken,
        })
    }

    async fn increment_leaves_taken(&mut self, id: u64, days: i64) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            UPDATE employees
            SET leaves_taken = leaves_taken + ?
            WHERE id = ?
            "#,
        )
        .bind(days)
        .bind(id)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn leave_request_by_id(&mut self, id: u64) -> Result<Option<LeaveRequest>, RepoError> {
        let row = sqlx::query(SELECT_LEAVE_REQUEST)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        row.as_ref().map(row_to_leave_request).transpose()
    }

    async fn insert_leave_request(
        &mut self,
        new: &NewLeaveRequest,
    ) -> Result<LeaveRequest, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, start_date, end_date, reason, status, applied_on)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.employee_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(&new.reason)
        .bind(new.status.to_string())
        .bind(new.applied_on)
        .execute(&mut *self.tx)
        .await?;

        Ok(LeaveRequest {
            id: result.last_insert_id(),
            employee_id: new.employee_id,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason.clone(),
            status: new.status,
            applied_on: new.applied_on,
        })
    }

    async fn set_leave_request_status(
        &mut self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(id)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn approved_overlapping(
        &mut self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<LeaveRequest>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT id, employee_id, start_date, end_date, reason, status, applied_on
            FROM leave_requests
            WHERE employee_id = ?
              AND status = 'Approved'
              AND NOT (end_date < ? OR start_date > ?)
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(row_to_leave_request).transpose()
    }

    async fn commit(self) -> Result<(), RepoError> {
        self.tx.commit().await?;
        Ok(())
    }
}
