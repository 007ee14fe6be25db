use anyhow::{Context, Result};
use sqlx::MySqlPool;

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    department VARCHAR(255) NULL,
    joining_date DATE NOT NULL,
    total_leaves INT NOT NULL DEFAULT 20,
    leaves_taken INT NOT NULL DEFAULT 0
) ENGINE=InnoDB
"#;

const CREATE_LEAVE_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS leave_requests (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    employee_id BIGINT UNSIGNED NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    reason TEXT NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'Pending',
    applied_on DATE NOT NULL,
    CONSTRAINT fk_leave_employee FOREIGN KEY (employee_id) REFERENCES employees(id)
) ENGINE=InnoDB
"#;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Create the two tables on startup if they are not there yet.
pub async fn migrate(pool: &MySqlPool) -> Result<()> {
    sqlx::query(CREATE_EMPLOYEES)
        .execute(pool)
        .await
        .context("Failed to create employees table")?;

    sqlx::query(CREATE_LEAVE_REQUESTS)
        .execute(pool)
        .await
        .context("Failed to create leave_requests table")?;

    Ok(())
}
