use crate::api::employee::{LeaveBalanceResponse, RegisterEmployee};
use crate::api::leave_request::{ApplyLeave, DecideLeave, LeaveHistoryQuery, LeaveListResponse};
use crate::model::{Employee, LeaveRequest, LeaveStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management System API",
        version = "1.0.0",
        description = r#"
## Leave Management System

This API records employees, tracks leave applications through their
approve/reject lifecycle, and reports leave balances.

### 🔹 Key Features
- **Employee Registration**
  - Register employees with a default annual leave entitlement
- **Leave Management**
  - Apply for leave, approve/reject requests, and view leave history
- **Balance Reporting**
  - Per-employee totals, days taken, and remaining balance

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for the leave history endpoint

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::apply_leave,
        crate::api::leave_request::decide_leave,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::leave_history,

        crate::api::employee::register_employee,
        crate::api::employee::get_employee,
        crate::api::employee::leave_balance,
    ),
    components(
        schemas(
            RegisterEmployee,
            LeaveBalanceResponse,
            ApplyLeave,
            DecideLeave,
            LeaveHistoryQuery,
            LeaveListResponse,
            Employee,
            LeaveRequest,
            LeaveStatus
        )
    ),
    tags(
        (name = "Leave", description = "Leave management APIs"),
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;
