use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AppLedger;
use crate::model::Employee;

#[derive(Deserialize, ToSchema)]
pub struct RegisterEmployee {
    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub joining_date: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "employee_id": 1,
    "total_leaves": 20,
    "leaves_taken": 5,
    "remaining_leaves": 15
}))]
pub struct LeaveBalanceResponse {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = 20)]
    pub total_leaves: i32,
    #[schema(example = 5)]
    pub leaves_taken: i32,
    #[schema(example = 15)]
    pub remaining_leaves: i64,
}

/* =========================
Register employee
========================= */
/// Swagger doc for register_employee endpoint
#[utoipa::path(
    post,
    path = "/api/v1/employee",
    request_body(
        content = RegisterEmployee,
        description = "Employee registration payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Employee registered successfully", body = Employee),
        (status = 400, description = "Missing fields or email already exists", body = Object, example = json!({
            "error": "Email already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn register_employee(
    ledger: web::Data<AppLedger>,
    payload: web::Json<RegisterEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee = ledger
        .register_employee(
            &payload.name,
            &payload.email,
            payload.department.clone(),
            &payload.joining_date,
        )
        .await?;

    Ok(HttpResponse::Created().json(employee))
}

/// Swagger doc for get_employee endpoint
#[utoipa::path(
    get,
    path = "/api/v1/employee/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "ID of the employee to fetch")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found."
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    ledger: web::Data<AppLedger>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = ledger.employee(employee_id).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/* =========================
Leave balance
========================= */
/// Swagger doc for leave_balance endpoint
#[utoipa::path(
    get,
    path = "/api/v1/employee/{employee_id}/balance",
    params(
        ("employee_id" = u64, Path, description = "ID of the employee")
    ),
    responses(
        (status = 200, description = "Current leave balance", body = LeaveBalanceResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found."
        }))
    ),
    tag = "Employee"
)]
pub async fn leave_balance(
    ledger: web::Data<AppLedger>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = ledger.employee(employee_id).await?;

    Ok(HttpResponse::Ok().json(LeaveBalanceResponse {
        employee_id: employee.id,
        total_leaves: employee.total_leaves,
        leaves_taken: employee.leaves_taken,
        remaining_leaves: employee.remaining(),
    }))
}
