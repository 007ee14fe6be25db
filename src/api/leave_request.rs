use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::AppLedger;
use crate::ledger::LedgerError;
use crate::model::{LeaveRequest, LeaveStatus};
use crate::repo::LeaveFilter;

#[derive(Deserialize, ToSchema)]
pub struct ApplyLeave {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2024-02-01", format = "date", value_type = String)]
    pub start_date: String,

    #[schema(example = "2024-02-05", format = "date", value_type = String)]
    pub end_date: String,

    #[schema(example = "Family trip")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DecideLeave {
    /// "Approved" or "Rejected"
    #[schema(example = "Approved")]
    pub status: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveHistoryQuery {
    #[schema(example = 1)]
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    #[schema(example = "Pending")]
    /// Filter by leave status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": 1,
            "employee_id": 1,
            "start_date": "2024-02-01",
            "end_date": "2024-02-05",
            "reason": "Family trip",
            "status": "Pending",
            "applied_on": "2024-01-20"
        }
    ],
    "page": 1,
    "per_page": 10,
    "total": 1
}))]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

fn parse_status(value: &str) -> Result<LeaveStatus, LedgerError> {
    value
        .parse::<LeaveStatus>()
        .map_err(|_| LedgerError::Validation("Status must be 'Approved' or 'Rejected'.".to_string()))
}

/* =========================
Apply for leave
========================= */
/// Swagger doc for apply_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = ApplyLeave,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted, pending approval", body = LeaveRequest),
        (status = 400, description = "Validation failure", body = Object, example = json!({
            "error": "Insufficient leave balance. You have 2 days available."
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found."
        }))
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    ledger: web::Data<AppLedger>,
    payload: web::Json<ApplyLeave>,
) -> actix_web::Result<impl Responder> {
    let request = ledger
        .apply_leave(
            payload.employee_id,
            &payload.start_date,
            &payload.end_date,
            &payload.reason,
        )
        .await?;

    Ok(HttpResponse::Created().json(request))
}

/* =========================
Approve / reject leave
========================= */
/// Swagger doc for decide_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to decide")
    ),
    request_body(
        content = DecideLeave,
        description = "Decision payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave decided successfully", body = LeaveRequest),
        (status = 400, description = "Invalid decision or request already decided", body = Object, example = json!({
            "error": "Leave already Approved."
        })),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "error": "Leave request not found."
        }))
    ),
    tag = "Leave"
)]
pub async fn decide_leave(
    ledger: web::Data<AppLedger>,
    path: web::Path<u64>,
    payload: web::Json<DecideLeave>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let decision = parse_status(&payload.status)?;
    let request = ledger.decide_leave(leave_id, decision).await?;

    Ok(HttpResponse::Ok().json(request))
}

/// Swagger doc for get_leave endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "error": "Leave request not found."
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    ledger: web::Data<AppLedger>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let request = ledger.leave_request(leave_id).await?;

    Ok(HttpResponse::Ok().json(request))
}

/// Swagger doc for leave_history endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveHistoryQuery),
    responses(
        (status = 200, description = "Paginated leave history", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_history(
    ledger: web::Data<AppLedger>,
    query: web::Query<LeaveHistoryQuery>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let status = match query.status.as_deref() {
        Some(s) => Some(parse_status_filter(s)?),
        None => None,
    };

    let filter = LeaveFilter {
        employee_id: query.employee_id,
        status,
    };

    let (data, total) = ledger.leave_history(&filter, page, per_page).await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

fn parse_status_filter(value: &str) -> Result<LeaveStatus, LedgerError> {
    value.parse::<LeaveStatus>().map_err(|_| {
        LedgerError::Validation(format!(
            "Unknown leave status '{value}'. Expected Pending, Approved or Rejected."
        ))
    })
}
