use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle of a leave request. Pending is the only non-terminal state:
/// a request is decided exactly once, into Approved or Rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "start_date": "2024-02-01",
        "end_date": "2024-02-05",
        "reason": "Family trip",
        "status": "Pending",
        "applied_on": "2024-01-20"
    })
)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2024-02-05", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Family trip")]
    pub reason: String,

    #[schema(example = "Pending")]
    pub status: LeaveStatus,

    #[schema(example = "2024-01-20", value_type = String, format = "date")]
    pub applied_on: NaiveDate,
}

impl LeaveRequest {
    /// Calendar days this request covers.
    pub fn leave_days(&self) -> i64 {
        leave_days(self.start_date, self.end_date)
    }
}

/// Leave request ready for insertion, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_on: NaiveDate,
}

/// Inclusive day count for a leave span. Weekends and holidays count like
/// any other day.
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Whether two date ranges intersect, boundary dates included.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    !(a_end < b_start || a_start > b_end)
}
