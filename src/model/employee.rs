use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Annual leave entitlement granted to every new employee.
pub const DEFAULT_TOTAL_LEAVES: i32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "joining_date": "2024-01-01",
        "total_leaves": 20,
        "leaves_taken": 0
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    #[schema(
        example = "2024-01-01",
        value_type = String,
        format = "date"
    )]
    pub joining_date: NaiveDate,

    #[schema(example = 20)]
    pub total_leaves: i32,

    #[schema(example = 0)]
    pub leaves_taken: i32,
}

impl Employee {
    /// Leave balance still available to this employee.
    pub fn remaining(&self) -> i64 {
        (self.total_leaves - self.leaves_taken) as i64
    }
}

/// Employee record ready for insertion, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub joining_date: NaiveDate,
    pub total_leaves: i32,
    pub leaves_taken: i32,
}
