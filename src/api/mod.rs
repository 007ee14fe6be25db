pub mod employee;
pub mod leave_request;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::ledger::{LeaveLedger, LedgerError};
use crate::repo::MySqlRepository;

/// The ledger instance handlers receive from app data.
pub type AppLedger = LeaveLedger<MySqlRepository>;

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::Validation(_)
            | LedgerError::InvalidDate
            | LedgerError::InvalidRange
            | LedgerError::PreJoining
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::Overlap
            | LedgerError::AlreadyDecided(_)
            | LedgerError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,

            LedgerError::EmployeeNotFound(_) | LedgerError::LeaveNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            LedgerError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LedgerError::Repo(e) = self {
            tracing::error!(error = %e, "Repository failure");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
