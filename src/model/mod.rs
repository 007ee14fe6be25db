pub mod employee;
pub mod leave_request;

pub use employee::{DEFAULT_TOTAL_LEAVES, Employee, NewEmployee};
pub use leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest, leave_days, ranges_overlap};
