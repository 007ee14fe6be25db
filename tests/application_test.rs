mod common;

use common::{TODAY, date, register, test_ledger};
use leave_ledger::ledger::LedgerError;
use leave_ledger::model::LeaveStatus;

#[tokio::test]
async fn application_creates_pending_request_without_touching_balance() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let request = ledger
        .apply_leave(employee.id, "2024-02-01", "2024-02-05", "Family trip")
        .await
        .unwrap();

    assert_eq!(request.id, 1);
    assert_eq!(request.employee_id, employee.id);
    assert_eq!(request.status, LeaveStatus::Pending);
    assert_eq!(request.leave_days(), 5);
    assert_eq!(request.applied_on, date(TODAY));

    // Balance is only reserved by the check, never deducted at application.
    let employee = ledger.employee(employee.id).await.unwrap();
    assert_eq!(employee.total_leaves, 20);
    assert_eq!(employee.leaves_taken, 0);
}

#[tokio::test]
async fn application_before_joining_date_is_rejected() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let err = ledger
        .apply_leave(employee.id, "2023-12-25", "2023-12-30", "Winter break")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::PreJoining));
}

#[tokio::test]
async fn application_with_reversed_range_is_rejected() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let err = ledger
        .apply_leave(employee.id, "2024-02-05", "2024-02-01", "Backwards")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InvalidRange));
}

#[tokio::test]
async fn application_with_malformed_dates_is_rejected() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    for (start, end) in [("02-01-2024", "2024-02-05"), ("2024-02-01", "not-a-date")] {
        let err = ledger
            .apply_leave(employee.id, start, end, "Trip")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate));
    }
}

#[tokio::test]
async fn application_for_unknown_employee_is_rejected() {
    let (ledger, _repo) = test_ledger();

    let err = ledger
        .apply_leave(99, "2024-02-01", "2024-02-05", "Trip")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::EmployeeNotFound(99)));
}

#[tokio::test]
async fn application_requires_a_reason() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let err = ledger
        .apply_leave(employee.id, "2024-02-01", "2024-02-05", "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn application_reports_remaining_balance_when_insufficient() {
    let (ledger, repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;
    repo.set_balance(employee.id, 10, 8);

    let err = ledger
        .apply_leave(employee.id, "2024-02-01", "2024-02-05", "Trip")
        .await
        .unwrap_err();

    match err {
        LedgerError::InsufficientBalance { remaining } => assert_eq!(remaining, 2),
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
    assert_eq!(repo.leave_count(), 0);
}

#[tokio::test]
async fn approved_leave_blocks_overlapping_application() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let first = ledger
        .apply_leave(employee.id, "2024-01-10", "2024-01-15", "Trip")
        .await
        .unwrap();
    ledger
        .decide_leave(first.id, LeaveStatus::Approved)
        .await
        .unwrap();

    // Shares only the boundary day, still an overlap.
    let err = ledger
        .apply_leave(employee.id, "2024-01-15", "2024-01-20", "Extension")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap));

    // Symmetric: a range ending on the approved start date overlaps too.
    let err = ledger
        .apply_leave(employee.id, "2024-01-05", "2024-01-10", "Earlier")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overlap));
}

#[tokio::test]
async fn pending_and_rejected_leaves_never_block() {
    let (ledger, _repo) = test_ledger();
    let employee = register(&ledger, "jane@company.com").await;

    let pending = ledger
        .apply_leave(employee.id, "2024-02-01", "2024-02-05", "Trip")
        .await
        .unwrap();

    // A second application over the same dates goes through while the
    // first is still pending.
    let second = ledger
        .apply_leave(employee.id, "2024-02-03", "2024-02-07", "Other trip")
        .await
        .unwrap();
    assert_eq!(second.status, LeaveStatus::Pending);

    ledger
        .decide_leave(pending.id, LeaveStatus::Rejected)
        .await
        .unwrap();

    let third = ledger
        .apply_leave(employee.id, "2024-02-01", "2024-02-05", "Retry")
        .await
        .unwrap();
    assert_eq!(third.status, LeaveStatus::Pending);
}
