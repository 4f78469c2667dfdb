mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{service_with, test_service};
use leavebook::application::AppError;
use leavebook::domain::{CancelOutcome, LeaveStatus};

#[tokio::test]
async fn test_apply_and_cancel_scenario() -> Result<()> {
    let service = test_service()?;

    let applied = service
        .apply_leave("Gaurav", "2025-01-10", "2025-01-12", None)
        .await?;
    assert_eq!(applied.request.days, 3);
    assert_eq!(applied.request.leave_type, "Annual");
    assert_eq!(applied.remaining, 12);
    assert_eq!(service.check_balance("Gaurav").await?.balance, 12);

    let list = service.view_requests("Gaurav").await?;
    assert_eq!(list.requests.len(), 1);
    assert_eq!(list.requests[0].status, LeaveStatus::Pending);

    let outcome = service.cancel_leave("Gaurav", 1).await?;
    assert!(matches!(
        outcome,
        CancelOutcome::Cancelled { balance: 15, .. }
    ));
    assert_eq!(service.check_balance("Gaurav").await?.balance, 15);

    // Second cancel is informational only
    let outcome = service.cancel_leave("Gaurav", 1).await?;
    assert!(matches!(outcome, CancelOutcome::AlreadyCancelled { .. }));
    assert_eq!(service.check_balance("Gaurav").await?.balance, 15);

    let list = service.view_requests("Gaurav").await?;
    assert_eq!(list.requests.len(), 1);
    assert_eq!(list.requests[0].status, LeaveStatus::Cancelled);

    Ok(())
}

#[tokio::test]
async fn test_insufficient_balance_leaves_state_untouched() -> Result<()> {
    let service = test_service()?;

    let result = service
        .apply_leave("Rajeev", "2025-03-01", "2025-03-10", None)
        .await;
    assert!(matches!(
        result,
        Err(AppError::InsufficientBalance {
            available: 8,
            requested: 10,
            ..
        })
    ));

    assert_eq!(service.check_balance("Rajeev").await?.balance, 8);
    assert!(service.view_requests("Rajeev").await?.requests.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_cancel_out_of_range() -> Result<()> {
    let service = test_service()?;
    service
        .apply_leave("Gaurav", "2025-01-10", "2025-01-12", None)
        .await?;

    let result = service.cancel_leave("Gaurav", 5).await;
    assert!(matches!(
        result,
        Err(AppError::InvalidRequestNumber {
            number: 5,
            count: 1,
            ..
        })
    ));
    assert_eq!(service.check_balance("Gaurav").await?.balance, 12);

    Ok(())
}

#[tokio::test]
async fn test_cancel_with_no_requests() -> Result<()> {
    let service = test_service()?;

    let result = service.cancel_leave("Shubha", 1).await;
    assert!(matches!(
        result,
        Err(AppError::InvalidRequestNumber { count: 0, .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_unknown_employee_everywhere() -> Result<()> {
    let service = test_service()?;

    assert!(matches!(
        service
            .apply_leave("Nobody", "2025-01-10", "2025-01-12", None)
            .await,
        Err(AppError::UnknownEmployee(_))
    ));
    assert!(matches!(
        service.check_balance("Nobody").await,
        Err(AppError::UnknownEmployee(_))
    ));
    assert!(matches!(
        service.view_requests("Nobody").await,
        Err(AppError::UnknownEmployee(_))
    ));
    assert!(matches!(
        service.cancel_leave("Nobody", 1).await,
        Err(AppError::UnknownEmployee(_))
    ));

    // Nobody else was touched
    let balances: Vec<i64> = service
        .list_employees()
        .await
        .into_iter()
        .map(|e| e.balance)
        .collect();
    assert_eq!(balances, vec![15, 12, 10, 8, 20]);

    Ok(())
}

#[tokio::test]
async fn test_unknown_employee_reported_before_bad_dates() -> Result<()> {
    let service = test_service()?;

    for (start, end) in [("garbage", "2025-01-02"), ("2025-01-01", "garbage"), ("x", "y")] {
        let result = service.apply_leave("Nobody", start, end, None).await;
        assert!(matches!(result, Err(AppError::UnknownEmployee(ref name)) if name == "Nobody"));
    }

    // A known employee still gets the date error
    let result = service
        .apply_leave("Gaurav", "garbage", "2025-01-02", None)
        .await;
    assert!(matches!(result, Err(AppError::InvalidDate(ref input)) if input == "garbage"));

    Ok(())
}

#[tokio::test]
async fn test_malformed_dates_are_recoverable() -> Result<()> {
    let service = test_service()?;

    for (start, end) in [
        ("2025-13-01", "2025-13-02"),
        ("yesterday", "2025-01-02"),
        ("2025-01-01", "2025-02-30"),
    ] {
        let result = service.apply_leave("Lakshay", start, end, None).await;
        assert!(matches!(result, Err(AppError::InvalidDate(_))));
    }

    assert_eq!(service.check_balance("Lakshay").await?.balance, 20);
    assert!(service.view_requests("Lakshay").await?.requests.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_reversed_range_is_rejected() -> Result<()> {
    let service = test_service()?;

    let result = service
        .apply_leave("Vibhanshu", "2025-05-10", "2025-05-01", None)
        .await;
    assert!(matches!(result, Err(AppError::InvalidDateRange { .. })));
    assert_eq!(service.check_balance("Vibhanshu").await?.balance, 10);

    Ok(())
}

#[tokio::test]
async fn test_leave_type_and_numbering() -> Result<()> {
    let service = test_service()?;

    service
        .apply_leave("Lakshay", "2025-02-03", "2025-02-03", Some("Sick"))
        .await?;
    let second = service
        .apply_leave("Lakshay", "2025-03-03", "2025-03-07", Some("  "))
        .await?;
    assert_eq!(second.number, 2);
    assert_eq!(second.request.leave_type, "Annual");

    service.cancel_leave("Lakshay", 1).await?;
    let third = service
        .apply_leave("Lakshay", "2025-04-01", "2025-04-02", None)
        .await?;
    // Cancelled requests keep their slot
    assert_eq!(third.number, 3);

    let list = service.view_requests("Lakshay").await?;
    let types: Vec<&str> = list.requests.iter().map(|r| r.leave_type.as_str()).collect();
    assert_eq!(types, vec!["Sick", "Annual", "Annual"]);
    assert_eq!(service.check_balance("Lakshay").await?.balance, 20 - 5 - 2);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_applies_cannot_overdraw() -> Result<()> {
    let service = Arc::new(service_with(&[("Asha", 10)])?);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .apply_leave("Asha", "2025-07-01", "2025-07-03", None)
                .await
                .is_ok()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await? {
            accepted += 1;
        }
    }

    // 3 days each out of 10
    assert_eq!(accepted, 3);
    assert_eq!(service.check_balance("Asha").await?.balance, 1);
    assert_eq!(service.view_requests("Asha").await?.requests.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_static_content() -> Result<()> {
    let service = test_service()?;

    assert!(service.leave_policy().contains("Sick leave: 10 days per year."));

    let approved = service.approval_message("Shubha", true, Some("ignored"));
    assert!(approved.contains("approved"));
    assert!(!approved.contains("ignored"));

    let rejected = service.approval_message("Shubha", false, None);
    assert!(rejected.ends_with("Reason: "));

    Ok(())
}
