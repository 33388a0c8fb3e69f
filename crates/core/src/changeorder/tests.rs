//! Tests for the change-order state machine and cascade planning.

use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;
use rust_decimal_macros::dec;

use sitecost_shared::types::{
    BudgetLineId, ChangeOrderId, CompanyId, ContractId, JobId, UserId,
};

use super::error::ChangeOrderError;
use super::service::ChangeOrderService;
use super::types::{ChangeOrder, ChangeOrderAction, ChangeOrderStatus};

fn order_with_status(status: ChangeOrderStatus) -> ChangeOrder {
    ChangeOrder {
        id: ChangeOrderId::new(),
        company_id: CompanyId::new(),
        job_id: JobId::new(),
        contract_id: ContractId::new(),
        budget_line_id: BudgetLineId::new(),
        description: "Add structural steel to mezzanine".to_string(),
        materials_cost: dec!(20000),
        labor_cost: dec!(15000),
        equipment_cost: dec!(3000),
        subcontractor_cost: dec!(2000),
        subtotal: dec!(40000),
        markup_amount: dec!(5000),
        total_amount: dec!(45000),
        is_credit: false,
        status,
        presented_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Forward transitions
// ============================================================================

#[test]
fn test_submit_from_draft() {
    let action = ChangeOrderService::submit(ChangeOrderStatus::Draft, UserId::new()).unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::InternalReview);
}

#[test]
fn test_send_back_from_review() {
    let action = ChangeOrderService::send_back(ChangeOrderStatus::InternalReview).unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::Draft);
}

#[test]
fn test_present_stamps_timestamp() {
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let action = ChangeOrderService::present(ChangeOrderStatus::InternalReview, now).unwrap();
    match action {
        ChangeOrderAction::Present {
            new_status,
            presented_at,
        } => {
            assert_eq!(new_status, ChangeOrderStatus::ClientPresented);
            assert_eq!(presented_at, now);
        }
        other => panic!("expected Present, got {other:?}"),
    }
}

#[test]
fn test_negotiate_from_presented() {
    let action = ChangeOrderService::negotiate(ChangeOrderStatus::ClientPresented).unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::Negotiation);
}

#[test]
fn test_submit_from_review_fails() {
    let result = ChangeOrderService::submit(ChangeOrderStatus::InternalReview, UserId::new());
    assert!(matches!(
        result,
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
}

// ============================================================================
// Approval and cascade plan
// ============================================================================

#[test]
fn test_approve_plans_equal_deltas() {
    let order = order_with_status(ChangeOrderStatus::Negotiation);
    let action = ChangeOrderService::approve(&order, UserId::new()).unwrap();

    match action {
        ChangeOrderAction::Approve { new_status, plan, .. } => {
            assert_eq!(new_status, ChangeOrderStatus::Approved);
            assert_eq!(plan.contract_delta, dec!(45000));
            assert_eq!(plan.committed_delta, dec!(45000));
            assert_eq!(plan.actual_delta, dec!(45000));
            assert_eq!(plan.draw_delta, dec!(45000));
            assert_eq!(plan.contract_id, order.contract_id);
            assert_eq!(plan.budget_line_id, order.budget_line_id);
        }
        other => panic!("expected Approve, got {other:?}"),
    }
}

#[test]
fn test_approve_from_presented() {
    let order = order_with_status(ChangeOrderStatus::ClientPresented);
    assert!(ChangeOrderService::approve(&order, UserId::new()).is_ok());
}

#[test]
fn test_credit_order_negates_deltas() {
    let mut order = order_with_status(ChangeOrderStatus::Negotiation);
    order.is_credit = true;
    let action = ChangeOrderService::approve(&order, UserId::new()).unwrap();

    match action {
        ChangeOrderAction::Approve { plan, .. } => {
            assert_eq!(plan.contract_delta, dec!(-45000));
            assert_eq!(plan.committed_delta, dec!(-45000));
            assert_eq!(plan.actual_delta, dec!(-45000));
            assert_eq!(plan.draw_delta, dec!(-45000));
        }
        other => panic!("expected Approve, got {other:?}"),
    }
}

#[test]
fn test_contract_value_scenario() {
    // $2,400,000 contract + $45,000 change order -> $2,445,000.
    let order = order_with_status(ChangeOrderStatus::Negotiation);
    let action = ChangeOrderService::approve(&order, UserId::new()).unwrap();
    let ChangeOrderAction::Approve { plan, .. } = action else {
        panic!("expected Approve");
    };

    let contract_value = dec!(2400000);
    assert_eq!(contract_value + plan.contract_delta, dec!(2445000));
}

#[test]
fn test_budget_line_zero_variance_scenario() {
    // Line estimated=5060 actual=0; approving a 5060 order drives actual to
    // 5060 and variance to zero.
    let mut order = order_with_status(ChangeOrderStatus::ClientPresented);
    order.materials_cost = dec!(5060);
    order.labor_cost = dec!(0);
    order.equipment_cost = dec!(0);
    order.subcontractor_cost = dec!(0);
    order.subtotal = dec!(5060);
    order.markup_amount = dec!(0);
    order.total_amount = dec!(5060);

    let action = ChangeOrderService::approve(&order, UserId::new()).unwrap();
    let ChangeOrderAction::Approve { plan, .. } = action else {
        panic!("expected Approve");
    };

    let estimated = dec!(5060);
    let actual = dec!(0) + plan.actual_delta;
    assert_eq!(actual, dec!(5060));
    assert_eq!(crate::budget::Reconciler::variance(estimated, actual), dec!(0));
}

#[test]
fn test_approve_rejects_bad_subtotal() {
    let mut order = order_with_status(ChangeOrderStatus::Negotiation);
    order.subtotal = dec!(39999);
    let result = ChangeOrderService::approve(&order, UserId::new());
    assert!(matches!(
        result,
        Err(ChangeOrderError::SubtotalMismatch { .. })
    ));
}

#[test]
fn test_approve_rejects_bad_total() {
    let mut order = order_with_status(ChangeOrderStatus::Negotiation);
    order.total_amount = dec!(44000);
    let result = ChangeOrderService::approve(&order, UserId::new());
    assert!(matches!(result, Err(ChangeOrderError::TotalMismatch { .. })));
}

// ============================================================================
// Rejection, withdrawal, void
// ============================================================================

#[test]
fn test_reject_requires_reason() {
    let result = ChangeOrderService::reject(ChangeOrderStatus::Negotiation, "  ".to_string());
    assert!(matches!(
        result,
        Err(ChangeOrderError::RejectionReasonRequired)
    ));
}

#[test]
fn test_reject_from_negotiation() {
    let action =
        ChangeOrderService::reject(ChangeOrderStatus::Negotiation, "Out of budget".to_string())
            .unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::Rejected);
}

#[test]
fn test_withdraw_inside_window() {
    let presented_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let window = Duration::hours(48);
    let now = presented_at + window - Duration::seconds(1);

    let action = ChangeOrderService::withdraw(
        ChangeOrderStatus::ClientPresented,
        Some(presented_at),
        now,
        window,
    )
    .unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::Withdrawn);
}

#[test]
fn test_withdraw_at_exact_boundary() {
    let presented_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let window = Duration::hours(48);

    let result = ChangeOrderService::withdraw(
        ChangeOrderStatus::ClientPresented,
        Some(presented_at),
        presented_at + window,
        window,
    );
    assert!(result.is_ok());
}

#[test]
fn test_withdraw_one_second_late_fails() {
    let presented_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let window = Duration::hours(48);
    let now = presented_at + window + Duration::seconds(1);

    let result = ChangeOrderService::withdraw(
        ChangeOrderStatus::ClientPresented,
        Some(presented_at),
        now,
        window,
    );
    assert!(matches!(
        result,
        Err(ChangeOrderError::WindowExpired { window_hours: 48, .. })
    ));
}

#[test]
fn test_withdraw_from_negotiation_uses_presentation_clock() {
    // Negotiation does not restart the window.
    let presented_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let window = Duration::hours(48);
    let now = presented_at + Duration::hours(72);

    let result = ChangeOrderService::withdraw(
        ChangeOrderStatus::Negotiation,
        Some(presented_at),
        now,
        window,
    );
    assert!(matches!(result, Err(ChangeOrderError::WindowExpired { .. })));
}

#[test]
fn test_withdraw_without_presentation_timestamp() {
    let result = ChangeOrderService::withdraw(
        ChangeOrderStatus::ClientPresented,
        None,
        Utc::now(),
        Duration::hours(48),
    );
    assert!(matches!(result, Err(ChangeOrderError::MissingPresentation)));
}

#[test]
fn test_void_from_draft() {
    let action =
        ChangeOrderService::void(ChangeOrderStatus::Draft, "Scope merged into CO-12".to_string())
            .unwrap();
    assert_eq!(action.new_status(), ChangeOrderStatus::Voided);
}

#[test]
fn test_void_requires_reason() {
    let result = ChangeOrderService::void(ChangeOrderStatus::Draft, String::new());
    assert!(matches!(result, Err(ChangeOrderError::VoidReasonRequired)));
}

#[test]
fn test_void_after_presentation_fails() {
    let result =
        ChangeOrderService::void(ChangeOrderStatus::ClientPresented, "too late".to_string());
    assert!(matches!(
        result,
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
}

// ============================================================================
// Terminal states are immutable
// ============================================================================

#[rstest]
#[case(ChangeOrderStatus::Approved)]
#[case(ChangeOrderStatus::Rejected)]
#[case(ChangeOrderStatus::Withdrawn)]
#[case(ChangeOrderStatus::Voided)]
fn test_terminal_state_rejects_every_transition(#[case] status: ChangeOrderStatus) {
    let user = UserId::new();
    let now = Utc::now();
    let window = Duration::hours(48);
    let order = order_with_status(status);

    assert!(matches!(
        ChangeOrderService::submit(status, user),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::send_back(status),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::present(status, now),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::negotiate(status),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::approve(&order, user),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::reject(status, "reason".to_string()),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::withdraw(status, Some(now), now, window),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        ChangeOrderService::void(status, "reason".to_string()),
        Err(ChangeOrderError::InvalidTransition { .. })
    ));
}

#[test]
fn test_double_approval_rejected() {
    let order = order_with_status(ChangeOrderStatus::Approved);
    let result = ChangeOrderService::approve(&order, UserId::new());
    assert!(matches!(
        result,
        Err(ChangeOrderError::InvalidTransition {
            from: ChangeOrderStatus::Approved,
            to: ChangeOrderStatus::Approved,
        })
    ));
}

// ============================================================================
// Transition table
// ============================================================================

#[test]
fn test_is_valid_transition() {
    use ChangeOrderStatus as S;

    // Valid transitions
    assert!(ChangeOrderService::is_valid_transition(S::Draft, S::InternalReview));
    assert!(ChangeOrderService::is_valid_transition(S::InternalReview, S::Draft));
    assert!(ChangeOrderService::is_valid_transition(S::InternalReview, S::ClientPresented));
    assert!(ChangeOrderService::is_valid_transition(S::ClientPresented, S::Negotiation));
    assert!(ChangeOrderService::is_valid_transition(S::ClientPresented, S::Approved));
    assert!(ChangeOrderService::is_valid_transition(S::Negotiation, S::Approved));
    assert!(ChangeOrderService::is_valid_transition(S::Negotiation, S::Rejected));
    assert!(ChangeOrderService::is_valid_transition(S::Negotiation, S::Withdrawn));
    assert!(ChangeOrderService::is_valid_transition(S::Draft, S::Voided));

    // Invalid transitions
    assert!(!ChangeOrderService::is_valid_transition(S::Draft, S::Approved));
    assert!(!ChangeOrderService::is_valid_transition(S::Draft, S::ClientPresented));
    assert!(!ChangeOrderService::is_valid_transition(S::Negotiation, S::ClientPresented));
    assert!(!ChangeOrderService::is_valid_transition(S::ClientPresented, S::Voided));
    assert!(!ChangeOrderService::is_valid_transition(S::Approved, S::Draft));
    assert!(!ChangeOrderService::is_valid_transition(S::Withdrawn, S::ClientPresented));
}

#[test]
fn test_status_round_trip() {
    for status in [
        ChangeOrderStatus::Draft,
        ChangeOrderStatus::InternalReview,
        ChangeOrderStatus::ClientPresented,
        ChangeOrderStatus::Negotiation,
        ChangeOrderStatus::Approved,
        ChangeOrderStatus::Rejected,
        ChangeOrderStatus::Withdrawn,
        ChangeOrderStatus::Voided,
    ] {
        assert_eq!(ChangeOrderStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(ChangeOrderStatus::parse("invalid"), None);
}
