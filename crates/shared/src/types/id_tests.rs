//! Tests for typed ID wrappers.

use std::str::FromStr;

use super::*;

#[test]
fn test_new_ids_are_unique() {
    let a = BudgetLineId::new();
    let b = BudgetLineId::new();
    assert_ne!(a, b);
}

#[test]
fn test_from_uuid_round_trip() {
    let uuid = Uuid::now_v7();
    let id = CompanyId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_display_matches_uuid() {
    let uuid = Uuid::now_v7();
    let id = JobId::from_uuid(uuid);
    assert_eq!(id.to_string(), uuid.to_string());
}

#[test]
fn test_from_str_round_trip() {
    let id = ChangeOrderId::new();
    let parsed = ChangeOrderId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_from_str_rejects_garbage() {
    assert!(ContractId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_serde_transparent() {
    let id = InvoiceId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));

    let back: InvoiceId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
