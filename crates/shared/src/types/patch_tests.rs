//! Tests for three-state field patches.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::*;

#[derive(Debug, Deserialize)]
struct EditPayload {
    #[serde(default)]
    amount: FieldPatch<Decimal>,
    #[serde(default)]
    notes: FieldPatch<String>,
}

#[test]
fn test_absent_field_is_unchanged() {
    let payload: EditPayload = serde_json::from_str("{}").unwrap();
    assert_eq!(payload.amount, FieldPatch::Unchanged);
    assert_eq!(payload.notes, FieldPatch::Unchanged);
}

#[test]
fn test_null_field_is_cleared() {
    let payload: EditPayload = serde_json::from_str(r#"{"amount": null}"#).unwrap();
    assert_eq!(payload.amount, FieldPatch::Cleared);
    assert_eq!(payload.notes, FieldPatch::Unchanged);
}

#[test]
fn test_value_field_is_set() {
    let payload: EditPayload =
        serde_json::from_str(r#"{"amount": "150.25", "notes": "rebar"}"#).unwrap();
    assert_eq!(payload.amount, FieldPatch::Set(dec!(150.25)));
    assert_eq!(payload.notes, FieldPatch::Set("rebar".to_string()));
}

#[test]
fn test_resolve_with() {
    let stored = dec!(100);
    assert_eq!(
        FieldPatch::Unchanged.resolve_with(stored, Decimal::ZERO),
        dec!(100)
    );
    assert_eq!(
        FieldPatch::Cleared.resolve_with(stored, Decimal::ZERO),
        Decimal::ZERO
    );
    assert_eq!(
        FieldPatch::Set(dec!(42)).resolve_with(stored, Decimal::ZERO),
        dec!(42)
    );
}

#[test]
fn test_map_preserves_state() {
    let set = FieldPatch::Set(2).map(|v| v * 10);
    assert_eq!(set, FieldPatch::Set(20));

    let unchanged: FieldPatch<i32> = FieldPatch::Unchanged;
    assert_eq!(unchanged.map(|v| v * 10), FieldPatch::Unchanged);

    let cleared: FieldPatch<i32> = FieldPatch::Cleared;
    assert_eq!(cleared.map(|v| v * 10), FieldPatch::Cleared);
}

#[test]
fn test_flatten_optional_clear() {
    let cleared: FieldPatch<Option<String>> = FieldPatch::Cleared;
    assert_eq!(cleared.flatten(), FieldPatch::Set(None));

    let set: FieldPatch<Option<String>> = FieldPatch::Set(Some("x".into()));
    assert_eq!(set.flatten(), FieldPatch::Set(Some("x".into())));
}
