//! Three-state field patches for partial edits.
//!
//! Edit payloads distinguish a field that is absent (leave the stored value
//! alone) from one that is explicitly `null` (clear it) from one that carries
//! a new value. Collapsing the first two into `Option<T>` loses the
//! distinction, so partial-update inputs use `FieldPatch<T>` instead.

use serde::{Deserialize, Deserializer};

/// A single field of a partial-update request.
///
/// Deserializes from JSON as follows:
/// - field absent → `Unchanged` (requires `#[serde(default)]` on the field)
/// - field is `null` → `Cleared`
/// - field has a value → `Set(value)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Field was absent from the payload; keep the stored value.
    Unchanged,
    /// Field was explicitly `null`; reset to the field's cleared value.
    Cleared,
    /// Field carries a replacement value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Returns true if the patch leaves the stored value alone.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Resolves the patch against the stored value, using `cleared` for `Cleared`.
    #[must_use]
    pub fn resolve_with(self, stored: T, cleared: T) -> T {
        match self {
            Self::Unchanged => stored,
            Self::Cleared => cleared,
            Self::Set(value) => value,
        }
    }

    /// Maps the carried value, preserving the patch state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldPatch<U> {
        match self {
            Self::Unchanged => FieldPatch::Unchanged,
            Self::Cleared => FieldPatch::Cleared,
            Self::Set(value) => FieldPatch::Set(f(value)),
        }
    }
}

impl<T> FieldPatch<Option<T>> {
    /// Flattens a patch of an optional value; `Cleared` becomes `Set(None)`.
    #[must_use]
    pub fn flatten(self) -> FieldPatch<Option<T>> {
        match self {
            Self::Cleared => Self::Set(None),
            other => other,
        }
    }
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absent fields never reach this impl; serde(default) yields Unchanged.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Self::Set(v),
            None => Self::Cleared,
        })
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
