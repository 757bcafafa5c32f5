//! The `editor.rulers` list model.
//!
//! The editor accepts either a bare column number or a full entry object in
//! the ruler list, so [`RulerItem`] mirrors that union. The synchronizer
//! owns at most one entry, marked by [`RULER_TAG`] in the otherwise
//! free-form `comment` field; everything else in the list is user-authored
//! and must pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comment value marking the one ruler entry owned by this tool.
pub const RULER_TAG: &str = "clang-format";

// ── RulerEntry ────────────────────────────────────────────────────────────────

/// A single object-shaped entry of the `editor.rulers` list.
///
/// Fields the editor knows about are modelled explicitly; anything else a
/// user has written into an entry is kept in `extra` so a rewrite of the
/// list never drops foreign data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulerEntry {
    /// Column the guide line sits at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// Optional CSS-style color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form comment; [`RULER_TAG`] marks the entry as ours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Unrecognised fields, preserved verbatim across rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RulerEntry {
    /// Build the tagged entry this tool maintains.
    pub fn managed(column: u32, color: Option<String>) -> Self {
        Self {
            column: Some(column),
            color,
            comment: Some(RULER_TAG.to_string()),
            extra: Map::new(),
        }
    }

    /// `true` when this entry carries the ownership tag.
    pub fn is_managed(&self) -> bool {
        self.comment.as_deref() == Some(RULER_TAG)
    }
}

// ── RulerItem ─────────────────────────────────────────────────────────────────

/// One element of the `editor.rulers` list: a bare column or a full entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulerItem {
    /// Plain column number, the editor's shorthand form.
    Column(u32),
    /// Object form with optional column, color, and comment.
    Entry(RulerEntry),
}

impl RulerItem {
    /// `true` when this item is the entry owned by this tool.
    ///
    /// Bare column numbers carry no comment and are never ours.
    pub fn is_managed(&self) -> bool {
        match self {
            RulerItem::Column(_) => false,
            RulerItem::Entry(entry) => entry.is_managed(),
        }
    }
}

/// Remove the first tagged entry from `rulers`, leaving every other item in
/// place and in order. Returns `true` when an entry was removed.
pub fn remove_first_managed(rulers: &mut Vec<RulerItem>) -> bool {
    match rulers.iter().position(RulerItem::is_managed) {
        Some(index) => {
            rulers.remove(index);
            true
        }
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── serde shapes ──────────────────────────────────────────────────────

    #[test]
    fn test_bare_column_round_trip() {
        let item: RulerItem = serde_json::from_value(json!(100)).expect("deserialize");
        assert_eq!(item, RulerItem::Column(100));
        assert_eq!(serde_json::to_value(&item).expect("serialize"), json!(100));
    }

    #[test]
    fn test_entry_round_trip_omits_absent_fields() {
        let item = RulerItem::Entry(RulerEntry::managed(120, None));
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value, json!({"column": 120, "comment": "clang-format"}));
    }

    #[test]
    fn test_entry_with_color() {
        let item = RulerItem::Entry(RulerEntry::managed(80, Some("#ff0000".to_string())));
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(
            value,
            json!({"column": 80, "color": "#ff0000", "comment": "clang-format"})
        );
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let original = json!({"column": 90, "label": "review width"});
        let item: RulerItem = serde_json::from_value(original.clone()).expect("deserialize");
        assert_eq!(serde_json::to_value(&item).expect("serialize"), original);
    }

    #[test]
    fn test_mixed_list_deserializes() {
        let list: Vec<RulerItem> =
            serde_json::from_value(json!([80, {"column": 100, "color": "#333333"}]))
                .expect("deserialize");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], RulerItem::Column(80));
    }

    // ── is_managed ────────────────────────────────────────────────────────

    #[test]
    fn test_is_managed() {
        assert!(RulerItem::Entry(RulerEntry::managed(80, None)).is_managed());
        assert!(!RulerItem::Column(80).is_managed());

        let user_entry = RulerItem::Entry(RulerEntry {
            column: Some(100),
            ..Default::default()
        });
        assert!(!user_entry.is_managed());

        let other_comment = RulerItem::Entry(RulerEntry {
            column: Some(100),
            comment: Some("mine".to_string()),
            ..Default::default()
        });
        assert!(!other_comment.is_managed());
    }

    // ── remove_first_managed ──────────────────────────────────────────────

    #[test]
    fn test_remove_first_managed_preserves_others() {
        let mut rulers = vec![
            RulerItem::Column(72),
            RulerItem::Entry(RulerEntry::managed(100, None)),
            RulerItem::Entry(RulerEntry {
                column: Some(120),
                ..Default::default()
            }),
        ];

        assert!(remove_first_managed(&mut rulers));
        assert_eq!(rulers.len(), 2);
        assert_eq!(rulers[0], RulerItem::Column(72));
        assert!(!rulers[1].is_managed());
    }

    #[test]
    fn test_remove_first_managed_only_first_match() {
        // Two tagged entries can only exist if something else put them there;
        // removal still only touches the first.
        let mut rulers = vec![
            RulerItem::Entry(RulerEntry::managed(100, None)),
            RulerItem::Entry(RulerEntry::managed(120, None)),
        ];

        assert!(remove_first_managed(&mut rulers));
        assert_eq!(rulers, vec![RulerItem::Entry(RulerEntry::managed(120, None))]);
    }

    #[test]
    fn test_remove_first_managed_no_match() {
        let mut rulers = vec![RulerItem::Column(80)];
        assert!(!remove_first_managed(&mut rulers));
        assert_eq!(rulers.len(), 1);
    }
}
