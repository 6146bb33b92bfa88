//! Domain entities: core data structures

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Widget discriminant. Only `Section` carries structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Section,
    Chart,
    Table,
    Text,
    Metric,
}

impl ItemKind {
    pub fn is_section(self) -> bool {
        matches!(self, ItemKind::Section)
    }
}

/// A dashboard widget as persisted.
///
/// A section owns the items whose `section_id` names it; `child_ids` mirrors
/// that membership and is always rebuilt, never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    /// Owning section, `None` for top-level items
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_id: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_ids: Vec<String>,
    /// Remaining widget attributes, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            section_id: None,
            order: 0,
            child_ids: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn section(id: impl Into<String>) -> Self {
        Self::new(id, ItemKind::Section)
    }

    /// Same item, placed inside `section`.
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section_id = Some(section.into());
        self
    }

    pub fn is_section(&self) -> bool {
        self.kind.is_section()
    }

    pub fn section_ref(&self) -> Option<&str> {
        self.section_id.as_deref()
    }
}

/// Entry of the flat metric list. No structure, reordered with `relocate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metric {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// The persisted dashboard document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_section_id_when_deserializing_then_item_is_top_level() {
        let item: Item =
            serde_json::from_str(r#"{"id":"a","kind":"chart","sectionId":"","order":3}"#).unwrap();
        assert_eq!(item.section_id, None);
        assert_eq!(item.order, 3);
    }

    #[test]
    fn given_unknown_attributes_when_round_tripping_then_they_are_preserved() {
        let json = r#"{"id":"a","kind":"text","order":0,"title":"Revenue","width":6}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.extra.get("title"), Some(&Value::from("Revenue")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["width"], Value::from(6));
        assert!(back.get("sectionId").is_none());
        assert!(back.get("childIds").is_none());
    }

    #[test]
    fn given_section_kind_when_checking_then_only_section_is_structural() {
        assert!(ItemKind::Section.is_section());
        assert!(!ItemKind::Chart.is_section());
        assert!(Item::section("s").is_section());
    }
}
