//! Invariant checks for persisted item lists.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::instrument;

use crate::domain::entities::Item;
use crate::domain::error::DomainError;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, DomainError>;

/// Check a persisted list against the layout invariants.
///
/// Reports the first violation found: duplicate ids, dangling or nested
/// section references, `child_ids` out of sync with membership, and
/// `order` not contiguous from zero.
#[instrument(level = "debug", skip(items), fields(items = items.len()))]
pub fn validate_items(items: &[Item]) -> ValidationResult<()> {
    if let Some(dup) = items.iter().map(|i| i.id.as_str()).duplicates().next() {
        return Err(DomainError::DuplicateId(dup.to_string()));
    }

    let sections: HashSet<&str> = items
        .iter()
        .filter(|i| i.is_section())
        .map(|i| i.id.as_str())
        .collect();

    let mut members: HashMap<&str, Vec<String>> = HashMap::new();
    for item in items {
        let Some(section) = item.section_ref() else {
            continue;
        };
        if item.is_section() {
            return Err(DomainError::NestedSection {
                section: item.id.clone(),
                parent: section.to_string(),
            });
        }
        if !sections.contains(section) {
            return Err(DomainError::UnknownSection {
                item: item.id.clone(),
                section: section.to_string(),
            });
        }
        members.entry(section).or_default().push(item.id.clone());
    }

    for item in items.iter().filter(|i| i.is_section()) {
        let expected = members.remove(item.id.as_str()).unwrap_or_default();
        if expected != item.child_ids {
            return Err(DomainError::ChildIdsMismatch {
                section: item.id.clone(),
                expected,
                found: item.child_ids.clone(),
            });
        }
    }

    for (expected, item) in items.iter().enumerate() {
        if item.order != expected {
            return Err(DomainError::OrderMismatch {
                item: item.id.clone(),
                expected,
                found: item.order,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ItemKind;

    fn consistent() -> Vec<Item> {
        let mut section = Item::section("s");
        section.order = 1;
        section.child_ids = vec!["b".into()];
        let mut b = Item::new("b", ItemKind::Chart).in_section("s");
        b.order = 2;
        vec![Item::new("a", ItemKind::Text), section, b]
    }

    #[test]
    fn given_consistent_list_when_validating_then_ok() {
        assert_eq!(validate_items(&consistent()), Ok(()));
    }

    #[test]
    fn given_duplicate_ids_when_validating_then_reports_it() {
        let mut items = consistent();
        items[0].id = "b".into();
        assert_eq!(
            validate_items(&items),
            Err(DomainError::DuplicateId("b".into()))
        );
    }

    #[test]
    fn given_stale_child_ids_when_validating_then_reports_mismatch() {
        let mut items = consistent();
        items[1].child_ids.clear();
        assert!(matches!(
            validate_items(&items),
            Err(DomainError::ChildIdsMismatch { .. })
        ));
    }

    #[test]
    fn given_reference_to_plain_item_when_validating_then_unknown_section() {
        let mut items = consistent();
        items[2].section_id = Some("a".into());
        assert!(matches!(
            validate_items(&items),
            Err(DomainError::UnknownSection { .. })
        ));
    }

    #[test]
    fn given_gap_in_order_when_validating_then_reports_order() {
        let mut items = consistent();
        items[2].order = 5;
        assert!(matches!(
            validate_items(&items),
            Err(DomainError::OrderMismatch { expected: 2, found: 5, .. })
        ));
    }
}
