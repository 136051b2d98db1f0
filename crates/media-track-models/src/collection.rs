use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{ItemId, TrackedItem};

/// Ordered list of tracked items for one view mode, most recently added first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<TrackedItem>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<TrackedItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &ItemId) -> Option<&TrackedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Id for an item created at `now`: its epoch milliseconds, bumped until
    /// no existing item uses it.
    pub fn next_id(&self, now: DateTime<Utc>) -> ItemId {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = ItemId::from_millis(millis);
            if !self.contains(&candidate) {
                return candidate;
            }
            millis += 1;
        }
    }

    pub fn prepend(&mut self, item: TrackedItem) {
        self.items.insert(0, item);
    }

    /// Removes the item with `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &ItemId) -> Option<TrackedItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a TrackedItem;
    type IntoIter = std::slice::Iter<'a, TrackedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MediaDetails;
    use chrono::TimeZone;

    fn item(id: &str, title: &str) -> TrackedItem {
        TrackedItem {
            id: ItemId::from(id),
            title: title.to_string(),
            added_at: Utc::now(),
            release_date: None,
            details: MediaDetails::Movie { director: None, genre: None },
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut collection = Collection::new();
        collection.prepend(item("1", "Alien"));
        collection.prepend(item("2", "Aliens"));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.items()[0].title, "Aliens");
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut collection = Collection::from_items(vec![
            item("3", "C"),
            item("2", "B"),
            item("1", "A"),
        ]);
        let removed = collection.remove(&ItemId::from("2"));
        assert_eq!(removed.map(|i| i.title), Some("B".to_string()));
        let titles: Vec<_> = collection.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut collection = Collection::from_items(vec![item("1", "A")]);
        assert!(collection.remove(&ItemId::from("nope")).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_next_id_skips_collisions() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let collection = Collection::from_items(vec![item("1000", "A"), item("1001", "B")]);
        assert_eq!(collection.next_id(now), ItemId::from("1002"));
        assert_eq!(Collection::new().next_id(now), ItemId::from("1000"));
    }
}
