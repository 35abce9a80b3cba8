// src/resolve/index.rs

use std::collections::{HashMap, HashSet};

use super::variants::variants;
use crate::store::CatalogEntry;

/// Variant → entry id, in insertion order.
///
/// First writer wins: when two entries produce the same variant, the entry that
/// came first in the catalog keeps it and the other silently loses that key.
/// Iteration order is insertion order, which is what the weak tier scans.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    keys: Vec<(String, String)>,
    lookup: HashMap<String, usize>,
}

impl EntityIndex {
    /// Index every entry whose id is not in `resolved`. Entries without an id are skipped.
    pub fn build<'a, I>(entries: I, resolved: &HashSet<String>) -> Self
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        let mut index = Self::default();
        for entry in entries {
            if entry.id.is_empty() || resolved.contains(&entry.id) { continue; }
            let id_as_name = entry.id.replace('_', " ");
            for key in variants(&entry.display_name).into_iter().chain(variants(&id_as_name)) {
                index.insert(key, &entry.id);
            }
        }
        index
    }

    fn insert(&mut self, key: String, id: &str) {
        if self.lookup.contains_key(&key) { return; }
        self.lookup.insert(key.clone(), self.keys.len());
        self.keys.push((key, id.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup.get(key).map(|&i| self.keys[i].1.as_str())
    }

    /// `(variant, entry id)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(k, id)| (k.as_str(), id.as_str()))
    }

    /// Distinct entry ids, in the order they entered the index.
    pub fn entry_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.keys
            .iter()
            .map(|(_, id)| id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_keeps_shared_variant() {
        let entries = vec![CatalogEntry::new("sword", "Sword 1"), CatalogEntry::new("sword_2", "Sword 2")];
        let index = EntityIndex::build(&entries, &HashSet::new());
        assert_eq!(index.get("sword"), Some("sword"));
        assert_eq!(index.get("sword 2"), Some("sword_2"));
        assert_eq!(index.get("sword_2"), Some("sword_2"));
    }

    #[test]
    fn resolved_and_blank_ids_are_left_out() {
        let entries = vec![
            CatalogEntry::new("anvil", "Anvil"),
            CatalogEntry::new("", "Nameless"),
            CatalogEntry::new("bow", "Bow"),
        ];
        let resolved: HashSet<String> = ["anvil".to_string()].into_iter().collect();
        let index = EntityIndex::build(&entries, &resolved);
        assert_eq!(index.get("anvil"), None);
        assert_eq!(index.get("nameless"), None);
        assert_eq!(index.entry_ids(), vec!["bow"]);
    }

    #[test]
    fn id_variants_are_indexed() {
        let entries = vec![CatalogEntry::new("za_warudo", "The World")];
        let index = EntityIndex::build(&entries, &HashSet::new());
        assert_eq!(index.get("the world"), Some("za_warudo"));
        assert_eq!(index.get("za warudo"), Some("za_warudo"));
        assert_eq!(index.get("za_warudo"), Some("za_warudo"));
        assert_eq!(index.iter().next(), Some(("the world", "za_warudo")));
    }
}
