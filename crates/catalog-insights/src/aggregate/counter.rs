use crate::types::CategoryCounts;
use std::collections::HashMap;

/// Counts labels while remembering the order each label was first seen.
#[derive(Debug, Default)]
pub(crate) struct FirstSeenCounter {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FirstSeenCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, label: &str) {
        match self.positions.get(label) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    /// All labels, in first-seen order.
    pub(crate) fn into_counts(self) -> CategoryCounts {
        CategoryCounts::new(self.entries)
    }

    /// The `n` largest counts, descending. Equal counts keep first-seen
    /// order (stable sort).
    pub(crate) fn into_top(self, n: usize) -> CategoryCounts {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        CategoryCounts::new(entries)
    }
}

impl<'a> FromIterator<&'a str> for FirstSeenCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counter = Self::new();
        for label in iter {
            counter.add(label);
        }
        counter
    }
}
