//! Read access to bibliography metadata.

use std::collections::HashMap;

mod bibtex;

pub use bibtex::BibtexIndex;

/// Per-key metadata lookups used by sorting, key resolution and completion.
pub trait Bibliography {
    /// Publication year, if the entry exists and has a usable one.
    fn year(&self, key: &str) -> Option<i32>;

    fn title(&self, _key: &str) -> Option<String> {
        None
    }

    /// Every key in the database, in a stable order.
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.keys().iter().any(|k| k == key)
    }
}

/// A plain key to year map.
impl Bibliography for HashMap<String, i32> {
    fn year(&self, key: &str) -> Option<i32> {
        self.get(key).copied()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = HashMap::keys(self).cloned().collect();
        keys.sort();
        keys
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}
