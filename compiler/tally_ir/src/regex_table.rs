//! Regex constants collected while parsing.

use rustc_hash::FxHashMap;

/// Mapping from constant name to pattern source.
///
/// Holds two kinds of entries:
///
/// - named constants from `const NAME /pattern/` statements;
/// - one compiler-internal entry (`re#0`, `re#1`, ...) per distinct pattern used
///   in a condition or match, so the code generator compiles each pattern
///   once no matter how often it is used.
///
/// Iteration order is insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegexTable {
    entries: Vec<(String, String)>,
    by_name: FxHashMap<String, usize>,
    by_pattern: FxHashMap<String, String>,
}

impl RegexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a named constant. Returns `false`, leaving the table unchanged,
    /// if the name is already taken.
    pub fn insert_named(&mut self, name: &str, pattern: &str) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.push(name.to_owned(), pattern.to_owned());
        true
    }

    /// Record a pattern under a compiler-internal name and return that name.
    /// Identical patterns share one entry.
    pub fn intern(&mut self, pattern: &str) -> String {
        if let Some(name) = self.by_pattern.get(pattern) {
            return name.clone();
        }
        let name = format!("re#{}", self.by_pattern.len());
        self.by_pattern.insert(pattern.to_owned(), name.clone());
        self.push(name.clone(), pattern.to_owned());
        name
    }

    fn push(&mut self, name: String, pattern: String) {
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push((name, pattern));
    }

    /// Pattern source recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, pattern)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, pattern)| (name.as_str(), pattern.as_str()))
    }
}
