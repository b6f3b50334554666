use std::collections::BTreeSet;

/// The distinct prerequisite course numbers referenced by a catalogue.
///
/// Entries are collected while courses are read and checked against the
/// loaded courses afterwards. Iteration is in ascending order, so the first
/// missing prerequisite reported by validation is always the same one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrerequisiteSet(BTreeSet<String>);

impl PrerequisiteSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a course number to the set.
    ///
    /// Returns `true` if the number was not already present.
    pub fn insert(&mut self, number: impl Into<String>) -> bool {
        self.0.insert(number.into())
    }

    /// Returns `true` if the number has been recorded.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.0.contains(number)
    }

    /// The number of distinct prerequisites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no prerequisites have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the distinct prerequisites in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for PrerequisiteSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for number in iter {
            self.insert(number);
        }
    }
}
