//! Best-effort explanations for units that could not be classified

/// Sparse diagnostic side table explaining *some* Unknown units.
///
/// Non-exhaustive by design: an Unknown unit without an entry here is
/// simply unexplained, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownUnknowns {
    contains_generic_parameters: Vec<String>,
}

impl KnownUnknowns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type that could not be searched for because it references
    /// unbound generic parameters. Duplicates are ignored.
    pub fn add_contains_generic_parameters(&mut self, type_name: impl Into<String>) {
        let type_name = type_name.into();
        if !self.contains_generic_parameters.contains(&type_name) {
            self.contains_generic_parameters.push(type_name);
        }
    }

    /// Types with unbound generic parameters, in insertion order
    #[must_use]
    pub fn contains_generic_parameters(&self) -> &[String] {
        &self.contains_generic_parameters
    }

    /// Returns true if any explanation has been recorded.
    #[must_use]
    pub fn are_known(&self) -> bool {
        !self.contains_generic_parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_known() {
        assert!(!KnownUnknowns::new().are_known());
    }

    #[test]
    fn test_generic_entries_keep_order_and_dedupe() {
        let mut known = KnownUnknowns::new();
        known.add_contains_generic_parameters("B<T>");
        known.add_contains_generic_parameters("A<T>");
        known.add_contains_generic_parameters("B<T>");

        assert!(known.are_known());
        assert_eq!(known.contains_generic_parameters(), ["B<T>", "A<T>"]);
    }
}
