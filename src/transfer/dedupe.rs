use std::collections::HashSet;

/// Comparison key for project names: trimmed and lower-cased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Tracks which project names are taken, seeded from storage and extended
/// by every row accepted earlier in the same batch.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    taken: HashSet<String>,
}

impl DuplicateDetector {
    pub fn new<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            taken: existing.into_iter().map(|n| name_key(n.as_ref())).collect(),
        }
    }

    /// Reserve `name` for this row. Returns `false` when it was already
    /// taken, in which case the earlier occurrence wins.
    pub fn claim(&mut self, name: &str) -> bool {
        self.taken.insert(name_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_names_match_ignoring_case_and_padding() {
        let mut detector = DuplicateDetector::new(["Acme Store", "  Blog "]);
        assert!(!detector.claim("acme store"));
        assert!(!detector.claim("BLOG"));
        assert!(detector.claim("Acme"));
    }

    #[test]
    fn first_claim_wins_within_a_batch() {
        let mut detector = DuplicateDetector::new(Vec::<String>::new());
        assert!(detector.claim("Foo"));
        assert!(!detector.claim(" foo "));
        assert!(detector.claim("Bar"));
    }

    #[test]
    fn non_ascii_names_fold_case() {
        let mut detector = DuplicateDetector::new(["Café Über"]);
        assert!(!detector.claim("CAFÉ ÜBER"));
    }
}
