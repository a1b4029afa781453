//! Commits finished operations into the visible result and fact state.

/// Shown when a category fact could not be loaded.
pub const CATEGORY_FACT_FALLBACK: &str = "Learning about pets is fun! 🐾";
/// Shown before the first fact arrives and when the global fact fails.
pub const GLOBAL_FACT_FALLBACK: &str =
    "Press Space to generate names and discover fun pet facts!";

/// How the current result set should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation<'a> {
    Empty,
    Single(&'a str),
    Tags(&'a [String]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciler {
    names: Option<Vec<String>>,
    fact: String,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            names: None,
            fact: GLOBAL_FACT_FALLBACK.to_string(),
        }
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set wholesale, keeping the service's order.
    pub fn apply_names(&mut self, names: Vec<String>) {
        self.names = Some(names);
    }

    pub fn apply_single_name(&mut self, name: String) {
        self.apply_names(vec![name]);
    }

    /// Replaces the fact text; absent or blank text becomes `fallback`.
    pub fn apply_fact(&mut self, text: Option<&str>, fallback: &str) {
        self.fact = match text.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => fallback.to_string(),
        };
    }

    pub fn names(&self) -> &[String] {
        self.names.as_deref().unwrap_or(&[])
    }

    pub fn has_results(&self) -> bool {
        self.names.is_some()
    }

    pub fn fact(&self) -> &str {
        &self.fact
    }

    pub fn presentation(&self) -> Presentation<'_> {
        match self.names.as_deref() {
            None => Presentation::Empty,
            Some([only]) => Presentation::Single(only),
            Some(many) => Presentation::Tags(many),
        }
    }

    /// Payload for "copy results": every name, comma separated.
    pub fn copy_text(&self) -> Option<String> {
        let names = self.names();
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_name_path_matches_general_path() {
        let mut general = Reconciler::new();
        general.apply_names(names(&["Rex"]));
        let mut single = Reconciler::new();
        single.apply_single_name("Rex".to_string());

        assert_eq!(general, single);
        assert_eq!(general.presentation(), Presentation::Single("Rex"));
    }

    #[test]
    fn apply_names_replaces_without_accumulating() {
        let mut reconciler = Reconciler::new();
        reconciler.apply_names(names(&["Luna", "Max"]));
        reconciler.apply_names(names(&["Luna", "Max"]));
        assert_eq!(reconciler.names(), names(&["Luna", "Max"]).as_slice());

        reconciler.apply_names(names(&["Zoe", "Leo", "Bear"]));
        match reconciler.presentation() {
            Presentation::Tags(tags) => assert_eq!(tags, names(&["Zoe", "Leo", "Bear"]).as_slice()),
            other => panic!("unexpected presentation {:?}", other),
        }
        assert_eq!(reconciler.copy_text().as_deref(), Some("Zoe, Leo, Bear"));
    }

    #[test]
    fn fact_is_never_blank() {
        let mut reconciler = Reconciler::new();
        assert_eq!(reconciler.fact(), GLOBAL_FACT_FALLBACK);

        reconciler.apply_fact(Some("Cats sleep a lot."), CATEGORY_FACT_FALLBACK);
        assert_eq!(reconciler.fact(), "Cats sleep a lot.");

        reconciler.apply_fact(Some("   "), CATEGORY_FACT_FALLBACK);
        assert_eq!(reconciler.fact(), CATEGORY_FACT_FALLBACK);

        reconciler.apply_fact(None, GLOBAL_FACT_FALLBACK);
        assert_eq!(reconciler.fact(), GLOBAL_FACT_FALLBACK);
    }

    #[test]
    fn empty_until_first_success() {
        let reconciler = Reconciler::new();
        assert_eq!(reconciler.presentation(), Presentation::Empty);
        assert!(!reconciler.has_results());
        assert!(reconciler.copy_text().is_none());
    }
}
