use serde::{Deserialize, Serialize};

pub const RECENT_CAPACITY: usize = 5;

/// Most-recent-first list of distinct city names that were searched successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCities {
    names: Vec<String>,
}

impl RecentCities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new list with `name` moved (or inserted) to the front.
    ///
    /// Matching is exact and case-sensitive. The result holds at most [`RECENT_CAPACITY`] names.
    pub fn record_search(&self, name: &str) -> RecentCities {
        let mut names = Vec::with_capacity(RECENT_CAPACITY);
        names.push(name.to_string());
        names.extend(
            self.names
                .iter()
                .filter(|existing| existing.as_str() != name)
                .take(RECENT_CAPACITY - 1)
                .cloned(),
        );
        RecentCities { names }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(names: &[&str]) -> RecentCities {
        names.iter().rev().fold(RecentCities::new(), |acc, name| acc.record_search(name))
    }

    #[test]
    fn duplicate_moves_to_front() {
        let list = from(&["Seoul", "Busan"]);
        assert_eq!(list.record_search("Seoul").as_slice(), ["Seoul", "Busan"]);
        assert_eq!(list.record_search("Busan").as_slice(), ["Busan", "Seoul"]);
    }

    #[test]
    fn keeps_last_five_most_recent_first() {
        let list = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .fold(RecentCities::new(), |acc, name| acc.record_search(name));

        assert_eq!(list.as_slice(), ["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let list = from(&["Seoul"]).record_search("seoul");
        assert_eq!(list.as_slice(), ["seoul", "Seoul"]);
    }

    #[test]
    fn record_search_does_not_mutate_original() {
        let list = from(&["Seoul"]);
        let _ = list.record_search("Busan");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn full_list_reinsert_keeps_five() {
        let list = from(&["A", "B", "C", "D", "E"]);
        let list = list.record_search("C");
        assert_eq!(list.as_slice(), ["C", "A", "B", "D", "E"]);
        assert_eq!(list.len(), RECENT_CAPACITY);
    }
}
