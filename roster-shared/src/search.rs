/// In-memory search and filtering over loaded records
///
/// Everything here is pure and synchronous. It works on a record set that was
/// already read from the store and never touches the store itself.
///
/// Filters do not chain: every call starts again from the full set it is
/// given, never from a previous call's result.
///
/// # Example
///
/// ```
/// use roster_shared::models::record::NewRecord;
/// use roster_shared::search::filter;
///
/// let records = vec![
///     NewRecord::new("Ana", "a@x.com").city("Lima").with_id(1),
///     NewRecord::new("Carol", "c@x.com").city("Miami").with_id(2),
/// ];
///
/// let hits = filter(&records, "LIMA");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Ana");
/// ```

use crate::models::record::Record;

/// Minimum input length before the city type-ahead runs
pub const CITY_QUERY_MIN_CHARS: usize = 2;

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Records where the query appears in the name, email or city
///
/// Matching ignores case and keeps the input order. An empty query returns
/// every record unchanged.
pub fn filter(records: &[Record], query: &str) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            contains_folded(Some(&r.name), &needle)
                || contains_folded(Some(&r.email), &needle)
                || contains_folded(r.city.as_deref(), &needle)
        })
        .cloned()
        .collect()
}

/// Records whose city contains the query, ignoring case
///
/// An empty query returns every record unchanged.
pub fn filter_by_city(records: &[Record], query: &str) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| contains_folded(r.city.as_deref(), &needle))
        .cloned()
        .collect()
}

/// Distinct cities in first-seen order, for type-ahead suggestions
pub fn city_suggestions(records: &[Record]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for city in records.iter().filter_map(|r| r.city.as_deref()) {
        if !cities.iter().any(|c| c == city) {
            cities.push(city.to_string());
        }
    }
    cities
}

/// A loaded record set and the current view over it
///
/// Before `load` the set is absent and behaves as empty.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    all: Option<Vec<Record>>,
    results: Vec<Record>,
}

impl SearchSession {
    /// Creates a session with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded set and shows all of it
    pub fn load(&mut self, records: Vec<Record>) {
        self.results = records.clone();
        self.all = Some(records);
    }

    /// Whether a record set has been loaded
    pub fn is_loaded(&self) -> bool {
        self.all.is_some()
    }

    /// The full loaded set (empty before `load`)
    pub fn all(&self) -> &[Record] {
        self.all.as_deref().unwrap_or(&[])
    }

    /// Current results
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Number of current results
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Runs the any-field filter against the full set
    pub fn query(&mut self, text: &str) -> &[Record] {
        self.results = filter(self.all(), text);
        &self.results
    }

    /// Runs the city filter against the full set
    ///
    /// Inputs shorter than `CITY_QUERY_MIN_CHARS` show the full set, the
    /// same as `reset`.
    pub fn query_city(&mut self, text: &str) -> &[Record] {
        if text.chars().count() < CITY_QUERY_MIN_CHARS {
            return self.reset();
        }
        self.results = filter_by_city(self.all(), text);
        &self.results
    }

    /// Shows the full set again
    pub fn reset(&mut self) -> &[Record] {
        self.results = self.all().to_vec();
        &self.results
    }

    /// City suggestions over the full set
    pub fn city_suggestions(&self) -> Vec<String> {
        city_suggestions(self.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NewRecord;

    fn sample() -> Vec<Record> {
        vec![
            NewRecord::new("Ana", "a@x.com").city("Lima").with_id(1),
            NewRecord::new("Bob", "b@x.com").city("Lima").with_id(2),
            NewRecord::new("Carol", "c@x.com").city("Miami").with_id(3),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = sample();
        assert_eq!(filter(&records, ""), records);
    }

    #[test]
    fn test_filter_matches_city_case_insensitively() {
        let records = sample();
        assert_eq!(names(&filter(&records, "lima")), vec!["Ana", "Bob"]);
    }

    #[test]
    fn test_filter_matches_any_field() {
        let records = sample();
        assert_eq!(names(&filter(&records, "CAR")), vec!["Carol"]);
        assert_eq!(names(&filter(&records, "b@x")), vec!["Bob"]);
        assert!(filter(&records, "zzz").is_empty());
    }

    #[test]
    fn test_filter_skips_missing_city() {
        let records = vec![NewRecord::new("Dan", "d@x.com").with_id(4)];
        assert!(filter(&records, "lima").is_empty());
        assert_eq!(filter(&records, "dan").len(), 1);
    }

    #[test]
    fn test_filter_on_empty_set() {
        assert!(filter(&[], "ana").is_empty());
        assert!(filter(&[], "").is_empty());
    }

    #[test]
    fn test_filter_by_city_ignores_name_and_email() {
        let records = sample();
        assert!(filter_by_city(&records, "ana").is_empty());
        assert_eq!(names(&filter_by_city(&records, "MIA")), vec!["Carol"]);
    }

    #[test]
    fn test_city_suggestions_are_distinct_in_first_seen_order() {
        let mut records = sample();
        records.push(NewRecord::new("Dan", "d@x.com").with_id(4));
        assert_eq!(city_suggestions(&records), vec!["Lima", "Miami"]);
    }

    #[test]
    fn test_session_before_load_behaves_as_empty() {
        let mut session = SearchSession::new();
        assert!(!session.is_loaded());
        assert!(session.query("ana").is_empty());
        assert!(session.reset().is_empty());
        assert!(session.city_suggestions().is_empty());
    }

    #[test]
    fn test_session_queries_do_not_chain() {
        let mut session = SearchSession::new();
        session.load(sample());

        assert_eq!(names(session.query("carol")), vec!["Carol"]);
        // Starts from the full set, not from the previous result
        assert_eq!(names(session.query_city("li")), vec!["Ana", "Bob"]);
        assert_eq!(names(session.query("bob")), vec!["Bob"]);
        assert_eq!(session.reset().len(), 3);
    }

    #[test]
    fn test_session_city_query_needs_two_chars() {
        let mut session = SearchSession::new();
        session.load(sample());

        session.query("carol");
        assert_eq!(names(session.query_city("l")), vec!["Ana", "Bob", "Carol"]);
        assert_eq!(session.query_city("").len(), 3);
        assert_eq!(names(session.query_city("li")), vec!["Ana", "Bob"]);
        assert_eq!(session.result_count(), 2);
    }
}
