/// One keystroke worth of launcher input routed to the picker.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Keyword that routed the query to this plugin.
    pub action_keyword: String,
    /// Whitespace-separated terms after the action keyword.
    pub terms: Vec<String>,
    /// The full query as typed, action keyword included.
    pub raw_query: String,
    /// Everything after the action keyword.
    pub search: String,
}

impl Query {
    pub fn new(action_keyword: &str, search: &str) -> Self {
        let raw_query = if search.is_empty() {
            action_keyword.to_string()
        } else {
            format!("{action_keyword} {search}")
        };
        Self {
            action_keyword: action_keyword.to_string(),
            terms: search.split_whitespace().map(str::to_string).collect(),
            raw_query,
            search: search.to_string(),
        }
    }

    /// Rebuilds a query from a raw string a previous action asked to display.
    pub fn from_raw(action_keyword: &str, raw_query: &str) -> Self {
        let search = raw_query
            .strip_prefix(action_keyword)
            .map(str::trim_start)
            .unwrap_or(raw_query);
        Self::new(action_keyword, search)
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }
}
