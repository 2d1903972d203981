//! Parsed form of a transition expression.

use super::assertion::Assertion;

/// One parsed transition.
///
/// `path[i]` must be found at depth `i` of the source document, counting the
/// root's direct children as depth 0. The last path element is the search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The transition text this token was parsed from.
    pub expression: String,
    /// Keys from the root down to the value; never empty.
    pub path: Vec<String>,
    /// Checks to run on the found value, sorted by name and deduplicated.
    pub assertions: Vec<Assertion>,
    /// Output name overriding the search key.
    pub alias: Option<String>,
}

impl Token {
    /// The key expected to hold the extracted value.
    pub fn search_key(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// The name the extracted value is stored under.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| self.search_key())
    }

    /// Number of levels the value lies below the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(path: &[&str], alias: Option<&str>) -> Token {
        Token {
            expression: String::new(),
            path: path.iter().map(|s| s.to_string()).collect(),
            assertions: vec![],
            alias: alias.map(str::to_string),
        }
    }

    #[test]
    fn test_output_name_defaults_to_search_key() {
        let t = token(&["a", "b", "c"], None);
        assert_eq!(t.search_key(), "c");
        assert_eq!(t.output_name(), "c");
        assert_eq!(t.depth(), 3);
    }

    #[test]
    fn test_alias_overrides_output_name() {
        let t = token(&["name"], Some("displayName"));
        assert_eq!(t.search_key(), "name");
        assert_eq!(t.output_name(), "displayName");
    }
}
