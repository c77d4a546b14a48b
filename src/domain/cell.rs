//! Cell classification.
//!
//! Every row is classified by its first cell. The rules are fixed:
//!
//! - empty text or a date stamp (`/` and `:` both present): row is ignored
//! - first character `t`: trial row, the second cell carries a value
//! - anything else: key row, the text becomes a column name

/// Borrowed view over the text content of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    content: &'a str,
}

impl<'a> Cell<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &'a str {
        self.content
    }

    pub fn is_date(&self) -> bool {
        self.content.contains('/') && self.content.contains(':')
    }

    /// Case-sensitive: only a lowercase `t` marks a trial row.
    pub fn is_trial_number(&self) -> bool {
        self.content.starts_with('t')
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_not_a_star(&self) -> bool {
        self.content != "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_needs_slash_and_colon() {
        assert!(Cell::new("21/07/2017 10:32:05").is_date());
        assert!(!Cell::new("21/07/2017").is_date());
        assert!(!Cell::new("10:32").is_date());
        assert!(!Cell::new("").is_date());
    }

    #[test]
    fn trial_marker_is_lowercase_t_only() {
        assert!(Cell::new("t1").is_trial_number());
        assert!(Cell::new("t").is_trial_number());
        assert!(!Cell::new("T1").is_trial_number());
        assert!(!Cell::new("RT 1").is_trial_number());
        assert!(!Cell::new("").is_trial_number());
    }

    #[test]
    fn star_and_empty() {
        assert!(Cell::new("").is_empty());
        assert!(!Cell::new(" ").is_empty());
        assert!(!Cell::new("*").is_not_a_star());
        assert!(Cell::new("**").is_not_a_star());
        assert!(Cell::new("0").is_not_a_star());
    }
}
