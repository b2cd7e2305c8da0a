//! Network message sanitization

use regex::{NoExpand, Regex};
use std::fmt;
use tracing::warn;

/// A single pattern -> replacement redaction step
#[derive(Clone)]
pub struct NetworkFilterRule {
    /// Regular expression source
    pattern: String,

    /// Literal replacement text
    replacement: String,

    /// Compiled pattern, `None` when the source does not compile
    regex: Option<Regex>,
}

impl NetworkFilterRule {
    /// Create a rule. An invalid pattern yields a rule that never matches.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let regex = match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Ignoring invalid network filter pattern");
                None
            },
        };

        Self {
            pattern,
            replacement: replacement.into(),
            regex,
        }
    }

    /// Pattern source
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replacement text
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Whether the pattern compiled
    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Replace every match in `message`
    pub fn apply(&self, message: &str) -> String {
        match &self.regex {
            Some(regex) => regex
                .replace_all(message, NoExpand(&self.replacement))
                .into_owned(),
            None => message.to_string(),
        }
    }
}

impl PartialEq for NetworkFilterRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.replacement == other.replacement
    }
}

impl Eq for NetworkFilterRule {}

impl fmt::Debug for NetworkFilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkFilterRule")
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl<P: Into<String>, R: Into<String>> From<(P, R)> for NetworkFilterRule {
    fn from((pattern, replacement): (P, R)) -> Self {
        Self::new(pattern, replacement)
    }
}

/// Ordered list of redaction rules. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkFilters {
    rules: Vec<NetworkFilterRule>,
}

impl NetworkFilters {
    /// Create an empty rule list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rule list from ordered (pattern, replacement) pairs
    pub fn from_pairs<I, P, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            rules: pairs.into_iter().map(NetworkFilterRule::from).collect(),
        }
    }

    /// Parse a tab-delimited blob, one `pattern<TAB>replacement` per line.
    ///
    /// A line without a tab has an empty replacement. Blank lines are skipped.
    pub fn parse(blob: &str) -> Self {
        let rules = blob
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once('\t') {
                Some((pattern, replacement)) => NetworkFilterRule::new(pattern, replacement),
                None => NetworkFilterRule::new(line, ""),
            })
            .collect();

        Self { rules }
    }

    /// Render back to the tab-delimited blob form
    pub fn to_blob(&self) -> String {
        self.rules
            .iter()
            .map(|rule| format!("{}\t{}", rule.pattern, rule.replacement))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Builder: append a rule
    pub fn with_rule(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rules.push(NetworkFilterRule::new(pattern, replacement));
        self
    }

    /// Rules in application order
    pub fn rules(&self) -> &[NetworkFilterRule] {
        &self.rules
    }

    /// Rules as (pattern, replacement) pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.rules
            .iter()
            .map(|rule| (rule.pattern.clone(), rule.replacement.clone()))
            .collect()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Clean up a network message before it is logged.
///
/// Trailing LF, CR and comma characters are stripped, CRLF pairs become a
/// single CR, then every rule is applied in order to the previous output.
/// An empty result means the message should not be logged.
pub fn sanitize(message: &str, filters: &NetworkFilters) -> String {
    let trimmed = message.trim_end_matches(['\n', '\r', ',']);
    let mut result = trimmed.replace("\r\n", "\r");

    for rule in filters.rules() {
        result = rule.apply(&result);
    }

    result
}
