//! Log types and the enabled-type registry

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Pseudo-type that enables every built-in type in a bulk list.
pub const ALL_TYPES: &str = "all";

/// A named log category.
///
/// Any string is a valid type; lookups are exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogType(String);

impl LogType {
    /// Developer diagnostics. The default type for `log` calls.
    pub const DEVELOPER: &'static str = "developer";
    /// Errors.
    pub const ERROR: &'static str = "error";
    /// Extension / plugin output.
    pub const EXTENSIONS: &'static str = "extensions";
    /// Network traffic. Messages of this type are sanitized before logging.
    pub const NETWORK: &'static str = "network";
    /// Unlabeled ambient output forwarded by the host.
    pub const MSG: &'static str = "msg";

    /// Every built-in type.
    pub const BUILT_IN: [&'static str; 5] = [
        Self::DEVELOPER,
        Self::ERROR,
        Self::EXTENSIONS,
        Self::NETWORK,
        Self::MSG,
    ];

    /// Types enabled when a registry is created.
    pub const DEFAULT_ENABLED: [&'static str; 3] = [Self::DEVELOPER, Self::ERROR, Self::NETWORK];

    /// Create a log type from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the type name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the built-in types
    pub fn is_built_in(&self) -> bool {
        Self::BUILT_IN.contains(&self.0.as_str())
    }

    /// Parse a comma-separated list of type names.
    ///
    /// Names are trimmed; empty entries are skipped.
    pub fn parse_list(list: &str) -> Vec<LogType> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(LogType::new)
            .collect()
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LogType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for LogType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mapping of log type to enabled flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRegistry {
    types: BTreeMap<LogType, bool>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.set_types(LogType::DEFAULT_ENABLED);
        registry
    }
}

impl FilterRegistry {
    /// Create a registry with the default types enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every type disabled
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Replace the whole filter state from a list of names.
    ///
    /// Built-in types start enabled when the list contains `"all"` and
    /// disabled otherwise; every listed name is then enabled.
    pub fn set_types<I, T>(&mut self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<LogType>,
    {
        let names: Vec<LogType> = names.into_iter().map(Into::into).collect();
        let preset = names.iter().any(|name| name.as_str() == ALL_TYPES);

        self.types.clear();
        for built_in in LogType::BUILT_IN {
            self.types.insert(LogType::new(built_in), preset);
        }

        for name in names {
            if name.as_str() == ALL_TYPES {
                continue;
            }
            self.types.insert(name, true);
        }
    }

    /// Enable a single type
    pub fn add_type(&mut self, name: impl Into<LogType>) {
        self.types.insert(name.into(), true);
    }

    /// Disable a single type.
    ///
    /// Custom types are forgotten entirely; built-ins keep a disabled entry.
    pub fn remove_type(&mut self, name: &str) {
        if LogType::BUILT_IN.contains(&name) {
            self.types.insert(LogType::new(name), false);
        } else {
            self.types.remove(name);
        }
    }

    /// Check if a type is enabled. Unknown types are disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.types.get(name).copied().unwrap_or(false)
    }

    /// Enabled type names in lexicographic order
    pub fn list_enabled(&self) -> Vec<String> {
        // BTreeMap iteration is already sorted and deduplicated
        self.types
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Whether network traffic logging is enabled
    pub fn network_enabled(&self) -> bool {
        self.is_enabled(LogType::NETWORK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = FilterRegistry::new();
        assert_eq!(
            registry.list_enabled(),
            vec!["developer", "error", "network"]
        );
        assert!(!registry.is_enabled("msg"));
        assert!(!registry.is_enabled("extensions"));
    }

    #[test]
    fn test_set_types_all_with_custom() {
        let mut registry = FilterRegistry::new();
        registry.set_types(["zeta", "all", "alpha", "zeta"]);

        assert_eq!(
            registry.list_enabled(),
            vec![
                "alpha",
                "developer",
                "error",
                "extensions",
                "msg",
                "network",
                "zeta"
            ]
        );
        assert!(!registry.is_enabled("all"));
    }

    #[test]
    fn test_set_types_disables_unlisted_built_ins() {
        let mut registry = FilterRegistry::new();
        registry.set_types(["error"]);

        assert_eq!(registry.list_enabled(), vec!["error"]);
        assert!(!registry.network_enabled());
    }

    #[test]
    fn test_set_types_replaces_custom_types() {
        let mut registry = FilterRegistry::new();
        registry.add_type("render");
        registry.set_types(["developer"]);

        assert!(!registry.is_enabled("render"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = FilterRegistry::new();
        assert!(registry.is_enabled("developer"));
        assert!(!registry.is_enabled("Developer"));
        assert!(!registry.is_enabled("unregistered-type"));
    }

    #[test]
    fn test_add_remove_inverse() {
        for name in ["custom", "msg", "developer", "extensions"] {
            let mut registry = FilterRegistry::new();
            let before = registry.list_enabled();

            if registry.is_enabled(name) {
                // Removing then re-adding an enabled type is the inverse pair here
                registry.remove_type(name);
                registry.add_type(name);
            } else {
                registry.add_type(name);
                assert!(registry.is_enabled(name));
                registry.remove_type(name);
            }

            assert_eq!(registry.list_enabled(), before, "type {name}");
        }
    }

    #[test]
    fn test_remove_custom_restores_map() {
        let mut registry = FilterRegistry::new();
        let before = registry.clone();

        registry.add_type("telemetry");
        registry.remove_type("telemetry");

        assert_eq!(registry, before);
    }

    #[test]
    fn test_parse_list() {
        let types = LogType::parse_list(" developer, error,,network ,");
        let names: Vec<&str> = types.iter().map(LogType::as_str).collect();
        assert_eq!(names, vec!["developer", "error", "network"]);
    }

    #[test]
    fn test_is_built_in() {
        assert!(LogType::new("msg").is_built_in());
        assert!(!LogType::new("all").is_built_in());
        assert!(!LogType::new("Network").is_built_in());
    }
}
