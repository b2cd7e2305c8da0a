//! Log target selection
//!
//! A target is chosen from a raw setting string:
//!
//! - `"console"` writes to standard output
//! - `"answer"` presents every record as a modal notice
//! - a UI container reference (`field "Log" of stack "Main"`) appends to
//!   that container
//! - an empty string disables logging
//! - anything else is a file path

use super::host::UiHost;
use std::fmt;
use std::path::PathBuf;

/// Setting value selecting the console target
pub const CONSOLE_TARGET: &str = "console";

/// Setting value selecting the dialog target
pub const DIALOG_TARGET: &str = "answer";

/// Leading words that mark a UI container reference
pub const CONTAINER_KINDS: [&str; 2] = ["field", "fld"];

const WINDOW_QUALIFIER: &str = " of stack ";

/// A UI container pinned to its owning window.
///
/// Built from a long-form reference by keeping the leaf container and the
/// first window qualifier; outer window qualifiers are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRef {
    container: String,
    window: Option<String>,
}

impl ContainerRef {
    /// Canonicalize a long-form container reference.
    ///
    /// `field id 7 of card id 2 of stack "Sub" of stack "/app/Main.rev"`
    /// becomes (`field id 7 of card id 2`, `stack "Sub"`).
    pub fn from_long_ref(reference: &str) -> Self {
        let reference = reference.trim();

        match reference.find(WINDOW_QUALIFIER) {
            Some(first) => {
                let container = reference[..first].to_string();
                // Skip the leading " of " so the window reads `stack "..."`
                let window_start = first + WINDOW_QUALIFIER.len() - "stack ".len();
                let rest = &reference[first + WINDOW_QUALIFIER.len()..];
                let window_end = match rest.find(WINDOW_QUALIFIER) {
                    Some(second) => first + WINDOW_QUALIFIER.len() + second,
                    None => reference.len(),
                };

                Self {
                    container,
                    window: Some(reference[window_start..window_end].to_string()),
                }
            },
            None => Self {
                container: reference.to_string(),
                window: None,
            },
        }
    }

    /// The leaf container part
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The owning window part, if the reference named one
    pub fn window(&self) -> Option<&str> {
        self.window.as_deref()
    }

    /// Canonical reference text
    pub fn canonical(&self) -> String {
        match &self.window {
            Some(window) => format!("{} of {}", self.container, window),
            None => self.container.clone(),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Kind of the active target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Logging disabled
    None,
    /// Standard output
    Console,
    /// Append-to-file
    File,
    /// In-app text container
    UiContainer,
    /// Modal notice
    Dialog,
}

/// The single active log destination
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// No destination; logging is a silent no-op
    #[default]
    None,
    /// Standard output
    Console,
    /// Append to the file at this path
    File(PathBuf),
    /// Append to a UI text container
    UiContainer(ContainerRef),
    /// Present each record as a modal notice
    Dialog,
}

impl Target {
    /// Parse a raw target setting.
    ///
    /// Container references are resolved through `host` when one is
    /// available; otherwise the reference is canonicalized as written.
    pub fn parse(raw: &str, host: Option<&dyn UiHost>) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Self::None;
        }
        if trimmed.eq_ignore_ascii_case(CONSOLE_TARGET) {
            return Self::Console;
        }
        if trimmed.eq_ignore_ascii_case(DIALOG_TARGET) {
            return Self::Dialog;
        }
        if is_container_reference(trimmed) {
            let long_ref = host
                .and_then(|host| host.resolve_container(trimmed))
                .unwrap_or_else(|| trimmed.to_string());
            return Self::UiContainer(ContainerRef::from_long_ref(&long_ref));
        }

        Self::File(PathBuf::from(raw))
    }

    /// Get the target kind
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::None => TargetKind::None,
            Self::Console => TargetKind::Console,
            Self::File(_) => TargetKind::File,
            Self::UiContainer(_) => TargetKind::UiContainer,
            Self::Dialog => TargetKind::Dialog,
        }
    }

    /// Check if logging is disabled
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Render back to the setting form
    pub fn as_setting(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Console => CONSOLE_TARGET.to_string(),
            Self::File(path) => path.display().to_string(),
            Self::UiContainer(container) => container.canonical(),
            Self::Dialog => DIALOG_TARGET.to_string(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_setting())
    }
}

/// Check if a setting string starts with a container kind word
pub fn is_container_reference(raw: &str) -> bool {
    match raw.split_whitespace().next() {
        Some(word) => CONTAINER_KINDS
            .iter()
            .any(|kind| word.eq_ignore_ascii_case(kind)),
        None => false,
    }
}
