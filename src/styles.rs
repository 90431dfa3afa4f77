//! Citation style table: style token to export command.

use std::collections::BTreeMap;

/// Fallback when the configured default command is empty.
pub const FALLBACK_COMMAND: &str = "\\cite";

/// Built-in natbib-flavoured table.
const DEFAULT_STYLES: &[(&str, &str)] = &[
    ("t", "\\citet"),
    ("t/b", "\\citealt"),
    ("t/c", "\\Citet"),
    ("t/f", "\\citet*"),
    ("p", "\\citep"),
    ("p/b", "\\citealp"),
    ("p/c", "\\Citep"),
    ("p/f", "\\citep*"),
    ("a", "\\citeauthor"),
    ("a/c", "\\Citeauthor"),
    ("a/f", "\\citeauthor*"),
    ("na", "\\citeyearpar"),
    ("na/b", "\\citeyear"),
    ("n", "\\citenum"),
    ("nocite", "\\nocite"),
];

/// Style marker as written in a citation: `"/" + token`, or nothing for the
/// absent style.
pub fn style_suffix(style: Option<&str>) -> String {
    match style {
        Some(token) if !token.is_empty() => format!("/{token}"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub token: String,
    pub command: String,
}

/// Ordered mapping from style token to command, with a default for the
/// absent/unknown token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    entries: Vec<StyleEntry>,
    default_command: String,
}

impl StyleTable {
    /// The built-in table with the given default command.
    pub fn new(default_command: impl Into<String>) -> Self {
        let entries = DEFAULT_STYLES
            .iter()
            .map(|(token, command)| StyleEntry {
                token: token.to_string(),
                command: command.to_string(),
            })
            .collect();

        Self {
            entries,
            default_command: default_command.into(),
        }
    }

    /// Built-in table with user overrides merged in. Overrides replace
    /// existing tokens in place; new tokens are appended.
    pub fn with_overrides(
        default_command: impl Into<String>,
        overrides: &BTreeMap<String, String>,
    ) -> Self {
        let mut table = Self::new(default_command);
        for (token, command) in overrides {
            table.insert(token, command);
        }
        table
    }

    pub fn insert(&mut self, token: &str, command: &str) {
        match self.entries.iter_mut().find(|e| e.token == token) {
            Some(entry) => entry.command = command.to_string(),
            None => self.entries.push(StyleEntry {
                token: token.to_string(),
                command: command.to_string(),
            }),
        }
    }

    /// Command for `token`. Total: absent or unregistered tokens resolve to
    /// the default command, which is never empty.
    pub fn resolve_command(&self, token: Option<&str>) -> &str {
        token
            .and_then(|t| self.entries.iter().find(|e| e.token == t))
            .map(|e| e.command.as_str())
            .filter(|command| !command.is_empty())
            .unwrap_or_else(|| self.default_command())
    }

    pub fn default_command(&self) -> &str {
        if self.default_command.is_empty() {
            FALLBACK_COMMAND
        } else {
            &self.default_command
        }
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn tokens(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.token.clone()).collect()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new("\\citep")
    }
}
