//! Name filter semantics shared by every store
//!
//! A filter is either an exact user name or a pattern with a `*` wildcard at
//! the beginning and/or the end:
//!
//! | Filter    | Matches                      |
//! |-----------|------------------------------|
//! | `""`      | every name                   |
//! | `*text*`  | names containing `text`      |
//! | `*text`   | names ending with `text`     |
//! | `text*`   | names starting with `text`   |
//! | `text`    | exactly `text`               |
//!
//! Leading wildcards cannot use an index on the name column and force a scan.

use crate::models::{UserFilter, UserRecord};

const WILDCARD: char = '*';

/// Parsed form of a name filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch<'a> {
    Any,
    Contains(&'a str),
    EndsWith(&'a str),
    StartsWith(&'a str),
    Exact(&'a str),
}

impl<'a> NameMatch<'a> {
    pub fn parse(filter: Option<&'a str>) -> Self {
        let Some(filter) = filter.filter(|f| !f.is_empty()) else {
            return NameMatch::Any;
        };

        match (
            filter.strip_prefix(WILDCARD),
            filter.strip_suffix(WILDCARD),
        ) {
            // A lone "*" strips to the same empty text from both sides
            (Some(rest), Some(_)) => {
                NameMatch::Contains(rest.strip_suffix(WILDCARD).unwrap_or(rest))
            }
            (Some(suffix), None) => NameMatch::EndsWith(suffix),
            (None, Some(prefix)) => NameMatch::StartsWith(prefix),
            (None, None) => NameMatch::Exact(filter),
        }
    }

    pub fn matches(&self, user_name: &str) -> bool {
        match self {
            NameMatch::Any => true,
            NameMatch::Contains(text) => user_name.contains(text),
            NameMatch::EndsWith(text) => user_name.ends_with(text),
            NameMatch::StartsWith(text) => user_name.starts_with(text),
            NameMatch::Exact(text) => user_name == *text,
        }
    }

    /// SQL `LIKE` pattern for the partial matches, escaped with `\`
    ///
    /// `None` for [`NameMatch::Any`] and [`NameMatch::Exact`], which map to no
    /// condition and plain equality respectively.
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            NameMatch::Contains(text) => Some(format!("%{}%", escape_like(text))),
            NameMatch::EndsWith(text) => Some(format!("%{}", escape_like(text))),
            NameMatch::StartsWith(text) => Some(format!("{}%", escape_like(text))),
            NameMatch::Any | NameMatch::Exact(_) => None,
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl UserFilter {
    pub fn name_match(&self) -> NameMatch<'_> {
        NameMatch::parse(self.name.as_deref())
    }

    /// Whether a record satisfies every filter that is set
    pub fn matches(&self, record: &UserRecord) -> bool {
        if !self.name_match().matches(&record.user_name) {
            return false;
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if record.email != email {
                return false;
            }
        }
        if let Some(role) = self.role {
            if record.role != role {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }
}
