use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// Column names a fresh board starts with
pub const DEFAULT_STATUSES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Ordered set of status names
///
/// Insertion order is column order. Names are unique by exact match.
/// Deserialization applies the same trimming and blank/duplicate filtering
/// as [`StatusList::push`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StatusList(Vec<String>);

impl StatusList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a list from names, dropping blanks and duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for name in names {
            let _ = list.push(name.as_ref());
        }
        list
    }

    /// Validates a candidate name against the list, returning it trimmed
    pub fn validate(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyStatusName);
        }
        if self.contains(name) {
            return Err(BoardError::DuplicateStatus(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Appends a status at the end
    pub fn push(&mut self, name: &str) -> Result<&str> {
        let name = self.validate(name)?;
        self.0.push(name);
        Ok(self.0.last().map(String::as_str).unwrap_or_default())
    }

    /// Removes a status, returning whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|s| s == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for StatusList {
    fn default() -> Self {
        Self::from_names(DEFAULT_STATUSES)
    }
}

impl From<Vec<String>> for StatusList {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<StatusList> for Vec<String> {
    fn from(list: StatusList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a StatusList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
