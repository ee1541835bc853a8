use crate::extract::{
    self,
    ExtractError,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Online user count per web instance, in the order the instances appear on the console page.
///
/// Cluster members are listed under the same instance name and are summed into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    users: IndexMap<String, u64>,
}

impl Snapshot {
    /// Builds a snapshot from the "Disable Logins" page of the console.
    pub fn from_html(html: &str) -> Result<Self, ExtractError> {
        extract::extract_snapshot(html)
    }

    pub fn instances(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn users(&self, instance: &str) -> Option<u64> {
        self.users.get(instance).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.users.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn total_users(&self) -> u64 {
        self.users.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut users = IndexMap::<String, u64>::new();
        for (instance, count) in iter {
            let total = users.entry(instance.into()).or_insert(0);
            *total = total.saturating_add(count);
        }
        Self { users }
    }
}
