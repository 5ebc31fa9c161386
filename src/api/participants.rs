//! Participant id to display-name mapping
//!
//! Built best-effort from the `activity/{id}/participants` endpoint and
//! used by the transcript renderer to label speakers.

use serde_json::Value;

use crate::extract::{first_truthy, scalar_text};

/// Ordered participant id → display name mapping
///
/// Keeps first-insertion order so the participants line lists names the
/// way the upstream returned them. Re-inserting an id replaces its name
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantNames {
    entries: Vec<(String, String)>,
}

impl ParticipantNames {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the name for `id`
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((id, name)),
        }
    }

    /// Display name for `id`, if resolved
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, name)| name.as_str())
    }

    /// Resolved names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    /// Number of resolved participants
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no participant could be resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the mapping from a participants response
    ///
    /// Accepts a bare array, or an object holding the array under
    /// `participants`, `data` or `results` (first key present wins). Each
    /// entry needs an id (`id`, `participantId`) and a name (`name`,
    /// `displayName`, `email`); entries missing either are skipped.
    pub fn from_response(data: &Value) -> Self {
        let list = match data {
            Value::Array(_) => Some(data),
            Value::Object(map) => ["participants", "data", "results"]
                .iter()
                .find_map(|key| map.get(*key)),
            _ => None,
        };

        let mut names = Self::new();
        if let Some(Value::Array(items)) = list {
            for item in items.iter().filter(|item| item.is_object()) {
                let id = first_truthy(item, &["id", "participantId"])
                    .map(scalar_text)
                    .unwrap_or_default();
                let name = first_truthy(item, &["name", "displayName", "email"])
                    .map(scalar_text)
                    .unwrap_or_default();
                if !id.is_empty() && !name.is_empty() {
                    names.insert(id, name);
                }
            }
        }
        names
    }
}

impl FromIterator<(String, String)> for ParticipantNames {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut names = Self::new();
        for (id, name) in iter {
            names.insert(id, name);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_bare_array() {
        let names = ParticipantNames::from_response(&json!([
            {"id": "p1", "name": "Alice"},
            {"participantId": "p2", "displayName": "Bob"},
            {"id": "p3", "email": "carol@example.com"}
        ]));
        assert_eq!(names.len(), 3);
        assert_eq!(names.get("p1"), Some("Alice"));
        assert_eq!(names.get("p2"), Some("Bob"));
        assert_eq!(names.get("p3"), Some("carol@example.com"));
    }

    #[test]
    fn test_from_wrapped_object() {
        let names = ParticipantNames::from_response(&json!({
            "data": [{"id": 7, "name": "Numeric"}]
        }));
        assert_eq!(names.get("7"), Some("Numeric"));
    }

    #[test]
    fn test_participants_key_wins_by_presence() {
        let names = ParticipantNames::from_response(&json!({
            "participants": null,
            "data": [{"id": "p1", "name": "Alice"}]
        }));
        assert!(names.is_empty());
    }

    #[test]
    fn test_skips_incomplete_entries() {
        let names = ParticipantNames::from_response(&json!([
            {"id": "p1"},
            {"name": "Nobody"},
            "not an object",
            {"id": "", "name": "Blank"}
        ]));
        assert!(names.is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        assert!(ParticipantNames::from_response(&json!("oops")).is_empty());
        assert!(ParticipantNames::from_response(&json!({"other": []})).is_empty());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut names = ParticipantNames::new();
        names.insert("a", "First");
        names.insert("b", "Second");
        names.insert("a", "Renamed");
        assert_eq!(names.names().collect::<Vec<_>>(), vec!["Renamed", "Second"]);
    }
}
