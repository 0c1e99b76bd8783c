use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StoreError;

/// A saved song: display name plus the playback command to paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(alias = "cmd")]
    pub command: String,
}

impl Record {
    /// Short stable id derived from name and command. Records that differ in
    /// either field get different fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.name.len() as u64).to_le_bytes());
        hasher.update(self.name.as_bytes());
        hasher.update(self.command.as_bytes());
        hex::encode(&hasher.finalize()[..8])
    }

    fn name_matches(&self, folded: &str) -> bool {
        self.name.to_lowercase() == folded
    }
}

/// In-memory song list, newest record first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Songbook {
    records: Vec<Record>,
}

impl Songbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend a record. Duplicate names are kept; the name is trimmed and
    /// must not be empty afterwards.
    pub fn insert(&mut self, name: &str, command: impl Into<String>) -> Result<&Record, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        self.records.insert(
            0,
            Record {
                name: name.to_string(),
                command: command.into(),
            },
        );
        Ok(&self.records[0])
    }

    /// Drop every record whose name equals `name` ignoring case.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let folded = name.trim().to_lowercase();
        let before = self.records.len();
        self.records.retain(|r| !r.name_matches(&folded));
        self.records.len() < before
    }

    /// Records whose name contains `query` ignoring case, in list order.
    /// A blank query matches nothing.
    pub fn find(&self, query: &str) -> Vec<&Record> {
        let folded = query.trim().to_lowercase();
        if folded.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&folded))
            .collect()
    }

    /// The record a fingerprint was taken from, if it is still present.
    pub fn by_fingerprint(&self, fingerprint: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.fingerprint() == fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(names: &[&str]) -> Songbook {
        let mut b = Songbook::new();
        for n in names.iter().rev() {
            b.insert(n, format!("/play {n}")).unwrap();
        }
        b
    }

    #[test]
    fn insert_prepends_and_keeps_duplicates() {
        let mut b = Songbook::new();
        b.insert("Faded", "/play faded").unwrap();
        b.insert("Believer", "/play believer").unwrap();
        b.insert("faded", "/play faded remix").unwrap();

        let names: Vec<_> = b.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["faded", "Believer", "Faded"]);
    }

    #[test]
    fn insert_trims_name_but_keeps_casing() {
        let mut b = Songbook::new();
        let rec = b.insert("  Road Trip ", "/play road trip").unwrap();
        assert_eq!(rec.name, "Road Trip");
    }

    #[test]
    fn insert_rejects_blank_names() {
        let mut b = Songbook::new();
        assert!(matches!(b.insert("", "x"), Err(StoreError::EmptyName)));
        assert!(matches!(b.insert(" \t ", "x"), Err(StoreError::EmptyName)));
        assert!(b.is_empty());
    }

    #[test]
    fn command_is_opaque() {
        let mut b = Songbook::new();
        let rec = b.insert("Weird", "").unwrap().clone();
        assert_eq!(rec.command, "");
        let rec = b.insert("Link", "https://example.com/?a=1&b=2").unwrap();
        assert_eq!(rec.command, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn insert_then_find() {
        let mut b = book(&["Shape of You", "Unholy"]);
        b.insert("Blinding Lights", "/play Blinding Lights").unwrap();
        let hits = b.find("Blinding Lights");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].command, "/play Blinding Lights");
    }

    #[test]
    fn find_is_case_insensitive_substring() {
        let b = book(&["Road Trip", "Faded", "Roar"]);
        let hits: Vec<_> = b.find("ro").iter().map(|r| r.name.clone()).collect();
        assert_eq!(hits, ["Road Trip", "Roar"]);
        assert_eq!(b.find("FADE").len(), 1);
        assert!(b.find("zzz").is_empty());
    }

    #[test]
    fn blank_query_matches_nothing() {
        let b = book(&["Faded"]);
        assert!(b.find("").is_empty());
        assert!(b.find("   ").is_empty());
        assert!(Songbook::new().find("a").is_empty());
    }

    #[test]
    fn remove_drops_all_case_insensitive_matches() {
        let mut b = Songbook::new();
        b.insert("Faded", "1").unwrap();
        b.insert("Believer", "2").unwrap();
        b.insert("FADED", "3").unwrap();

        assert!(b.remove("faded"));
        assert_eq!(b.len(), 1);
        assert!(b.find("faded").is_empty());
    }

    #[test]
    fn remove_of_absent_leaves_book_unchanged() {
        let mut b = book(&["Faded", "Believer"]);
        let before = serde_json::to_string(&b).unwrap();
        assert!(!b.remove("Animals"));
        assert_eq!(serde_json::to_string(&b).unwrap(), before);
    }

    #[test]
    fn remove_needs_whole_name() {
        let mut b = book(&["Faded"]);
        assert!(!b.remove("fade"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn fingerprint_tells_duplicate_names_apart() {
        let mut b = Songbook::new();
        b.insert("Faded", "/play faded original").unwrap();
        b.insert("faded", "/play faded remix").unwrap();
        b.insert("Faded", "/play faded remix").unwrap();

        let fps: Vec<_> = b.records().iter().map(Record::fingerprint).collect();
        assert_eq!(fps[0].len(), 16);
        assert_ne!(fps[0], fps[1]);
        assert_ne!(fps[0], fps[2]);
        assert_ne!(fps[1], fps[2]);

        let older = &b.records()[2];
        assert_eq!(b.by_fingerprint(&older.fingerprint()), Some(older));
    }

    #[test]
    fn fingerprint_is_stable_and_unambiguous() {
        let a = Record { name: "ab".into(), command: "c".into() };
        let b = Record { name: "a".into(), command: "bc".into() };
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn by_fingerprint_misses_removed_records() {
        let mut b = book(&["Unholy", "Faded"]);
        let fp = b.records()[0].fingerprint();
        assert!(b.remove("unholy"));
        assert!(b.by_fingerprint(&fp).is_none());
    }

    #[test]
    fn lofi_beats_scenario() {
        let mut b = Songbook::new();
        b.insert("Lofi Beats", "/play Lofi Beats").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(
            b.records(),
            [Record {
                name: "Lofi Beats".into(),
                command: "/play Lofi Beats".into(),
            }]
        );
        assert_eq!(b.find("lofi"), vec![&b.records()[0]]);
        assert!(b.remove("lofi beats"));
        assert!(b.is_empty());
    }

    #[test]
    fn serialises_as_array_of_name_command() {
        let mut b = Songbook::new();
        b.insert("Faded", "/play faded").unwrap();
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "Faded", "command": "/play faded"}]));
    }

    #[test]
    fn json_round_trip_is_stable() {
        let b = book(&["Shape of You", "Believer", "Faded"]);
        let first = serde_json::to_string_pretty(&b).unwrap();
        let back: Songbook = serde_json::from_str(&first).unwrap();
        assert_eq!(back, b);
        assert_eq!(serde_json::to_string_pretty(&back).unwrap(), first);
    }

    #[test]
    fn cmd_field_is_accepted() {
        let b: Songbook =
            serde_json::from_str(r#"[{"name": "Animals", "cmd": "/play animals"}]"#).unwrap();
        assert_eq!(b.records()[0].command, "/play animals");
    }
}
