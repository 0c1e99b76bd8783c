//! Decoding of the backing file, including the older `{ "name": "link" }` map.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::songbook::{Record, Songbook};

#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Records(Songbook),
    Legacy(Map<String, Value>),
}

/// Which layout a decoded file used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Records,
    Legacy,
}

/// Decode file contents in either layout.
///
/// Map entries keep their object order, oldest first, so they are reversed
/// to match the newest-first list. Non-string values are skipped.
pub(crate) fn decode(data: &str) -> Result<(Songbook, Shape), serde_json::Error> {
    match serde_json::from_str::<OnDisk>(data)? {
        OnDisk::Records(book) => Ok((book, Shape::Records)),
        OnDisk::Legacy(map) => {
            let records = map
                .into_iter()
                .rev()
                .filter_map(|(name, value)| match value {
                    Value::String(link) if !name.trim().is_empty() => Some(Record {
                        name: name.trim().to_string(),
                        command: link,
                    }),
                    other => {
                        warn!("Skipping legacy entry {:?} with value {}", name, other);
                        None
                    }
                })
                .collect();
            Ok((Songbook::from_records(records), Shape::Legacy))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_list() {
        let (book, shape) =
            decode(r#"[{"name": "Faded", "command": "/play faded"}]"#).unwrap();
        assert_eq!(shape, Shape::Records);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn empty_object_is_an_empty_legacy_book() {
        let (book, shape) = decode("{}").unwrap();
        assert_eq!(shape, Shape::Legacy);
        assert!(book.is_empty());
    }

    #[test]
    fn legacy_map_becomes_newest_first_records() {
        let data = r#"{
            "Zebra Song": "https://youtu.be/z",
            "Alpha Song": "https://youtu.be/a"
        }"#;
        let (book, shape) = decode(data).unwrap();
        assert_eq!(shape, Shape::Legacy);
        let names: Vec<_> = book.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha Song", "Zebra Song"]);
        assert_eq!(book.records()[1].command, "https://youtu.be/z");
    }

    #[test]
    fn legacy_non_string_values_are_skipped() {
        let (book, _) = decode(r#"{"Good": "link", "Bad": 3, " ": "blank"}"#).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.records()[0].name, "Good");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"[{"title": "x"}]"#).is_err());
        assert!(decode("42").is_err());
    }
}
