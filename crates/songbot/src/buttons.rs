//! Custom ids of the song buttons attached to `pick` and `search` replies.
//!
//! A button carries the fingerprint of the record it was built for, so
//! songs sharing a name still get distinct ids and a click resolves to the
//! exact record shown.

use songbot_core::Record;

/// Discord's limit on a button label.
const MAX_LABEL: usize = 80;
pub const BUTTONS_PER_ROW: usize = 5;
/// Hex characters in a [`Record::fingerprint`].
const FINGERPRINT_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongButton {
    /// Picker button: show the command to copy.
    Pick,
    /// Search result button: show the command and DM it.
    Load,
}

impl SongButton {
    fn prefix(self) -> &'static str {
        match self {
            SongButton::Pick => "song_pick:",
            SongButton::Load => "song_load:",
        }
    }

    pub fn custom_id(self, record: &Record) -> String {
        format!("{}{}", self.prefix(), record.fingerprint())
    }

    /// Button kind and record fingerprint of a custom id.
    pub fn parse(custom_id: &str) -> Option<(SongButton, &str)> {
        [SongButton::Pick, SongButton::Load]
            .into_iter()
            .find_map(|kind| custom_id.strip_prefix(kind.prefix()).map(|fp| (kind, fp)))
            .filter(|(_, fp)| fp.len() == FINGERPRINT_LEN && fp.chars().all(|c| c.is_ascii_hexdigit()))
    }
}

pub fn label(name: &str) -> String {
    clip(name, MAX_LABEL)
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, command: &str) -> Record {
        Record {
            name: name.into(),
            command: command.into(),
        }
    }

    #[test]
    fn custom_id_parses_back_to_fingerprint() {
        let record = rec("Shape of You", "/play shape of you");
        let id = SongButton::Pick.custom_id(&record);
        assert!(id.starts_with("song_pick:"));
        assert_eq!(
            SongButton::parse(&id),
            Some((SongButton::Pick, record.fingerprint().as_str()))
        );
        let id = SongButton::Load.custom_id(&record);
        assert_eq!(SongButton::parse(&id).map(|(k, _)| k), Some(SongButton::Load));
    }

    #[test]
    fn ids_fit_discord_limit_for_long_names() {
        let record = rec(&"x".repeat(300), "/play x");
        assert!(SongButton::Load.custom_id(&record).len() <= 100);
    }

    #[test]
    fn duplicate_names_get_distinct_ids() {
        let a = SongButton::Pick.custom_id(&rec("Faded", "/play faded original"));
        let b = SongButton::Pick.custom_id(&rec("Faded", "/play faded remix"));
        assert_ne!(a, b);
    }

    #[test]
    fn click_resolves_to_the_record_the_button_was_built_for() {
        let mut book = songbot_core::Songbook::new();
        book.insert("Faded", "/play faded original").unwrap();
        book.insert("faded", "/play faded remix").unwrap();

        let older = book.records()[1].clone();
        let id = SongButton::Load.custom_id(&older);
        let (_, fp) = SongButton::parse(&id).unwrap();
        assert_eq!(book.by_fingerprint(fp), Some(&older));

        book.remove("faded");
        assert!(book.by_fingerprint(fp).is_none());
    }

    #[test]
    fn foreign_or_malformed_ids_are_ignored() {
        assert_eq!(SongButton::parse("music_Faded"), None);
        assert_eq!(SongButton::parse("song_pick:"), None);
        assert_eq!(SongButton::parse("song_pick:Faded"), None);
        assert_eq!(SongButton::parse("song_load:zzzzzzzzzzzzzzzz"), None);
    }

    #[test]
    fn clip_counts_characters() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("ééééé", 3).chars().count(), 3);
        assert_eq!(label(&"y".repeat(200)).chars().count(), 80);
    }
}
