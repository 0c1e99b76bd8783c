use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("song name must not be empty")]
    EmptyName,

    #[error("cannot write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialise song list: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_error_names_the_file() {
        let e = StoreError::Persist {
            path: PathBuf::from("/data/songs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/data/songs.json"));
        assert!(msg.contains("read-only"));
    }

    #[test]
    fn empty_name_display() {
        assert_eq!(StoreError::EmptyName.to_string(), "song name must not be empty");
    }
}
