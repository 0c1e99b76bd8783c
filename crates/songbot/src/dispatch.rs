//! Command logic independent of Discord: permission check, input
//! validation and the store call, returning an [`Outcome`] for the command
//! layer to render.

use std::collections::HashSet;

use songbot_core::{Record, RoleGate, RoleId, SongStore, StoreError};
use tracing::info;

/// Most records a single reply renders.
pub const DISPLAY_LIMIT: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(Record),
    Removed(String),
    Listing { shown: Vec<Record>, total: usize },
    Matches { query: String, shown: Vec<Record>, total: usize },
    /// The song list has no records at all.
    Empty,
    NoResults(String),
    NotFound(String),
    Denied,
    Invalid(&'static str),
}

/// Command stored when `save` is given only a name.
pub fn default_command(name: &str) -> String {
    format!("/play {}", name.trim())
}

pub async fn save(
    store: &SongStore,
    gate: RoleGate,
    caller_roles: &HashSet<RoleId>,
    name: &str,
    command: Option<&str>,
) -> Result<Outcome, StoreError> {
    if !gate.allows(caller_roles) {
        return Ok(Outcome::Denied);
    }
    if name.trim().is_empty() {
        return Ok(Outcome::Invalid("Please give the song a name."));
    }

    let command = match command.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => default_command(name),
    };
    match store.insert(name, &command).await {
        Ok(record) => Ok(Outcome::Saved(record)),
        Err(StoreError::EmptyName) => Ok(Outcome::Invalid("Please give the song a name.")),
        Err(e) => Err(e),
    }
}

pub async fn list(store: &SongStore) -> Outcome {
    let mut records = store.list_all().await;
    if records.is_empty() {
        return Outcome::Empty;
    }
    let total = records.len();
    records.truncate(DISPLAY_LIMIT);
    Outcome::Listing {
        shown: records,
        total,
    }
}

pub async fn search(store: &SongStore, query: &str) -> Outcome {
    let query = query.trim();
    if query.is_empty() {
        return Outcome::Invalid("Please type a song name to search for.");
    }

    let mut hits = store.find(query).await;
    if hits.is_empty() {
        return Outcome::NoResults(query.to_string());
    }
    let total = hits.len();
    hits.truncate(DISPLAY_LIMIT);
    Outcome::Matches {
        query: query.to_string(),
        shown: hits,
        total,
    }
}

pub async fn remove(
    store: &SongStore,
    gate: RoleGate,
    caller_roles: &HashSet<RoleId>,
    name: &str,
) -> Result<Outcome, StoreError> {
    if !gate.allows(caller_roles) {
        return Ok(Outcome::Denied);
    }
    let name = name.trim();
    if name.is_empty() {
        return Ok(Outcome::Invalid("Please give the name of the song to remove."));
    }

    if store.remove(name).await? {
        Ok(Outcome::Removed(name.to_string()))
    } else {
        info!("Remove of unknown song {:?}", name);
        Ok(Outcome::NotFound(name.to_string()))
    }
}
