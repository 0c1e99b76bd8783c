//! Persistent song list shared by the bot's commands.
//!
//! The list lives in a single JSON file that is reloaded, mutated and
//! rewritten by every operation. [`SongStore`] serialises those cycles so
//! concurrent commands cannot lose each other's writes.

mod error;
mod legacy;
pub mod policy;
mod songbook;
mod store;

pub use error::StoreError;
pub use policy::{is_authorized, RoleGate, RoleId};
pub use songbook::{Record, Songbook};
pub use store::SongStore;
