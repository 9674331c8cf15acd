//! Reactive, persisted collection of automaton definitions.
//!
//! The [`AutomatonStore`] is the single authoritative owner of all automata
//! in a session. Every mutation computes a full new collection, publishes it
//! on a watch channel (subscribers always see the latest complete snapshot,
//! never deltas) and writes it back to a [`KeyValueStore`] under a fixed key.
//!
//! ## Lifecycle
//!
//! - `open` loads the collection from the backend; a missing or corrupt entry
//!   silently falls back to the empty collection.
//! - Mutations are serialized by an internal mutex around the whole
//!   read-modify-publish-persist cycle, so the store is safe to share across
//!   tasks even though the design only assumes one logical writer.
//! - The initially loaded value is never re-persisted; only mutations write.

mod backend;
mod error;
mod store;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use store::{AutomatonStore, AutomatonView, AUTOMATA_KEY};
