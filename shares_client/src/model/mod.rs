//! Data model types owned by the client.
//!
//! - `directory` — the selectable company list and where it comes from.
pub mod directory;
