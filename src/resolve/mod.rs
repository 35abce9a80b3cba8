// src/resolve/mod.rs
//! Name resolution: noisy scraped names → catalog ids.
//!
//! `variants` expands a name into plausible spellings, `index` maps every
//! spelling of every unresolved entry to its id, and `matcher` walks a page's
//! candidates against that index. All of it is pure; the same catalog and the
//! same page always produce the same assignments.
pub mod index;
pub mod matcher;
pub mod variants;

pub use index::EntityIndex;
pub use matcher::{resolve, MatchAssignment, Tier};
pub use variants::variants;
