// src/progress.rs
use std::path::Path;

use crate::store::EntityKind;

/// Lightweight progress reporting used by the resolution run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called when a kind starts, with the number of entries still unresolved.
    fn begin(&mut self, _kind: EntityKind, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// An entry got its asset file.
    fn item_done(&mut self, _id: &str, _path: &Path) {}

    /// An entry ran out of guesses.
    fn item_failed(&mut self, _id: &str) {}

    /// Called at the end of each kind.
    fn finish(&mut self, _kind: EntityKind) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
