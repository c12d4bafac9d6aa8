// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only sees storage through this trait.
// SqliteStore implements it today; an in-memory or CSV store
// could be dropped in without touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::observation::Observation;

// ─── ObservationStore ─────────────────────────────────────────────────────────
/// Whole-table persistence of the dataset.
pub trait ObservationStore {
    /// Replace everything stored with `observations` (overwrite, not append).
    fn save(&self, observations: &[Observation]) -> Result<()>;

    /// All stored observations in their original order.
    /// An empty Vec when nothing has been saved yet.
    fn load(&self) -> Result<Vec<Observation>>;
}
