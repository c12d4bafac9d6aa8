// ============================================================
// Layer 2 — ExploreUseCase
// ============================================================
// Loads the stored observations and summarises them for the
// `show` command. Returns None when nothing has been generated.

use anyhow::Result;

use crate::data::store::SqliteStore;
use crate::data::summary::UsageSummary;
use crate::domain::observation::Observation;
use crate::domain::traits::ObservationStore;
use crate::infra::paths::StorageLocation;

pub struct DataOverview {
    /// First rows of the table, in stored order
    pub head:    Vec<Observation>,
    pub summary: UsageSummary,
}

pub struct ExploreUseCase {
    location: StorageLocation,
}

impl ExploreUseCase {
    pub fn new(location: StorageLocation) -> Self {
        Self { location }
    }

    pub fn overview(&self, rows: usize) -> Result<Option<DataOverview>> {
        let observations = SqliteStore::new(self.location.database_path()).load()?;
        if observations.is_empty() {
            return Ok(None);
        }

        let summary = UsageSummary::from_observations(&observations);
        let head    = observations.into_iter().take(rows).collect();
        Ok(Some(DataOverview { head, summary }))
    }
}
