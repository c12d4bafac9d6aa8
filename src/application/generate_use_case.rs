// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Generates a fresh synthetic dataset and replaces whatever the
// observation table held before.

use anyhow::Result;

use crate::data::generator::{DataGenerator, GenerateConfig};
use crate::data::store::SqliteStore;
use crate::domain::traits::ObservationStore;
use crate::infra::paths::StorageLocation;

pub struct GenerateUseCase {
    config:   GenerateConfig,
    location: StorageLocation,
}

impl GenerateUseCase {
    pub fn new(config: GenerateConfig, location: StorageLocation) -> Self {
        Self { config, location }
    }

    /// Generate and save; returns the number of rows written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;
        tracing::info!(
            "Generating {} days of data from {} (seed: {:?})",
            cfg.days,
            cfg.start_date,
            cfg.seed
        );

        let observations = DataGenerator::new(cfg.seed).generate(cfg.start_date, cfg.days);

        let store = SqliteStore::new(self.location.database_path());
        store.save(&observations)?;

        Ok(observations.len())
    }
}
