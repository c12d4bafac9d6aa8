// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the winning model of a training run.
//
// What gets saved:
//   best_model.bin — PersistedModel (family + hyperparameters +
//                    fitted parameters), bincode-encoded
//
// Writes go to a NamedTempFile in the same directory which is
// then renamed over the target, so a concurrent reader sees
// either the previous model or the complete new one.
//
// Reference: bincode documentation, tempfile::NamedTempFile::persist
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};
use tempfile::NamedTempFile;

use crate::ml::model::PersistedModel;

pub struct CheckpointManager {
    /// Full path of the model file
    path: PathBuf,
}

impl CheckpointManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Encode and atomically replace the stored model.
    pub fn save_model(&self, model: &PersistedModel) -> Result<()> {
        let staged = self.stage_model(model)?;
        self.commit(staged)
    }

    /// Encode the model into a temp file next to the target without
    /// touching the stored model. [`commit`](Self::commit) moves it in place.
    pub fn stage_model(&self, model: &PersistedModel) -> Result<NamedTempFile> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;

        let bytes = bincode::serialize(model).context("Cannot encode model")?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Cannot create temp file in '{}'", dir.display()))?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;

        tracing::debug!("Staged {} model ({} bytes)", model.family.name(), bytes.len());
        Ok(tmp)
    }

    /// Rename a staged model over the stored one.
    pub fn commit(&self, staged: NamedTempFile) -> Result<()> {
        staged
            .persist(&self.path)
            .with_context(|| format!("Cannot write model to '{}'", self.path.display()))?;
        tracing::debug!("Saved model to '{}'", self.path.display());
        Ok(())
    }

    /// Load the stored model; Ok(None) when none has been saved.
    pub fn load_model(&self) -> Result<Option<PersistedModel>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Cannot read model '{}'", self.path.display()))
            }
        };

        let model = bincode::deserialize(&bytes).with_context(|| {
            format!("Cannot decode model '{}'", self.path.display())
        })?;
        Ok(Some(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::family::ModelFamily;
    use crate::ml::model::{FittedModel, Hyperparams};
    use crate::ml::tree::{RegressionTree, TreeParams};
    use crate::data::dataset::UsageDataset;
    use ndarray::{array, Array2};

    fn tree_model() -> PersistedModel {
        let data = UsageDataset {
            records: Array2::from_shape_vec(
                (4, 5),
                vec![
                    0.0, 0.0, 0.0, 1.0, 300.0,
                    5.0, 0.0, 0.0, 1.0, 60.0,
                    2.0, 0.0, 1.0, 1.0, 340.0,
                    1.0, 1.0, 0.0, 0.0, 20.0,
                ],
            )
            .unwrap(),
            targets: array![90.0, 6.0, 270.0, 0.0],
        };
        let params = TreeParams { max_depth: Some(10), min_samples_split: 2 };
        PersistedModel {
            family: ModelFamily::DecisionTree,
            params: Hyperparams::Tree(params),
            model:  FittedModel::Tree(RegressionTree::fit(&data, params)),
        }
    }

    #[test]
    fn test_missing_model_is_none() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("best_model.bin");
        let ckpt = CheckpointManager::new(&path);
        assert!(!path.exists());
        assert!(ckpt.load_model().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_is_lossless() {
        let dir   = tempfile::tempdir().unwrap();
        let ckpt  = CheckpointManager::new(dir.path().join("models").join("best_model.bin"));
        let model = tree_model();

        ckpt.save_model(&model).unwrap();
        assert_eq!(ckpt.load_model().unwrap(), Some(model));
    }

    #[test]
    fn test_save_overwrites() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("best_model.bin"));

        let mut first = tree_model();
        first.family  = ModelFamily::RandomForest;
        ckpt.save_model(&first).unwrap();

        let second = tree_model();
        ckpt.save_model(&second).unwrap();
        assert_eq!(ckpt.load_model().unwrap(), Some(second));
    }

    #[test]
    fn test_staged_model_is_invisible_until_commit() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("best_model.bin"));

        let staged = ckpt.stage_model(&tree_model()).unwrap();
        assert!(ckpt.load_model().unwrap().is_none());

        ckpt.commit(staged).unwrap();
        assert_eq!(ckpt.load_model().unwrap(), Some(tree_model()));
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("best_model.bin");
        fs::write(&path, b"not a model").unwrap();
        assert!(CheckpointManager::new(path).load_model().is_err());
    }
}
