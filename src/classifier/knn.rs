//! k-nearest-neighbor gesture classifier
//!
//! Holds the training dataset, persists it through a `DatasetStore` after
//! every mutation, and labels live frames by majority vote among the
//! closest stored samples.

use crate::capture::landmarks::types::Landmark;
use crate::classifier::dataset::{Dataset, FeatureVector};
use crate::classifier::normalize::{euclidean_distance, normalize};
use crate::classifier::store::{DatasetStore, StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Default neighbor count
pub const DEFAULT_K: usize = 5;

/// Best matching gesture for a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub gesture_name: String,
    /// Winning votes divided by the number of neighbors consulted
    pub confidence: f64,
}

pub struct Classifier<S: DatasetStore> {
    dataset: Dataset,
    store: S,
    k: usize,
}

impl<S: DatasetStore> Classifier<S> {
    /// Create a classifier, loading whatever the store holds
    ///
    /// Unreadable or malformed stored data is logged and replaced by an
    /// empty dataset.
    pub fn new(store: S) -> Self {
        Self::with_k(store, DEFAULT_K)
    }

    pub fn with_k(store: S, k: usize) -> Self {
        let dataset = match store.load() {
            Ok(Some(dataset)) => {
                tracing::info!(
                    "Loaded gesture dataset ({} classes, {} samples)",
                    dataset.classes().len(),
                    dataset.total_samples()
                );
                dataset
            }
            Ok(None) => {
                tracing::debug!("No stored gesture dataset, starting empty");
                Dataset::new()
            }
            Err(e) => {
                tracing::warn!("Failed to load gesture dataset, starting empty: {}", e);
                Dataset::new()
            }
        };

        Self {
            dataset,
            store,
            k: k.max(1),
        }
    }

    /// Record a training sample. Returns false if the frame is incomplete.
    pub fn add_sample(&mut self, label: &str, landmarks: &[Landmark]) -> bool {
        let vector = match normalize(landmarks) {
            Ok(vector) => vector,
            Err(e) => {
                tracing::debug!("Skipping sample for '{}': {}", label, e);
                return false;
            }
        };

        self.dataset.push(label, vector);
        tracing::debug!(
            "Added sample for '{}' ({} total)",
            label,
            self.dataset.sample_count(label)
        );
        self.persist();
        true
    }

    /// Label a frame, or `None` for an incomplete frame or empty dataset
    pub fn classify(&self, landmarks: &[Landmark]) -> Option<ClassificationResult> {
        if self.dataset.is_empty() {
            return None;
        }
        let query = normalize(landmarks).ok()?;
        self.classify_vector(&query)
    }

    fn classify_vector(&self, query: &FeatureVector) -> Option<ClassificationResult> {
        let mut neighbors: Vec<(f64, &str)> = self
            .dataset
            .iter_samples()
            .map(|(label, sample)| (euclidean_distance(query, sample), label))
            .collect();

        // stable, so equal distances keep dataset order
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = self.k.min(neighbors.len());
        if k == 0 {
            return None;
        }

        let mut votes: Vec<(&str, usize)> = Vec::new();
        let mut winner: Option<&str> = None;
        let mut max_votes = 0;

        for &(_, label) in &neighbors[..k] {
            let count = match votes.iter_mut().find(|(name, _)| *name == label) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.1
                }
                None => {
                    votes.push((label, 1));
                    1
                }
            };
            // strict comparison: the first class to reach the top count keeps it
            if count > max_votes {
                max_votes = count;
                winner = Some(label);
            }
        }

        winner.map(|name| ClassificationResult {
            gesture_name: name.to_string(),
            confidence: max_votes as f64 / k as f64,
        })
    }

    /// Drop every sample of a gesture
    pub fn remove_gesture(&mut self, label: &str) {
        if self.dataset.remove(label) {
            tracing::info!("Removed gesture '{}'", label);
        }
        self.persist();
    }

    pub fn clear_all(&mut self) {
        self.dataset.clear();
        tracing::info!("Cleared all gesture samples");
        self.persist();
    }

    pub fn gesture_names(&self) -> Vec<String> {
        self.dataset.names()
    }

    pub fn sample_count(&self, label: &str) -> usize {
        self.dataset.sample_count(label)
    }

    pub fn total_samples(&self) -> usize {
        self.dataset.total_samples()
    }

    /// Dataset as the same JSON the stores write
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.dataset)?)
    }

    /// Replace the dataset with exported JSON
    ///
    /// Malformed input leaves the current dataset untouched.
    pub fn import_json(&mut self, json: &str) -> StoreResult<()> {
        let dataset: Dataset = serde_json::from_str(json).map_err(StoreError::Parse)?;
        tracing::info!(
            "Imported gesture dataset ({} classes, {} samples)",
            dataset.classes().len(),
            dataset.total_samples()
        );
        self.dataset = dataset;
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.dataset) {
            tracing::warn!("Failed to save gesture dataset: {}", e);
        }
    }
}
