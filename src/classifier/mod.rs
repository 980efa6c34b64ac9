//! Gesture classification
//!
//! Normalizes landmark frames into pose vectors and labels them with a
//! k-nearest-neighbor vote over user-recorded training samples.

pub mod dataset;
pub mod knn;
pub mod normalize;
pub mod store;

pub use dataset::{Dataset, FeatureVector, GestureClass, FEATURE_LEN};
pub use knn::{ClassificationResult, Classifier, DEFAULT_K};
pub use normalize::{euclidean_distance, normalize, NormalizeError};
pub use store::{DatasetStore, JsonFileStore, MemoryStore, StoreError, StoreResult, DATASET_KEY};
