//! Labeled training data for the k-NN classifier
//!
//! The dataset keeps classes in insertion order. Classification walks
//! samples in this order before sorting by distance, so equal distances
//! resolve toward older classes. The JSON form is a plain object mapping
//! gesture name to a list of 42-float arrays, written and read in order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length of a normalized feature vector (x,y for 21 landmarks)
pub const FEATURE_LEN: usize = 42;

/// Normalized hand pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap values produced by the normalizer
    pub(crate) fn from_normalized(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), FEATURE_LEN);
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != FEATURE_LEN {
            return Err(format!(
                "feature vector must have {} values, got {}",
                FEATURE_LEN,
                values.len()
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err("feature vector contains non-finite values".to_string());
        }
        Ok(Self(values))
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(vector: FeatureVector) -> Self {
        vector.0
    }
}

/// All samples recorded for one gesture name
#[derive(Debug, Clone, PartialEq)]
pub struct GestureClass {
    pub name: String,
    pub samples: Vec<FeatureVector>,
}

/// Gesture name to samples, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    classes: Vec<GestureClass>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, creating the class on first use
    pub fn push(&mut self, label: &str, sample: FeatureVector) {
        match self.classes.iter_mut().find(|c| c.name == label) {
            Some(class) => class.samples.push(sample),
            None => self.classes.push(GestureClass {
                name: label.to_string(),
                samples: vec![sample],
            }),
        }
    }

    /// Drop a whole class. Returns false if it did not exist.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.name != label);
        self.classes.len() != before
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    pub fn classes(&self) -> &[GestureClass] {
        &self.classes
    }

    pub fn names(&self) -> Vec<String> {
        self.classes.iter().map(|c| c.name.clone()).collect()
    }

    pub fn sample_count(&self, label: &str) -> usize {
        self.classes
            .iter()
            .find(|c| c.name == label)
            .map(|c| c.samples.len())
            .unwrap_or(0)
    }

    pub fn total_samples(&self) -> usize {
        self.classes.iter().map(|c| c.samples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }

    /// Every sample paired with its label, class by class
    pub fn iter_samples(&self) -> impl Iterator<Item = (&str, &FeatureVector)> {
        self.classes
            .iter()
            .flat_map(|c| c.samples.iter().map(move |s| (c.name.as_str(), s)))
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.classes.len()))?;
        for class in &self.classes {
            map.serialize_entry(&class.name, &class.samples)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DatasetVisitor)
    }
}

struct DatasetVisitor;

impl<'de> Visitor<'de> for DatasetVisitor {
    type Value = Dataset;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of gesture names to lists of feature vectors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut dataset = Dataset::new();
        while let Some((name, samples)) = access.next_entry::<String, Vec<FeatureVector>>()? {
            // duplicate keys merge into the first occurrence
            for sample in samples {
                dataset.push(&name, sample);
            }
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(seed: f64) -> FeatureVector {
        FeatureVector::try_from(vec![seed; FEATURE_LEN]).unwrap()
    }

    #[test]
    fn test_push_preserves_class_order() {
        let mut ds = Dataset::new();
        ds.push("wave", vector(1.0));
        ds.push("fist", vector(2.0));
        ds.push("wave", vector(3.0));

        assert_eq!(ds.names(), vec!["wave".to_string(), "fist".to_string()]);
        assert_eq!(ds.sample_count("wave"), 2);
        assert_eq!(ds.sample_count("fist"), 1);
        assert_eq!(ds.sample_count("missing"), 0);
        assert_eq!(ds.total_samples(), 3);

        let labels: Vec<&str> = ds.iter_samples().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["wave", "wave", "fist"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut ds = Dataset::new();
        ds.push("a", vector(0.0));
        ds.push("b", vector(0.0));

        assert!(ds.remove("a"));
        assert!(!ds.remove("a"));
        assert_eq!(ds.names(), vec!["b".to_string()]);

        ds.clear();
        assert!(ds.is_empty());
        assert!(ds.names().is_empty());
    }

    #[test]
    fn test_json_keeps_order() {
        let mut ds = Dataset::new();
        ds.push("zeta", vector(0.5));
        ds.push("alpha", vector(-0.5));

        let json = serde_json::to_string(&ds).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());

        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn test_wrong_length_vector_is_rejected() {
        let json = r#"{"fist": [[0.0, 1.0, 2.0]]}"#;
        assert!(serde_json::from_str::<Dataset>(json).is_err());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<Dataset>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<Dataset>("\"fist\"").is_err());
    }
}
