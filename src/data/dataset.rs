use anyhow::{bail, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One normalized session ready for training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSample {
    pub features: Vec<f32>,
    pub label:    u8,
}

pub struct SessionDataset {
    samples: Vec<SessionSample>,
}

impl SessionDataset {
    pub fn new(samples: Vec<SessionSample>) -> Self { Self { samples } }

    /// Pair normalized feature rows with their labels.
    /// Any non-zero target counts as the positive class.
    pub fn from_rows(rows: Vec<Vec<f32>>, targets: &[f32]) -> Result<Self> {
        if rows.len() != targets.len() {
            bail!(
                "feature/target length mismatch: {} rows vs {} targets",
                rows.len(), targets.len()
            );
        }
        let samples = rows
            .into_iter()
            .zip(targets)
            .map(|(features, &t)| SessionSample {
                features,
                label: (t != 0.0) as u8,
            })
            .collect();
        Ok(Self::new(samples))
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn positive_count(&self) -> usize {
        self.samples.iter().filter(|s| s.label == 1).count()
    }
}

impl Dataset<SessionSample> for SessionDataset {
    fn get(&self, index: usize) -> Option<SessionSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_labels() {
        let ds = SessionDataset::from_rows(
            vec![vec![0.1], vec![0.2], vec![0.3]],
            &[0.0, 1.0, 0.0],
        ).unwrap();
        assert_eq!(ds.sample_count(), 3);
        assert_eq!(ds.positive_count(), 1);
        assert_eq!(ds.get(1).unwrap().label, 1);
    }

    #[test]
    fn test_from_rows_length_mismatch() {
        assert!(SessionDataset::from_rows(vec![vec![0.1]], &[0.0, 1.0]).is_err());
    }
}
