//! Regression decision tree

use crate::data::Dataset;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: usize,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// Tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index for split
    pub feature_idx: Option<usize>,
    /// Threshold for split
    pub threshold: Option<f64>,
    /// Mean label of samples in this node
    pub value: f64,
    /// Number of samples in this node
    pub n_samples: usize,
    /// Left child
    pub left: Option<Box<TreeNode>>,
    /// Right child
    pub right: Option<Box<TreeNode>>,
    /// Label variance at this node
    pub impurity: f64,
}

impl TreeNode {
    fn leaf(value: f64, n_samples: usize, impurity: f64) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            value,
            n_samples,
            left: None,
            right: None,
            impurity,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Regression decision tree, split on variance reduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    /// Create a new decision tree with config
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            feature_importances: Vec::new(),
        }
    }

    /// Train the decision tree
    pub fn fit(&mut self, dataset: &Dataset) {
        let n_features = dataset.n_features();
        self.feature_importances = vec![0.0; n_features];

        let indices: Vec<usize> = (0..dataset.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        self.root = Some(self.build_tree(dataset, &indices, 0, &mut rng));

        // Normalize feature importances
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Build tree recursively
    fn build_tree(
        &mut self,
        dataset: &Dataset,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let labels: Vec<f64> = indices.iter().map(|&i| dataset.labels[i]).collect();
        let impurity = variance(&labels);

        // Check stopping conditions
        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(mean(&labels), n, impurity);
        }

        let best_split = self.find_best_split(dataset, indices, rng);

        match best_split {
            Some((feature_idx, threshold, left_indices, right_indices, importance)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(mean(&labels), n, impurity);
                }

                self.feature_importances[feature_idx] += importance;

                let left = self.build_tree(dataset, &left_indices, depth + 1, rng);
                let right = self.build_tree(dataset, &right_indices, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    value: mean(&labels),
                    n_samples: n,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                    impurity,
                }
            }
            None => TreeNode::leaf(mean(&labels), n, impurity),
        }
    }

    /// Find the split with the highest variance reduction
    fn find_best_split(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>, f64)> {
        let n_features = dataset.n_features();
        let max_features = self.config.max_features.unwrap_or(n_features);

        // Random subset of candidate features
        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let labels: Vec<f64> = indices.iter().map(|&i| dataset.labels[i]).collect();
        let parent_impurity = variance(&labels);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>, f64)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| dataset.features[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();

            // Try midpoints between adjacent distinct values as thresholds
            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| dataset.features[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<f64> = left_idx.iter().map(|&i| dataset.labels[i]).collect();
                let right_labels: Vec<f64> =
                    right_idx.iter().map(|&i| dataset.labels[i]).collect();

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let n_total = n_left + n_right;

                let weighted_impurity = (n_left * variance(&left_labels)
                    + n_right * variance(&right_labels))
                    / n_total;
                let gain = parent_impurity - weighted_impurity;

                if gain > best_gain {
                    best_gain = gain;
                    let importance = gain * indices.len() as f64;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx, importance));
                }
            }
        }

        best_split
    }

    /// Predict for a single sample
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        match &self.root {
            Some(node) => traverse(node, features),
            None => 0.0,
        }
    }

    /// Predict for multiple samples
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

fn traverse(node: &TreeNode, features: &[f64]) -> f64 {
    if node.is_leaf() {
        return node.value;
    }

    let feature_idx = node.feature_idx.expect("internal node has a feature");
    let threshold = node.threshold.expect("internal node has a threshold");

    if features[feature_idx] <= threshold {
        traverse(node.left.as_ref().expect("internal node has children"), features)
    } else {
        traverse(node.right.as_ref().expect("internal node has children"), features)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_dataset() -> Dataset {
        let mut dataset = Dataset::new(vec!["x".to_string()]);
        for i in 0..100 {
            let x = i as f64 / 10.0;
            dataset.add_sample(vec![x], 2.0 * x + 1.0, i as i64);
        }
        dataset
    }

    #[test]
    fn test_regression_fit_and_predict() {
        let dataset = linear_dataset();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&dataset);

        let predictions = tree.predict(&dataset);
        assert_eq!(predictions.len(), 100);

        // A depth-10 tree should track a noiseless linear target closely
        let mse: f64 = predictions
            .iter()
            .zip(dataset.labels.iter())
            .map(|(p, l)| (p - l).powi(2))
            .sum::<f64>()
            / 100.0;
        assert!(mse < 1.0);
    }

    #[test]
    fn test_same_seed_gives_same_tree() {
        let dataset = linear_dataset();

        let config = TreeConfig {
            max_features: Some(1),
            seed: 9,
            ..Default::default()
        };

        let mut a = DecisionTree::new(config.clone());
        let mut b = DecisionTree::new(config);
        a.fit(&dataset);
        b.fit(&dataset);

        assert_eq!(a.predict(&dataset), b.predict(&dataset));
    }

    #[test]
    fn test_pure_node_becomes_leaf() {
        let mut dataset = Dataset::new(vec!["x".to_string()]);
        for i in 0..20 {
            dataset.add_sample(vec![i as f64], 3.0, i as i64);
        }

        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&dataset);

        assert!((tree.predict_one(&[5.0]) - 3.0).abs() < 1e-12);
    }
}
