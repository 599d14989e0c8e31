//! Regression models module
//!
//! Provides Decision Tree and Random Forest regressors for mapping
//! TF-IDF feature vectors to score estimates.

mod decision_tree;
mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig, TreeNode};
pub use random_forest::{ForestConfig, RandomForest};
