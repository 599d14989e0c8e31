//! Model evaluation module

mod metrics;

pub use metrics::Metrics;
