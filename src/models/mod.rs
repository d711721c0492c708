//! Classifier artifacts and inference

pub mod gateway;
pub mod loader;
pub mod scaler;

pub use loader::{ModelBundle, ScoringSource};
pub use scaler::FeatureScaler;
