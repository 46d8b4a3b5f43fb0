// Adapters layer: concrete implementations of the domain ports.

pub mod linear_model;

pub use linear_model::{LinearClassifier, LinearModelArtifact, LinearModelType};
