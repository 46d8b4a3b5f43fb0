pub mod inference;
pub mod registry;

pub use crate::domain::model::{Diagnosis, DiagnosisResult, Disease, FeatureVector, RawInputSet};
pub use crate::domain::ports::{ConfigProvider, PredictiveModel};
pub use crate::utils::error::Result;
pub use inference::infer;
pub use registry::{ModelRegistry, ModelSlot, ModelStatus};
