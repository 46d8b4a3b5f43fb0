pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{Settings, TomlConfig};
pub use crate::core::{infer, ModelRegistry, ModelSlot};
pub use domain::model::{Diagnosis, DiagnosisResult, Disease, FeatureVector, RawInputSet};
pub use domain::ports::{ConfigProvider, PredictiveModel};
pub use utils::error::{PredictError, Result};
