use crate::adapters::LinearClassifier;
use crate::core::inference;
use crate::domain::model::{DiagnosisResult, Disease, RawInputSet};
use crate::domain::ports::{ConfigProvider, PredictiveModel};
use crate::utils::error::PredictError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// 單一疾病的模型位置：載入成功或是不可用（附原因）
pub enum ModelSlot {
    Loaded(Box<dyn PredictiveModel>),
    Unavailable { path: PathBuf, reason: String },
}

impl ModelSlot {
    pub fn model(&self) -> Option<&dyn PredictiveModel> {
        match self {
            ModelSlot::Loaded(model) => Some(model.as_ref()),
            ModelSlot::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }

    fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelSlot::Loaded(_) => None,
            ModelSlot::Unavailable { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSlot::Loaded(model) => f
                .debug_struct("Loaded")
                .field("expected_features", &model.expected_features())
                .finish(),
            ModelSlot::Unavailable { path, reason } => f
                .debug_struct("Unavailable")
                .field("path", path)
                .field("reason", reason)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub disease: Disease,
    pub title: &'static str,
    pub available: bool,
    pub reason: Option<String>,
}

/// 啟動時載入一次的唯讀模型集合，明確傳給需要推論的地方
#[derive(Debug)]
pub struct ModelRegistry {
    diabetes: ModelSlot,
    heart_disease: ModelSlot,
    parkinsons: ModelSlot,
}

impl ModelRegistry {
    /// 逐一載入三個模型檔。任何一個失敗只會讓該模型變成不可用，不影響其他模型。
    pub fn load<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let registry = Self {
            diabetes: Self::load_slot(Disease::Diabetes, &config.model_path(Disease::Diabetes)),
            heart_disease: Self::load_slot(
                Disease::HeartDisease,
                &config.model_path(Disease::HeartDisease),
            ),
            parkinsons: Self::load_slot(
                Disease::Parkinsons,
                &config.model_path(Disease::Parkinsons),
            ),
        };

        tracing::info!(
            "📦 Loaded {}/{} models from {}",
            registry.loaded_count(),
            Disease::ALL.len(),
            config.model_dir()
        );
        registry
    }

    fn load_slot(disease: Disease, path: &Path) -> ModelSlot {
        match LinearClassifier::from_file(disease, path) {
            Ok(model) => {
                let expected = disease.feature_count();
                if model.expected_features() != expected {
                    tracing::warn!(
                        "⚠️ {} model at {} expects {} features but the form provides {}",
                        disease,
                        path.display(),
                        model.expected_features(),
                        expected
                    );
                } else {
                    tracing::info!("✅ Loaded {} model from {}", disease, path.display());
                }
                ModelSlot::Loaded(Box::new(model))
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Error loading {} model {}: {}",
                    disease,
                    path.display(),
                    e
                );
                ModelSlot::Unavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn from_slots(diabetes: ModelSlot, heart_disease: ModelSlot, parkinsons: ModelSlot) -> Self {
        Self {
            diabetes,
            heart_disease,
            parkinsons,
        }
    }

    /// 所有模型都不可用的 registry
    pub fn empty() -> Self {
        let unavailable = |disease: Disease| ModelSlot::Unavailable {
            path: PathBuf::from(disease.default_model_file()),
            reason: inference::MODEL_NOT_LOADED.to_string(),
        };
        Self::from_slots(
            unavailable(Disease::Diabetes),
            unavailable(Disease::HeartDisease),
            unavailable(Disease::Parkinsons),
        )
    }

    pub fn with_model(mut self, disease: Disease, model: Box<dyn PredictiveModel>) -> Self {
        *self.slot_mut(disease) = ModelSlot::Loaded(model);
        self
    }

    pub fn slot(&self, disease: Disease) -> &ModelSlot {
        match disease {
            Disease::Diabetes => &self.diabetes,
            Disease::HeartDisease => &self.heart_disease,
            Disease::Parkinsons => &self.parkinsons,
        }
    }

    fn slot_mut(&mut self, disease: Disease) -> &mut ModelSlot {
        match disease {
            Disease::Diabetes => &mut self.diabetes,
            Disease::HeartDisease => &mut self.heart_disease,
            Disease::Parkinsons => &mut self.parkinsons,
        }
    }

    pub fn model(&self, disease: Disease) -> Option<&dyn PredictiveModel> {
        self.slot(disease).model()
    }

    pub fn loaded_count(&self) -> usize {
        Disease::ALL
            .iter()
            .filter(|disease| self.slot(**disease).is_loaded())
            .count()
    }

    /// 用對應的模型執行一次推論；模型不可用時錯誤訊息帶有載入失敗的原因
    pub fn diagnose(&self, disease: Disease, raw: &RawInputSet) -> DiagnosisResult {
        let slot = self.slot(disease);
        inference::infer(disease, raw, slot.model()).map_err(|e| match (e, slot.unavailable_reason()) {
            (PredictError::ModelUnavailable { disease, .. }, Some(reason)) => {
                PredictError::ModelUnavailable {
                    disease,
                    reason: reason.to_string(),
                }
            }
            (e, _) => e,
        })
    }

    pub fn status(&self) -> Vec<ModelStatus> {
        Disease::ALL
            .iter()
            .map(|disease| {
                let slot = self.slot(*disease);
                ModelStatus {
                    disease: *disease,
                    title: disease.title(),
                    available: slot.is_loaded(),
                    reason: slot.unavailable_reason().map(str::to_string),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FeatureVector;
    use crate::utils::error::Result;

    struct Constant(i64);

    impl PredictiveModel for Constant {
        fn expected_features(&self) -> usize {
            8
        }

        fn predict(&self, _features: &FeatureVector) -> Result<i64> {
            Ok(self.0)
        }
    }

    fn diabetes_input() -> RawInputSet {
        vec!["2", "120", "70", "20", "79", "25.5", "0.5", "33"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_empty_registry_reports_unavailable() {
        let registry = ModelRegistry::empty();
        assert_eq!(registry.loaded_count(), 0);

        let err = registry
            .diagnose(Disease::Diabetes, &diabetes_input())
            .unwrap_err();
        assert!(matches!(err, PredictError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_with_model_fills_one_slot() {
        let registry = ModelRegistry::empty().with_model(Disease::Diabetes, Box::new(Constant(1)));
        assert_eq!(registry.loaded_count(), 1);

        let diagnosis = registry
            .diagnose(Disease::Diabetes, &diabetes_input())
            .unwrap();
        assert_eq!(diagnosis.label, "The person is diabetic");

        let status = registry.status();
        assert!(status[0].available);
        assert!(!status[1].available);
        assert!(status[1].reason.is_some());
    }

    #[test]
    fn test_unavailable_reason_is_carried() {
        let registry = ModelRegistry::from_slots(
            ModelSlot::Unavailable {
                path: PathBuf::from("models/diabetes_model.json"),
                reason: "IO error: No such file or directory".to_string(),
            },
            ModelSlot::Loaded(Box::new(Constant(0))),
            ModelSlot::Loaded(Box::new(Constant(0))),
        );

        match registry.diagnose(Disease::Diabetes, &diabetes_input()) {
            Err(PredictError::ModelUnavailable { reason, .. }) => {
                assert!(reason.contains("No such file"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
