use crate::domain::model::{Disease, FeatureVector};
use crate::domain::ports::PredictiveModel;
use crate::utils::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearModelType {
    LinearSvm,
    LogisticRegression,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// 模型檔的 JSON 格式（由訓練端匯出）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub model_type: LinearModelType,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// 線性二元分類器：decision = w·x + b，大於 0 時回傳第二個類別
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    disease: Disease,
    artifact: LinearModelArtifact,
}

impl LinearClassifier {
    pub fn from_file<P: AsRef<Path>>(disease: Disease, path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let content =
            std::fs::read_to_string(&path).map_err(|e| PredictError::ArtifactError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        Self::from_json_str(disease, &content).map_err(|e| match e {
            PredictError::ArtifactError { message, .. } => PredictError::ArtifactError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    pub fn from_json_str(disease: Disease, content: &str) -> Result<Self> {
        let artifact: LinearModelArtifact =
            serde_json::from_str(content).map_err(|e| PredictError::ArtifactError {
                path: "<inline>".to_string(),
                message: format!("JSON parsing error: {}", e),
            })?;
        Self::from_artifact(disease, artifact)
    }

    pub fn from_artifact(disease: Disease, artifact: LinearModelArtifact) -> Result<Self> {
        Self::check_artifact(&artifact).map_err(|message| PredictError::ArtifactError {
            path: "<inline>".to_string(),
            message,
        })?;
        Ok(Self { disease, artifact })
    }

    fn check_artifact(artifact: &LinearModelArtifact) -> std::result::Result<(), String> {
        let n = artifact.coefficients.len();
        if n == 0 {
            return Err("coefficients cannot be empty".to_string());
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients and intercept must be finite".to_string());
        }
        if artifact.classes.len() != 2 {
            return Err(format!(
                "expected exactly 2 classes, found {}",
                artifact.classes.len()
            ));
        }
        if let Some(names) = &artifact.feature_names {
            if names.len() != n {
                return Err(format!(
                    "{} feature names for {} coefficients",
                    names.len(),
                    n
                ));
            }
        }
        if let Some(scaler) = &artifact.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(format!(
                    "scaler has {} means and {} scales for {} coefficients",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite())
                || scaler.mean.iter().any(|m| !m.is_finite())
            {
                return Err("scaler values must be finite and scales non-zero".to_string());
            }
        }
        Ok(())
    }

    pub fn model_type(&self) -> LinearModelType {
        self.artifact.model_type
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.artifact.feature_names.as_deref()
    }

    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        let expected = self.artifact.coefficients.len();
        if features.len() != expected {
            return Err(PredictError::ModelInvocation {
                disease: self.disease,
                message: format!(
                    "expected {} features, got {}",
                    expected,
                    features.len()
                ),
            });
        }

        let x = features.as_slice();
        let dot: f64 = match &self.artifact.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.artifact.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((value, coef), (mean, scale))| coef * (value - mean) / scale)
                .sum(),
            None => x
                .iter()
                .zip(&self.artifact.coefficients)
                .map(|(value, coef)| coef * value)
                .sum(),
        };

        let decision = dot + self.artifact.intercept;
        if !decision.is_finite() {
            return Err(PredictError::ModelInvocation {
                disease: self.disease,
                message: "decision value overflowed".to_string(),
            });
        }
        Ok(decision)
    }
}

impl PredictiveModel for LinearClassifier {
    fn expected_features(&self) -> usize {
        self.artifact.coefficients.len()
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let decision = self.decision_function(features)?;
        // logistic regression: sigmoid(decision) > 0.5 等同 decision > 0
        let class = if decision > 0.0 {
            self.artifact.classes[1]
        } else {
            self.artifact.classes[0]
        };
        Ok(class)
    }
}
