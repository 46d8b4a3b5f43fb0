use crate::domain::forms::{self, FieldKind, FieldSpec};
use crate::utils::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 三種可預測的疾病，每一種對應一個模型檔
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "heart")]
    HeartDisease,
    #[serde(rename = "parkinsons")]
    Parkinsons,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::HeartDisease, Disease::Parkinsons];

    pub fn slug(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart",
            Disease::Parkinsons => "parkinsons",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::HeartDisease => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinson's Disease Prediction",
        }
    }

    pub fn default_model_file(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes_model.json",
            Disease::HeartDisease => "heart_disease_model.json",
            Disease::Parkinsons => "parkinsons_model.json",
        }
    }

    pub fn positive_label(&self) -> &'static str {
        match self {
            Disease::Diabetes => "The person is diabetic",
            Disease::HeartDisease => "The person has heart disease",
            Disease::Parkinsons => "The person has Parkinson's disease",
        }
    }

    pub fn negative_label(&self) -> &'static str {
        match self {
            Disease::Diabetes => "The person is not diabetic",
            Disease::HeartDisease => "The person does not have heart disease",
            Disease::Parkinsons => "The person does not have Parkinson's disease",
        }
    }

    /// 表單上列出的所有欄位（含非數值的 metadata 欄位）
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Disease::Diabetes => forms::DIABETES_FIELDS,
            Disease::HeartDisease => forms::HEART_DISEASE_FIELDS,
            Disease::Parkinsons => forms::PARKINSONS_FIELDS,
        }
    }

    pub fn numeric_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields()
            .iter()
            .filter(|field| field.kind == FieldKind::Numeric)
    }

    /// 模型預期的特徵數量
    pub fn feature_count(&self) -> usize {
        self.numeric_fields().count()
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disease::Diabetes => write!(f, "diabetes"),
            Disease::HeartDisease => write!(f, "heart disease"),
            Disease::Parkinsons => write!(f, "Parkinson's"),
        }
    }
}

impl FromStr for Disease {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diabetes" => Ok(Disease::Diabetes),
            "heart" | "heart-disease" | "heart_disease" => Ok(Disease::HeartDisease),
            "parkinsons" | "parkinson" | "parkinson's" => Ok(Disease::Parkinsons),
            _ => Err(PredictError::UnknownDisease {
                name: s.to_string(),
            }),
        }
    }
}

/// 使用者輸入的原始字串，一個欄位一個值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputSet(Vec<String>);

impl RawInputSet {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawInputSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for RawInputSet {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// 送進模型的特徵向量，所有值都必須是有限數值
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Returns `None` if any value is NaN or infinite.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.iter().all(|v| v.is_finite()) {
            Some(Self(values))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 一次成功推論的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease: Disease,
    pub prediction: i64,
    pub positive: bool,
    pub label: String,
}

impl Diagnosis {
    /// 只有輸出剛好等於 1 才算陽性
    pub fn from_prediction(disease: Disease, prediction: i64) -> Self {
        let positive = prediction == 1;
        let label = if positive {
            disease.positive_label()
        } else {
            disease.negative_label()
        };

        Self {
            disease,
            prediction,
            positive,
            label: label.to_string(),
        }
    }
}

pub type DiagnosisResult = Result<Diagnosis>;
