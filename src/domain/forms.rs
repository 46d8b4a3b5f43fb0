//! 各疾病表單的欄位定義。數值欄位的順序就是模型特徵的順序。

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    /// 只用於顯示，不會送進模型
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn numeric(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Numeric,
    }
}

const fn metadata(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Metadata,
    }
}

pub const DIABETES_FIELDS: &[FieldSpec] = &[
    numeric("Pregnancies", "Number of Pregnancies"),
    numeric("Glucose", "Glucose Level"),
    numeric("BloodPressure", "Blood Pressure Value"),
    numeric("SkinThickness", "Skin Thickness Value"),
    numeric("Insulin", "Insulin Level"),
    numeric("BMI", "BMI Value"),
    numeric("DiabetesPedigreeFunction", "Diabetes Pedigree Function"),
    numeric("Age", "Age"),
];

pub const HEART_DISEASE_FIELDS: &[FieldSpec] = &[
    numeric("age", "Age"),
    numeric("sex", "Sex (0: Female, 1: Male)"),
    numeric("cp", "Chest Pain Type"),
    numeric("trestbps", "Resting Blood Pressure"),
    numeric("chol", "Serum Cholesterol (mg/dl)"),
    numeric("fbs", "Fasting Blood Sugar > 120 mg/dl (1: Yes, 0: No)"),
    numeric("restecg", "Resting ECG Results"),
    numeric("thalach", "Max Heart Rate Achieved"),
    numeric("exang", "Exercise Induced Angina (1: Yes, 0: No)"),
    numeric("oldpeak", "ST Depression Induced by Exercise"),
    numeric("slope", "Slope of the Peak Exercise ST Segment"),
    numeric("ca", "Major Vessels Colored by Fluoroscopy"),
    numeric("thal", "Thal (0: Normal, 1: Fixed Defect, 2: Reversible Defect)"),
];

// name 是錄音檔的識別字串，資料集中其餘 22 欄（不含 status）才是模型特徵
pub const PARKINSONS_FIELDS: &[FieldSpec] = &[
    metadata("name", "name"),
    numeric("MDVP:Fo(Hz)", "MDVP:Fo(Hz)"),
    numeric("MDVP:Fhi(Hz)", "MDVP:Fhi(Hz)"),
    numeric("MDVP:Flo(Hz)", "MDVP:Flo(Hz)"),
    numeric("MDVP:Jitter(%)", "MDVP:Jitter(%)"),
    numeric("MDVP:Jitter(Abs)", "MDVP:Jitter(Abs)"),
    numeric("MDVP:RAP", "MDVP:RAP"),
    numeric("MDVP:PPQ", "MDVP:PPQ"),
    numeric("Jitter:DDP", "Jitter:DDP"),
    numeric("MDVP:Shimmer", "MDVP:Shimmer"),
    numeric("MDVP:Shimmer(dB)", "MDVP:Shimmer(dB)"),
    numeric("Shimmer:APQ3", "Shimmer:APQ3"),
    numeric("Shimmer:APQ5", "Shimmer:APQ5"),
    numeric("MDVP:APQ", "MDVP:APQ"),
    numeric("Shimmer:DDA", "Shimmer:DDA"),
    numeric("NHR", "NHR"),
    numeric("HNR", "HNR"),
    numeric("RPDE", "RPDE"),
    numeric("DFA", "DFA"),
    numeric("spread1", "spread1"),
    numeric("spread2", "spread2"),
    numeric("D2", "D2"),
    numeric("PPE", "PPE"),
];
