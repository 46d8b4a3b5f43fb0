use crate::domain::forms::{FieldKind, FieldSpec};
use crate::domain::model::{Diagnosis, DiagnosisResult, Disease, FeatureVector, RawInputSet};
use crate::domain::ports::PredictiveModel;
use crate::utils::error::{PredictError, Result};

pub const MODEL_NOT_LOADED: &str = "model was not loaded at startup";

/// 將單一欄位轉成數值，前後空白會被忽略；空字串、無法解析或非有限數值都回傳 None
pub fn coerce(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// 對齊原始輸入與欄位定義，並排除 metadata 欄位。
///
/// 輸入可以是整張表單（每個列出的欄位一個值），也可以只包含數值欄位。
pub fn numeric_inputs<'a>(
    disease: Disease,
    raw: &'a RawInputSet,
) -> Result<Vec<(&'static FieldSpec, &'a str)>> {
    let fields = disease.fields();
    let expected = disease.feature_count();

    let pairs: Vec<(&'static FieldSpec, &'a str)> = if raw.len() == fields.len() {
        fields
            .iter()
            .zip(raw.values())
            .filter(|(field, _)| field.kind == FieldKind::Numeric)
            .map(|(field, value)| (field, value.as_str()))
            .collect()
    } else if raw.len() == expected {
        disease
            .numeric_fields()
            .zip(raw.values())
            .map(|(field, value)| (field, value.as_str()))
            .collect()
    } else {
        return Err(PredictError::FieldCount {
            disease,
            expected,
            actual: raw.len(),
        });
    };

    Ok(pairs)
}

/// 轉換所有欄位後才判斷結果，錯誤會列出每一個無效欄位
pub fn coerce_all(disease: Disease, raw: &RawInputSet) -> Result<FeatureVector> {
    let inputs = numeric_inputs(disease, raw)?;

    let mut values = Vec::with_capacity(inputs.len());
    let mut invalid_fields = Vec::new();

    for (field, value) in inputs {
        match coerce(value) {
            Some(number) => values.push(number),
            None => invalid_fields.push(field.key.to_string()),
        }
    }

    if !invalid_fields.is_empty() {
        tracing::debug!(
            "Rejected {} input: invalid fields {:?}",
            disease,
            invalid_fields
        );
        return Err(PredictError::InputValidation { invalid_fields });
    }

    FeatureVector::new(values).ok_or_else(|| PredictError::InputValidation {
        invalid_fields: Vec::new(),
    })
}

/// 驗證輸入並呼叫模型一次。
///
/// Validation always runs before the model is consulted, so invalid input is
/// reported even when the model is missing.
pub fn infer(
    disease: Disease,
    raw: &RawInputSet,
    model: Option<&dyn PredictiveModel>,
) -> DiagnosisResult {
    let features = coerce_all(disease, raw)?;

    let model = model.ok_or_else(|| PredictError::ModelUnavailable {
        disease,
        reason: MODEL_NOT_LOADED.to_string(),
    })?;

    let prediction = model.predict(&features).map_err(|e| match e {
        PredictError::ModelInvocation { .. } => e,
        other => PredictError::ModelInvocation {
            disease,
            message: other.to_string(),
        },
    })?;

    tracing::debug!("{} model returned class {}", disease, prediction);

    Ok(Diagnosis::from_prediction(disease, prediction))
}
